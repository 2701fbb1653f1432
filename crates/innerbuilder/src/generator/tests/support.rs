use innerbuilder_model::{
  ClassDecl, ClassModel, ClassRepository, FieldDecl, JavaRenderer, JavaType, Member, MethodDecl, Modifier, Modifiers,
  Parameter,
};

use crate::generator::{
  collector::{FieldCollector, FieldMember},
  metrics::{GenerationReport, SynthesisOutcome},
  options::OptionSet,
  synthesizer::BuilderSynthesizer,
};

pub(super) const PACKAGE: &str = "com.acme";

pub(super) fn java_type(text: &str) -> JavaType {
  text.parse().expect("valid java type")
}

pub(super) fn modifiers(list: &[Modifier]) -> Modifiers {
  list.iter().copied().collect()
}

pub(super) fn field(name: &str, ty: &str, list: &[Modifier]) -> Member {
  Member::Field(
    FieldDecl::builder()
      .name(name)
      .ty(java_type(ty))
      .modifiers(modifiers(list))
      .build(),
  )
}

pub(super) fn initialized_field(name: &str, ty: &str, list: &[Modifier], initializer: &str) -> Member {
  Member::Field(
    FieldDecl::builder()
      .name(name)
      .ty(java_type(ty))
      .modifiers(modifiers(list))
      .initializer(initializer)
      .build(),
  )
}

/// `public void <name>(<ty> value)`
pub(super) fn setter_method(name: &str, ty: &str) -> Member {
  Member::Method(
    MethodDecl::builder()
      .name(name)
      .returns(JavaType::void())
      .modifiers(modifiers(&[Modifier::Public]))
      .params(vec![Parameter::builder().name("value").ty(java_type(ty)).build()])
      .build(),
  )
}

pub(super) fn class(name: &str, members: Vec<Member>) -> ClassDecl {
  ClassDecl::builder()
    .name(name)
    .package(PACKAGE)
    .modifiers(modifiers(&[Modifier::Public]))
    .members(members)
    .build()
}

pub(super) fn subclass(name: &str, superclass: &str, members: Vec<Member>) -> ClassDecl {
  let mut class = class(name, members);
  class.superclass = Some(superclass.to_string());
  class
}

pub(super) fn repository(classes: Vec<ClassDecl>) -> ClassRepository {
  let mut repository = ClassRepository::new();
  for class in classes {
    repository.insert(class).expect("valid class");
  }
  repository
}

pub(super) fn qualified(name: &str) -> String {
  format!("{PACKAGE}.{name}")
}

/// `class Person { private final String id; private String name; private int age; }`
pub(super) fn person_model() -> ClassRepository {
  repository(vec![class(
    "Person",
    vec![
      field("id", "String", &[Modifier::Private, Modifier::Final]),
      field("name", "String", &[Modifier::Private]),
      field("age", "int", &[Modifier::Private]),
    ],
  )])
}

pub(super) fn collect(model: &ClassRepository, target: &str) -> Vec<FieldMember> {
  FieldCollector::new(model).collect(target).expect("target exists")
}

pub(super) fn collect_names(model: &ClassRepository, target: &str) -> Vec<String> {
  collect(model, target)
    .iter()
    .map(|member| member.name().to_string())
    .collect()
}

/// Collects every candidate of `target` and generates a builder for all of them.
pub(super) fn generate(model: &mut ClassRepository, target: &str, options: &OptionSet) -> GenerationReport {
  let fields = collect(model, target);
  match BuilderSynthesizer::new(options)
    .synthesize(model, target, &fields)
    .expect("synthesis succeeds")
  {
    SynthesisOutcome::Generated(report) => report,
    SynthesisOutcome::Skipped(reason) => panic!("unexpected skip: {reason}"),
  }
}

pub(super) fn target_class<'a>(model: &'a ClassRepository, target: &str) -> &'a ClassDecl {
  model.find_class(target).expect("target exists")
}

pub(super) fn builder_class<'a>(model: &'a ClassRepository, target: &str) -> &'a ClassDecl {
  model.find_class(&format!("{target}.Builder")).expect("builder exists")
}

pub(super) fn render(model: &ClassRepository, target: &str) -> String {
  JavaRenderer::render_class(target_class(model, target))
}

/// Member names of `class` in order, constructors included.
pub(super) fn member_names(class: &ClassDecl) -> Vec<&str> {
  class.members.iter().map(Member::name).collect()
}
