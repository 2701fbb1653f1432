use innerbuilder_model::{
  ClassDecl, ClassKind, ClassModel, ClassRepository, Expr, Member, MemberKind, MethodDecl, Modifier, Statement,
};

use super::support::{
  builder_class, class, collect, field, generate, java_type, member_names, modifiers, person_model, qualified, render,
  repository, setter_method, subclass, target_class,
};
use crate::generator::{
  error::SynthesisError,
  metrics::{GenerationWarning, MergeAction, SkipReason, SynthesisOutcome},
  options::{BuilderMethodLocation, OptionSet, StaticFactoryName, ToggleOption},
  synthesizer::BuilderSynthesizer,
};

/// `public <ty> <name>() { return <field>; }`
fn getter_method(name: &str, ty: &str, field: &str) -> Member {
  Member::Method(
    MethodDecl::builder()
      .name(name)
      .returns(java_type(ty))
      .modifiers(modifiers(&[Modifier::Public]))
      .body(vec![Statement::Return(Expr::name(field))])
      .build(),
  )
}

fn person() -> String {
  qualified("Person")
}

fn generate_person(options: &OptionSet) -> String {
  let mut model = person_model();
  generate(&mut model, &person(), options);
  render(&model, &person())
}

fn skip_reason_for(model: &mut ClassRepository, target: &str) -> SkipReason {
  let fields = collect(model, target);
  let before = model.to_document().classes;
  let outcome = BuilderSynthesizer::new(&OptionSet::new())
    .synthesize(model, target, &fields)
    .expect("synthesis runs");
  assert_eq!(model.to_document().classes, before, "skipped run must not touch the model");
  match outcome {
    SynthesisOutcome::Skipped(reason) => reason,
    SynthesisOutcome::Generated(report) => panic!("unexpected generation: {report:?}"),
  }
}

#[test]
fn test_default_options_generate_builder() {
  let expected = "\
public class Person {
    private final String id;
    private String name;
    private int age;

    private Person(Builder builder) {
        id = builder.id;
        name = builder.name;
        age = builder.age;
    }

    public static final class Builder {
        private final String id;
        private String name;
        private int age;

        public Builder(String id) {
            this.id = id;
        }

        public Builder name(String val) {
            name = val;
            return this;
        }

        public Builder age(int val) {
            age = val;
            return this;
        }

        public Person build() {
            return new Person(this);
        }
    }
}
";
  assert_eq!(generate_person(&OptionSet::new()), expected);
}

#[test]
fn test_report_describes_first_and_second_run() {
  let mut model = person_model();
  let first = generate(&mut model, &person(), &OptionSet::new());

  assert!(first.builder_created);
  assert_eq!(first.target, "com.acme.Person");
  assert_eq!(first.builder_class, "com.acme.Person.Builder");
  assert_eq!(first.members_replaced(), 0);
  assert!(first.warnings.is_empty());
  // Builder class, target constructor, three fields, builder constructor, two setters, build().
  assert_eq!(first.members_added(), 9);

  let after_first = model.to_document().classes;
  let second = generate(&mut model, &person(), &OptionSet::new());

  assert!(!second.builder_created);
  assert!(second.is_unchanged());
  assert_eq!(second.members_unchanged(), 8);
  assert_eq!(model.to_document().classes, after_first);
}

#[test]
fn test_setter_count_matches_mutable_fields() {
  let mut model = person_model();
  generate(&mut model, &person(), &OptionSet::new());

  let builder = builder_class(&model, &person());
  let setters = builder
    .methods()
    .filter(|method| !method.is_constructor() && method.name != "build")
    .count();
  let mutable = builder.fields().filter(|field| !field.is_final()).count();
  assert_eq!(setters, 2);
  assert_eq!(setters, mutable);
}

#[test]
fn test_zero_fields_changes_nothing() {
  let mut model = person_model();
  let before = model.to_document().classes;

  let outcome = BuilderSynthesizer::new(&OptionSet::new())
    .synthesize(&mut model, &person(), &[])
    .expect("synthesis runs");

  assert_eq!(outcome, SynthesisOutcome::Skipped(SkipReason::NoFieldsSelected));
  assert_eq!(model.to_document().classes, before);
}

#[test]
fn test_unknown_target_is_an_error() {
  let mut model = person_model();
  let fields = collect(&model, &person());

  let result = BuilderSynthesizer::new(&OptionSet::new()).synthesize(&mut model, "com.acme.Missing", &fields);
  assert!(matches!(result, Err(SynthesisError::TargetNotFound(name)) if name == "com.acme.Missing"));
}

#[test]
fn test_with_notation_prefixes_setters() {
  let java = generate_person(&OptionSet::new().with(ToggleOption::WithNotation));
  assert!(java.contains("public Builder withName(String val) {"));
  assert!(java.contains("public Builder withAge(int val) {"));
}

#[test]
fn test_with_notation_wins_over_set_notation() {
  let java = generate_person(&OptionSet::new().with(ToggleOption::SetNotation));
  assert!(java.contains("public Builder setName(String val) {"));

  let java = generate_person(
    &OptionSet::new()
      .with(ToggleOption::SetNotation)
      .with(ToggleOption::WithNotation),
  );
  assert!(java.contains("public Builder withName(String val) {"));
  assert!(!java.contains("setName"));
}

#[test]
fn test_final_setters_make_every_field_mutable() {
  let java = generate_person(&OptionSet::new().with(ToggleOption::FinalSetters));

  assert!(java.contains("        private String id;\n"));
  assert!(java.contains("        public Builder() {\n        }\n"));
  assert!(java.contains("public Builder id(String val) {"));
  assert!(java.contains("        id = builder.id;\n"));
}

#[test]
fn test_switching_final_setters_clears_final_on_builder_field() {
  let mut model = person_model();
  generate(&mut model, &person(), &OptionSet::new());
  let report = generate(&mut model, &person(), &OptionSet::new().with(ToggleOption::FinalSetters));

  let builder = builder_class(&model, &person());
  let id = builder.field("id").expect("builder field");
  assert!(!id.is_final());
  assert_eq!(
    member_names(builder),
    vec!["id", "name", "age", "Builder", "id", "name", "age", "build"]
  );
  let constructors: Vec<usize> = builder
    .methods()
    .filter(|method| method.is_constructor())
    .map(|method| method.params.len())
    .collect();
  assert_eq!(constructors, vec![0]);

  let action_of = |member: &str| {
    report
      .changes
      .iter()
      .find(|change| change.member.to_string() == member)
      .map(|change| change.action)
  };
  assert_eq!(action_of("id"), Some(MergeAction::Replaced));
  assert_eq!(action_of("name(String)"), Some(MergeAction::Unchanged));
  assert_eq!(action_of("age(int)"), Some(MergeAction::Unchanged));
  assert_eq!(action_of("constructor(String)"), Some(MergeAction::Removed));
  assert_eq!(report.members_removed(), 1);
}

#[test]
fn test_switching_final_setters_replaces_static_factory() {
  let mut model = person_model();
  let factory = OptionSet::new().with(ToggleOption::StaticFactory);
  generate(&mut model, &person(), &factory);
  let report = generate(&mut model, &person(), &factory.with(ToggleOption::FinalSetters));

  let target = target_class(&model, &person());
  let factories: Vec<usize> = target
    .methods()
    .filter(|method| method.name == "newBuilder")
    .map(|method| method.params.len())
    .collect();
  assert_eq!(factories, vec![0]);
  assert_eq!(member_names(target), vec!["id", "name", "age", "Person", "newBuilder", "Builder"]);

  let builder = builder_class(&model, &person());
  assert_eq!(builder.methods().filter(|method| method.is_constructor()).count(), 1);
  assert_eq!(report.members_removed(), 2);

  let options = OptionSet::new()
    .with(ToggleOption::StaticFactory)
    .with(ToggleOption::FinalSetters);
  let again = generate(&mut model, &person(), &options);
  assert!(again.is_unchanged(), "{again:?}");
}

#[test]
fn test_hand_written_builder_with_simple_names_is_refreshed_in_place() {
  let mut model = ClassRepository::from_json(
    r#"{
      "classes": [
        {
          "name": "Person",
          "package": "com.acme",
          "modifiers": ["public"],
          "members": [
            { "member": "field", "name": "id", "type": "String", "modifiers": ["private", "final"] },
            { "member": "field", "name": "name", "type": "String", "modifiers": ["private"] },
            {
              "member": "method",
              "name": "Person",
              "modifiers": ["private"],
              "params": [{ "name": "builder", "type": "Builder" }],
              "body": [{ "raw": "id = builder.id; name = builder.name;" }]
            },
            {
              "member": "class",
              "name": "Builder",
              "modifiers": ["public", "static", "final"],
              "members": [
                { "member": "field", "name": "id", "type": "String", "modifiers": ["private", "final"] },
                { "member": "field", "name": "name", "type": "String", "modifiers": ["private"] },
                {
                  "member": "method",
                  "name": "Builder",
                  "modifiers": ["public"],
                  "params": [{ "name": "id", "type": "String" }],
                  "body": [
                    { "assign": { "target": { "field": { "receiver": "this", "name": "id" } }, "value": { "name": "id" } } }
                  ]
                },
                {
                  "member": "method",
                  "name": "name",
                  "returns": "Builder",
                  "modifiers": ["public"],
                  "params": [{ "name": "val", "type": "String" }],
                  "body": [
                    { "assign": { "target": { "name": "name" }, "value": { "name": "val" } } },
                    { "return": "this" }
                  ]
                },
                {
                  "member": "method",
                  "name": "build",
                  "returns": "Person",
                  "modifiers": ["public"],
                  "body": [{ "return": { "new": { "type": "Person", "args": ["this"] } } }]
                }
              ]
            }
          ]
        }
      ]
    }"#,
  )
  .expect("valid model");
  let report = generate(&mut model, &person(), &OptionSet::new());

  assert_eq!(report.members_added(), 0, "{report:?}");
  let target = target_class(&model, &person());
  assert_eq!(target.methods().filter(|method| method.is_constructor()).count(), 1);
  let builder = builder_class(&model, &person());
  assert_eq!(builder.methods().filter(|method| method.is_constructor()).count(), 1);
  assert_eq!(member_names(builder), vec!["id", "name", "Builder", "name", "build"]);
}

#[test]
fn test_copy_constructor_without_static_factory() {
  let java = generate_person(&OptionSet::new().with(ToggleOption::CopyConstructor));

  let expected = "
        public Builder(Person copy) {
            this.id = copy.id;
            this.name = copy.name;
            this.age = copy.age;
        }
";
  assert!(java.contains(expected), "{java}");
}

#[test]
fn test_copy_constructor_reads_private_inherited_fields_through_getters() {
  let mut model = repository(vec![
    class(
      "Base",
      vec![
        field("secret", "String", &[Modifier::Private]),
        field("hidden", "String", &[Modifier::Private]),
        getter_method("getSecret", "String", "secret"),
        setter_method("setSecret", "String"),
        setter_method("setHidden", "String"),
      ],
    ),
    subclass("Child", "com.acme.Base", vec![field("name", "String", &[Modifier::Private])]),
  ]);
  let child = qualified("Child");
  generate(&mut model, &child, &OptionSet::new().with(ToggleOption::CopyConstructor));
  let java = render(&model, &child);

  let expected = "
        public Builder(Child copy) {
            this.name = copy.name;
            this.secret = copy.getSecret();
        }
";
  assert!(java.contains(expected), "{java}");
  assert!(!java.contains("copy.hidden"), "{java}");
  assert!(builder_class(&model, &child).field("hidden").is_some());
}

#[test]
fn test_static_factory_in_parent_class() {
  let mut model = person_model();
  generate(&mut model, &person(), &OptionSet::new().with(ToggleOption::StaticFactory));
  let java = render(&model, &person());

  let expected = "
    public static Builder newBuilder(String id) {
        return new Builder(id);
    }
";
  assert!(java.contains(expected), "{java}");
  assert!(java.contains("        private Builder(String id) {\n"));

  let target = target_class(&model, &person());
  let names = member_names(target);
  assert_eq!(names, vec!["id", "name", "age", "Person", "newBuilder", "Builder"]);
}

#[test]
fn test_copy_factory_with_static_factory() {
  let options = OptionSet::new()
    .with(ToggleOption::StaticFactory)
    .with(ToggleOption::CopyConstructor);
  let java = generate_person(&options);

  let expected = "
    public static Builder newBuilder(Person copy) {
        Builder builder = new Builder(copy.id);
        builder.name = copy.name;
        builder.age = copy.age;
        return builder;
    }
";
  assert!(java.contains(expected), "{java}");
}

#[test]
fn test_static_factory_in_builder_with_class_name() {
  let options = OptionSet::new()
    .with(ToggleOption::StaticFactory)
    .with_static_factory_name(StaticFactoryName::NewClassNameBuilder)
    .with_builder_method_location(BuilderMethodLocation::Builder);
  let mut model = person_model();
  generate(&mut model, &person(), &options);

  let builder = builder_class(&model, &person());
  assert!(
    builder
      .methods()
      .any(|method| method.name == "newPersonBuilder" && method.is_static())
  );
  let target = target_class(&model, &person());
  assert!(!target.methods().any(|method| method.name == "newPersonBuilder"));
  assert_eq!(
    member_names(builder),
    vec!["id", "name", "age", "Builder", "newPersonBuilder", "name", "age", "build"]
  );
}

#[test]
fn test_null_checks_guard_reference_parameters() {
  let java = generate_person(&OptionSet::new().with(ToggleOption::NullChecks));

  let constructor = "
        public Builder(String id) {
            Objects.requireNonNull(id, \"id must not be null\");
            this.id = id;
        }
";
  assert!(java.contains(constructor), "{java}");
  assert!(java.contains("            name = Objects.requireNonNull(val, \"name must not be null\");\n"));
  assert!(java.contains("            age = val;\n"));
}

#[test]
fn test_nullability_annotations() {
  let options = OptionSet::new()
    .with(ToggleOption::Jsr305Annotations)
    .with(ToggleOption::FindbugsAnnotations);
  let java = generate_person(&options);

  let setter = "
        @Nonnull
        @NonNull
        public Builder name(@Nonnull @NonNull String val) {
";
  assert!(java.contains(setter), "{java}");
  assert!(java.contains("        public Builder age(int val) {\n"));
  assert!(java.contains("        @NonNull\n        public Person build() {\n"));
}

#[test]
fn test_final_parameters() {
  let java = generate_person(&OptionSet::new().with(ToggleOption::FinalParameters));
  assert!(java.contains("    private Person(final Builder builder) {\n"));
  assert!(java.contains("        public Builder(final String id) {\n"));
  assert!(java.contains("        public Builder name(final String val) {\n"));
}

#[test]
fn test_field_name_parameters() {
  let java = generate_person(&OptionSet::new().with(ToggleOption::FieldNameParameters));
  assert!(java.contains("        public Builder name(String name) {\n            this.name = name;\n"));
}

#[test]
fn test_javadoc_and_pmd_suppression() {
  let options = OptionSet::new()
    .with(ToggleOption::Javadoc)
    .with(ToggleOption::PmdSuppression);
  let mut model = person_model();
  generate(&mut model, &person(), &options);
  generate(&mut model, &person(), &options);
  let java = render(&model, &person());

  let header = "
    /**
     * {@code Person} builder static inner class.
     */
    @SuppressWarnings(\"PMD.AvoidFieldNameMatchingMethodName\")
    public static final class Builder {
";
  assert!(java.contains(header), "{java}");
  assert_eq!(java.matches("@SuppressWarnings").count(), 1);
  assert!(java.contains("         * @param val the {@code name} to set\n"));
  assert!(java.contains("         * @return a {@code Person} built with parameters of this {@code Person.Builder}\n"));
}

#[test]
fn test_conventional_setter_is_used_by_target_constructor() {
  let mut model = repository(vec![class(
    "Person",
    vec![
      field("name", "String", &[Modifier::Private]),
      field("id", "String", &[Modifier::Private, Modifier::Final]),
      setter_method("setName", "String"),
      setter_method("setId", "String"),
    ],
  )]);
  generate(&mut model, &person(), &OptionSet::new());
  let java = render(&model, &person());

  assert!(java.contains("        setName(builder.name);\n"));
  assert!(java.contains("        id = builder.id;\n"));
}

#[test]
fn test_inherited_fields_are_assigned_in_target_constructor() {
  let mut model = repository(vec![
    class("Base", vec![field("note", "String", &[Modifier::Protected])]),
    subclass("Child", "com.acme.Base", vec![field("name", "String", &[Modifier::Private])]),
  ]);
  let child = qualified("Child");
  generate(&mut model, &child, &OptionSet::new());

  let java = render(&model, &child);
  assert!(java.contains("        name = builder.name;\n        note = builder.note;\n"));
  assert!(builder_class(&model, &child).field("note").is_some());
}

#[test]
fn test_retyped_builder_field_is_recreated() {
  let mut model = person_model();
  generate(&mut model, &person(), &OptionSet::new());

  let target = model.find_class_mut(&person()).expect("person");
  target.members[2] = field("age", "long", &[Modifier::Private]);
  let report = generate(&mut model, &person(), &OptionSet::new());

  let age = builder_class(&model, &person()).field("age").expect("age");
  assert_eq!(age.ty.presentable_text(), "long");
  assert!(report.warnings.iter().any(|warning| matches!(
    warning,
    GenerationWarning::FieldTypeChanged { field, previous, current, .. }
      if field == "age" && previous == "int" && current == "long"
  )));
}

#[test]
fn test_colliding_setters_are_reported() {
  let mut model = repository(vec![class(
    "Person",
    vec![
      field("mName", "String", &[Modifier::Private]),
      field("name", "String", &[Modifier::Private]),
    ],
  )]);
  let report = generate(&mut model, &person(), &OptionSet::new().with(ToggleOption::WithNotation));

  assert_eq!(
    report.warnings,
    vec![GenerationWarning::MemberConflict {
      class: "com.acme.Person.Builder".to_string(),
      member: "withName(String)".to_string(),
    }]
  );
  let builder = builder_class(&model, &person());
  assert_eq!(builder.methods().filter(|method| method.name == "withName").count(), 1);
  assert_eq!(builder.fields().count(), 2);
}

#[test]
fn test_existing_builder_is_reused_and_made_static() {
  let existing = ClassDecl::builder()
    .name("Builder")
    .modifiers(modifiers(&[Modifier::Public]))
    .members(vec![field("extra", "String", &[Modifier::Private])])
    .build();
  let mut model = repository(vec![class(
    "Person",
    vec![field("name", "String", &[Modifier::Private]), Member::Class(existing)],
  )]);
  let report = generate(&mut model, &person(), &OptionSet::new());

  assert!(!report.builder_created);
  let builder = builder_class(&model, &person());
  assert!(builder.is_static());
  assert_eq!(member_names(builder), vec!["extra", "name", "Builder", "name", "build"]);
  assert_eq!(
    target_class(&model, &person())
      .members
      .iter()
      .filter(|member| member.kind() == MemberKind::Class)
      .count(),
    1
  );
}

#[test]
fn test_unsupported_targets_are_skipped() {
  let mut interface = class("Shape", vec![field("sides", "int", &[Modifier::Private])]);
  interface.kind = ClassKind::Interface;
  let mut model = repository(vec![interface]);
  assert_eq!(skip_reason_for(&mut model, &qualified("Shape")), SkipReason::Interface);

  let mut color = class("Color", vec![field("rgb", "int", &[Modifier::Private])]);
  color.kind = ClassKind::Enum;
  let mut model = repository(vec![color]);
  assert_eq!(skip_reason_for(&mut model, &qualified("Color")), SkipReason::Enum);

  let mut shape = class("Shape", vec![field("sides", "int", &[Modifier::Private])]);
  shape.modifiers.insert(Modifier::Abstract);
  let mut model = repository(vec![shape]);
  assert_eq!(skip_reason_for(&mut model, &qualified("Shape")), SkipReason::AbstractClass);

  let inner = ClassDecl::builder()
    .name("Inner")
    .members(vec![field("value", "String", &[Modifier::Private])])
    .build();
  let mut model = repository(vec![class("Outer", vec![Member::Class(inner)])]);
  assert_eq!(
    skip_reason_for(&mut model, "com.acme.Outer.Inner"),
    SkipReason::NotStaticOrTopLevel
  );
}

#[test]
fn test_builder_name_taken_by_interface_is_skipped() {
  let taken = ClassDecl::builder()
    .name("Builder")
    .kind(ClassKind::Interface)
    .build();
  let mut model = repository(vec![class(
    "Person",
    vec![field("name", "String", &[Modifier::Private]), Member::Class(taken)],
  )]);
  assert_eq!(skip_reason_for(&mut model, &person()), SkipReason::BuilderNameTaken);
}

#[test]
fn test_static_nested_class_gets_builder() {
  let nested = ClassDecl::builder()
    .name("Entry")
    .modifiers(modifiers(&[Modifier::Public, Modifier::Static]))
    .members(vec![field("key", "String", &[Modifier::Private])])
    .build();
  let mut model = repository(vec![class("Registry", vec![Member::Class(nested)])]);
  let entry = "com.acme.Registry.Entry";

  let report = generate(&mut model, entry, &OptionSet::new());
  assert_eq!(report.builder_class, "com.acme.Registry.Entry.Builder");

  let builder = builder_class(&model, entry);
  assert_eq!(builder.package, "com.acme");
  assert!(
    builder
      .methods()
      .any(|method| method.name == "build" && method.returns.as_ref().is_some_and(|ty| ty.to_string() == entry))
  );
}
