use std::collections::HashSet;

use innerbuilder_model::{ClassDecl, JavaType, Member, MemberKey, MethodDecl, Modifier, Parameter, Statement};

use super::support::{class, field, java_type, member_names, modifiers};
use crate::generator::{
  merge::MemberMerger,
  metrics::{GenerationReport, GenerationWarning, MergeAction},
};

fn method(name: &str, params: &[(&str, &str)], body: &str) -> Member {
  Member::Method(
    MethodDecl::builder()
      .name(name)
      .returns(JavaType::void())
      .modifiers(modifiers(&[Modifier::Public]))
      .params(
        params
          .iter()
          .map(|(name, ty)| Parameter::builder().name(*name).ty(java_type(ty)).build())
          .collect(),
      )
      .body(vec![Statement::Raw(body.to_string())])
      .build(),
  )
}

fn constructor(name: &str, params: &[(&str, &str)]) -> Member {
  Member::Method(
    MethodDecl::builder()
      .name(name)
      .modifiers(modifiers(&[Modifier::Public]))
      .params(
        params
          .iter()
          .map(|(name, ty)| Parameter::builder().name(*name).ty(java_type(ty)).build())
          .collect(),
      )
      .build(),
  )
}

fn sample() -> ClassDecl {
  class(
    "Sample",
    vec![
      field("a", "String", &[Modifier::Private]),
      field("b", "String", &[Modifier::Private]),
      constructor("Sample", &[]),
      method("run", &[], "go();"),
      Member::Class(class("Inner", vec![])),
    ],
  )
}

fn actions(report: &GenerationReport) -> Vec<MergeAction> {
  report.changes.iter().map(|change| change.action).collect()
}

#[test]
fn test_new_members_go_after_the_last_of_their_kind() {
  let mut sample = sample();
  let mut report = GenerationReport::default();
  let mut merger = MemberMerger::new(&mut sample, "com.acme.Sample");

  assert!(merger.merge(field("c", "int", &[Modifier::Private]), &mut report));
  assert!(merger.merge(constructor("Sample", &[("c", "int")]), &mut report));
  assert!(merger.merge(method("stop", &[], "halt();"), &mut report));
  assert!(merger.merge(Member::Class(class("Other", vec![])), &mut report));

  assert_eq!(
    member_names(&sample),
    vec!["a", "b", "c", "Sample", "Sample", "run", "stop", "Inner", "Other"]
  );
  assert_eq!(actions(&report), vec![MergeAction::Added; 4]);
}

#[test]
fn test_first_members_of_an_empty_class() {
  let mut empty = class("Empty", vec![]);
  let mut report = GenerationReport::default();
  let mut merger = MemberMerger::new(&mut empty, "com.acme.Empty");

  merger.merge(method("run", &[], "go();"), &mut report);
  merger.merge(constructor("Empty", &[]), &mut report);
  merger.merge(field("x", "int", &[Modifier::Private]), &mut report);

  assert_eq!(member_names(&empty), vec!["x", "Empty", "run"]);
}

#[test]
fn test_constructor_goes_after_fields_when_there_is_none() {
  let mut target = class(
    "Target",
    vec![
      field("a", "String", &[Modifier::Private]),
      method("run", &[], "go();"),
    ],
  );
  let mut report = GenerationReport::default();
  MemberMerger::new(&mut target, "com.acme.Target").merge(constructor("Target", &[]), &mut report);

  assert_eq!(member_names(&target), vec!["a", "Target", "run"]);
}

#[test]
fn test_new_member_follows_the_last_written_one() {
  let mut sample = sample();
  let mut report = GenerationReport::default();
  let mut merger = MemberMerger::new(&mut sample, "com.acme.Sample");

  merger.merge(field("a", "String", &[Modifier::Private]), &mut report);
  merger.merge(field("x", "String", &[Modifier::Private]), &mut report);

  assert_eq!(&member_names(&sample)[..3], ["a", "x", "b"]);
  assert_eq!(actions(&report), vec![MergeAction::Unchanged, MergeAction::Added]);
}

#[test]
fn test_identical_member_is_left_untouched() {
  let mut sample = sample();
  let before = sample.clone();
  let mut report = GenerationReport::default();
  let mut merger = MemberMerger::new(&mut sample, "com.acme.Sample");

  merger.merge(method("run", &[], "go();"), &mut report);
  merger.merge(constructor("Sample", &[]), &mut report);

  assert_eq!(sample, before);
  assert_eq!(report.members_unchanged(), 2);
  assert!(report.is_unchanged());
}

#[test]
fn test_method_is_replaced_in_place() {
  let mut sample = sample();
  let mut report = GenerationReport::default();
  MemberMerger::new(&mut sample, "com.acme.Sample").merge(method("run", &[], "goFaster();"), &mut report);

  assert_eq!(member_names(&sample), vec!["a", "b", "Sample", "run", "Inner"]);
  let Member::Method(run) = &sample.members[3] else {
    panic!("expected a method");
  };
  assert_eq!(run.body, vec![Statement::Raw("goFaster();".to_string())]);
  assert_eq!(actions(&report), vec![MergeAction::Replaced]);
}

#[test]
fn test_same_typed_field_keeps_declaration_and_updates_final() {
  let mut target = class(
    "Target",
    vec![super::support::initialized_field(
      "name",
      "String",
      &[Modifier::Private, Modifier::Final],
      "\"x\"",
    )],
  );
  let mut report = GenerationReport::default();
  MemberMerger::new(&mut target, "com.acme.Target").merge(field("name", "String", &[Modifier::Private]), &mut report);

  let name = target.field("name").expect("field kept");
  assert!(!name.is_final());
  assert!(name.has_initializer());
  assert_eq!(actions(&report), vec![MergeAction::Replaced]);
}

#[test]
fn test_retyped_field_is_recreated_with_warning() {
  let mut sample = sample();
  let mut report = GenerationReport::default();
  let mut merger = MemberMerger::new(&mut sample, "com.acme.Sample");

  merger.merge(field("b", "int", &[Modifier::Private]), &mut report);

  assert_eq!(sample.fields().count(), 2);
  assert_eq!(sample.field("b").map(|field| field.ty.clone()), Some(java_type("int")));
  assert_eq!(actions(&report), vec![MergeAction::Replaced]);
  assert_eq!(
    report.warnings,
    vec![GenerationWarning::FieldTypeChanged {
      class: "com.acme.Sample".to_string(),
      field: "b".to_string(),
      previous: "String".to_string(),
      current: "int".to_string(),
    }]
  );
  assert!(!report.warnings[0].is_skipped_item());
}

#[test]
fn test_second_member_with_same_key_is_a_conflict() {
  let mut sample = sample();
  let mut report = GenerationReport::default();
  let mut merger = MemberMerger::new(&mut sample, "com.acme.Sample");

  assert!(merger.merge(method("stop", &[("force", "boolean")], "halt();"), &mut report));
  assert!(!merger.merge(method("stop", &[("now", "boolean")], "kill();"), &mut report));

  assert_eq!(report.changes.len(), 1);
  assert_eq!(report.changes[0].member, MemberKey::Method {
    name: "stop".to_string(),
    params: vec![java_type("boolean")],
  });
  assert_eq!(
    report.warnings,
    vec![GenerationWarning::MemberConflict {
      class: "com.acme.Sample".to_string(),
      member: "stop(boolean)".to_string(),
    }]
  );
  assert!(report.warnings[0].is_skipped_item());

  let Some(Member::Method(stop)) = sample.member(&report.changes[0].member) else {
    panic!("expected stop(boolean)");
  };
  assert_eq!(stop.params[0].name, "force");
}

#[test]
fn test_retire_removes_stale_members_outside_the_plan() {
  let mut sample = sample();
  sample.members.insert(3, constructor("Sample", &[("a", "String")]));
  let mut report = GenerationReport::default();
  let mut merger = MemberMerger::new(&mut sample, "com.acme.Sample");

  let keep = HashSet::from([MemberKey::Constructor(vec![])]);
  let retired = merger.retire(&keep, MethodDecl::is_constructor, &mut report);

  assert_eq!(retired, 1);
  assert_eq!(member_names(&sample), vec!["a", "b", "Sample", "run", "Inner"]);
  assert_eq!(sample.methods().filter(|method| method.is_constructor()).count(), 1);
  assert_eq!(actions(&report), vec![MergeAction::Removed]);
  assert_eq!(report.changes[0].member, MemberKey::Constructor(vec![java_type("String")]));
  assert!(!report.is_unchanged());
}

#[test]
fn test_new_member_lands_before_the_next_planned_one() {
  let mut target = class(
    "Target",
    vec![
      field("a", "String", &[Modifier::Private]),
      method("b", &[], "b();"),
      method("finish", &[], "done();"),
    ],
  );
  let key = |name: &str| MemberKey::Method {
    name: name.to_string(),
    params: vec![],
  };
  let mut report = GenerationReport::default();
  let mut merger = MemberMerger::new(&mut target, "com.acme.Target").with_order([key("a"), key("b"), key("finish")]);

  merger.merge(method("a", &[], "a();"), &mut report);
  merger.merge(method("b", &[], "b();"), &mut report);
  merger.merge(method("finish", &[], "done();"), &mut report);

  assert_eq!(member_names(&target), vec!["a", "a", "b", "finish"]);
  assert_eq!(
    actions(&report),
    vec![MergeAction::Added, MergeAction::Unchanged, MergeAction::Unchanged]
  );
}
