use std::collections::{HashMap, HashSet};

use innerbuilder_model::{
  ClassDecl, ClassKind, ClassModel, FieldDecl, JavaType, Member, MemberKey, MethodDecl, Modifier, simple_name,
};
use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::generator::{
  collector::FieldMember,
  constants::{BUILDER_CLASS_NAME, COPY_PARAMETER_NAME},
  error::SynthesisError,
  merge::MemberMerger,
  metrics::{GenerationReport, MergeAction, SkipReason, SynthesisOutcome},
  options::{OptionSet, StaticFactoryName},
  plan::{BuilderPlan, BuilderPlanner, MethodHome, PlacedMethod},
  templates::MemberTemplates,
};

/// Adds or refreshes the nested `Builder` of a class.
///
/// Running it again with the same selection and options leaves the class unchanged.
pub struct BuilderSynthesizer<'o> {
  options: &'o OptionSet,
}

impl<'o> BuilderSynthesizer<'o> {
  pub const fn new(options: &'o OptionSet) -> Self {
    Self { options }
  }

  pub fn synthesize<M: ClassModel + ?Sized>(
    &self,
    model: &mut M,
    target: &str,
    selected: &[FieldMember],
  ) -> Result<SynthesisOutcome, SynthesisError> {
    if selected.is_empty() {
      debug!(class = target, "no fields selected");
      return Ok(SynthesisOutcome::Skipped(SkipReason::NoFieldsSelected));
    }

    let class = model
      .find_class(target)
      .ok_or_else(|| SynthesisError::TargetNotFound(target.to_string()))?;
    if let Some(reason) = skip_reason(&*model, target, class) {
      info!(class = target, %reason, "skipping builder generation");
      return Ok(SynthesisOutcome::Skipped(reason));
    }

    let plan = BuilderPlanner::new(&*model, self.options).plan(target, selected)?;
    let templates = MemberTemplates::new(self.options, target, simple_name(target));

    let target_class = model
      .find_class_mut(target)
      .ok_or_else(|| SynthesisError::TargetVanished(target.to_string()))?;

    let report = apply_plan(target_class, &templates, plan)?;
    info!(
      class = target,
      added = report.members_added(),
      replaced = report.members_replaced(),
      unchanged = report.members_unchanged(),
      removed = report.members_removed(),
      warnings = report.warnings.len(),
      "generated builder"
    );
    Ok(SynthesisOutcome::Generated(report))
  }
}

/// Merges every planned member into the target and its builder.
fn apply_plan(
  target_class: &mut ClassDecl,
  templates: &MemberTemplates<'_>,
  plan: BuilderPlan,
) -> Result<GenerationReport, SynthesisError> {
  let BuilderPlan {
    target,
    builder,
    builder_class,
    target_constructor,
    builder_fields,
    builder_constructor,
    static_factory,
    copy,
    setters,
    build_method,
    ..
  } = plan;
  let mut report = GenerationReport::new(&target, &builder);

  match target_class.nested_class_mut(BUILDER_CLASS_NAME) {
    Some(existing) => {
      templates.decorate_builder_class(existing);
      existing.modifiers.insert(Modifier::Static);
    }
    None => {
      let mut builder_class = builder_class;
      builder_class.package.clone_from(&target_class.package);
      target_class.push_member(Member::Class(builder_class));
      report.builder_created = true;
      report.record_change(&target, MemberKey::Class(BUILDER_CLASS_NAME.to_string()), MergeAction::Added);
    }
  }

  let (on_target, on_builder): (Vec<PlacedMethod>, Vec<PlacedMethod>) = static_factory
    .into_iter()
    .chain(copy)
    .partition(|placed| placed.home == MethodHome::Target);

  let entry_points = target_class
    .nested_class(BUILDER_CLASS_NAME)
    .map(|existing| EntryPoints::new(templates, existing, &builder_fields))
    .ok_or_else(|| SynthesisError::TargetVanished(builder.clone()))?;

  let target_members: Vec<Member> = std::iter::once(target_constructor)
    .chain(on_target.into_iter().map(|placed| placed.method))
    .map(Member::Method)
    .collect();
  merge_all(target_class, &target, target_members, |method| entry_points.is_factory(method), &mut report);

  let builder_decl = target_class
    .nested_class_mut(BUILDER_CLASS_NAME)
    .ok_or_else(|| SynthesisError::TargetVanished(builder.clone()))?;

  let builder_constructor = Member::Method(builder_constructor);
  let build_method = Member::Method(build_method);
  let planned: Vec<MemberKey> = builder_fields
    .iter()
    .map(|field| MemberKey::Field(field.name.clone()))
    .chain(std::iter::once(builder_constructor.key()))
    .chain(on_builder.iter().map(|placed| placed.method.key()))
    .chain(setters.iter().map(MethodDecl::key))
    .chain(std::iter::once(build_method.key()))
    .collect();
  let keep: HashSet<MemberKey> = planned.iter().cloned().collect();

  let mut merger = MemberMerger::new(builder_decl, &builder).with_order(planned);
  merger.retire(
    &keep,
    |method| entry_points.is_constructor(method) || entry_points.is_factory(method),
    &mut report,
  );

  for field in builder_fields {
    merger.merge(Member::Field(field), &mut report);
  }
  write_essential(&mut merger, &builder, builder_constructor, &mut report)?;
  for placed in on_builder {
    merger.merge(Member::Method(placed.method), &mut report);
  }
  for setter in setters {
    merger.merge(Member::Method(setter), &mut report);
  }
  write_essential(&mut merger, &builder, build_method, &mut report)?;

  Ok(report)
}

/// Retires stale members of `class` that `is_stale` recognises, then merges `members` in order.
fn merge_all(
  class: &mut ClassDecl,
  class_name: &str,
  members: Vec<Member>,
  is_stale: impl Fn(&MethodDecl) -> bool,
  report: &mut GenerationReport,
) {
  let planned: Vec<MemberKey> = members.iter().map(Member::key).collect();
  let keep: HashSet<MemberKey> = planned.iter().cloned().collect();

  let mut merger = MemberMerger::new(class, class_name).with_order(planned);
  merger.retire(&keep, is_stale, report);
  for member in members {
    merger.merge(member, report);
  }
}

/// Recognises builder constructors and static factories an earlier run may have generated.
///
/// Their parameters are either builder fields, by name and type, or the single `copy` of the
/// target class.
struct EntryPoints {
  fields: HashMap<String, JavaType>,
  target_type: JavaType,
  builder_type: JavaType,
  factory_names: HashSet<String>,
}

impl EntryPoints {
  fn new(templates: &MemberTemplates<'_>, existing: &ClassDecl, planned: &[FieldDecl]) -> Self {
    let fields = existing
      .fields()
      .chain(planned)
      .map(|field| (field.name.clone(), field.ty.clone()))
      .collect();
    let factory_names = StaticFactoryName::iter()
      .map(|name| name.method_name(templates.target_name()))
      .collect();

    Self {
      fields,
      target_type: templates.target_type().clone(),
      builder_type: templates.builder_type().clone(),
      factory_names,
    }
  }

  fn takes_builder_inputs(&self, method: &MethodDecl) -> bool {
    match method.params.as_slice() {
      [param] if param.name == COPY_PARAMETER_NAME && param.ty == self.target_type => true,
      params => params
        .iter()
        .all(|param| self.fields.get(&param.name) == Some(&param.ty)),
    }
  }

  fn is_constructor(&self, method: &MethodDecl) -> bool {
    method.is_constructor() && method.name == BUILDER_CLASS_NAME && self.takes_builder_inputs(method)
  }

  fn is_factory(&self, method: &MethodDecl) -> bool {
    method.is_static()
      && method.returns.as_ref() == Some(&self.builder_type)
      && self.factory_names.contains(&method.name)
      && self.takes_builder_inputs(method)
  }
}

/// Writes a member the builder cannot work without.
fn write_essential(
  merger: &mut MemberMerger<'_>,
  class: &str,
  member: Member,
  report: &mut GenerationReport,
) -> Result<(), SynthesisError> {
  let key = member.key();
  if merger.merge(member, report) {
    Ok(())
  } else {
    Err(SynthesisError::EssentialMemberConflict {
      class: class.to_string(),
      member: key.to_string(),
    })
  }
}

fn skip_reason<M: ClassModel + ?Sized>(model: &M, target: &str, class: &ClassDecl) -> Option<SkipReason> {
  match class.kind {
    ClassKind::Interface => Some(SkipReason::Interface),
    ClassKind::Enum => Some(SkipReason::Enum),
    ClassKind::Class if class.is_abstract() => Some(SkipReason::AbstractClass),
    ClassKind::Class if model.is_nested(target) && !class.is_static() => Some(SkipReason::NotStaticOrTopLevel),
    ClassKind::Class => class
      .nested_class(BUILDER_CLASS_NAME)
      .is_some_and(|builder| builder.kind != ClassKind::Class)
      .then_some(SkipReason::BuilderNameTaken),
  }
}
