use innerbuilder_model::{ClassDecl, ClassModel, FieldDecl, JavaType, MethodDecl, simple_name};
use tracing::debug;

use crate::generator::{
  collector::{FieldMember, find_conventional_getter, find_conventional_setter},
  constants::BUILDER_CLASS_NAME,
  error::SynthesisError,
  options::{BuilderMethodLocation, OptionSet, ToggleOption},
  templates::MemberTemplates,
};

/// Structural fields are fixed by the builder constructor; mutable ones get a setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
  Structural,
  Mutable,
}

/// How the target's private constructor moves a value out of the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetAssignment {
  Direct,
  Setter(String),
}

/// How copy members read a value off an existing instance of the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyRead {
  Field,
  Getter(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedField {
  pub member: FieldMember,
  pub role: FieldRole,
  pub assignment: TargetAssignment,
  /// `None` when neither the field nor an accessor is reachable from the builder.
  pub copy_read: Option<CopyRead>,
}

impl PlannedField {
  #[must_use]
  pub fn name(&self) -> &str {
    self.member.name()
  }

  #[must_use]
  pub const fn ty(&self) -> &JavaType {
    self.member.ty()
  }
}

/// Class that receives a generated static method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodHome {
  Target,
  Builder,
}

impl From<BuilderMethodLocation> for MethodHome {
  fn from(location: BuilderMethodLocation) -> Self {
    match location {
      BuilderMethodLocation::ParentClass => Self::Target,
      BuilderMethodLocation::Builder => Self::Builder,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedMethod {
  pub home: MethodHome,
  pub method: MethodDecl,
}

/// Every member one synthesis run writes, in write order per class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderPlan {
  /// Qualified name of the class being extended.
  pub target: String,
  /// Qualified name of its builder.
  pub builder: String,
  pub fields: Vec<PlannedField>,
  pub builder_class: ClassDecl,
  pub target_constructor: MethodDecl,
  pub builder_fields: Vec<FieldDecl>,
  pub builder_constructor: MethodDecl,
  pub static_factory: Option<PlacedMethod>,
  /// Copy constructor on the builder, or copy factory next to the static factory.
  pub copy: Option<PlacedMethod>,
  pub setters: Vec<MethodDecl>,
  pub build_method: MethodDecl,
}

impl BuilderPlan {
  pub fn structural_fields(&self) -> impl Iterator<Item = &PlannedField> {
    self.fields.iter().filter(|planned| planned.role == FieldRole::Structural)
  }

  pub fn mutable_fields(&self) -> impl Iterator<Item = &PlannedField> {
    self.fields.iter().filter(|planned| planned.role == FieldRole::Mutable)
  }
}

/// Reads the model and options into a [`BuilderPlan`] without touching anything.
pub struct BuilderPlanner<'a, M: ClassModel + ?Sized> {
  model: &'a M,
  options: &'a OptionSet,
}

impl<'a, M: ClassModel + ?Sized> BuilderPlanner<'a, M> {
  pub const fn new(model: &'a M, options: &'a OptionSet) -> Self {
    Self { model, options }
  }

  pub fn plan(&self, target: &str, selected: &[FieldMember]) -> Result<BuilderPlan, SynthesisError> {
    if self.model.find_class(target).is_none() {
      return Err(SynthesisError::TargetNotFound(target.to_string()));
    }

    let fields: Vec<PlannedField> = selected.iter().map(|member| self.plan_field(target, member)).collect();
    let structural: Vec<&PlannedField> = fields
      .iter()
      .filter(|planned| planned.role == FieldRole::Structural)
      .collect();

    let target_name = simple_name(target);
    let templates = MemberTemplates::new(self.options, target, target_name);
    let with_factory = self.options.contains(ToggleOption::StaticFactory);
    let home = MethodHome::from(self.options.builder_method_location);

    let static_factory = with_factory.then(|| PlacedMethod {
      home,
      method: templates.static_factory(&structural),
    });

    let copy = self.options.contains(ToggleOption::CopyConstructor).then(|| {
      if with_factory {
        PlacedMethod {
          home,
          method: templates.copy_factory(&fields),
        }
      } else {
        PlacedMethod {
          home: MethodHome::Builder,
          method: templates.copy_constructor(&fields),
        }
      }
    });

    let plan = BuilderPlan {
      target: target.to_string(),
      builder: format!("{target}.{BUILDER_CLASS_NAME}"),
      builder_class: templates.builder_class(),
      target_constructor: templates.target_constructor(&fields),
      builder_fields: fields.iter().map(|planned| templates.builder_field(planned)).collect(),
      builder_constructor: templates.builder_constructor(&structural, with_factory),
      static_factory,
      copy,
      setters: fields
        .iter()
        .filter(|planned| planned.role == FieldRole::Mutable)
        .map(|planned| templates.setter(planned))
        .collect(),
      build_method: templates.build_method(),
      fields,
    };

    debug!(
      class = %plan.target,
      structural = plan.structural_fields().count(),
      mutable = plan.mutable_fields().count(),
      "planned builder"
    );
    Ok(plan)
  }

  fn plan_field(&self, target: &str, member: &FieldMember) -> PlannedField {
    let role = if member.is_final() && !self.options.contains(ToggleOption::FinalSetters) {
      FieldRole::Structural
    } else {
      FieldRole::Mutable
    };

    let assignment = if member.is_final() {
      TargetAssignment::Direct
    } else {
      find_conventional_setter(self.model, target, &member.field)
        .map_or(TargetAssignment::Direct, TargetAssignment::Setter)
    };

    let visibility = member.field.modifiers.visibility();
    let copy_read = if self.model.is_accessible(&member.declaring_class, visibility, target) {
      Some(CopyRead::Field)
    } else {
      find_conventional_getter(self.model, target, &member.field).map(CopyRead::Getter)
    };
    if copy_read.is_none() {
      debug!(class = target, field = member.name(), "field is not readable from the builder, left out of copies");
    }

    PlannedField {
      member: member.clone(),
      role,
      assignment,
      copy_read,
    }
  }
}
