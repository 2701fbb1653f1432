use innerbuilder_model::MemberKey;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum MergeAction {
  Added,
  Replaced,
  Unchanged,
  /// Left over from an earlier generation with different options or fields.
  Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberChange {
  /// Qualified name of the class that owns the member.
  pub class: String,
  pub member: MemberKey,
  pub action: MergeAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Skipped {member} in '{class}': it collides with a member generated in the same run")]
  MemberConflict { class: String, member: String },
  #[strum(to_string = "Recreated field '{field}' in '{class}': type changed from {previous} to {current}")]
  FieldTypeChanged {
    class: String,
    field: String,
    previous: String,
    current: String,
  },
}

impl GenerationWarning {
  pub fn is_skipped_item(&self) -> bool {
    matches!(self, Self::MemberConflict { .. })
  }
}

/// Why a synthesis request left the model untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SkipReason {
  #[strum(to_string = "no fields were selected")]
  NoFieldsSelected,
  #[strum(to_string = "the target is an interface")]
  Interface,
  #[strum(to_string = "the target is an enum")]
  Enum,
  #[strum(to_string = "the target is abstract")]
  AbstractClass,
  #[strum(to_string = "the target is an inner class; only top-level and static nested classes can have a builder")]
  NotStaticOrTopLevel,
  #[strum(to_string = "the name 'Builder' is taken by a nested interface or enum")]
  BuilderNameTaken,
}

/// Result of a synthesis run that touched the model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationReport {
  pub target: String,
  pub builder_class: String,
  pub builder_created: bool,
  pub changes: Vec<MemberChange>,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationReport {
  #[must_use]
  pub fn new(target: impl Into<String>, builder_class: impl Into<String>) -> Self {
    Self {
      target: target.into(),
      builder_class: builder_class.into(),
      ..Self::default()
    }
  }

  pub fn record_change(&mut self, class: &str, member: MemberKey, action: MergeAction) {
    self.changes.push(MemberChange {
      class: class.to_string(),
      member,
      action,
    });
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }

  #[must_use]
  pub fn count(&self, action: MergeAction) -> usize {
    self.changes.iter().filter(|change| change.action == action).count()
  }

  #[must_use]
  pub fn members_added(&self) -> usize {
    self.count(MergeAction::Added)
  }

  #[must_use]
  pub fn members_replaced(&self) -> usize {
    self.count(MergeAction::Replaced)
  }

  #[must_use]
  pub fn members_unchanged(&self) -> usize {
    self.count(MergeAction::Unchanged)
  }

  #[must_use]
  pub fn members_removed(&self) -> usize {
    self.count(MergeAction::Removed)
  }

  /// `true` when the run left every member exactly as it was.
  #[must_use]
  pub fn is_unchanged(&self) -> bool {
    !self.builder_created && self.members_added() == 0 && self.members_replaced() == 0 && self.members_removed() == 0
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
  Generated(GenerationReport),
  Skipped(SkipReason),
}

impl SynthesisOutcome {
  #[must_use]
  pub const fn report(&self) -> Option<&GenerationReport> {
    match self {
      Self::Generated(report) => Some(report),
      Self::Skipped(_) => None,
    }
  }
}
