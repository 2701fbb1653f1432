use std::collections::{HashMap, HashSet};

use innerbuilder_model::{ClassDecl, Member, MemberKey, MemberKind, MethodDecl, Modifier};
use tracing::{debug, trace, warn};

use crate::generator::metrics::{GenerationReport, GenerationWarning, MergeAction};

/// Writes generated members into one class, replacing earlier generations in place.
///
/// Members written by the same merger are tracked so that a second member with an already
/// written key is reported as a conflict instead of silently overwriting the first.
pub(crate) struct MemberMerger<'c> {
  class: &'c mut ClassDecl,
  class_name: String,
  last_written: HashMap<MemberKind, MemberKey>,
  written: HashSet<MemberKey>,
  /// Keys in the order this run writes them.
  order: Vec<MemberKey>,
}

impl<'c> MemberMerger<'c> {
  pub(crate) fn new(class: &'c mut ClassDecl, class_name: impl Into<String>) -> Self {
    Self {
      class,
      class_name: class_name.into(),
      last_written: HashMap::new(),
      written: HashSet::new(),
      order: vec![],
    }
  }

  /// Lets a new member without a written sibling land before the next planned member that
  /// already exists.
  #[must_use]
  pub(crate) fn with_order(mut self, order: impl IntoIterator<Item = MemberKey>) -> Self {
    self.order = order.into_iter().collect();
    self
  }

  /// Removes methods `is_stale` recognises as generated earlier whose key is not in `keep`.
  pub(crate) fn retire(
    &mut self,
    keep: &HashSet<MemberKey>,
    is_stale: impl Fn(&MethodDecl) -> bool,
    report: &mut GenerationReport,
  ) -> usize {
    let retired: Vec<MemberKey> = self
      .class
      .methods()
      .filter(|method| is_stale(*method))
      .map(MethodDecl::key)
      .filter(|key| !keep.contains(key))
      .collect();

    for key in &retired {
      if let Some(index) = self.class.position_of(key) {
        self.class.remove_member(index);
        debug!(class = %self.class_name, member = %key, "removed member left over from an earlier generation");
        report.record_change(&self.class_name, key.clone(), MergeAction::Removed);
      }
    }
    retired.len()
  }

  /// Finds or replaces `member`. Returns `false` when it was skipped as a conflict.
  pub(crate) fn merge(&mut self, member: Member, report: &mut GenerationReport) -> bool {
    let key = member.key();
    let kind = key.kind();

    if !self.written.insert(key.clone()) {
      warn!(class = %self.class_name, member = %key, "member collides with one generated in the same run");
      report.record_warning(GenerationWarning::MemberConflict {
        class: self.class_name.clone(),
        member: key.to_string(),
      });
      return false;
    }

    let action = match self.class.position_of(&key) {
      Some(index) => self.merge_existing(index, member, report),
      None => {
        let index = self.insertion_point(&key);
        self.class.insert_member(index, member);
        MergeAction::Added
      }
    };

    trace!(class = %self.class_name, member = %key, %action, "merged member");
    report.record_change(&self.class_name, key.clone(), action);
    self.last_written.insert(kind, key);
    true
  }

  fn merge_existing(&mut self, index: usize, member: Member, report: &mut GenerationReport) -> MergeAction {
    if self.class.members[index] == member {
      return MergeAction::Unchanged;
    }

    if let (Member::Field(existing), Member::Field(field)) = (&mut self.class.members[index], &member) {
      if existing.ty == field.ty {
        let is_final = field.is_final();
        if existing.is_final() == is_final {
          return MergeAction::Unchanged;
        }
        existing.modifiers.set(Modifier::Final, is_final);
        return MergeAction::Replaced;
      }

      report.record_warning(GenerationWarning::FieldTypeChanged {
        class: self.class_name.clone(),
        field: field.name.clone(),
        previous: existing.ty.presentable_text(),
        current: field.ty.presentable_text(),
      });
      let key = member.key();
      self.class.remove_member(index);
      let index = self.insertion_point(&key);
      self.class.insert_member(index, member);
      return MergeAction::Replaced;
    }

    self.class.replace_member(index, member);
    MergeAction::Replaced
  }

  /// Index a new member with `key` goes to.
  fn insertion_point(&self, key: &MemberKey) -> usize {
    let kind = key.kind();
    let anchor = self
      .last_written
      .get(&kind)
      .and_then(|written| self.class.position_of(written));
    if let Some(index) = anchor {
      return index + 1;
    }

    let upcoming = self
      .order
      .iter()
      .skip_while(|planned| *planned != key)
      .skip(1)
      .filter(|planned| planned.kind() == kind)
      .filter_map(|planned| self.class.position_of(planned))
      .min();
    if let Some(index) = upcoming {
      return index;
    }

    let fallback: &[MemberKind] = match kind {
      MemberKind::Field => &[MemberKind::Field],
      MemberKind::Constructor => &[MemberKind::Constructor, MemberKind::Field],
      MemberKind::Method => &[MemberKind::Method, MemberKind::Constructor, MemberKind::Field],
      MemberKind::Class => return self.class.members.len(),
    };
    fallback
      .iter()
      .find_map(|kind| self.class.last_position_of_kind(*kind))
      .map_or(0, |index| index + 1)
  }
}
