use std::collections::BTreeSet;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Declaration order doubles as the canonical Java modifier order used when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Modifier {
  Public,
  Protected,
  Private,
  Abstract,
  Static,
  Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Visibility {
  Public,
  Protected,
  #[default]
  #[strum(to_string = "package-private")]
  PackagePrivate,
  Private,
}

impl Visibility {
  const fn modifier(self) -> Option<Modifier> {
    match self {
      Self::Public => Some(Modifier::Public),
      Self::Protected => Some(Modifier::Protected),
      Self::PackagePrivate => None,
      Self::Private => Some(Modifier::Private),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifiers(BTreeSet<Modifier>);

impl Modifiers {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn with(mut self, modifier: Modifier) -> Self {
    self.insert(modifier);
    self
  }

  #[must_use]
  pub fn with_visibility(mut self, visibility: Visibility) -> Self {
    self.set_visibility(visibility);
    self
  }

  pub fn insert(&mut self, modifier: Modifier) {
    self.0.insert(modifier);
  }

  pub fn remove(&mut self, modifier: Modifier) {
    self.0.remove(&modifier);
  }

  pub fn set(&mut self, modifier: Modifier, present: bool) {
    if present {
      self.insert(modifier);
    } else {
      self.remove(modifier);
    }
  }

  #[must_use]
  pub fn contains(&self, modifier: Modifier) -> bool {
    self.0.contains(&modifier)
  }

  #[must_use]
  pub fn visibility(&self) -> Visibility {
    if self.contains(Modifier::Public) {
      Visibility::Public
    } else if self.contains(Modifier::Protected) {
      Visibility::Protected
    } else if self.contains(Modifier::Private) {
      Visibility::Private
    } else {
      Visibility::PackagePrivate
    }
  }

  pub fn set_visibility(&mut self, visibility: Visibility) {
    for access in [Modifier::Public, Modifier::Protected, Modifier::Private] {
      self.remove(access);
    }
    if let Some(modifier) = visibility.modifier() {
      self.insert(modifier);
    }
  }

  #[must_use]
  pub fn is_static(&self) -> bool {
    self.contains(Modifier::Static)
  }

  #[must_use]
  pub fn is_final(&self) -> bool {
    self.contains(Modifier::Final)
  }

  #[must_use]
  pub fn is_abstract(&self) -> bool {
    self.contains(Modifier::Abstract)
  }

  pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
    self.0.iter().copied()
  }

  /// Space separated keywords in canonical order, empty for package-private members.
  #[must_use]
  pub fn keywords(&self) -> String {
    self.iter().join(" ")
  }
}

impl FromIterator<Modifier> for Modifiers {
  fn from_iter<T: IntoIterator<Item = Modifier>>(iter: T) -> Self {
    Self(iter.into_iter().collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_visibility_replaces_previous_access_keyword() {
    let mut modifiers = Modifiers::new().with(Modifier::Public).with(Modifier::Static);
    modifiers.set_visibility(Visibility::Private);

    assert_eq!(modifiers.visibility(), Visibility::Private);
    assert_eq!(modifiers.keywords(), "private static");

    modifiers.set_visibility(Visibility::PackagePrivate);
    assert_eq!(modifiers.keywords(), "static");
  }

  #[test]
  fn test_keywords_follow_canonical_order() {
    let modifiers: Modifiers = [Modifier::Final, Modifier::Static, Modifier::Public].into_iter().collect();
    assert_eq!(modifiers.keywords(), "public static final");
  }

  #[test]
  fn test_serde_as_keyword_list() {
    let modifiers: Modifiers = serde_json::from_str(r#"["final", "private"]"#).expect("deserialize");
    assert!(modifiers.is_final());
    assert_eq!(modifiers.visibility(), Visibility::Private);
    assert_eq!(
      serde_json::to_string(&modifiers).expect("serialize"),
      r#"["private","final"]"#
    );
  }
}
