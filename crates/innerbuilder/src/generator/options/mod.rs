//! Generation options.
//!
//! An [`OptionSet`] is an explicit value handed to the synthesizer. Persistence goes through
//! an [`OptionStore`], keyed by `GenerateInnerBuilder.<property>` so stored settings stay
//! readable by other tools that share the same keys.

mod descriptors;
mod store;

use std::collections::BTreeSet;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

pub use descriptors::{
  ChoiceDescriptor, ChoiceValue, OptionDescriptor, ToggleDescriptor, find_descriptor, option_descriptors,
};
pub use store::{MemoryOptionStore, OptionStore};

use crate::generator::constants::OPTION_KEY_PREFIX;

pub(crate) fn property_key(property: &str) -> String {
  format!("{OPTION_KEY_PREFIX}.{property}")
}

fn strip_property_key(key: &str) -> Option<&str> {
  key.strip_prefix(OPTION_KEY_PREFIX)?.strip_prefix('.')
}

/// Independent on/off generation switches. The strum name is the persisted property name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter)]
pub enum ToggleOption {
  #[strum(serialize = "finalSetters")]
  FinalSetters,
  #[strum(serialize = "newBuilderMethod")]
  StaticFactory,
  #[strum(serialize = "copyConstructor")]
  CopyConstructor,
  #[strum(serialize = "withNotation")]
  WithNotation,
  #[strum(serialize = "setNotation")]
  SetNotation,
  #[strum(serialize = "useJSR305Annotations")]
  Jsr305Annotations,
  #[strum(serialize = "useFindbugsAnnotations")]
  FindbugsAnnotations,
  #[strum(serialize = "useNullChecks")]
  NullChecks,
  #[strum(serialize = "suppressAvoidFieldNameMatchingMethodName")]
  PmdSuppression,
  #[strum(serialize = "withJavadoc")]
  Javadoc,
  #[strum(serialize = "finalParameters")]
  FinalParameters,
  #[strum(serialize = "fieldNames")]
  FieldNameParameters,
}

impl ToggleOption {
  #[must_use]
  pub fn key(self) -> String {
    property_key(&self.to_string())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum ChoiceOption {
  #[strum(serialize = "staticBuilderDropdown")]
  StaticFactoryName,
  #[strum(serialize = "builderMethodDropdownLocation")]
  BuilderMethodLocation,
}

impl ChoiceOption {
  #[must_use]
  pub fn key(self) -> String {
    property_key(&self.to_string())
  }
}

/// Name of the generated static factory method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
pub enum StaticFactoryName {
  #[default]
  #[strum(serialize = "staticBuilderNewBuilderName")]
  NewBuilder,
  #[strum(serialize = "staticBuilderBuilderName")]
  Builder,
  #[strum(serialize = "staticBuilderNewClassName")]
  NewClassName,
  #[strum(serialize = "staticBuilderNewClassNameBuilder")]
  NewClassNameBuilder,
}

impl StaticFactoryName {
  #[must_use]
  pub fn method_name(self, class_name: &str) -> String {
    match self {
      Self::NewBuilder => "newBuilder".to_string(),
      Self::Builder => "builder".to_string(),
      Self::NewClassName => format!("new{class_name}"),
      Self::NewClassNameBuilder => format!("new{class_name}Builder"),
    }
  }

  #[must_use]
  pub const fn caption(self) -> &'static str {
    match self {
      Self::NewBuilder => "newBuilder()",
      Self::Builder => "builder()",
      Self::NewClassName => "new[ClassName]()",
      Self::NewClassNameBuilder => "new[ClassName]Builder()",
    }
  }
}

/// Class that receives the static factory and copy factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
pub enum BuilderMethodLocation {
  #[default]
  #[strum(serialize = "builderMethodInParentClass")]
  ParentClass,
  #[strum(serialize = "builderMethodInBuilder")]
  Builder,
}

impl BuilderMethodLocation {
  #[must_use]
  pub const fn caption(self) -> &'static str {
    match self {
      Self::ParentClass => "Inside parent class",
      Self::Builder => "Inside generated Builder class",
    }
  }
}

/// Resolved prefix for builder setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetterNotation {
  Plain,
  With,
  Set,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
  toggles: BTreeSet<ToggleOption>,
  pub static_factory_name: StaticFactoryName,
  pub builder_method_location: BuilderMethodLocation,
}

impl OptionSet {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn with(mut self, option: ToggleOption) -> Self {
    self.toggles.insert(option);
    self
  }

  #[must_use]
  pub fn with_static_factory_name(mut self, name: StaticFactoryName) -> Self {
    self.static_factory_name = name;
    self
  }

  #[must_use]
  pub fn with_builder_method_location(mut self, location: BuilderMethodLocation) -> Self {
    self.builder_method_location = location;
    self
  }

  #[must_use]
  pub fn contains(&self, option: ToggleOption) -> bool {
    self.toggles.contains(&option)
  }

  pub fn set(&mut self, option: ToggleOption, enabled: bool) {
    if enabled {
      self.toggles.insert(option);
    } else {
      self.toggles.remove(&option);
    }
  }

  pub fn enabled(&self) -> impl Iterator<Item = ToggleOption> + '_ {
    self.toggles.iter().copied()
  }

  /// `with` wins over `set` when both notations are enabled.
  #[must_use]
  pub fn setter_notation(&self) -> SetterNotation {
    if self.contains(ToggleOption::WithNotation) {
      SetterNotation::With
    } else if self.contains(ToggleOption::SetNotation) {
      SetterNotation::Set
    } else {
      SetterNotation::Plain
    }
  }

  /// Reads every option from `store`; missing or malformed values fall back to defaults.
  pub fn load(store: &impl OptionStore) -> Self {
    let mut options = Self::new();
    for option in ToggleOption::iter() {
      let enabled = store
        .get(&option.key())
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"));
      options.set(option, enabled);
    }

    options.static_factory_name = load_choice(store, ChoiceOption::StaticFactoryName);
    options.builder_method_location = load_choice(store, ChoiceOption::BuilderMethodLocation);
    options
  }

  pub fn save(&self, store: &mut impl OptionStore) {
    for option in ToggleOption::iter() {
      store.set(&option.key(), self.contains(option).to_string());
    }
    store.set(
      &ChoiceOption::StaticFactoryName.key(),
      property_key(&self.static_factory_name.to_string()),
    );
    store.set(
      &ChoiceOption::BuilderMethodLocation.key(),
      property_key(&self.builder_method_location.to_string()),
    );
  }
}

fn load_choice<T>(store: &impl OptionStore, option: ChoiceOption) -> T
where
  T: std::str::FromStr + Default,
{
  store
    .get(&option.key())
    .and_then(|value| strip_property_key(value.trim()).and_then(|property| property.parse().ok()))
    .unwrap_or_default()
}
