use std::{fmt::Display, sync::LazyLock};

use strum::IntoEnumIterator;

use super::{BuilderMethodLocation, ChoiceOption, OptionSet, StaticFactoryName, ToggleOption, property_key};
use crate::generator::error::OptionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleDescriptor {
  pub option: ToggleOption,
  pub caption: &'static str,
  pub mnemonic: Option<char>,
  pub tooltip: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceValue {
  /// Persisted form of the alternative, e.g. `GenerateInnerBuilder.staticBuilderBuilderName`.
  pub key: String,
  pub caption: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceDescriptor {
  pub option: ChoiceOption,
  pub caption: &'static str,
  pub tooltip: Option<&'static str>,
  /// Alternatives in presentation order; the first is the default.
  pub values: Vec<ChoiceValue>,
}

/// How a host presents one option: a checkbox-like toggle or a drop-down choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionDescriptor {
  Toggle(ToggleDescriptor),
  Choice(ChoiceDescriptor),
}

impl OptionDescriptor {
  #[must_use]
  pub fn key(&self) -> String {
    match self {
      Self::Toggle(toggle) => toggle.option.key(),
      Self::Choice(choice) => choice.option.key(),
    }
  }

  #[must_use]
  pub const fn caption(&self) -> &'static str {
    match self {
      Self::Toggle(toggle) => toggle.caption,
      Self::Choice(choice) => choice.caption,
    }
  }

  #[must_use]
  pub const fn tooltip(&self) -> Option<&'static str> {
    match self {
      Self::Toggle(toggle) => toggle.tooltip,
      Self::Choice(choice) => choice.tooltip,
    }
  }

  /// `true` if `name` is this option's full key or its bare property name.
  #[must_use]
  pub fn matches(&self, name: &str) -> bool {
    let key = self.key();
    key == name || key.rsplit_once('.').is_some_and(|(_, property)| property == name)
  }

  /// Human readable current value of this option in `options`.
  #[must_use]
  pub fn display_value(&self, options: &OptionSet) -> String {
    match self {
      Self::Toggle(toggle) => options.contains(toggle.option).to_string(),
      Self::Choice(choice) => match choice.option {
        ChoiceOption::StaticFactoryName => options.static_factory_name.caption().to_string(),
        ChoiceOption::BuilderMethodLocation => options.builder_method_location.caption().to_string(),
      },
    }
  }

  /// Sets this option in `options` from user input.
  ///
  /// Toggles take `true`/`false`. Choices take an alternative's key, its property name, or
  /// its caption.
  pub fn apply(&self, options: &mut OptionSet, raw: &str) -> Result<(), OptionError> {
    let raw = raw.trim();
    let invalid = || OptionError::InvalidValue {
      key: self.key(),
      value: raw.to_string(),
    };

    match self {
      Self::Toggle(toggle) => {
        let enabled = match raw.to_ascii_lowercase().as_str() {
          "true" | "on" | "yes" => true,
          "false" | "off" | "no" => false,
          _ => return Err(invalid()),
        };
        options.set(toggle.option, enabled);
      }
      Self::Choice(choice) => match choice.option {
        ChoiceOption::StaticFactoryName => {
          options.static_factory_name = resolve_choice(raw, StaticFactoryName::caption).ok_or_else(invalid)?;
        }
        ChoiceOption::BuilderMethodLocation => {
          options.builder_method_location = resolve_choice(raw, BuilderMethodLocation::caption).ok_or_else(invalid)?;
        }
      },
    }
    Ok(())
  }
}

fn resolve_choice<T>(raw: &str, caption: fn(T) -> &'static str) -> Option<T>
where
  T: IntoEnumIterator + Display + Copy,
{
  T::iter().find(|value| {
    let property = value.to_string();
    raw == property || raw == property_key(&property) || raw.eq_ignore_ascii_case(caption(*value))
  })
}

fn choice_values<T>(caption: fn(T) -> &'static str) -> Vec<ChoiceValue>
where
  T: IntoEnumIterator + Display + Copy,
{
  T::iter()
    .map(|value| ChoiceValue {
      key: property_key(&value.to_string()),
      caption: caption(value),
    })
    .collect()
}

fn toggle(
  option: ToggleOption,
  caption: &'static str,
  mnemonic: Option<char>,
  tooltip: Option<&'static str>,
) -> OptionDescriptor {
  OptionDescriptor::Toggle(ToggleDescriptor {
    option,
    caption,
    mnemonic,
    tooltip,
  })
}

static DESCRIPTORS: LazyLock<Vec<OptionDescriptor>> = LazyLock::new(|| {
  vec![
    toggle(
      ToggleOption::FinalSetters,
      "Generate builder methods for final fields",
      Some('f'),
      None,
    ),
    toggle(ToggleOption::StaticFactory, "Generate static builder method", Some('n'), None),
    OptionDescriptor::Choice(ChoiceDescriptor {
      option: ChoiceOption::StaticFactoryName,
      caption: "Static builder naming",
      tooltip: Some("Select what the static builder method should look like."),
      values: choice_values(StaticFactoryName::caption),
    }),
    OptionDescriptor::Choice(ChoiceDescriptor {
      option: ChoiceOption::BuilderMethodLocation,
      caption: "Builder method location",
      tooltip: Some("Select where the builder method should be located."),
      values: choice_values(BuilderMethodLocation::caption),
    }),
    toggle(
      ToggleOption::CopyConstructor,
      "Generate builder copy constructor",
      Some('o'),
      None,
    ),
    toggle(
      ToggleOption::WithNotation,
      "Use 'with...' notation",
      Some('w'),
      Some("Generate builder methods that start with 'with', for example: builder.withName(String name)"),
    ),
    toggle(
      ToggleOption::SetNotation,
      "Use 'set...' notation",
      Some('t'),
      Some("Generate builder methods that start with 'set', for example: builder.setName(String name)"),
    ),
    toggle(
      ToggleOption::Jsr305Annotations,
      "Add JSR-305 @Nonnull annotation",
      Some('j'),
      Some(
        "Add @Nonnull annotations to generated methods and parameters, for example: \
         @Nonnull public Builder withName(@Nonnull String name) { ... }",
      ),
    ),
    toggle(
      ToggleOption::FindbugsAnnotations,
      "Add FindBugs @NonNull annotation",
      Some('b'),
      Some("Add edu.umd.cs.findbugs.annotations.NonNull to generated methods and parameters"),
    ),
    toggle(
      ToggleOption::NullChecks,
      "Add null checks",
      Some('u'),
      Some("Guard reference parameters with Objects.requireNonNull"),
    ),
    toggle(
      ToggleOption::PmdSuppression,
      "Add @SuppressWarnings(\"PMD.AvoidFieldNameMatchingMethodName\") annotation",
      Some('p'),
      Some("Add @SuppressWarnings(\"PMD.AvoidFieldNameMatchingMethodName\") annotation to the generated Builder class"),
    ),
    toggle(
      ToggleOption::Javadoc,
      "Add Javadoc",
      Some('c'),
      Some("Add Javadoc to generated builder class and methods"),
    ),
    toggle(
      ToggleOption::FinalParameters,
      "Declare parameters final",
      Some('l'),
      Some("Add the final modifier to every generated parameter"),
    ),
    toggle(
      ToggleOption::FieldNameParameters,
      "Use field names in setter",
      Some('s'),
      Some(
        "Generate builder methods that has the same parameter names in setter methods as field names, \
         for example: builder.withName(String fieldName)",
      ),
    ),
  ]
});

/// Every option in presentation order.
pub fn option_descriptors() -> &'static [OptionDescriptor] {
  &DESCRIPTORS
}

/// Finds a descriptor by full key or bare property name.
pub fn find_descriptor(name: &str) -> Option<&'static OptionDescriptor> {
  option_descriptors().iter().find(|descriptor| descriptor.matches(name))
}
