use innerbuilder_model::{JavaType, PrimitiveKind};

use crate::generator::{
  constants::{SETTER_PARAMETER_FALLBACK_NAME, SETTER_PARAMETER_NAME},
  options::SetterNotation,
};

/// Constant-style names such as `MAX_SIZE` contain no lowercase letter.
pub(crate) fn has_lower_case_char(name: &str) -> bool {
  name.chars().any(char::is_lowercase)
}

/// Hungarian-style member prefix: one lowercase letter followed by an uppercase one (`mName`).
pub(crate) fn has_one_letter_prefix(name: &str) -> bool {
  let mut chars = name.chars();
  matches!(
    (chars.next(), chars.next()),
    (Some(first), Some(second)) if first.is_lowercase() && second.is_uppercase()
  )
}

/// Uppercases the first letter of `name`, dropping a one-letter member prefix.
///
/// `name` becomes `Name`, `mName` becomes `Name`.
pub(crate) fn capitalize(name: &str) -> String {
  let rest = if has_one_letter_prefix(name) {
    let mut chars = name.chars();
    chars.next();
    chars.as_str()
  } else {
    name
  };

  let mut chars = rest.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// The `set<Name>` method a hand-written class would expose for `field`.
pub(crate) fn conventional_setter_name(field: &str) -> String {
  format!("set{}", capitalize(field))
}

/// Accessor names a hand-written class would expose for `field`: `get<Name>`, plus
/// `is<Name>` for a primitive `boolean`.
pub(crate) fn conventional_getter_names(field: &str, ty: &JavaType) -> Vec<String> {
  let capitalized = capitalize(field);
  let mut names = vec![format!("get{capitalized}")];
  if *ty == JavaType::Primitive(PrimitiveKind::Boolean) {
    names.push(format!("is{capitalized}"));
  }
  names
}

pub(crate) fn setter_method_name(field: &str, notation: SetterNotation) -> String {
  match notation {
    SetterNotation::Plain => field.to_string(),
    SetterNotation::With => format!("with{}", capitalize(field)),
    SetterNotation::Set => conventional_setter_name(field),
  }
}

pub(crate) fn setter_parameter_name(field: &str, use_field_name: bool) -> String {
  if use_field_name {
    field.to_string()
  } else if field == SETTER_PARAMETER_NAME {
    SETTER_PARAMETER_FALLBACK_NAME.to_string()
  } else {
    SETTER_PARAMETER_NAME.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_capitalize() {
    let cases = [
      ("name", "Name"),
      ("mName", "Name"),
      ("xCoordinate", "Coordinate"),
      ("url", "Url"),
      ("URL", "URL"),
      ("a", "A"),
      ("", ""),
      ("_id", "_id"),
      ("éclair", "Éclair"),
    ];
    for (input, expected) in cases {
      assert_eq!(capitalize(input), expected, "capitalize({input:?})");
    }
  }

  #[test]
  fn test_has_lower_case_char() {
    assert!(has_lower_case_char("maxSize"));
    assert!(has_lower_case_char("A_b"));
    assert!(!has_lower_case_char("MAX_SIZE"));
    assert!(!has_lower_case_char("_1"));
  }

  #[test]
  fn test_setter_method_names() {
    assert_eq!(setter_method_name("name", SetterNotation::Plain), "name");
    assert_eq!(setter_method_name("name", SetterNotation::With), "withName");
    assert_eq!(setter_method_name("mName", SetterNotation::Set), "setName");
  }

  #[test]
  fn test_conventional_getter_names() {
    assert_eq!(conventional_getter_names("mName", &JavaType::string()), vec!["getName"]);
    assert_eq!(
      conventional_getter_names("active", &JavaType::Primitive(PrimitiveKind::Boolean)),
      vec!["getActive", "isActive"]
    );
  }

  #[test]
  fn test_setter_parameter_names() {
    assert_eq!(setter_parameter_name("name", false), "val");
    assert_eq!(setter_parameter_name("val", false), "value");
    assert_eq!(setter_parameter_name("name", true), "name");
  }
}
