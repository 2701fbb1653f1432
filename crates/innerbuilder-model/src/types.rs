use std::{
  collections::HashSet,
  fmt,
  iter::Peekable,
  str::{Chars, FromStr},
  sync::LazyLock,
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::ModelError;

static JAVA_LANG_TYPES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "Boolean",
    "Byte",
    "CharSequence",
    "Character",
    "Class",
    "Comparable",
    "Double",
    "Enum",
    "Exception",
    "Float",
    "Integer",
    "Iterable",
    "Long",
    "Number",
    "Object",
    "Runnable",
    "RuntimeException",
    "Short",
    "String",
    "StringBuilder",
    "Thread",
    "Throwable",
    "Void",
  ]
  .into_iter()
  .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum PrimitiveKind {
  Boolean,
  Byte,
  Char,
  Short,
  Int,
  Long,
  Float,
  Double,
  Void,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WildcardBound {
  Extends(Box<JavaType>),
  Super(Box<JavaType>),
}

/// Semantic Java type.
///
/// Class names are fully qualified. Equality is structural, so `java.util.List<java.lang.String>`
/// written by a user and produced by the engine compare equal no matter how they were spelled
/// in the source the model was built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum JavaType {
  Primitive(PrimitiveKind),
  Class { name: String, args: Vec<JavaType> },
  Array(Box<JavaType>),
  Wildcard(Option<WildcardBound>),
}

impl JavaType {
  pub fn class(name: impl Into<String>) -> Self {
    Self::Class {
      name: name.into(),
      args: vec![],
    }
  }

  pub fn generic(name: impl Into<String>, args: impl IntoIterator<Item = JavaType>) -> Self {
    Self::Class {
      name: name.into(),
      args: args.into_iter().collect(),
    }
  }

  #[must_use]
  pub fn array_of(element: JavaType) -> Self {
    Self::Array(Box::new(element))
  }

  #[must_use]
  pub fn string() -> Self {
    Self::class("java.lang.String")
  }

  #[must_use]
  pub const fn void() -> Self {
    Self::Primitive(PrimitiveKind::Void)
  }

  #[must_use]
  pub const fn is_primitive(&self) -> bool {
    matches!(self, Self::Primitive(_))
  }

  #[must_use]
  pub const fn is_void(&self) -> bool {
    matches!(self, Self::Primitive(PrimitiveKind::Void))
  }

  /// Fully qualified name of the class type, without type arguments.
  #[must_use]
  pub fn qualified_name(&self) -> Option<&str> {
    match self {
      Self::Class { name, .. } => Some(name),
      _ => None,
    }
  }

  /// Type text with simple class names, as a reader of the source would write it.
  #[must_use]
  pub fn presentable_text(&self) -> String {
    match self {
      Self::Primitive(kind) => kind.to_string(),
      Self::Class { name, args } => {
        let simple = simple_name(name);
        if args.is_empty() {
          simple.to_string()
        } else {
          format!("{simple}<{}>", args.iter().map(Self::presentable_text).join(", "))
        }
      }
      Self::Array(element) => format!("{}[]", element.presentable_text()),
      Self::Wildcard(None) => "?".to_string(),
      Self::Wildcard(Some(WildcardBound::Extends(bound))) => format!("? extends {}", bound.presentable_text()),
      Self::Wildcard(Some(WildcardBound::Super(bound))) => format!("? super {}", bound.presentable_text()),
    }
  }

  /// Every qualified class name referenced by this type, type arguments included.
  #[must_use]
  pub fn referenced_classes(&self) -> Vec<&str> {
    let mut names = vec![];
    self.collect_referenced(&mut names);
    names
  }

  /// Rewrites every class name `resolve` knows a qualified form for, type arguments included.
  pub fn resolve_names(&mut self, resolve: &dyn Fn(&str) -> Option<String>) {
    match self {
      Self::Primitive(_) | Self::Wildcard(None) => {}
      Self::Class { name, args } => {
        if let Some(resolved) = resolve(name) {
          *name = resolved;
        }
        for arg in args {
          arg.resolve_names(resolve);
        }
      }
      Self::Array(element) => element.resolve_names(resolve),
      Self::Wildcard(Some(WildcardBound::Extends(bound) | WildcardBound::Super(bound))) => {
        bound.resolve_names(resolve);
      }
    }
  }

  fn collect_referenced<'a>(&'a self, names: &mut Vec<&'a str>) {
    match self {
      Self::Primitive(_) | Self::Wildcard(None) => {}
      Self::Class { name, args } => {
        names.push(name);
        for arg in args {
          arg.collect_referenced(names);
        }
      }
      Self::Array(element) => element.collect_referenced(names),
      Self::Wildcard(Some(WildcardBound::Extends(bound) | WildcardBound::Super(bound))) => {
        bound.collect_referenced(names);
      }
    }
  }
}

/// Last segment of a dotted name.
#[must_use]
pub fn simple_name(qualified: &str) -> &str {
  qualified.rsplit_once('.').map_or(qualified, |(_, simple)| simple)
}

fn resolve_class_name(name: &str) -> String {
  if !name.contains('.') && JAVA_LANG_TYPES.contains(name) {
    format!("java.lang.{name}")
  } else {
    name.to_string()
  }
}

impl fmt::Display for JavaType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Primitive(kind) => write!(f, "{kind}"),
      Self::Class { name, args } if args.is_empty() => write!(f, "{name}"),
      Self::Class { name, args } => write!(f, "{name}<{}>", args.iter().join(", ")),
      Self::Array(element) => write!(f, "{element}[]"),
      Self::Wildcard(None) => write!(f, "?"),
      Self::Wildcard(Some(WildcardBound::Extends(bound))) => write!(f, "? extends {bound}"),
      Self::Wildcard(Some(WildcardBound::Super(bound))) => write!(f, "? super {bound}"),
    }
  }
}

impl FromStr for JavaType {
  type Err = ModelError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut parser = TypeParser::new(s);
    let parsed = parser.parse_type()?;
    parser.skip_whitespace();
    if parser.chars.peek().is_some() {
      return Err(parser.error("unexpected trailing input"));
    }
    Ok(parsed)
  }
}

impl TryFrom<String> for JavaType {
  type Error = ModelError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<JavaType> for String {
  fn from(value: JavaType) -> Self {
    value.to_string()
  }
}

struct TypeParser<'a> {
  input: &'a str,
  chars: Peekable<Chars<'a>>,
}

impl<'a> TypeParser<'a> {
  fn new(input: &'a str) -> Self {
    Self {
      input,
      chars: input.chars().peekable(),
    }
  }

  fn error(&self, reason: &str) -> ModelError {
    ModelError::InvalidType {
      input: self.input.to_string(),
      reason: reason.to_string(),
    }
  }

  fn skip_whitespace(&mut self) {
    while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
  }

  fn eat(&mut self, expected: char) -> bool {
    self.skip_whitespace();
    self.chars.next_if_eq(&expected).is_some()
  }

  fn identifier(&mut self) -> Option<String> {
    self.skip_whitespace();
    let mut ident = String::new();
    while let Some(c) = self.chars.next_if(|c| c.is_alphanumeric() || *c == '_' || *c == '$') {
      ident.push(c);
    }
    (!ident.is_empty()).then_some(ident)
  }

  fn dotted_name(&mut self) -> Result<String, ModelError> {
    let mut name = self.identifier().ok_or_else(|| self.error("expected a type name"))?;
    while self.eat('.') {
      let segment = self.identifier().ok_or_else(|| self.error("expected a name after '.'"))?;
      name.push('.');
      name.push_str(&segment);
    }
    Ok(name)
  }

  fn parse_type(&mut self) -> Result<JavaType, ModelError> {
    let name = self.dotted_name()?;
    let mut parsed = if let Ok(kind) = name.parse::<PrimitiveKind>() {
      JavaType::Primitive(kind)
    } else {
      let mut args = vec![];
      if self.eat('<') {
        loop {
          args.push(self.parse_argument()?);
          if self.eat('>') {
            break;
          }
          if !self.eat(',') {
            return Err(self.error("expected ',' or '>' in type arguments"));
          }
        }
      }
      JavaType::Class {
        name: resolve_class_name(&name),
        args,
      }
    };

    while self.eat('[') {
      if !self.eat(']') {
        return Err(self.error("expected ']'"));
      }
      parsed = JavaType::array_of(parsed);
    }

    Ok(parsed)
  }

  fn parse_argument(&mut self) -> Result<JavaType, ModelError> {
    if !self.eat('?') {
      return self.parse_type();
    }

    let bound = match self.identifier().as_deref() {
      None => None,
      Some("extends") => Some(WildcardBound::Extends(Box::new(self.parse_type()?))),
      Some("super") => Some(WildcardBound::Super(Box::new(self.parse_type()?))),
      Some(_) => return Err(self.error("expected 'extends' or 'super' after '?'")),
    };
    Ok(JavaType::Wildcard(bound))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_resolves_java_lang_names() {
    let parsed: JavaType = "String".parse().expect("valid type");
    assert_eq!(parsed, JavaType::string());
    assert_eq!(parsed.presentable_text(), "String");
  }

  #[test]
  fn test_parse_generic_with_wildcard_and_array() {
    let parsed: JavaType = "java.util.Map<String, ? extends java.util.List<int[]>>[]"
      .parse()
      .expect("valid type");

    let expected = JavaType::array_of(JavaType::generic(
      "java.util.Map",
      [
        JavaType::string(),
        JavaType::Wildcard(Some(WildcardBound::Extends(Box::new(JavaType::generic(
          "java.util.List",
          [JavaType::array_of(JavaType::Primitive(PrimitiveKind::Int))],
        ))))),
      ],
    ));
    assert_eq!(parsed, expected);
    assert_eq!(parsed.presentable_text(), "Map<String, ? extends List<int[]>>[]");
    assert_eq!(
      parsed.to_string(),
      "java.util.Map<java.lang.String, ? extends java.util.List<int[]>>[]"
    );
  }

  #[test]
  fn test_parse_rejects_malformed_input() {
    for input in ["", "List<", "Map<String,>", "int[", "a..b", "List<?? >", "String extra"] {
      assert!(input.parse::<JavaType>().is_err(), "expected '{input}' to be rejected");
    }
  }

  #[test]
  fn test_user_classes_stay_unqualified() {
    let parsed: JavaType = "Builder".parse().expect("valid type");
    assert_eq!(parsed, JavaType::class("Builder"));
  }

  #[test]
  fn test_referenced_classes_walks_arguments() {
    let parsed: JavaType = "java.util.Map<String, com.acme.Item[]>".parse().expect("valid type");
    assert_eq!(
      parsed.referenced_classes(),
      vec!["java.util.Map", "java.lang.String", "com.acme.Item"]
    );
  }

  #[test]
  fn test_serde_uses_canonical_text() {
    let parsed: JavaType = serde_json::from_str("\"java.util.List<Integer>\"").expect("deserialize");
    assert_eq!(
      serde_json::to_string(&parsed).expect("serialize"),
      "\"java.util.List<java.lang.Integer>\""
    );
  }
}
