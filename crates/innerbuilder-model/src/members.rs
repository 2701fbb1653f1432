use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
  class::ClassDecl,
  modifiers::{Modifier, Modifiers},
  statements::Statement,
  types::{JavaType, simple_name},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
  /// Fully qualified annotation type name.
  pub name: String,
  /// Argument list text as written between the parentheses.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub arguments: Option<String>,
}

impl Annotation {
  pub fn marker(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      arguments: None,
    }
  }

  pub fn with_arguments(name: impl Into<String>, arguments: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      arguments: Some(arguments.into()),
    }
  }

  #[must_use]
  pub fn simple_name(&self) -> &str {
    simple_name(&self.name)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Javadoc {
  lines: Vec<String>,
}

impl Javadoc {
  #[must_use]
  pub fn from_lines(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      lines: lines.into_iter().map(Into::into).collect(),
    }
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  #[must_use]
  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  pub fn push(&mut self, line: impl Into<String>) {
    self.lines.push(line.into());
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
pub struct Parameter {
  #[builder(into)]
  pub name: String,
  #[serde(rename = "type")]
  pub ty: JavaType,
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  #[builder(default)]
  pub is_final: bool,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  #[builder(default)]
  pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
pub struct FieldDecl {
  #[builder(into)]
  pub name: String,
  #[serde(rename = "type")]
  pub ty: JavaType,
  #[serde(default)]
  #[builder(default)]
  pub modifiers: Modifiers,
  /// Initializer expression text. Only its presence matters to the engine.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  #[builder(into)]
  pub initializer: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  #[builder(default)]
  pub annotations: Vec<Annotation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub doc: Option<Javadoc>,
}

impl FieldDecl {
  #[must_use]
  pub fn is_static(&self) -> bool {
    self.modifiers.is_static()
  }

  #[must_use]
  pub fn is_final(&self) -> bool {
    self.modifiers.is_final()
  }

  #[must_use]
  pub const fn has_initializer(&self) -> bool {
    self.initializer.is_some()
  }
}

/// Method or constructor. Constructors have no return type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
pub struct MethodDecl {
  #[builder(into)]
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub returns: Option<JavaType>,
  #[serde(default)]
  #[builder(default)]
  pub modifiers: Modifiers,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  #[builder(default)]
  pub annotations: Vec<Annotation>,
  #[serde(default)]
  #[builder(default)]
  pub params: Vec<Parameter>,
  #[serde(default)]
  #[builder(default)]
  pub body: Vec<Statement>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub doc: Option<Javadoc>,
}

impl MethodDecl {
  #[must_use]
  pub const fn is_constructor(&self) -> bool {
    self.returns.is_none()
  }

  #[must_use]
  pub fn is_static(&self) -> bool {
    self.modifiers.is_static()
  }

  pub fn param_types(&self) -> impl Iterator<Item = &JavaType> {
    self.params.iter().map(|param| &param.ty)
  }

  #[must_use]
  pub fn key(&self) -> MemberKey {
    let params = self.param_types().cloned().collect();
    if self.is_constructor() {
      MemberKey::Constructor(params)
    } else {
      MemberKey::Method {
        name: self.name.clone(),
        params,
      }
    }
  }

  /// `true` for a non-static method with this name taking no parameters and returning `ty`.
  #[must_use]
  pub fn is_getter_for(&self, name: &str, ty: &JavaType) -> bool {
    !self.modifiers.contains(Modifier::Static)
      && self.name == name
      && self.params.is_empty()
      && self.returns.as_ref() == Some(ty)
  }

  /// `true` for a non-static method with this name taking exactly one parameter of `ty`.
  #[must_use]
  pub fn is_setter_for(&self, name: &str, ty: &JavaType) -> bool {
    !self.is_constructor()
      && !self.modifiers.contains(Modifier::Static)
      && self.name == name
      && self.params.len() == 1
      && self.params[0].ty == *ty
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum Member {
  Field(FieldDecl),
  Method(MethodDecl),
  Class(ClassDecl),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
  Field,
  Constructor,
  Method,
  Class,
}

impl Member {
  #[must_use]
  pub const fn kind(&self) -> MemberKind {
    match self {
      Self::Field(_) => MemberKind::Field,
      Self::Method(method) if method.is_constructor() => MemberKind::Constructor,
      Self::Method(_) => MemberKind::Method,
      Self::Class(_) => MemberKind::Class,
    }
  }

  #[must_use]
  pub fn key(&self) -> MemberKey {
    match self {
      Self::Field(field) => MemberKey::Field(field.name.clone()),
      Self::Method(method) => method.key(),
      Self::Class(class) => MemberKey::Class(class.name.clone()),
    }
  }

  #[must_use]
  pub fn name(&self) -> &str {
    match self {
      Self::Field(field) => &field.name,
      Self::Method(method) => &method.name,
      Self::Class(class) => &class.name,
    }
  }
}

/// Identity used to match a regenerated member against an existing one.
///
/// Fields match by name, constructors by parameter types, methods by name and parameter
/// types, nested classes by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberKey {
  Field(String),
  Constructor(Vec<JavaType>),
  Method { name: String, params: Vec<JavaType> },
  Class(String),
}

impl MemberKey {
  #[must_use]
  pub const fn kind(&self) -> MemberKind {
    match self {
      Self::Field(_) => MemberKind::Field,
      Self::Constructor(_) => MemberKind::Constructor,
      Self::Method { .. } => MemberKind::Method,
      Self::Class(_) => MemberKind::Class,
    }
  }
}

impl fmt::Display for MemberKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let params = |params: &[JavaType]| params.iter().map(JavaType::presentable_text).join(", ");
    match self {
      Self::Field(name) | Self::Class(name) => write!(f, "{name}"),
      Self::Constructor(types) => write!(f, "constructor({})", params(types)),
      Self::Method { name, params: types } => write!(f, "{name}({})", params(types)),
    }
  }
}
