use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{
  members::{Annotation, FieldDecl, Javadoc, Member, MemberKey, MemberKind, MethodDecl},
  modifiers::Modifiers,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ClassKind {
  #[default]
  Class,
  Interface,
  Enum,
}

/// A class declaration together with its members in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
pub struct ClassDecl {
  #[builder(into)]
  pub name: String,
  /// Package of the outermost class. Nested classes inherit it when inserted into a repository.
  #[serde(default, skip_serializing_if = "String::is_empty")]
  #[builder(into, default)]
  pub package: String,
  #[serde(default)]
  #[builder(default)]
  pub kind: ClassKind,
  #[serde(default)]
  #[builder(default)]
  pub modifiers: Modifiers,
  /// Qualified name of the direct superclass.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  #[builder(into)]
  pub superclass: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  #[builder(default)]
  pub annotations: Vec<Annotation>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub doc: Option<Javadoc>,
  #[serde(default)]
  #[builder(default)]
  pub members: Vec<Member>,
}

impl ClassDecl {
  #[must_use]
  pub const fn is_interface(&self) -> bool {
    matches!(self.kind, ClassKind::Interface)
  }

  #[must_use]
  pub fn is_abstract(&self) -> bool {
    self.modifiers.is_abstract()
  }

  #[must_use]
  pub fn is_static(&self) -> bool {
    self.modifiers.is_static()
  }

  pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
    self.members.iter().filter_map(|member| match member {
      Member::Field(field) => Some(field),
      _ => None,
    })
  }

  /// Methods and constructors.
  pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
    self.members.iter().filter_map(|member| match member {
      Member::Method(method) => Some(method),
      _ => None,
    })
  }

  pub fn nested_classes(&self) -> impl Iterator<Item = &ClassDecl> {
    self.members.iter().filter_map(|member| match member {
      Member::Class(class) => Some(class),
      _ => None,
    })
  }

  #[must_use]
  pub fn field(&self, name: &str) -> Option<&FieldDecl> {
    self.fields().find(|field| field.name == name)
  }

  #[must_use]
  pub fn nested_class(&self, name: &str) -> Option<&ClassDecl> {
    self.nested_classes().find(|class| class.name == name)
  }

  pub fn nested_class_mut(&mut self, name: &str) -> Option<&mut ClassDecl> {
    self.members.iter_mut().find_map(|member| match member {
      Member::Class(class) if class.name == name => Some(class),
      _ => None,
    })
  }

  #[must_use]
  pub fn member(&self, key: &MemberKey) -> Option<&Member> {
    self.position_of(key).map(|index| &self.members[index])
  }

  #[must_use]
  pub fn position_of(&self, key: &MemberKey) -> Option<usize> {
    self.members.iter().position(|member| member.key() == *key)
  }

  /// Index of the last member of `kind`, if any.
  #[must_use]
  pub fn last_position_of_kind(&self, kind: MemberKind) -> Option<usize> {
    self.members.iter().rposition(|member| member.kind() == kind)
  }

  pub fn insert_member(&mut self, index: usize, member: Member) {
    let index = index.min(self.members.len());
    self.members.insert(index, member);
  }

  pub fn push_member(&mut self, member: Member) {
    self.members.push(member);
  }

  pub fn replace_member(&mut self, index: usize, member: Member) -> Member {
    std::mem::replace(&mut self.members[index], member)
  }

  pub fn remove_member(&mut self, index: usize) -> Member {
    self.members.remove(index)
  }

  pub fn has_annotation(&self, name: &str) -> bool {
    self.annotations.iter().any(|annotation| annotation.name == name)
  }

  pub(crate) fn propagate_package(&mut self) {
    let package = self.package.clone();
    for member in &mut self.members {
      if let Member::Class(nested) = member {
        nested.package.clone_from(&package);
        nested.propagate_package();
      }
    }
  }
}
