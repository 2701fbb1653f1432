use std::collections::HashSet;

use innerbuilder_model::{ClassDecl, ClassModel, FieldDecl, JavaType};
use strum::Display;
use tracing::{debug, trace};

use crate::generator::{
  constants::LOGGER_TYPES,
  error::CollectError,
  naming::{conventional_getter_names, conventional_setter_name, has_lower_case_char},
};

/// A field offered for the builder, with the classes needed to reason about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMember {
  pub field: FieldDecl,
  /// Class that declares the field.
  pub declaring_class: String,
  /// Class the builder is generated for; visibility was checked from here.
  pub access_class: String,
}

impl FieldMember {
  #[must_use]
  pub fn name(&self) -> &str {
    &self.field.name
  }

  #[must_use]
  pub const fn ty(&self) -> &JavaType {
    &self.field.ty
  }

  #[must_use]
  pub fn is_final(&self) -> bool {
    self.field.is_final()
  }

  #[must_use]
  pub fn is_inherited(&self) -> bool {
    self.declaring_class != self.access_class
  }
}

/// Why a declared field is not offered for the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Ineligible {
  #[strum(to_string = "field under the caret")]
  Caret,
  #[strum(to_string = "static field")]
  Static,
  #[strum(to_string = "constant-style name")]
  ConstantName,
  #[strum(to_string = "logger type")]
  Logger,
  #[strum(to_string = "final field with an initializer")]
  InitializedFinal,
  #[strum(to_string = "final field declared on a superclass")]
  InheritedFinal,
  #[strum(to_string = "not accessible from the target class")]
  Inaccessible,
  #[strum(to_string = "shadowed by a field of a subclass")]
  Shadowed,
}

/// Walks a class and its superclasses for fields a builder can set.
///
/// Fields of more-derived classes come first; within a class, declaration order is kept.
pub struct FieldCollector<'a, M: ClassModel + ?Sized> {
  model: &'a M,
  caret_field: Option<String>,
}

impl<'a, M: ClassModel + ?Sized> FieldCollector<'a, M> {
  pub const fn new(model: &'a M) -> Self {
    Self {
      model,
      caret_field: None,
    }
  }

  /// Leaves out the target class's field named `name`.
  #[must_use]
  pub fn excluding(mut self, name: impl Into<String>) -> Self {
    self.caret_field = Some(name.into());
    self
  }

  pub fn collect(&self, target: &str) -> Result<Vec<FieldMember>, CollectError> {
    let target_class = self
      .model
      .find_class(target)
      .ok_or_else(|| CollectError::ClassNotFound(target.to_string()))?;

    let mut members = vec![];
    let mut seen = HashSet::new();
    self.collect_declared(target, target_class, target, &mut members, &mut seen);

    for ancestor in self.model.ancestors(target) {
      let Some(class) = self.model.find_class(&ancestor) else {
        trace!(class = %ancestor, "superclass is outside the class model, stopping");
        break;
      };

      self.collect_declared(&ancestor, class, target, &mut members, &mut seen);

      if class.is_static() {
        debug!(class = %ancestor, "stopping at static superclass");
        break;
      }
    }

    debug!(class = target, fields = members.len(), "collected builder fields");
    Ok(members)
  }

  fn collect_declared(
    &self,
    declaring: &str,
    class: &ClassDecl,
    access: &str,
    members: &mut Vec<FieldMember>,
    seen: &mut HashSet<String>,
  ) {
    for field in class.fields() {
      let verdict = self.check(field, declaring, access).and_then(|()| {
        if seen.contains(&field.name) {
          Err(Ineligible::Shadowed)
        } else {
          Ok(())
        }
      });

      match verdict {
        Ok(()) => {
          seen.insert(field.name.clone());
          members.push(FieldMember {
            field: field.clone(),
            declaring_class: declaring.to_string(),
            access_class: access.to_string(),
          });
        }
        Err(reason) => trace!(class = declaring, field = %field.name, %reason, "skipping field"),
      }
    }
  }

  /// Eligibility of `field`, declared on `declaring`, for a builder of `access`.
  pub fn check(&self, field: &FieldDecl, declaring: &str, access: &str) -> Result<(), Ineligible> {
    let on_target = declaring == access;

    if on_target && self.caret_field.as_deref() == Some(field.name.as_str()) {
      return Err(Ineligible::Caret);
    }
    if field.is_static() {
      return Err(Ineligible::Static);
    }
    if !has_lower_case_char(&field.name) {
      return Err(Ineligible::ConstantName);
    }
    if is_logger_type(&field.ty) {
      return Err(Ineligible::Logger);
    }
    if field.is_final() {
      if field.has_initializer() {
        return Err(Ineligible::InitializedFinal);
      }
      if !on_target {
        return Err(Ineligible::InheritedFinal);
      }
    }

    let accessible = self.model.is_accessible(declaring, field.modifiers.visibility(), access)
      || find_conventional_setter(self.model, access, field).is_some();
    if !accessible {
      return Err(Ineligible::Inaccessible);
    }

    Ok(())
  }
}

fn is_logger_type(ty: &JavaType) -> bool {
  matches!(ty, JavaType::Class { name, args } if args.is_empty() && LOGGER_TYPES.contains(&name.as_str()))
}

/// Name of the `set<Name>` method `class` (or one of its superclasses) exposes for `field`.
pub(crate) fn find_conventional_setter<M: ClassModel + ?Sized>(
  model: &M,
  class: &str,
  field: &FieldDecl,
) -> Option<String> {
  let setter = conventional_setter_name(&field.name);
  let exposed = std::iter::once(class.to_string())
    .chain(model.ancestors(class))
    .filter_map(|name| model.find_class(&name))
    .flat_map(ClassDecl::methods)
    .any(|method| method.is_setter_for(&setter, &field.ty));
  exposed.then_some(setter)
}

/// Name of an accessor `class` can call to read `field`, looked up on `class` and its superclasses.
pub(crate) fn find_conventional_getter<M: ClassModel + ?Sized>(
  model: &M,
  class: &str,
  field: &FieldDecl,
) -> Option<String> {
  let names = conventional_getter_names(&field.name, &field.ty);
  std::iter::once(class.to_string())
    .chain(model.ancestors(class))
    .filter_map(|name| model.find_class(&name).map(|decl| (name, decl)))
    .find_map(|(owner, decl)| {
      decl.methods().find_map(|method| {
        let readable = model.is_accessible(&owner, method.modifiers.visibility(), class);
        names
          .iter()
          .find(|name| readable && method.is_getter_for(name, &field.ty))
          .cloned()
      })
    })
}
