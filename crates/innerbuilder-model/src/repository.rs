use std::{collections::HashSet, sync::LazyLock};

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
  class::ClassDecl,
  error::ModelError,
  members::Member,
  modifiers::Visibility,
};

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\p{L}_$][\p{L}\p{N}_$]*$").unwrap());

/// Joins a package and a class name into a qualified name.
#[must_use]
pub fn qualify(package: &str, name: &str) -> String {
  if package.is_empty() {
    name.to_string()
  } else {
    format!("{package}.{name}")
  }
}

/// Read/write access to the classes the engine works on.
///
/// Classes are addressed by qualified name; nested classes append their simple name to the
/// qualified name of the enclosing class (`com.acme.Person.Builder`).
pub trait ClassModel {
  fn find_class(&self, name: &str) -> Option<&ClassDecl>;

  fn find_class_mut(&mut self, name: &str) -> Option<&mut ClassDecl>;

  /// `true` when `name` resolves to a class declared inside another class.
  fn is_nested(&self, name: &str) -> bool;

  fn superclass_of(&self, name: &str) -> Option<&str> {
    self.find_class(name)?.superclass.as_deref()
  }

  /// Qualified names of every superclass of `name`, nearest first.
  ///
  /// Includes the first ancestor that is not part of the model and stops there. A cyclic
  /// chain stops at the first repeated class.
  fn ancestors(&self, name: &str) -> Vec<String> {
    let mut seen = HashSet::from([name.to_string()]);
    let mut chain = vec![];
    let mut current = self.superclass_of(name);
    while let Some(parent) = current {
      if !seen.insert(parent.to_string()) {
        break;
      }
      chain.push(parent.to_string());
      current = self.superclass_of(parent);
    }
    chain
  }

  fn is_subclass_of(&self, name: &str, ancestor: &str) -> bool {
    self.ancestors(name).iter().any(|parent| parent == ancestor)
  }

  fn package_of(&self, name: &str) -> Option<&str> {
    self.find_class(name).map(|class| class.package.as_str())
  }

  /// Qualified name of the top-level class that encloses `name` (or `name` itself).
  fn outermost_class(&self, name: &str) -> Option<String> {
    let package = self.package_of(name)?;
    let relative = if package.is_empty() {
      name
    } else {
      name.strip_prefix(package)?.strip_prefix('.')?
    };
    let top = relative.split('.').next()?;
    Some(qualify(package, top))
  }

  /// Java access check for a member of `declaring` with `visibility`, seen from `from`.
  fn is_accessible(&self, declaring: &str, visibility: Visibility, from: &str) -> bool {
    match visibility {
      Visibility::Public => true,
      Visibility::Private => {
        let outer = self.outermost_class(declaring);
        outer.is_some() && outer == self.outermost_class(from)
      }
      Visibility::PackagePrivate => self.package_of(declaring) == self.package_of(from),
      Visibility::Protected => {
        self.package_of(declaring) == self.package_of(from) || self.is_subclass_of(from, declaring)
      }
    }
  }
}

/// On-disk shape of a class model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelDocument {
  #[serde(default)]
  pub classes: Vec<ClassDecl>,
}

/// In-memory class model holding top-level classes by qualified name.
#[derive(Debug, Clone, Default)]
pub struct ClassRepository {
  classes: IndexMap<String, ClassDecl>,
}

impl ClassRepository {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_document(document: ModelDocument) -> Result<Self, ModelError> {
    let known: HashSet<String> = document
      .classes
      .iter()
      .map(|class| qualify(&class.package, &class.name))
      .collect();

    let mut repository = Self::new();
    for class in document.classes {
      repository.insert_resolving(class, &known)?;
    }
    Ok(repository)
  }

  pub fn from_json(input: &str) -> Result<Self, ModelError> {
    Self::from_document(serde_json::from_str(input)?)
  }

  pub fn to_json(&self) -> Result<String, ModelError> {
    Ok(serde_json::to_string_pretty(&self.to_document())?)
  }

  #[must_use]
  pub fn to_document(&self) -> ModelDocument {
    ModelDocument {
      classes: self.classes.values().cloned().collect(),
    }
  }

  /// Adds a top-level class, returning its qualified name.
  ///
  /// Simple class names in member types are qualified against the classes in scope: nested
  /// classes of the class and its enclosing classes, the enclosing classes themselves, and
  /// top-level classes of the same package already in the repository.
  pub fn insert(&mut self, class: ClassDecl) -> Result<String, ModelError> {
    let known: HashSet<String> = self.classes.keys().cloned().collect();
    self.insert_resolving(class, &known)
  }

  fn insert_resolving(&mut self, mut class: ClassDecl, known: &HashSet<String>) -> Result<String, ModelError> {
    let qualified = qualify(&class.package, &class.name);
    validate_class(&class, &qualified)?;
    if self.classes.contains_key(&qualified) {
      return Err(ModelError::DuplicateClass(qualified));
    }
    class.propagate_package();
    resolve_class_names(&mut class, &qualified, &mut vec![], known);
    self.classes.insert(qualified.clone(), class);
    Ok(qualified)
  }

  pub fn classes(&self) -> impl Iterator<Item = (&str, &ClassDecl)> {
    self.classes.iter().map(|(name, class)| (name.as_str(), class))
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.classes.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.classes.is_empty()
  }
}

impl ClassModel for ClassRepository {
  fn find_class(&self, name: &str) -> Option<&ClassDecl> {
    if let Some(class) = self.classes.get(name) {
      return Some(class);
    }
    let (outer, simple) = name.rsplit_once('.')?;
    self.find_class(outer)?.nested_class(simple)
  }

  fn find_class_mut(&mut self, name: &str) -> Option<&mut ClassDecl> {
    if self.classes.contains_key(name) {
      return self.classes.get_mut(name);
    }
    let (outer, simple) = name.rsplit_once('.')?;
    self.find_class_mut(outer)?.nested_class_mut(simple)
  }

  fn is_nested(&self, name: &str) -> bool {
    !self.classes.contains_key(name) && self.find_class(name).is_some()
  }
}

/// A class whose name and nested classes are visible to the code it encloses.
struct Scope {
  qualified: String,
  name: String,
  nested: Vec<String>,
}

fn resolve_simple_name(name: &str, scopes: &[Scope], package: &str, known: &HashSet<String>) -> Option<String> {
  if name.contains('.') {
    return None;
  }

  let in_scope = scopes.iter().rev().find_map(|scope| {
    if scope.nested.iter().any(|nested| nested == name) {
      Some(format!("{}.{name}", scope.qualified))
    } else {
      (scope.name == name).then(|| scope.qualified.clone())
    }
  });
  in_scope.or_else(|| {
    let candidate = qualify(package, name);
    known.contains(&candidate).then_some(candidate)
  })
}

fn resolve_class_names(class: &mut ClassDecl, qualified: &str, scopes: &mut Vec<Scope>, known: &HashSet<String>) {
  scopes.push(Scope {
    qualified: qualified.to_string(),
    name: class.name.clone(),
    nested: class.nested_classes().map(|nested| nested.name.clone()).collect(),
  });

  {
    let package = class.package.clone();
    let visible = scopes.as_slice();
    let resolve = |name: &str| resolve_simple_name(name, visible, &package, known);

    if let Some(superclass) = class.superclass.as_mut()
      && let Some(resolved) = resolve(superclass)
    {
      *superclass = resolved;
    }
    for member in &mut class.members {
      match member {
        Member::Field(field) => field.ty.resolve_names(&resolve),
        Member::Method(method) => {
          if let Some(returns) = method.returns.as_mut() {
            returns.resolve_names(&resolve);
          }
          for param in &mut method.params {
            param.ty.resolve_names(&resolve);
          }
          for statement in &mut method.body {
            statement.resolve_names(&resolve);
          }
        }
        Member::Class(_) => {}
      }
    }
  }

  for member in &mut class.members {
    if let Member::Class(nested) = member {
      let nested_qualified = format!("{qualified}.{}", nested.name);
      resolve_class_names(nested, &nested_qualified, scopes, known);
    }
  }
  scopes.pop();
}

fn check_identifier(kind: &'static str, name: &str, context: &str) -> Result<(), ModelError> {
  if IDENTIFIER_RE.is_match(name) {
    Ok(())
  } else {
    Err(ModelError::InvalidIdentifier {
      kind,
      name: name.to_string(),
      context: context.to_string(),
    })
  }
}

fn validate_class(class: &ClassDecl, qualified: &str) -> Result<(), ModelError> {
  check_identifier("class", &class.name, qualified)?;
  for member in &class.members {
    match member {
      Member::Field(field) => check_identifier("field", &field.name, qualified)?,
      Member::Method(method) => {
        check_identifier("method", &method.name, qualified)?;
        for param in &method.params {
          check_identifier("parameter", &param.name, &format!("{qualified}.{}", method.name))?;
        }
      }
      Member::Class(nested) => validate_class(nested, &format!("{qualified}.{}", nested.name))?,
    }
  }
  Ok(())
}
