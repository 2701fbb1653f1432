use serde::{Deserialize, Serialize};

use crate::types::JavaType;

/// Expression tree for method bodies.
///
/// `Raw` carries code the model was handed verbatim and never needs to look inside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
  This,
  Name(String),
  /// Type used as the receiver of a static call.
  Type(JavaType),
  Field {
    receiver: Box<Expr>,
    name: String,
  },
  Call {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    receiver: Option<Box<Expr>>,
    method: String,
    #[serde(default)]
    args: Vec<Expr>,
  },
  New {
    #[serde(rename = "type")]
    ty: JavaType,
    #[serde(default)]
    args: Vec<Expr>,
  },
  Str(String),
  Raw(String),
}

impl Expr {
  pub fn name(name: impl Into<String>) -> Self {
    Self::Name(name.into())
  }

  /// `receiver.name`
  pub fn field(receiver: Expr, name: impl Into<String>) -> Self {
    Self::Field {
      receiver: Box::new(receiver),
      name: name.into(),
    }
  }

  /// `this.name`
  pub fn this_field(name: impl Into<String>) -> Self {
    Self::field(Self::This, name)
  }

  pub fn call(method: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Self {
    Self::Call {
      receiver: None,
      method: method.into(),
      args: args.into_iter().collect(),
    }
  }

  pub fn static_call(owner: JavaType, method: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Self {
    Self::Call {
      receiver: Some(Box::new(Self::Type(owner))),
      method: method.into(),
      args: args.into_iter().collect(),
    }
  }

  pub fn new_instance(ty: JavaType, args: impl IntoIterator<Item = Expr>) -> Self {
    Self::New {
      ty,
      args: args.into_iter().collect(),
    }
  }

  pub(crate) fn resolve_names(&mut self, resolve: &dyn Fn(&str) -> Option<String>) {
    match self {
      Self::This | Self::Name(_) | Self::Str(_) | Self::Raw(_) => {}
      Self::Type(ty) => ty.resolve_names(resolve),
      Self::Field { receiver, .. } => receiver.resolve_names(resolve),
      Self::Call { receiver, args, .. } => {
        if let Some(receiver) = receiver {
          receiver.resolve_names(resolve);
        }
        for arg in args {
          arg.resolve_names(resolve);
        }
      }
      Self::New { ty, args } => {
        ty.resolve_names(resolve);
        for arg in args {
          arg.resolve_names(resolve);
        }
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
  Expr(Expr),
  Assign {
    target: Expr,
    value: Expr,
  },
  Local {
    #[serde(rename = "type")]
    ty: JavaType,
    name: String,
    init: Expr,
  },
  Return(Expr),
  Raw(String),
}

impl Statement {
  #[must_use]
  pub const fn assign(target: Expr, value: Expr) -> Self {
    Self::Assign { target, value }
  }

  pub fn local(ty: JavaType, name: impl Into<String>, init: Expr) -> Self {
    Self::Local {
      ty,
      name: name.into(),
      init,
    }
  }

  pub(crate) fn resolve_names(&mut self, resolve: &dyn Fn(&str) -> Option<String>) {
    match self {
      Self::Expr(expr) | Self::Return(expr) => expr.resolve_names(resolve),
      Self::Assign { target, value } => {
        target.resolve_names(resolve);
        value.resolve_names(resolve);
      }
      Self::Local { ty, init, .. } => {
        ty.resolve_names(resolve);
        init.resolve_names(resolve);
      }
      Self::Raw(_) => {}
    }
  }
}
