//! Structural model of Java classes.
//!
//! The engine never reads source text. Hosts hand it classes through [`ClassModel`], which
//! [`ClassRepository`] implements for models loaded from JSON documents.

mod class;
mod error;
mod members;
mod modifiers;
mod render;
mod repository;
mod statements;
mod types;

pub use class::{ClassDecl, ClassKind};
pub use error::ModelError;
pub use members::{Annotation, FieldDecl, Javadoc, Member, MemberKey, MemberKind, MethodDecl, Parameter};
pub use modifiers::{Modifier, Modifiers, Visibility};
pub use render::JavaRenderer;
pub use repository::{ClassModel, ClassRepository, ModelDocument, qualify};
pub use statements::{Expr, Statement};
pub use types::{JavaType, PrimitiveKind, WildcardBound, simple_name};
