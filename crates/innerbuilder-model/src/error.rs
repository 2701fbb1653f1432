use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
  #[error("invalid type '{input}': {reason}")]
  InvalidType { input: String, reason: String },

  #[error("invalid {kind} identifier '{name}' in {context}")]
  InvalidIdentifier {
    kind: &'static str,
    name: String,
    context: String,
  },

  #[error("duplicate class '{0}'")]
  DuplicateClass(String),

  #[error("failed to parse class model: {0}")]
  Json(#[from] serde_json::Error),
}
