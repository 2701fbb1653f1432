use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectError {
  #[error("class '{0}' was not found in the class model")]
  ClassNotFound(String),
}

#[derive(Debug, Error)]
pub enum SynthesisError {
  #[error("target class '{0}' was not found in the class model")]
  TargetNotFound(String),

  #[error("class '{0}' disappeared from the class model while the builder was generated")]
  TargetVanished(String),

  #[error("could not write {member} to '{class}': it collides with a member generated in the same run")]
  EssentialMemberConflict { class: String, member: String },
}

#[derive(Debug, Error)]
pub enum OptionError {
  #[error("unknown option '{0}'")]
  UnknownOption(String),

  #[error("invalid value '{value}' for option '{key}'")]
  InvalidValue { key: String, value: String },
}
