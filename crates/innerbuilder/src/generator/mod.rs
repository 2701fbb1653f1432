pub mod collector;
pub(crate) mod constants;
pub mod error;
pub(crate) mod merge;
pub mod metrics;
pub(crate) mod naming;
pub mod options;
pub mod plan;
pub mod synthesizer;
pub(crate) mod templates;

#[cfg(test)]
mod tests;

pub use collector::{FieldCollector, FieldMember, Ineligible};
pub use error::{CollectError, OptionError, SynthesisError};
pub use metrics::{GenerationReport, GenerationWarning, MemberChange, MergeAction, SkipReason, SynthesisOutcome};
pub use options::{MemoryOptionStore, OptionDescriptor, OptionSet, OptionStore, ToggleOption};
pub use synthesizer::BuilderSynthesizer;
