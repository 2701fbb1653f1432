//! Generates a nested `Builder` for Java classes held in a structural class model.
//!
//! [`generator::FieldCollector`] picks the fields a builder can set and
//! [`generator::BuilderSynthesizer`] writes the builder, its setters and the private
//! constructor of the target class back into the model.

pub mod generator;
