pub mod generate;
pub mod list;
pub mod options;

pub use generate::{GenerateConfig, generate_builder};
pub use list::list_fields;
pub use options::{list_options, reset_options, set_option};
