use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

/// Options file used when `--options-file` is not given.
pub const DEFAULT_OPTIONS_FILE: &str = "innerbuilder.json";

#[derive(Parser, Debug)]
#[command(name = "innerbuilder")]
#[command(author, version, about = "Generates inner builder classes for Java class models")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from a class model
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate a Builder for a class of the model
  Generate(GenerateCommand),
  /// Show or change the persisted generation options
  Options {
    #[command(subcommand)]
    options_command: OptionsCommands,
  },
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
  /// Path to the JSON class model
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Qualified name of the class that receives the builder
  #[arg(short, long, value_name = "CLASS")]
  pub class: String,

  /// Fields to include, in order (comma-separated; default: every candidate field)
  #[arg(long, value_name = "NAMES", value_delimiter = ',')]
  pub fields: Option<Vec<String>>,

  /// Field of the target class under the caret, never offered
  #[arg(long, value_name = "NAME")]
  pub caret_field: Option<String>,

  /// JSON file holding persisted options
  #[arg(long, value_name = "FILE", default_value = DEFAULT_OPTIONS_FILE)]
  pub options_file: PathBuf,

  /// Override an option for this run (KEY=VALUE, repeatable)
  #[arg(long = "set", value_name = "KEY=VALUE")]
  pub overrides: Vec<String>,

  /// Where the updated class model is written (default: print the generated Java source)
  #[arg(short, long, value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Where the Java source of the updated class is written
  #[arg(long, value_name = "FILE")]
  pub java: Option<PathBuf>,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List the fields a builder can be generated for
  Fields {
    /// Path to the JSON class model
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Qualified name of the class
    #[arg(short, long, value_name = "CLASS")]
    class: String,

    /// Field of the class under the caret, never offered
    #[arg(long, value_name = "NAME")]
    caret_field: Option<String>,
  },
}

#[derive(Subcommand, Debug)]
pub enum OptionsCommands {
  /// Show every option with its current value
  List {
    #[arg(long, value_name = "FILE", default_value = DEFAULT_OPTIONS_FILE)]
    options_file: PathBuf,
  },
  /// Change one option and persist it
  Set {
    /// Option key or bare property name, e.g. `withNotation`
    key: String,
    value: String,

    #[arg(long, value_name = "FILE", default_value = DEFAULT_OPTIONS_FILE)]
    options_file: PathBuf,
  },
  /// Restore every option to its default
  Reset {
    #[arg(long, value_name = "FILE", default_value = DEFAULT_OPTIONS_FILE)]
    options_file: PathBuf,
  },
}

impl Commands {
  /// `true` when the command asked for detailed progress output.
  pub const fn is_verbose(&self) -> bool {
    matches!(self, Self::Generate(GenerateCommand { verbose: true, .. }))
  }
}
