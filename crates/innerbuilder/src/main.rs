#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::ui::{Cli, Colors, Commands, ListCommands, OptionsCommands, colors};

mod ui;

/// `RUST_LOG` wins; otherwise warnings only, or debug output for `--verbose`.
fn init_tracing(verbose: bool) {
  let default_level = if verbose { "innerbuilder=debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.command.is_verbose());
  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  match cli.command {
    Commands::List { list_command } => match list_command {
      ListCommands::Fields {
        input,
        class,
        caret_field,
      } => ui::commands::list_fields(&input, &class, caret_field.as_deref(), &colors).await?,
    },
    Commands::Generate(command) => {
      let config = ui::commands::GenerateConfig::from_command(command)?;
      ui::commands::generate_builder(config, &colors).await?;
    }
    Commands::Options { options_command } => match options_command {
      OptionsCommands::List { options_file } => ui::commands::list_options(&options_file, &colors).await?,
      OptionsCommands::Set {
        key,
        value,
        options_file,
      } => ui::commands::set_option(&options_file, &key, &value, &colors).await?,
      OptionsCommands::Reset { options_file } => ui::commands::reset_options(&options_file, &colors).await?,
    },
  }

  Ok(())
}
