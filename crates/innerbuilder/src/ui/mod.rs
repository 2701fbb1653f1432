pub mod cli;
pub mod colors;
pub mod commands;
pub mod files;

pub use cli::{Cli, Commands, GenerateCommand, ListCommands, OptionsCommands};
pub use colors::Colors;

fn term_width() -> u16 {
  crossterm::terminal::size().map_or(100, |(width, _)| width)
}
