use std::path::Path;

use comfy_table::{Attribute, Cell, ContentArrangement, Row, Table};
use crossterm::style::Stylize;
use innerbuilder::generator::{
  MemoryOptionStore, OptionError, OptionSet,
  options::{OptionDescriptor, find_descriptor, option_descriptors},
};

use crate::ui::{
  Colors,
  colors::IntoComfyColor,
  files::{read_option_store, write_option_store},
  term_width,
};

fn property_name(descriptor: &OptionDescriptor) -> String {
  let key = descriptor.key();
  key.rsplit_once('.').map_or(key.clone(), |(_, property)| property.to_string())
}

pub async fn list_options(options_file: &Path, colors: &Colors) -> anyhow::Result<()> {
  let store = read_option_store(options_file).await?;
  let options = OptionSet::load(&store);

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  row.add_cell(Cell::new("OPTION").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("VALUE").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("DESCRIPTION").fg(IntoComfyColor::into(colors.label())));
  table.set_header(row);

  for descriptor in option_descriptors() {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(property_name(descriptor))
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(descriptor.display_value(&options)).fg(IntoComfyColor::into(colors.accent())));

    let description = match descriptor {
      OptionDescriptor::Toggle(_) => descriptor.caption().to_string(),
      OptionDescriptor::Choice(choice) => {
        let values = choice.values.iter().map(|value| value.caption).collect::<Vec<_>>();
        format!("{} ({})", choice.caption, values.join(", "))
      }
    };
    row.add_cell(Cell::new(description).fg(IntoComfyColor::into(colors.primary())));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}

pub async fn set_option(options_file: &Path, key: &str, value: &str, colors: &Colors) -> anyhow::Result<()> {
  let descriptor = find_descriptor(key).ok_or_else(|| OptionError::UnknownOption(key.to_string()))?;

  let mut store = read_option_store(options_file).await?;
  let mut options = OptionSet::load(&store);
  descriptor.apply(&mut options, value)?;
  options.save(&mut store);
  write_option_store(options_file, &store).await?;

  println!(
    "{} {}",
    format!("{}:", property_name(descriptor)).with(colors.label()),
    descriptor.display_value(&options).with(colors.value())
  );
  Ok(())
}

pub async fn reset_options(options_file: &Path, colors: &Colors) -> anyhow::Result<()> {
  let mut store = MemoryOptionStore::new();
  OptionSet::new().save(&mut store);
  write_option_store(options_file, &store).await?;

  println!(
    "{}",
    format!("Reset every option in {}", options_file.display()).with(colors.primary())
  );
  Ok(())
}
