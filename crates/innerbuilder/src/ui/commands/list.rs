use std::path::Path;

use comfy_table::{Attribute, Cell, ContentArrangement, Row, Table};
use innerbuilder::generator::FieldCollector;
use innerbuilder_model::simple_name;

use crate::ui::{Colors, colors::IntoComfyColor, files::read_model, term_width};

pub async fn list_fields(input: &Path, class: &str, caret_field: Option<&str>, colors: &Colors) -> anyhow::Result<()> {
  let model = read_model(input).await?;

  let mut collector = FieldCollector::new(&model);
  if let Some(caret) = caret_field {
    collector = collector.excluding(caret);
  }
  let fields = collector.collect(class)?;

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  row.add_cell(Cell::new("FIELD").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("TYPE").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("MODIFIERS").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("DECLARED IN").fg(IntoComfyColor::into(colors.label())));
  table.set_header(row);

  for member in &fields {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(member.name())
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(member.ty().presentable_text()).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(Cell::new(member.field.modifiers.keywords()).fg(IntoComfyColor::into(colors.accent())));

    let declared_in = Cell::new(simple_name(&member.declaring_class));
    let declared_in = if member.is_inherited() {
      declared_in.fg(IntoComfyColor::into(colors.muted()))
    } else {
      declared_in.fg(IntoComfyColor::into(colors.primary()))
    };
    row.add_cell(declared_in);
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
