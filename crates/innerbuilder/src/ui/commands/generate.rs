use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use innerbuilder::generator::{
  BuilderSynthesizer, FieldCollector, FieldMember, GenerationReport, MemoryOptionStore, MergeAction, OptionError,
  OptionSet, SynthesisOutcome, options::find_descriptor,
};
use innerbuilder_model::{ClassModel, ClassRepository, JavaRenderer};
use itertools::Itertools;

use crate::ui::{
  Colors, GenerateCommand,
  files::{read_model, read_option_store, write_text},
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub class: String,
  pub fields: Option<Vec<String>>,
  pub caret_field: Option<String>,
  pub options_file: PathBuf,
  pub overrides: Vec<(String, String)>,
  pub output: Option<PathBuf>,
  pub java: Option<PathBuf>,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      class,
      fields,
      caret_field,
      options_file,
      overrides,
      output,
      java,
      verbose,
      quiet,
    } = command;

    Ok(Self {
      input,
      class,
      fields: fields.map(|names| names.into_iter().unique().collect()),
      caret_field,
      options_file,
      overrides: parse_overrides(overrides)?,
      output,
      java,
      verbose,
      quiet,
    })
  }

  async fn load_options(&self) -> anyhow::Result<OptionSet> {
    let store = read_option_store(&self.options_file).await?;
    resolve_options(&store, &self.overrides)
  }

  fn collect_fields(&self, model: &ClassRepository) -> anyhow::Result<Vec<FieldMember>> {
    let mut collector = FieldCollector::new(model);
    if let Some(caret) = &self.caret_field {
      collector = collector.excluding(caret.as_str());
    }
    let candidates = collector.collect(&self.class)?;
    select_fields(candidates, self.fields.as_deref(), &self.class)
  }

  /// Java source of the top-level class that contains the target.
  fn render_java(&self, model: &ClassRepository) -> anyhow::Result<String> {
    let unit = model
      .outermost_class(&self.class)
      .and_then(|outer| model.find_class(&outer))
      .ok_or_else(|| anyhow::anyhow!("Class '{}' is not part of the class model", self.class))?;
    Ok(JavaRenderer::render_unit(unit))
  }

  async fn write_outputs(&self, model: &ClassRepository) -> anyhow::Result<()> {
    if let Some(output) = &self.output {
      let mut json = model.to_json()?;
      json.push('\n');
      write_text(output, json).await?;
    }
    if let Some(java) = &self.java {
      write_text(java, self.render_java(model)?).await?;
    }
    if self.output.is_none() && self.java.is_none() {
      print!("{}", self.render_java(model)?);
    }
    Ok(())
  }
}

fn parse_overrides(entries: Vec<String>) -> anyhow::Result<Vec<(String, String)>> {
  entries
    .into_iter()
    .map(|entry| {
      let (key, value) = entry.split_once('=').ok_or_else(|| {
        anyhow::anyhow!("Invalid option override '{entry}': expected KEY=VALUE (e.g., withNotation=true)")
      })?;
      Ok((key.trim().to_string(), value.trim().to_string()))
    })
    .collect()
}

/// Persisted options with this run's overrides applied on top.
fn resolve_options(store: &MemoryOptionStore, overrides: &[(String, String)]) -> anyhow::Result<OptionSet> {
  let mut options = OptionSet::load(store);
  for (key, value) in overrides {
    let descriptor = find_descriptor(key).ok_or_else(|| OptionError::UnknownOption(key.clone()))?;
    descriptor.apply(&mut options, value)?;
  }
  Ok(options)
}

/// Candidates named in `names`, in that order; every candidate when no names are given.
fn select_fields(
  candidates: Vec<FieldMember>,
  names: Option<&[String]>,
  class: &str,
) -> anyhow::Result<Vec<FieldMember>> {
  let Some(names) = names else {
    return Ok(candidates);
  };

  names
    .iter()
    .map(|name| {
      candidates
        .iter()
        .find(|candidate| candidate.name() == name)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Field '{name}' is not a builder candidate of '{class}'"))
    })
    .collect()
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      eprintln!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      eprintln!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading class model from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_generating(&self, fields: &[FieldMember]) {
    self.info(
      &format!("Generating builder for {} ({} fields)...", self.config.class, fields.len())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_skipped(&self, reason: impl std::fmt::Display) {
    self.info(&format!("Nothing generated: {reason}").with(self.colors.accent()).to_string());
  }

  fn print_report(&self, report: &GenerationReport) {
    if self.config.quiet {
      return;
    }

    self.stat("Builder class:", report.builder_class.clone());
    if report.builder_created {
      self.stat("", "created".to_string());
    }
    self.stat("Members added:", report.members_added().to_string());
    self.stat("Members replaced:", report.members_replaced().to_string());
    self.stat("Members unchanged:", report.members_unchanged().to_string());
    if report.members_removed() > 0 {
      self.stat("Members removed:", report.members_removed().to_string());
    }
    if !report.warnings.is_empty() {
      self.stat("Warnings:", report.warnings.len().to_string());
    }

    self.print_changes(report);
    self.print_warnings(report);
  }

  fn print_changes(&self, report: &GenerationReport) {
    if !self.config.verbose {
      return;
    }

    for change in &report.changes {
      eprintln!(
        "              {:<10} {}",
        change.action.to_string().with(self.colors.action(change.action)),
        format!("{} in {}", change.member, change.class).with(self.colors.primary())
      );
    }
  }

  fn print_warnings(&self, report: &GenerationReport) {
    if report.warnings.is_empty() || self.config.quiet {
      return;
    }

    let mut printed_header = false;
    for warning in &report.warnings {
      let should_print = warning.is_skipped_item() || self.config.verbose;
      if !should_print {
        continue;
      }

      if !printed_header {
        eprintln!();
        printed_header = true;
      }

      let label = if warning.is_skipped_item() { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        label.with(self.colors.accent()),
        warning.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    let targets = [&self.config.output, &self.config.java]
      .into_iter()
      .flatten()
      .map(|path| path.display().to_string())
      .join(", ");
    if !targets.is_empty() {
      self.info(&format!("Writing to: {targets}").with(self.colors.primary()).to_string());
    }
  }

  fn log_success(&self) {
    if !self.config.quiet {
      eprintln!();
      eprintln!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully generated builder".with(self.colors.action(MergeAction::Added))
      );
    }
  }
}

pub async fn generate_builder(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let mut model = read_model(&config.input).await?;
  let options = config.load_options().await?;
  let fields = config.collect_fields(&model)?;

  logger.log_generating(&fields);
  let outcome = BuilderSynthesizer::new(&options).synthesize(&mut model, &config.class, &fields)?;

  match outcome {
    SynthesisOutcome::Skipped(reason) => {
      logger.log_skipped(reason);
      Ok(())
    }
    SynthesisOutcome::Generated(report) => {
      logger.print_report(&report);
      logger.log_writing();
      config.write_outputs(&model).await?;
      logger.log_success();
      Ok(())
    }
  }
}
