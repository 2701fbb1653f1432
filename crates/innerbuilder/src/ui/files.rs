use std::{io::ErrorKind, path::Path};

use anyhow::Context as _;
use innerbuilder::generator::MemoryOptionStore;
use innerbuilder_model::ClassRepository;

pub async fn read_model(path: &Path) -> anyhow::Result<ClassRepository> {
  let content = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("Failed to read class model '{}'", path.display()))?;
  ClassRepository::from_json(&content).with_context(|| format!("Invalid class model '{}'", path.display()))
}

pub async fn write_text(path: &Path, content: String) -> anyhow::Result<()> {
  if let Some(parent) = path.parent() {
    tokio::fs::create_dir_all(parent).await?;
  }
  tokio::fs::write(path, content)
    .await
    .with_context(|| format!("Failed to write '{}'", path.display()))
}

/// A missing options file reads as an empty store, so every option takes its default.
pub async fn read_option_store(path: &Path) -> anyhow::Result<MemoryOptionStore> {
  match tokio::fs::read_to_string(path).await {
    Ok(content) => {
      serde_json::from_str(&content).with_context(|| format!("Invalid options file '{}'", path.display()))
    }
    Err(err) if err.kind() == ErrorKind::NotFound => Ok(MemoryOptionStore::new()),
    Err(err) => Err(err).with_context(|| format!("Failed to read options file '{}'", path.display())),
  }
}

pub async fn write_option_store(path: &Path, store: &MemoryOptionStore) -> anyhow::Result<()> {
  let mut json = serde_json::to_string_pretty(store)?;
  json.push('\n');
  write_text(path, json).await
}
