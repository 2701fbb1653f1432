use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// String key/value persistence for option state.
pub trait OptionStore {
  fn get(&self, key: &str) -> Option<String>;

  fn set(&mut self, key: &str, value: String);

  fn remove(&mut self, key: &str);
}

/// In-memory option store. Hosts load and save it as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryOptionStore {
  values: BTreeMap<String, String>,
}

impl MemoryOptionStore {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.values.iter().map(|(key, value)| (key.as_str(), value.as_str()))
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}

impl OptionStore for MemoryOptionStore {
  fn get(&self, key: &str) -> Option<String> {
    self.values.get(key).cloned()
  }

  fn set(&mut self, key: &str, value: String) {
    self.values.insert(key.to_string(), value);
  }

  fn remove(&mut self, key: &str) {
    self.values.remove(key);
  }
}
