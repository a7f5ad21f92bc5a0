//! Configuration for the Unicorn driver
//!
//! Resolves where the dataset lives and where diagnostics are written.
//! Values come from an optional JSON file; command-line flags win over it.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
  /// CSV file holding the company dataset
  #[serde(default = "default_data_path")]
  pub data_path: PathBuf,
  /// File receiving diagnostic logs; empty disables file logging
  #[serde(default = "default_log_file")]
  pub log_file: PathBuf,
}

fn default_data_path() -> PathBuf {
  PathBuf::from("tracxn.csv")
}
fn default_log_file() -> PathBuf {
  PathBuf::from("unicorn.log")
}

impl Default for Config {
  fn default() -> Self {
    Self { data_path: default_data_path(), log_file: default_log_file() }
  }
}

impl Config {
  /// Load configuration from a file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
  }

  /// Load configuration from the current directory or defaults
  pub fn load() -> Result<Self> {
    let config_paths = [".unicorn.json", "unicorn.json"];

    for path in &config_paths {
      if Path::new(path).exists() {
        return Self::load_from_file(path);
      }
    }

    Ok(Config::default())
  }

  /// Replace the dataset path when one was given on the command line
  pub fn with_data_path(mut self, data_path: Option<PathBuf>) -> Self {
    if let Some(path) = data_path {
      self.data_path = path;
    }
    self
  }

  /// Log file, if file logging is enabled
  pub fn log_file(&self) -> Option<&Path> {
    if self.log_file.as_os_str().is_empty() {
      None
    } else {
      Some(&self.log_file)
    }
  }
}
