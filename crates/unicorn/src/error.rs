use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnicornError {
  #[error("Failed to load dataset from {}: {detail}", .path.display())]
  Load { path: PathBuf, detail: String },

  #[error("Dataset is missing required column '{0}'")]
  MissingColumn(String),

  #[error("Malformed record at row {row}: {detail}")]
  MalformedRecord { row: usize, detail: String },

  #[error(transparent)]
  Csv(#[from] csv::Error),

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error("Invalid configuration: {0}")]
  Config(#[from] serde_json::Error),
}

impl UnicornError {
  pub fn load(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
    Self::Load { path: path.into(), detail: detail.into() }
  }

  pub fn malformed_record(row: usize, detail: impl Into<String>) -> Self {
    Self::MalformedRecord { row, detail: detail.into() }
  }

  /// Whether this error should refuse the session rather than abort a turn
  pub fn is_load_error(&self) -> bool {
    matches!(self, Self::Load { .. } | Self::MissingColumn(_) | Self::Csv(_) | Self::Io(_))
  }
}

pub type Result<T> = std::result::Result<T, UnicornError>;
