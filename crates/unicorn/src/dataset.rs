//! Dataset bootstrap
//!
//! Reads the company CSV once, trims every cell, and derives the
//! lowercase-name index used for entity detection. The dataset is read-only
//! afterwards and may be shared between sessions.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{Result, UnicornError};
use crate::record::{CompanyRecord, REQUIRED_COLUMNS};
use crate::sectors::SectorMap;

/// Text encoding the dataset was decoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
  Utf8,
  Latin1,
}

impl fmt::Display for Encoding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Encoding::Utf8 => write!(f, "UTF-8"),
      Encoding::Latin1 => write!(f, "Latin-1"),
    }
  }
}

/// Two rows whose names differ only in case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision {
  pub key: String,
  pub replaced: String,
  pub kept: String,
}

#[derive(Debug, Clone)]
pub struct Dataset {
  records: Vec<CompanyRecord>,
  names: HashMap<String, String>,
  candidates: Vec<String>,
  collisions: Vec<NameCollision>,
  sectors: SectorMap,
}

impl Dataset {
  /// Build a dataset from already-cleaned records with the default sector table
  pub fn new(records: Vec<CompanyRecord>) -> Self {
    Self::with_sectors(records, SectorMap::default())
  }

  pub fn with_sectors(records: Vec<CompanyRecord>, sectors: SectorMap) -> Self {
    let mut names = HashMap::new();
    let mut collisions = Vec::new();

    for record in &records {
      let name = record.company();
      if name.is_empty() {
        continue;
      }

      let key = name.to_lowercase();
      if let Some(previous) = names.insert(key.clone(), name.to_string()) {
        if previous != name {
          warn!(key = %key, replaced = %previous, kept = %name, "Case-insensitive company name collision");
          collisions.push(NameCollision { key, replaced: previous, kept: name.to_string() });
        }
      }
    }

    let mut candidates: Vec<String> = names.keys().cloned().collect();
    candidates.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    Self { records, names, candidates, collisions, sectors }
  }

  /// Load a dataset from a CSV file, falling back to Latin-1 when it is not valid UTF-8
  pub fn load(path: &Path) -> Result<Self> {
    let bytes = fs::read(path).map_err(|e| UnicornError::load(path, e.to_string()))?;
    let (text, encoding) = decode_text(bytes);
    if encoding == Encoding::Latin1 {
      warn!(path = %path.display(), "UTF-8 decode failed. Retrying with Latin-1...");
    }

    let dataset = Self::from_csv_str(&text).map_err(|e| match e {
      UnicornError::Csv(err) => UnicornError::load(path, err.to_string()),
      other => other,
    })?;

    info!(
      records = dataset.len(),
      encoding = %encoding,
      "Loaded {} records from {} ({})",
      dataset.len(),
      path.display(),
      encoding
    );
    Ok(dataset)
  }

  /// Parse CSV text with a header row into a dataset
  pub fn from_csv_str(text: &str) -> Result<Self> {
    let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    for column in REQUIRED_COLUMNS {
      if !headers.iter().any(|h| h == column) {
        return Err(UnicornError::MissingColumn(column.to_string()));
      }
    }

    let mut records = Vec::new();
    for row in reader.records() {
      let row = row?;
      let fields = headers
        .iter()
        .zip(row.iter())
        .map(|(column, value)| (column.clone(), value.trim().to_string()))
        .collect();
      records.push(CompanyRecord::new(fields));
    }

    Ok(Self::new(records))
  }

  pub fn records(&self) -> &[CompanyRecord] {
    &self.records
  }

  pub fn get(&self, row: usize) -> Option<&CompanyRecord> {
    self.records.get(row)
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  /// Canonical casing of a lowercased company name
  pub fn canonical_name(&self, name_lower: &str) -> Option<&str> {
    self.names.get(name_lower).map(String::as_str)
  }

  /// Lowercased company names in entity-detection order: longest first, ties alphabetical
  pub fn entity_candidates(&self) -> &[String] {
    &self.candidates
  }

  pub fn name_collisions(&self) -> &[NameCollision] {
    &self.collisions
  }

  pub fn sectors(&self) -> &SectorMap {
    &self.sectors
  }
}

/// Decode raw bytes as UTF-8, or as Latin-1 when that fails
fn decode_text(bytes: Vec<u8>) -> (String, Encoding) {
  match String::from_utf8(bytes) {
    Ok(text) => (text.trim_start_matches('\u{feff}').to_string(), Encoding::Utf8),
    Err(e) => (e.into_bytes().iter().map(|&b| b as char).collect(), Encoding::Latin1),
  }
}
