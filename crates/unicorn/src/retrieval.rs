//! Retrieval over the company dataset
//!
//! Three strategies feed the conversation: direct entity lookup, narrowing a
//! prior result set by location, and a broad sector/keyword search over the
//! whole dataset. Result sets hold row positions into the [`Dataset`], in
//! dataset order.

use crate::dataset::Dataset;
use crate::error::{Result, UnicornError};
use crate::record::CompanyRecord;

/// Context string for an empty result set
pub const NO_MATCH: &str = "No matching companies found.";

/// Most records rendered into a context string
pub const MAX_FORMATTED: usize = 5;

const STOP_WORDS: [&str; 10] = ["what", "does", "do", "tell", "me", "about", "is", "the", "a", "an"];

/// Query words that select a location, and the location fragments they keep
struct LocationRule {
  triggers: &'static [&'static str],
  places: &'static [&'static str],
}

const LOCATION_RULES: [LocationRule; 3] = [
  LocationRule { triggers: &["bangalore", "bengaluru"], places: &["Bengaluru"] },
  LocationRule { triggers: &["mumbai"], places: &["Mumbai"] },
  LocationRule { triggers: &["delhi", "ncr"], places: &["Delhi", "Noida", "Gurugram"] },
];

/// Rows of the dataset selected by one retrieval
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
  rows: Vec<usize>,
}

impl ResultSet {
  pub fn new(rows: Vec<usize>) -> Self {
    Self { rows }
  }

  pub fn empty() -> Self {
    Self::default()
  }

  /// Every row of the dataset
  pub fn all(dataset: &Dataset) -> Self {
    Self::new((0..dataset.len()).collect())
  }

  pub fn rows(&self) -> &[usize] {
    &self.rows
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// Records of this set with their row positions
  pub fn records<'a>(
    &'a self,
    dataset: &'a Dataset,
  ) -> impl Iterator<Item = (usize, &'a CompanyRecord)> + 'a {
    self.rows.iter().filter_map(move |&row| dataset.get(row).map(|record| (row, record)))
  }

  /// Company names of this set, in order
  pub fn companies<'a>(&'a self, dataset: &'a Dataset) -> Vec<&'a str> {
    self.records(dataset).map(|(_, record)| record.company()).collect()
  }

  fn retain<F>(&self, dataset: &Dataset, keep: F) -> Self
  where
    F: Fn(&CompanyRecord) -> bool,
  {
    Self::new(self.records(dataset).filter(|(_, record)| keep(*record)).map(|(row, _)| row).collect())
  }
}

/// All records whose name is the canonical form of `name_lower`
pub fn lookup_entity(dataset: &Dataset, name_lower: &str) -> ResultSet {
  match dataset.canonical_name(name_lower) {
    Some(canonical) => ResultSet::all(dataset).retain(dataset, |record| record.company() == canonical),
    None => ResultSet::empty(),
  }
}

/// Narrow a prior result set by the first location rule the query triggers.
///
/// A query without any location word passes the prior set through unchanged.
pub fn filter_by_context(dataset: &Dataset, prior: &ResultSet, query: &str) -> ResultSet {
  let query = query.to_lowercase();

  let rule = LOCATION_RULES
    .iter()
    .find(|rule| rule.triggers.iter().any(|trigger| query.contains(*trigger)));

  match rule {
    Some(rule) => prior.retain(dataset, |record| {
      let location = record.location().to_lowercase();
      rule.places.iter().any(|place| location.contains(&place.to_lowercase()))
    }),
    None => prior.clone(),
  }
}

/// Search the whole dataset by sector topic, or by keyword when no topic is named.
///
/// A matched topic never falls through to keyword matching, even when its
/// sectors select nothing. A query of only stop words matches every row.
pub fn search_broad(dataset: &Dataset, query: &str) -> ResultSet {
  let query = query.to_lowercase();
  let everything = ResultSet::all(dataset);

  if let Some(sectors) = dataset.sectors().matching_sectors(&query) {
    return everything.retain(dataset, |record| sectors.contains(record.primary_sector()));
  }

  let terms = keywords(&query);
  if terms.is_empty() {
    return everything;
  }

  everything.retain(dataset, |record| {
    record.values().any(|value| {
      let value = value.to_lowercase();
      terms.iter().any(|term| value.contains(*term))
    })
  })
}

/// Whitespace tokens of a lowercased query minus stop words
pub fn keywords(query_lower: &str) -> Vec<&str> {
  query_lower.split_whitespace().filter(|word| !STOP_WORDS.contains(word)).collect()
}

/// Render at most [`MAX_FORMATTED`] records into the context string.
///
/// Fails when a record about to be shown has no company name.
pub fn format_results(dataset: &Dataset, results: &ResultSet) -> Result<String> {
  if results.is_empty() {
    return Ok(NO_MATCH.to_string());
  }

  let mut context = String::from("Found the following companies:\n");
  for (row, record) in results.records(dataset).take(MAX_FORMATTED) {
    if record.company().is_empty() {
      return Err(UnicornError::malformed_record(row, "record has no Company name"));
    }

    context.push_str(&format!(
      "- Name: {}\n  Description: {}\n  Sector: {}\n  Location: {}\n\n",
      record.company(),
      record.background(),
      record.primary_sector(),
      record.location()
    ));
  }

  Ok(context)
}
