//! Per-turn intent resolution
//!
//! Each turn takes exactly one strategy, in priority order:
//!
//! 1. **Entity**: a known company name occurs in the input.
//! 2. **Follow-up**: "these"/"they" refer back to a non-empty stored context.
//! 3. **Broad**: sector or keyword search over the whole dataset.
//!
//! Resolution is pure. The caller commits the returned [`ContextUpdate`] to
//! the [`ConversationState`] only once the turn has fully succeeded, so a
//! failed turn leaves the session untouched.

use serde::Serialize;
use tracing::debug;

use crate::dataset::Dataset;
use crate::retrieval::{self, ResultSet};

const FOLLOW_UP_MARKERS: [&str; 2] = ["these", "they"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
  Entity,
  FollowUp,
  Broad,
}

/// What a resolved turn does to the stored context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextUpdate {
  Replace(ResultSet),
  Keep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
  pub strategy: Strategy,
  /// Lowercased name of the detected company
  pub entity: Option<String>,
  /// Whether the input carried a follow-up marker, whichever strategy ran
  pub follow_up: bool,
  pub results: ResultSet,
  pub update: ContextUpdate,
}

/// Mutable state of one conversation
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
  context: ResultSet,
  history: Vec<String>,
}

impl ConversationState {
  pub fn new() -> Self {
    Self::default()
  }

  /// Result set follow-up questions are scoped to
  pub fn context(&self) -> &ResultSet {
    &self.context
  }

  /// Sanitized inputs of every successful turn, oldest first
  pub fn history(&self) -> &[String] {
    &self.history
  }

  /// Record a successful turn and apply its context update
  pub fn commit(&mut self, input: &str, update: ContextUpdate) {
    self.history.push(input.to_string());
    if let ContextUpdate::Replace(results) = update {
      self.context = results;
    }
  }
}

/// First entity candidate contained in the lowercased input
pub fn detect_entity<'a>(dataset: &'a Dataset, input_lower: &str) -> Option<&'a str> {
  dataset
    .entity_candidates()
    .iter()
    .map(String::as_str)
    .find(|name| input_lower.contains(*name))
}

pub fn is_follow_up(input_lower: &str) -> bool {
  FOLLOW_UP_MARKERS.iter().any(|marker| input_lower.contains(*marker))
}

/// Pick the strategy for one turn and run it
pub fn resolve(dataset: &Dataset, state: &ConversationState, input_lower: &str) -> Resolution {
  let follow_up = is_follow_up(input_lower);

  if let Some(name) = detect_entity(dataset, input_lower) {
    let results = retrieval::lookup_entity(dataset, name);
    debug!(entity = name, rows = results.len(), "Resolved entity lookup");
    return Resolution {
      strategy: Strategy::Entity,
      entity: Some(name.to_string()),
      follow_up,
      update: ContextUpdate::Replace(results.clone()),
      results,
    };
  }

  if follow_up && !state.context().is_empty() {
    let results = retrieval::filter_by_context(dataset, state.context(), input_lower);
    debug!(prior = state.context().len(), rows = results.len(), "Resolved follow-up");
    return Resolution {
      strategy: Strategy::FollowUp,
      entity: None,
      follow_up,
      results,
      update: ContextUpdate::Keep,
    };
  }

  let results = retrieval::search_broad(dataset, input_lower);
  debug!(rows = results.len(), "Resolved broad search");
  let update = if results.is_empty() {
    ContextUpdate::Keep
  } else {
    ContextUpdate::Replace(results.clone())
  };

  Resolution { strategy: Strategy::Broad, entity: None, follow_up, results, update }
}
