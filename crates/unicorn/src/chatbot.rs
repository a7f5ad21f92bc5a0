use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::dataset::Dataset;
use crate::error::Result;
use crate::intent::{self, ConversationState, Resolution, Strategy};
use crate::metrics::MetricsSink;
use crate::retrieval::{self, ResultSet};
use crate::synthesis::{Reply, RuleTable, Synthesizer};

static DISALLOWED: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"[^\w\s?.,-]").expect("valid sanitizer regex"));

/// Strip everything but word characters, whitespace and `? . , -`, then trim
pub fn sanitize_input(input: &str) -> String {
  DISALLOWED.replace_all(input, "").trim().to_string()
}

/// Everything one turn produced
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
  pub query: String,
  #[serde(skip)]
  pub results: ResultSet,
  pub companies: Vec<String>,
  pub entity: Option<String>,
  pub strategy: Option<Strategy>,
  pub follow_up: bool,
  pub latency_ms: f64,
  pub reply: String,
  pub is_clarification: bool,
  pub is_error: bool,
}

/// One conversation over a shared dataset
pub struct Chatbot<S: Synthesizer = RuleTable> {
  dataset: Arc<Dataset>,
  state: ConversationState,
  synthesizer: S,
}

impl Chatbot<RuleTable> {
  pub fn new(dataset: Arc<Dataset>) -> Self {
    Self::with_synthesizer(dataset, RuleTable::default())
  }
}

impl<S: Synthesizer> Chatbot<S> {
  pub fn with_synthesizer(dataset: Arc<Dataset>, synthesizer: S) -> Self {
    Self { dataset, state: ConversationState::new(), synthesizer }
  }

  pub fn state(&self) -> &ConversationState {
    &self.state
  }

  pub fn dataset(&self) -> &Dataset {
    &self.dataset
  }

  /// Answer one line of user input and report the turn to `metrics`.
  ///
  /// A failing turn yields an `Error: ...` reply and leaves the conversation
  /// state as it was.
  pub fn process<M: MetricsSink + ?Sized>(&mut self, input: &str, metrics: &mut M) -> QueryOutcome {
    let start = Instant::now();
    let clean = sanitize_input(input);
    let lower = clean.to_lowercase();

    let outcome = match self.answer(&clean, &lower) {
      Ok((resolution, reply)) => {
        let companies = self.company_names(&resolution.results);
        self.state.commit(&clean, resolution.update);
        QueryOutcome {
          query: clean,
          results: resolution.results,
          companies,
          entity: resolution.entity,
          strategy: Some(resolution.strategy),
          follow_up: resolution.follow_up,
          latency_ms: elapsed_ms(start),
          is_clarification: reply.is_clarification(),
          reply: reply.text,
          is_error: false,
        }
      }
      Err(e) => {
        warn!(query = %clean, error = %e, "Turn failed");
        QueryOutcome {
          query: clean,
          results: ResultSet::empty(),
          companies: Vec::new(),
          entity: None,
          strategy: None,
          follow_up: intent::is_follow_up(&lower),
          latency_ms: elapsed_ms(start),
          reply: format!("Error: {e}"),
          is_clarification: false,
          is_error: true,
        }
      }
    };

    metrics.record_turn(outcome.latency_ms, outcome.is_clarification, outcome.is_error);
    info!(
      query = %outcome.query,
      entity = ?outcome.entity,
      follow_up = outcome.follow_up,
      rows = outcome.results.len(),
      latency_ms = outcome.latency_ms,
      "Processed turn"
    );

    outcome
  }

  fn answer(&self, clean: &str, lower: &str) -> Result<(Resolution, Reply)> {
    let resolution = intent::resolve(&self.dataset, &self.state, lower);
    let context = retrieval::format_results(&self.dataset, &resolution.results)?;
    let reply = self.synthesizer.synthesize(clean, &context);
    Ok((resolution, reply))
  }

  fn company_names(&self, results: &ResultSet) -> Vec<String> {
    results.companies(&self.dataset).into_iter().map(str::to_string).collect()
  }
}

fn elapsed_ms(start: Instant) -> f64 {
  start.elapsed().as_secs_f64() * 1000.0
}
