use serde::Serialize;

/// Receives one record per processed turn
pub trait MetricsSink {
  fn record_turn(&mut self, latency_ms: f64, is_clarification: bool, is_error: bool);
}

/// Snapshot of session metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsSummary {
  pub total_queries: u64,
  pub clarifications_triggered: u64,
  pub errors: u64,
  pub avg_latency_ms: f64,
}

/// Turn counters and latency history, owned by whoever drives the session
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
  total_queries: u64,
  clarifications_triggered: u64,
  errors: u64,
  latencies: Vec<f64>,
}

impl MetricsCollector {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn latencies(&self) -> &[f64] {
    &self.latencies
  }

  /// Current counters, with the average recomputed over the full latency history
  pub fn summary(&self) -> MetricsSummary {
    let avg_latency_ms = if self.latencies.is_empty() {
      0.0
    } else {
      self.latencies.iter().sum::<f64>() / self.latencies.len() as f64
    };

    MetricsSummary {
      total_queries: self.total_queries,
      clarifications_triggered: self.clarifications_triggered,
      errors: self.errors,
      avg_latency_ms,
    }
  }
}

impl MetricsSink for MetricsCollector {
  fn record_turn(&mut self, latency_ms: f64, is_clarification: bool, is_error: bool) {
    self.total_queries += 1;
    if is_clarification {
      self.clarifications_triggered += 1;
    }
    if is_error {
      self.errors += 1;
    }
    self.latencies.push(latency_ms);
  }
}
