mod common;

use std::sync::Arc;
use unicorn::intent::Strategy;
use unicorn::record::CompanyRecord;
use unicorn::synthesis::{Reply, ReplyKind, Synthesizer, CLARIFICATION};
use unicorn::{Chatbot, Dataset, MetricsCollector, MetricsSink};

#[cfg(test)]
mod conversation_tests {
  use super::*;

  #[test]
  fn test_entity_question_lists_the_company() {
    let mut bot = Chatbot::new(common::shared_fixture());
    let mut metrics = MetricsCollector::new();

    let outcome = bot.process("What does Razorpay do?", &mut metrics);

    assert_eq!(outcome.strategy, Some(Strategy::Entity));
    assert_eq!(outcome.entity.as_deref(), Some("razorpay"));
    assert_eq!(outcome.companies, vec!["Razorpay"]);
    assert!(outcome.reply.starts_with("Here is the information I found:"));
    assert!(outcome.reply.contains("- Name: Razorpay"));
    assert!(outcome.reply.contains("Online payment gateway for businesses"));
  }

  #[test]
  fn test_top_fintech_is_a_sector_search() {
    let mut bot = Chatbot::new(common::shared_fixture());
    let mut metrics = MetricsCollector::new();

    let outcome = bot.process("top fintech startups", &mut metrics);

    assert!(!outcome.is_clarification);
    assert_eq!(outcome.strategy, Some(Strategy::Broad));
    assert_eq!(outcome.companies, common::FINTECH);
    assert_eq!(metrics.summary().clarifications_triggered, 0);
  }

  #[test]
  fn test_vague_request_counts_one_clarification() {
    let mut bot = Chatbot::new(common::shared_fixture());
    let mut metrics = MetricsCollector::new();

    let outcome = bot.process("suggest something good", &mut metrics);

    assert_eq!(outcome.reply, CLARIFICATION);
    assert!(outcome.is_clarification);
    assert_eq!(metrics.summary().clarifications_triggered, 1);
    assert_eq!(metrics.summary().total_queries, 1);
  }

  #[test]
  fn test_follow_ups_narrow_the_same_anchor() {
    let mut bot = Chatbot::new(common::shared_fixture());
    let mut metrics = MetricsCollector::new();

    bot.process("fintech companies", &mut metrics);
    let anchor = bot.state().context().clone();

    let bangalore = bot.process("Which of these are in Bangalore?", &mut metrics);
    assert_eq!(bangalore.strategy, Some(Strategy::FollowUp));
    assert_eq!(
      bangalore.reply,
      "Based on your previous query, the companies matching your criteria are: Razorpay, Cred, Zerodha."
    );

    let delhi = bot.process("which of these are in delhi", &mut metrics);
    assert_eq!(delhi.companies, vec!["Policybazaar", "Paytm"]);
    assert_eq!(bot.state().context(), &anchor);
  }

  #[test]
  fn test_follow_up_without_location_returns_anchor() {
    let mut bot = Chatbot::new(common::shared_fixture());
    let mut metrics = MetricsCollector::new();

    bot.process("fintech", &mut metrics);
    let outcome = bot.process("tell me more about these", &mut metrics);

    assert_eq!(outcome.strategy, Some(Strategy::FollowUp));
    assert_eq!(outcome.companies, common::FINTECH);
  }

  #[test]
  fn test_follow_up_with_empty_narrowing() {
    let mut bot = Chatbot::new(common::shared_fixture());
    let mut metrics = MetricsCollector::new();

    bot.process("fintech", &mut metrics);
    let outcome = bot.process("which of these are in mumbai", &mut metrics);

    assert_eq!(outcome.reply, unicorn::synthesis::NOTHING_FOUND);
    assert!(!outcome.is_error);
  }

  #[test]
  fn test_follow_up_first_turn_falls_back_to_broad_search() {
    let mut bot = Chatbot::new(common::shared_fixture());
    let mut metrics = MetricsCollector::new();

    let outcome = bot.process("what are they", &mut metrics);

    assert_eq!(outcome.strategy, Some(Strategy::Broad));
    assert!(!outcome.is_error);
  }

  #[test]
  fn test_input_is_sanitized_before_resolution() {
    let mut bot = Chatbot::new(common::shared_fixture());
    let mut metrics = MetricsCollector::new();

    let outcome = bot.process("<script>Zepto</script>!!", &mut metrics);

    assert_eq!(outcome.query, "scriptZeptoscript");
    assert_eq!(outcome.companies, vec!["Zepto"]);
    assert_eq!(bot.state().history(), &["scriptZeptoscript"]);
  }

  #[test]
  fn test_sessions_share_dataset_but_not_state() {
    let dataset = common::shared_fixture();
    let mut first = Chatbot::new(Arc::clone(&dataset));
    let mut second = Chatbot::new(Arc::clone(&dataset));
    let mut metrics = MetricsCollector::new();

    first.process("fintech", &mut metrics);
    let outcome = second.process("which of these are in bangalore", &mut metrics);

    assert_eq!(outcome.strategy, Some(Strategy::Broad));
    assert!(second.state().context().len() != first.state().context().len());
  }
}

#[cfg(test)]
mod turn_error_tests {
  use super::*;

  fn dataset_with_nameless_row() -> Arc<Dataset> {
    Arc::new(Dataset::new(vec![
      CompanyRecord::from_pairs([
        ("Company", ""),
        ("location", "Mumbai"),
        ("primary_sector", "Fantasy Sports"),
        ("company_background", "Ghost listing"),
      ]),
      CompanyRecord::from_pairs([
        ("Company", "Zepto"),
        ("location", "Mumbai"),
        ("primary_sector", "Online Grocery"),
        ("company_background", "Grocery delivery"),
      ]),
    ]))
  }

  #[test]
  fn test_failed_turn_reports_error_and_keeps_state() {
    let mut bot = Chatbot::new(dataset_with_nameless_row());
    let mut metrics = MetricsCollector::new();

    bot.process("zepto", &mut metrics);
    let anchor = bot.state().context().clone();

    let outcome = bot.process("ghost", &mut metrics);

    assert!(outcome.is_error);
    assert!(outcome.reply.starts_with("Error: Malformed record at row 0"));
    assert_eq!(bot.state().context(), &anchor);
    assert_eq!(bot.state().history(), &["zepto"]);

    let summary = metrics.summary();
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.total_queries, 2);
  }

  #[test]
  fn test_session_continues_after_error() {
    let mut bot = Chatbot::new(dataset_with_nameless_row());
    let mut metrics = MetricsCollector::new();

    bot.process("ghost", &mut metrics);
    let outcome = bot.process("tell me about zepto", &mut metrics);

    assert!(!outcome.is_error);
    assert_eq!(outcome.companies, vec!["Zepto"]);
  }
}

#[cfg(test)]
mod metrics_tests {
  use super::*;

  #[derive(Default)]
  struct RecordingSink {
    turns: Vec<(bool, bool)>,
  }

  impl MetricsSink for RecordingSink {
    fn record_turn(&mut self, _latency_ms: f64, is_clarification: bool, is_error: bool) {
      self.turns.push((is_clarification, is_error));
    }
  }

  #[test]
  fn test_every_turn_reaches_the_sink() {
    let mut bot = Chatbot::new(common::shared_fixture());
    let mut sink = RecordingSink::default();

    bot.process("what does zerodha do", &mut sink);
    bot.process("best companies", &mut sink);
    bot.process("quantum", &mut sink);

    assert_eq!(sink.turns, vec![(false, false), (true, false), (false, false)]);
  }

  #[test]
  fn test_average_latency_matches_history() {
    let mut bot = Chatbot::new(common::shared_fixture());
    let mut metrics = MetricsCollector::new();

    for (n, query) in ["fintech", "which of these are in ncr", "tell me about cred", "edtech"].iter().enumerate() {
      bot.process(query, &mut metrics);
      let latencies = metrics.latencies();
      assert_eq!(latencies.len(), n + 1);

      let mean = latencies.iter().sum::<f64>() / latencies.len() as f64;
      assert!((metrics.summary().avg_latency_ms - mean).abs() < 1e-9);
    }
  }

  struct Echo;

  impl Synthesizer for Echo {
    fn synthesize(&self, _query: &str, context: &str) -> Reply {
      Reply { kind: ReplyKind::Information, text: context.to_string() }
    }
  }

  #[test]
  fn test_custom_synthesizer_backend() {
    let mut bot = Chatbot::with_synthesizer(common::shared_fixture(), Echo);
    let mut metrics = MetricsCollector::new();

    let outcome = bot.process("suggest good payments", &mut metrics);

    assert!(!outcome.is_clarification);
    assert!(outcome.reply.starts_with("Found the following companies:"));
    assert_eq!(metrics.summary().clarifications_triggered, 0);
  }
}
