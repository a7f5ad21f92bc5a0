//! Unicorn - Context-aware Company Q&A
//!
//! Answers natural-language questions about companies in a tabular dataset.
//! Each turn resolves to an entity lookup, a follow-up narrowing of the prior
//! result set, or a broad sector/keyword search, and the results are turned
//! into a templated reply.

pub mod chatbot;
pub mod config;
pub mod dataset;
pub mod error;
pub mod intent;
pub mod metrics;
pub mod record;
pub mod retrieval;
pub mod sectors;
pub mod synthesis;

pub use chatbot::{sanitize_input, Chatbot, QueryOutcome};
pub use dataset::Dataset;
pub use error::{Result, UnicornError};
pub use metrics::{MetricsCollector, MetricsSink, MetricsSummary};
