//! Reply synthesis
//!
//! Turns a query and its context string into the bot's reply. The default
//! [`RuleTable`] is an ordered list of rules, first match wins; anything that
//! implements [`Synthesizer`] can stand in for it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::retrieval::NO_MATCH;

pub const CLARIFICATION: &str =
  "Could you verify which specific sector or criteria you are looking for? (e.g., Valuation, Sector, Location)";
pub const NOTHING_FOUND: &str = "I couldn't find any companies matching that description in the dataset.";
pub const NONE_OF_THESE: &str = "None of the previously listed companies match that criterion.";

const VAGUE_WORDS: [&str; 4] = ["best", "top", "good", "suggest"];
const SPECIFIC_TOPICS: [&str; 2] = ["fintech", "logistics"];

static NAME_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Name: (.*)").expect("valid name-line regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
  /// Asks the user to narrow an ambiguous request
  Clarification,
  NoMatch,
  /// Names the companies of a narrowed follow-up
  Enumeration,
  Information,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
  pub kind: ReplyKind,
  pub text: String,
}

impl Reply {
  pub fn is_clarification(&self) -> bool {
    self.kind == ReplyKind::Clarification
  }
}

pub trait Synthesizer {
  fn synthesize(&self, query: &str, context: &str) -> Reply;
}

/// One row of the rule table
pub struct Rule {
  pub name: &'static str,
  pub kind: ReplyKind,
  applies: fn(&str, &str) -> bool,
  respond: fn(&str, &str) -> String,
}

impl Rule {
  pub fn new(
    name: &'static str,
    kind: ReplyKind,
    applies: fn(&str, &str) -> bool,
    respond: fn(&str, &str) -> String,
  ) -> Self {
    Self { name, kind, applies, respond }
  }
}

pub struct RuleTable {
  rules: Vec<Rule>,
}

impl Default for RuleTable {
  fn default() -> Self {
    Self::new(vec![
      Rule::new("ambiguous", ReplyKind::Clarification, is_ambiguous, |_, _| CLARIFICATION.to_string()),
      Rule::new("no_match", ReplyKind::NoMatch, |_, context| context == NO_MATCH, |_, _| {
        NOTHING_FOUND.to_string()
      }),
      Rule::new(
        "which_of_these",
        ReplyKind::Enumeration,
        |query, _| query.contains("which of these"),
        |_, context| enumerate_names(context),
      ),
      Rule::new("information", ReplyKind::Information, |_, _| true, |_, context| {
        format!("Here is the information I found:\n\n{context}\nWould you like to know more about any of these?")
      }),
    ])
  }
}

impl RuleTable {
  pub fn new(rules: Vec<Rule>) -> Self {
    Self { rules }
  }

  pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.rules.iter().map(|rule| rule.name)
  }
}

impl Synthesizer for RuleTable {
  fn synthesize(&self, query: &str, context: &str) -> Reply {
    let query = query.to_lowercase();

    self
      .rules
      .iter()
      .find(|rule| (rule.applies)(&query, context))
      .map(|rule| Reply { kind: rule.kind, text: (rule.respond)(&query, context) })
      .unwrap_or_else(|| Reply { kind: ReplyKind::Information, text: context.to_string() })
  }
}

/// A request for "the best" of something without naming a topic the data can rank
fn is_ambiguous(query: &str, _context: &str) -> bool {
  VAGUE_WORDS.iter().any(|word| query.contains(*word))
    && !SPECIFIC_TOPICS.iter().any(|topic| query.contains(*topic))
}

fn enumerate_names(context: &str) -> String {
  let names: Vec<&str> = NAME_LINE
    .captures_iter(context)
    .filter_map(|caps| caps.get(1))
    .map(|m| m.as_str())
    .collect();

  if names.is_empty() {
    NONE_OF_THESE.to_string()
  } else {
    format!("Based on your previous query, the companies matching your criteria are: {}.", names.join(", "))
  }
}
