use std::collections::HashSet;

/// Topic keys users type, each mapped to the `primary_sector` labels it covers.
///
/// The table is fixed and not derived from the data: a label that never
/// appears in the dataset simply never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorMap {
  topics: Vec<(String, Vec<String>)>,
}

const DEFAULT_TOPICS: &[(&str, &[&str])] = &[
  (
    "fintech",
    &[
      "Payments",
      "Alternative Lending",
      "Banking Tech",
      "Investment Tech",
      "Internet First Insurance Platforms",
      "Finance & Accounting Tech",
      "Cryptocurrencies",
    ],
  ),
  ("logistics", &["Logistics Tech", "Road Transport Tech"]),
  (
    "ecommerce",
    &["Horizontal E-Commerce", "B2B E-Commerce", "Auto E-Commerce & Content", "Online Grocery"],
  ),
  ("edtech", &["K-12 EdTech", "Test Preparation Tech", "Continued Learning"]),
  ("health", &["Healthcare Booking Platforms", "Infectious Diseases", "Healthcare IT"]),
];

impl Default for SectorMap {
  fn default() -> Self {
    Self::new(DEFAULT_TOPICS.iter().map(|(topic, sectors)| {
      (topic.to_string(), sectors.iter().map(|s| s.to_string()).collect())
    }))
  }
}

impl SectorMap {
  pub fn new<I>(topics: I) -> Self
  where
    I: IntoIterator<Item = (String, Vec<String>)>,
  {
    Self { topics: topics.into_iter().collect() }
  }

  /// Union of the sector labels of every topic key found in the lowercased query.
  ///
  /// Returns `None` when no topic key occurs, which is different from a
  /// match whose labels select no rows.
  pub fn matching_sectors(&self, query_lower: &str) -> Option<HashSet<&str>> {
    let mut matched = false;
    let mut sectors = HashSet::new();

    for (topic, labels) in &self.topics {
      if query_lower.contains(topic.as_str()) {
        matched = true;
        sectors.extend(labels.iter().map(String::as_str));
      }
    }

    matched.then_some(sectors)
  }

  /// Topic keys and their labels in table order
  pub fn topics(&self) -> impl Iterator<Item = (&str, &[String])> {
    self.topics.iter().map(|(topic, labels)| (topic.as_str(), labels.as_slice()))
  }
}
