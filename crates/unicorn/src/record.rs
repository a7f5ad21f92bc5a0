/// Canonical company name column
pub const COMPANY: &str = "Company";
pub const LOCATION: &str = "location";
pub const PRIMARY_SECTOR: &str = "primary_sector";
pub const COMPANY_BACKGROUND: &str = "company_background";

/// Columns every dataset must carry
pub const REQUIRED_COLUMNS: [&str; 4] = [COMPANY, LOCATION, PRIMARY_SECTOR, COMPANY_BACKGROUND];

/// One row of the company dataset.
///
/// Columns keep their file order. Anything beyond the four required columns
/// is carried along untouched and only consulted by keyword search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
  fields: Vec<(String, String)>,
}

impl CompanyRecord {
  pub fn new(fields: Vec<(String, String)>) -> Self {
    Self { fields }
  }

  /// Build a record from `(column, value)` pairs
  pub fn from_pairs<I, K, V>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    Self::new(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }

  /// Value of a column, if the record has it
  pub fn get(&self, column: &str) -> Option<&str> {
    self.fields.iter().find(|(name, _)| name == column).map(|(_, value)| value.as_str())
  }

  pub fn company(&self) -> &str {
    self.get(COMPANY).unwrap_or_default()
  }

  pub fn location(&self) -> &str {
    self.get(LOCATION).unwrap_or_default()
  }

  pub fn primary_sector(&self) -> &str {
    self.get(PRIMARY_SECTOR).unwrap_or_default()
  }

  pub fn background(&self) -> &str {
    self.get(COMPANY_BACKGROUND).unwrap_or_default()
  }

  /// Every column value in file order
  pub fn values(&self) -> impl Iterator<Item = &str> {
    self.fields.iter().map(|(_, value)| value.as_str())
  }
}
