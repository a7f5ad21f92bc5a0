#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use unicorn::Dataset;

/// Twelve companies; the fintech topic covers rows 0, 1, 2, 3 and 10
pub const FIXTURE_CSV: &str = "\
Company,location,primary_sector,company_background,valuation
Razorpay,\"Bengaluru, Karnataka, India\",Payments,Online payment gateway for businesses,7.5B
Cred,\"Bengaluru, Karnataka, India\",Banking Tech,Rewards platform for card bill payments,6.4B
Zerodha,\"Bengaluru, Karnataka, India\",Investment Tech,Discount stock brokerage,2B
Policybazaar,\"Gurugram, Haryana, India\",Internet First Insurance Platforms,Online insurance marketplace,2.4B
Delhivery,\"Gurugram, Haryana, India\",Logistics Tech,Supply chain and warehousing services,3B
Rivigo,\"Gurugram, Haryana, India\",Road Transport Tech,Trucking relay network,1B
  Zepto  ,\"Mumbai, Maharashtra, India\",Online Grocery,  Ten-minute grocery delivery  ,5B
Ola,\"Bengaluru, Karnataka, India\",Ride Hailing,Ride hailing app,7B
Ola Electric,\"Bengaluru, Karnataka, India\",Electric Vehicles,Electric scooter maker,5B
Unacademy,\"Bengaluru, Karnataka, India\",Test Preparation Tech,Online learning platform,3.4B
Paytm,\"Noida, Uttar Pradesh, India\",Payments,Digital wallet and financial services,16B
Dream11,\"Mumbai, Maharashtra, India\",Fantasy Sports,Fantasy sports platform,8B
";

pub const FINTECH: [&str; 5] = ["Razorpay", "Cred", "Zerodha", "Policybazaar", "Paytm"];

pub fn fixture() -> Dataset {
  Dataset::from_csv_str(FIXTURE_CSV).expect("fixture parses")
}

pub fn shared_fixture() -> Arc<Dataset> {
  Arc::new(fixture())
}

/// Write the fixture CSV into `dir` and return its path
pub fn write_fixture(dir: &Path) -> PathBuf {
  let path = dir.join("tracxn.csv");
  fs::write(&path, FIXTURE_CSV).expect("write fixture");
  path
}

pub fn names(dataset: &Dataset, results: &unicorn::retrieval::ResultSet) -> Vec<String> {
  results.companies(dataset).into_iter().map(str::to_string).collect()
}
