pub mod export;
pub mod reports;
pub mod sequence;
pub mod suggestions;
pub mod units;
