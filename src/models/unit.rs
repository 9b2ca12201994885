use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A piece of operated equipment on the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub code: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub unit_type: String,
    #[serde(default)]
    pub cost_per_operational_hour: Decimal,
}

impl Unit {
    pub fn new(code: impl Into<String>, unit_type: impl Into<String>, rate: Decimal) -> Self {
        let code = code.into();
        Self {
            display_name: code.clone(),
            code,
            unit_type: unit_type.into(),
            cost_per_operational_hour: rate,
        }
    }
}
