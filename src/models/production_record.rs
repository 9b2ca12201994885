use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

pub const UNKNOWN_UNIT_TYPE: &str = "N/A";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Shift {
    #[default]
    Morning,
    Afternoon,
    Night,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ActivityType {
    Hauling,
    #[strum(to_string = "Overburden", serialize = "OB")]
    Overburden,
    #[strum(to_string = "BrokenBlasting", serialize = "BB")]
    BrokenBlasting,
    Loading,
    Stockpile,
}

/// One shift's production activity for a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub unit: String,
    /// Unit type as it was when the record was logged.
    pub unit_type: String,
    #[serde(default)]
    pub shift: Shift,
    pub activity_type: ActivityType,
    pub quantity: Decimal,
    pub duration_hours: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    /// Hours × the unit's hourly rate at logging time.
    pub estimated_cost: Decimal,
}
