use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::work_order::{MaterialStatus, NewMaterialUsage};

pub const DEFAULT_UNIT_OF_MEASURE: &str = "pcs";

/// Catalog entry for a stocked spare part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparePart {
    pub part_no: String,
    pub name: String,
    pub unit_price: Decimal,
    #[serde(default = "default_unit_of_measure")]
    pub unit_of_measure: String,
}

fn default_unit_of_measure() -> String {
    DEFAULT_UNIT_OF_MEASURE.to_string()
}

impl SparePart {
    /// Pre-fills a material line from this catalog entry.
    ///
    /// The line copies name, part number, price and unit; later catalog
    /// changes do not reach it.
    pub fn to_material_line(&self, quantity: i64, status: MaterialStatus) -> NewMaterialUsage {
        NewMaterialUsage {
            material: self.name.clone(),
            part_no: Some(self.part_no.clone()),
            quantity,
            unit_of_measure: self.unit_of_measure.clone(),
            unit_price: self.unit_price,
            material_status: status,
        }
    }
}
