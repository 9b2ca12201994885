use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::commands::Command;
use crate::common::{non_blank, validate_not_blank};
use crate::models::spare_part::DEFAULT_UNIT_OF_MEASURE;
use crate::{errors::ServiceError, models::SparePart, storage::StorageKey, PlantState};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddSparePartCommand {
    #[validate(custom = "validate_not_blank")]
    pub part_no: String,
    #[validate(custom = "validate_not_blank")]
    pub name: String,
    pub unit_price: Decimal,
    pub unit_of_measure: Option<String>,
}

impl Command for AddSparePartCommand {
    type Result = SparePart;

    fn touches(&self) -> &'static [StorageKey] {
        &[StorageKey::SpareParts]
    }

    #[instrument(skip(self, state), fields(part_no = %self.part_no))]
    fn execute(&self, state: &mut PlantState) -> Result<Self::Result, ServiceError> {
        self.validate()?;
        if self.unit_price.is_sign_negative() {
            return Err(ServiceError::validation("unit price must not be negative"));
        }

        let part_no = self.part_no.trim().to_string();
        if state.spare_part(&part_no).is_some() {
            return Err(ServiceError::validation(format!(
                "part {} is already in the catalog",
                part_no
            )));
        }

        let part = SparePart {
            part_no,
            name: self.name.trim().to_string(),
            unit_price: self.unit_price,
            unit_of_measure: non_blank(self.unit_of_measure.clone())
                .unwrap_or_else(|| DEFAULT_UNIT_OF_MEASURE.to_string()),
        };
        state.spare_parts.push(part.clone());
        info!("Spare part {} added to catalog", part.part_no);
        Ok(part)
    }
}
