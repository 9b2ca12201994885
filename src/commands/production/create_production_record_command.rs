use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::commands::Command;
use crate::common::{non_blank, validate_not_blank};
use crate::models::production_record::UNKNOWN_UNIT_TYPE;
use crate::{
    errors::ServiceError,
    models::{ActivityType, ProductionRecord, Shift},
    storage::StorageKey,
    PlantState,
};

/// Logs one shift of production for a unit.
///
/// The unit's type and hourly rate are copied onto the record; later roster
/// changes do not alter logged records.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductionRecordCommand {
    pub date: NaiveDate,
    #[validate(custom = "validate_not_blank")]
    pub unit: String,
    pub shift: Shift,
    pub activity_type: ActivityType,
    pub quantity: Decimal,
    pub duration_hours: Decimal,
    pub operator: Option<String>,
}

impl Command for CreateProductionRecordCommand {
    type Result = ProductionRecord;

    fn touches(&self) -> &'static [StorageKey] {
        &[StorageKey::ProductionRecords]
    }

    #[instrument(skip(self, state), fields(unit = %self.unit))]
    fn execute(&self, state: &mut PlantState) -> Result<Self::Result, ServiceError> {
        self.validate()?;
        if self.quantity.is_sign_negative() {
            return Err(ServiceError::validation("quantity must not be negative"));
        }
        if self.duration_hours.is_sign_negative() {
            return Err(ServiceError::validation("duration must not be negative"));
        }

        let unit = self.unit.trim().to_string();
        let (unit_type, rate) = match state.unit(&unit) {
            Some(u) => (u.unit_type.clone(), u.cost_per_operational_hour),
            None => (UNKNOWN_UNIT_TYPE.to_string(), Decimal::ZERO),
        };

        let record = ProductionRecord {
            id: Uuid::now_v7(),
            date: self.date,
            unit,
            unit_type,
            shift: self.shift,
            activity_type: self.activity_type,
            quantity: self.quantity,
            duration_hours: self.duration_hours,
            operator: non_blank(self.operator.clone()),
            estimated_cost: self.duration_hours * rate,
        };
        state.production_records.push(record.clone());
        info!(
            record_id = %record.id,
            estimated_cost = %record.estimated_cost,
            "{} production logged for unit {}",
            record.activity_type, record.unit
        );
        Ok(record)
    }
}
