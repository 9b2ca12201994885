use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::commands::Command;
use crate::common::{non_blank, validate_not_blank};
use crate::{errors::ServiceError, models::Unit, storage::StorageKey, PlantState};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUnitCommand {
    #[validate(custom = "validate_not_blank")]
    pub code: String,
    /// Defaults to the code.
    pub display_name: Option<String>,
    #[validate(custom = "validate_not_blank")]
    pub unit_type: String,
    #[serde(default)]
    pub cost_per_operational_hour: Decimal,
}

impl Command for CreateUnitCommand {
    type Result = Unit;

    fn touches(&self) -> &'static [StorageKey] {
        &[StorageKey::Units]
    }

    #[instrument(skip(self, state), fields(code = %self.code))]
    fn execute(&self, state: &mut PlantState) -> Result<Self::Result, ServiceError> {
        self.validate()?;
        if self.cost_per_operational_hour.is_sign_negative() {
            return Err(ServiceError::validation(
                "cost per operational hour must not be negative",
            ));
        }

        let code = self.code.trim().to_string();
        if state.units.iter().any(|u| u.code == code) {
            return Err(ServiceError::validation(format!(
                "unit {} is already on the roster",
                code
            )));
        }

        let unit = Unit {
            display_name: non_blank(self.display_name.clone()).unwrap_or_else(|| code.clone()),
            code,
            unit_type: self.unit_type.trim().to_string(),
            cost_per_operational_hour: self.cost_per_operational_hour,
        };
        state.units.push(unit.clone());
        info!("Unit {} ({}) added to roster", unit.code, unit.unit_type);
        Ok(unit)
    }
}
