use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::commands::Command;
use crate::{errors::ServiceError, models::Unit, storage::StorageKey, PlantState};

/// Removes a unit from the roster. Work orders and production records that
/// name it keep their copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUnitCommand {
    pub code: String,
}

impl Command for DeleteUnitCommand {
    type Result = Unit;

    fn touches(&self) -> &'static [StorageKey] {
        &[StorageKey::Units]
    }

    #[instrument(skip(self, state), fields(code = %self.code))]
    fn execute(&self, state: &mut PlantState) -> Result<Self::Result, ServiceError> {
        let code = self.code.trim();
        let position = state
            .units
            .iter()
            .position(|u| u.code == code)
            .ok_or_else(|| ServiceError::not_found(format!("Unit {} not found", code)))?;
        let removed = state.units.remove(position);
        info!("Unit {} removed from roster", removed.code);
        Ok(removed)
    }
}
