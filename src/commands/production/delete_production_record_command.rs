use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::commands::Command;
use crate::{errors::ServiceError, models::ProductionRecord, storage::StorageKey, PlantState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteProductionRecordCommand {
    pub id: Uuid,
}

impl Command for DeleteProductionRecordCommand {
    type Result = ProductionRecord;

    fn touches(&self) -> &'static [StorageKey] {
        &[StorageKey::ProductionRecords]
    }

    #[instrument(skip(self, state), fields(id = %self.id))]
    fn execute(&self, state: &mut PlantState) -> Result<Self::Result, ServiceError> {
        let position = state
            .production_records
            .iter()
            .position(|r| r.id == self.id)
            .ok_or_else(|| {
                ServiceError::not_found(format!("Production record {} not found", self.id))
            })?;
        let removed = state.production_records.remove(position);
        info!("Production record {} deleted", removed.id);
        Ok(removed)
    }
}
