use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::commands::Command;
use crate::{errors::ServiceError, models::WorkOrder, storage::StorageKey, PlantState};

/// Removes one work order. Its number is not reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteWorkOrderCommand {
    pub wo_number: String,
}

impl Command for DeleteWorkOrderCommand {
    type Result = WorkOrder;

    fn touches(&self) -> &'static [StorageKey] {
        &[StorageKey::WorkOrders]
    }

    #[instrument(skip(self, state), fields(wo_number = %self.wo_number))]
    fn execute(&self, state: &mut PlantState) -> Result<Self::Result, ServiceError> {
        let position = state
            .work_orders
            .iter()
            .position(|wo| wo.wo_number == self.wo_number)
            .ok_or_else(|| {
                ServiceError::not_found(format!("Work Order {} not found", self.wo_number))
            })?;
        let removed = state.work_orders.remove(position);
        info!("Work Order {} deleted", removed.wo_number);
        Ok(removed)
    }
}
