use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::commands::Command;
use crate::{errors::ServiceError, models::MaterialUsage, storage::StorageKey, PlantState};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveMaterialCommand {
    pub wo_number: String,
    pub index: usize,
}

impl Command for RemoveMaterialCommand {
    type Result = MaterialUsage;

    fn touches(&self) -> &'static [StorageKey] {
        &[StorageKey::WorkOrders]
    }

    #[instrument(skip(self, state), fields(wo_number = %self.wo_number))]
    fn execute(&self, state: &mut PlantState) -> Result<Self::Result, ServiceError> {
        let removed = state
            .work_order_mut(&self.wo_number)?
            .remove_material(self.index)?;
        info!(
            "Material {} removed from Work Order {}",
            removed.material, self.wo_number
        );
        Ok(removed)
    }
}
