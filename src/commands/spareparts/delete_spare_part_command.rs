use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::commands::Command;
use crate::{errors::ServiceError, models::SparePart, storage::StorageKey, PlantState};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSparePartCommand {
    pub part_no: String,
}

impl Command for DeleteSparePartCommand {
    type Result = SparePart;

    fn touches(&self) -> &'static [StorageKey] {
        &[StorageKey::SpareParts]
    }

    #[instrument(skip(self, state), fields(part_no = %self.part_no))]
    fn execute(&self, state: &mut PlantState) -> Result<Self::Result, ServiceError> {
        let part_no = self.part_no.trim();
        let position = state
            .spare_parts
            .iter()
            .position(|p| p.part_no == part_no)
            .ok_or_else(|| ServiceError::not_found(format!("Spare part {} not found", part_no)))?;
        let removed = state.spare_parts.remove(position);
        info!("Spare part {} removed from catalog", removed.part_no);
        Ok(removed)
    }
}
