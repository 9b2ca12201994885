use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::commands::Command;
use crate::{
    errors::ServiceError, services::suggestions::SuggestionField, storage::StorageKey, PlantState,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddManpowerCommand {
    pub wo_number: String,
    pub name: String,
}

impl Command for AddManpowerCommand {
    /// The trimmed name as stored.
    type Result = String;

    fn touches(&self) -> &'static [StorageKey] {
        &[StorageKey::WorkOrders, StorageKey::Suggestions]
    }

    #[instrument(skip(self, state), fields(wo_number = %self.wo_number))]
    fn execute(&self, state: &mut PlantState) -> Result<Self::Result, ServiceError> {
        let name = state.work_order_mut(&self.wo_number)?.add_manpower(&self.name)?;
        state.suggestions.register(SuggestionField::Manpower, &name);
        info!("Manpower {} added to Work Order {}", name, self.wo_number);
        Ok(name)
    }
}
