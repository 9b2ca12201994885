use tracing::{info, instrument};

use crate::commands::Command;
use crate::{
    errors::ServiceError,
    models::{MaterialUsage, NewMaterialUsage},
    services::suggestions::SuggestionField,
    storage::StorageKey,
    PlantState,
};

#[derive(Debug, Clone)]
pub struct AddMaterialCommand {
    pub wo_number: String,
    pub line: NewMaterialUsage,
}

impl Command for AddMaterialCommand {
    type Result = MaterialUsage;

    fn touches(&self) -> &'static [StorageKey] {
        &[StorageKey::WorkOrders, StorageKey::Suggestions]
    }

    #[instrument(skip(self, state), fields(wo_number = %self.wo_number))]
    fn execute(&self, state: &mut PlantState) -> Result<Self::Result, ServiceError> {
        let usage = state
            .work_order_mut(&self.wo_number)?
            .add_material(self.line.clone())?
            .clone();
        state
            .suggestions
            .register(SuggestionField::Material, &usage.material);
        info!(
            total_price = %usage.total_price,
            "Material {} x{} added to Work Order {}",
            usage.material, usage.quantity, self.wo_number
        );
        Ok(usage)
    }
}
