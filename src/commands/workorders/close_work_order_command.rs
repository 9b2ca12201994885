use chrono::NaiveTime;
use tracing::{info, instrument};

use crate::commands::Command;
use crate::common::non_blank;
use crate::{
    errors::ServiceError,
    models::{WorkOrder, WorkOrderDraft, WorkOrderStatus},
    services::suggestions::SuggestionField,
    storage::StorageKey,
    PlantState,
};

/// Marks a breakdown fixed (RFU), committing the staged crew and material
/// lists.
#[derive(Debug, Clone)]
pub struct CloseWorkOrderCommand {
    pub wo_number: String,
    pub end_time: Option<NaiveTime>,
    pub work_description: String,
    /// Final sub-ledgers; replace the work order's lists wholesale.
    pub draft: WorkOrderDraft,
}

impl Command for CloseWorkOrderCommand {
    type Result = WorkOrder;

    fn touches(&self) -> &'static [StorageKey] {
        &[StorageKey::WorkOrders, StorageKey::Suggestions]
    }

    #[instrument(skip(self, state), fields(wo_number = %self.wo_number))]
    fn execute(&self, state: &mut PlantState) -> Result<Self::Result, ServiceError> {
        let end_time = self
            .end_time
            .ok_or_else(|| ServiceError::validation("end time is required to close a work order"))?;
        let work_description = non_blank(Some(self.work_description.clone())).ok_or_else(|| {
            ServiceError::validation("work description is required to close a work order")
        })?;
        self.draft.validate()?;

        let work_order = state.work_order_mut(&self.wo_number)?;
        if work_order.start_time.is_none() {
            return Err(ServiceError::validation(format!(
                "Work Order {} has no start time; set it before closing",
                self.wo_number
            )));
        }
        let previous = work_order.status;
        work_order.end_time = Some(end_time);
        work_order.work_description = Some(work_description);
        work_order.manpower = self.draft.manpower().to_vec();
        work_order.materials = self.draft.materials().to_vec();
        work_order.refresh_duration();
        work_order.status = WorkOrderStatus::Rfu;
        let closed = work_order.clone();

        state
            .suggestions
            .register_all(SuggestionField::Manpower, closed.manpower.iter().map(String::as_str));
        state.suggestions.register_all(
            SuggestionField::Material,
            closed.materials.iter().map(|m| m.material.as_str()),
        );

        info!(
            from = %previous,
            duration_minutes = ?closed.duration_minutes,
            "Work Order {} marked as RFU",
            closed.wo_number
        );
        Ok(closed)
    }
}
