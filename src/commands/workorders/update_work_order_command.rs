use chrono::{NaiveDate, NaiveTime};
use tracing::{info, instrument};

use crate::auth::EditGrant;
use crate::commands::Command;
use crate::common::non_blank;
use crate::{
    errors::ServiceError,
    models::{WorkOrder, WorkOrderDraft, WorkStatus},
    services::suggestions::SuggestionField,
    storage::StorageKey,
    PlantState,
};

/// Fields to change on an existing work order.
///
/// `None` leaves a field untouched. Only the closure fields (`end_time`,
/// `work_description`) can be cleared, with `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkOrderPatch {
    pub date: Option<NaiveDate>,
    pub unit: Option<String>,
    pub unit_type: Option<String>,
    pub component: Option<String>,
    pub sub_component: Option<String>,
    pub description: Option<String>,
    pub work_status: Option<WorkStatus>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<Option<NaiveTime>>,
    pub work_description: Option<Option<String>>,
    /// Replacement crew and material lists.
    pub draft: Option<WorkOrderDraft>,
}

impl WorkOrderPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the patch to a copy, leaving `original` untouched on error.
    fn apply(&self, original: &WorkOrder) -> Result<WorkOrder, ServiceError> {
        let mut updated = original.clone();

        if let Some(date) = self.date {
            updated.date = date;
        }
        if let Some(unit) = &self.unit {
            updated.unit = required("unit", unit)?;
        }
        if let Some(unit_type) = &self.unit_type {
            updated.unit_type = unit_type.trim().to_string();
        }
        if let Some(component) = &self.component {
            updated.component = required("component", component)?;
        }
        if let Some(sub_component) = &self.sub_component {
            updated.sub_component = required("sub component", sub_component)?;
        }
        if let Some(description) = &self.description {
            updated.description = required("description", description)?;
        }
        if let Some(work_status) = self.work_status {
            updated.work_status = work_status;
        }
        if let Some(start_time) = self.start_time {
            updated.start_time = Some(start_time);
        }
        if let Some(end_time) = self.end_time {
            updated.end_time = end_time;
        }
        if let Some(work_description) = &self.work_description {
            updated.work_description = non_blank(work_description.clone());
        }
        if let Some(draft) = &self.draft {
            draft.validate()?;
            updated.manpower = draft.manpower().to_vec();
            updated.materials = draft.materials().to_vec();
        }

        updated.refresh_duration();
        updated.rederive_status();
        Ok(updated)
    }
}

fn required(field: &str, value: &str) -> Result<String, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(format!("{} must not be blank", field)));
    }
    Ok(trimmed.to_string())
}

/// Edits a recorded work order. Requires a grant from the edit gate.
#[derive(Debug, Clone)]
pub struct UpdateWorkOrderCommand {
    pub grant: EditGrant,
    pub wo_number: String,
    pub patch: WorkOrderPatch,
}

impl Command for UpdateWorkOrderCommand {
    type Result = WorkOrder;

    fn touches(&self) -> &'static [StorageKey] {
        &[StorageKey::WorkOrders, StorageKey::Suggestions]
    }

    #[instrument(skip(self, state), fields(wo_number = %self.wo_number))]
    fn execute(&self, state: &mut PlantState) -> Result<Self::Result, ServiceError> {
        let work_order = state.work_order_mut(&self.wo_number)?;
        let updated = self.patch.apply(work_order)?;
        let previous = work_order.status;
        *work_order = updated.clone();

        let suggestions = &mut state.suggestions;
        suggestions.register_all(SuggestionField::Manpower, updated.manpower.iter().map(String::as_str));
        suggestions.register_all(
            SuggestionField::Material,
            updated.materials.iter().map(|m| m.material.as_str()),
        );
        suggestions.register(SuggestionField::Component, &updated.component);
        suggestions.register(SuggestionField::SubComponent, &updated.sub_component);

        if previous != updated.status {
            info!(from = %previous, to = %updated.status, "Work Order {} status changed", updated.wo_number);
        }
        info!("Work Order {} updated", updated.wo_number);
        Ok(updated)
    }
}
