use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::commands::Command;
use crate::common::{non_blank, validate_not_blank};
use crate::{
    errors::ServiceError,
    models::{WorkOrder, WorkOrderStatus, WorkStatus},
    services::suggestions::SuggestionField,
    storage::StorageKey,
    PlantState,
};

/// Logs a new breakdown. The work order opens with empty sub-ledgers and no
/// closure fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkOrderCommand {
    pub date: NaiveDate,
    #[validate(custom = "validate_not_blank")]
    pub unit: String,
    /// Resolved from the unit roster when absent.
    pub unit_type: Option<String>,
    pub start_time: NaiveTime,
    #[validate(custom = "validate_not_blank")]
    pub component: String,
    #[validate(custom = "validate_not_blank")]
    pub sub_component: String,
    #[validate(custom = "validate_not_blank")]
    pub description: String,
    pub work_status: WorkStatus,
}

impl Command for CreateWorkOrderCommand {
    type Result = WorkOrder;

    fn touches(&self) -> &'static [StorageKey] {
        &[
            StorageKey::WorkOrders,
            StorageKey::WoCounter,
            StorageKey::Suggestions,
        ]
    }

    #[instrument(skip(self, state), fields(unit = %self.unit))]
    fn execute(&self, state: &mut PlantState) -> Result<Self::Result, ServiceError> {
        self.validate()?;

        let wo_number = state.sequence.peek_next();
        if state.work_order(&wo_number).is_some() {
            return Err(ServiceError::validation(format!(
                "work order {} already exists",
                wo_number
            )));
        }

        let unit = self.unit.trim().to_string();
        let unit_type = non_blank(self.unit_type.clone())
            .or_else(|| state.unit(&unit).map(|u| u.unit_type.clone()))
            .unwrap_or_default();

        let work_order = WorkOrder {
            wo_number,
            date: self.date,
            unit,
            unit_type,
            start_time: Some(self.start_time),
            component: self.component.trim().to_string(),
            sub_component: self.sub_component.trim().to_string(),
            description: self.description.trim().to_string(),
            work_status: self.work_status,
            status: WorkOrderStatus::Open,
            end_time: None,
            duration_minutes: None,
            work_description: None,
            manpower: Vec::new(),
            materials: Vec::new(),
        };

        state.work_orders.insert(0, work_order.clone());
        state.sequence.advance();
        state
            .suggestions
            .register(SuggestionField::Component, &work_order.component);
        state
            .suggestions
            .register(SuggestionField::SubComponent, &work_order.sub_component);

        info!(
            "Work Order {} created for unit {}",
            work_order.wo_number, work_order.unit
        );
        Ok(work_order)
    }
}
