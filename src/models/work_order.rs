use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::common::{self, compute_duration_minutes};
use crate::errors::{check_index, ServiceError};

/// Lifecycle state of a breakdown record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum WorkOrderStatus {
    /// Breakdown still being worked on.
    #[serde(rename = "OPEN")]
    #[strum(serialize = "OPEN")]
    Open,
    /// Ready For Use: the unit is back in service.
    #[serde(rename = "RFU")]
    #[strum(serialize = "RFU")]
    Rfu,
}

/// Progress flag the operator picks when logging the breakdown.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum WorkStatus {
    InProgress,
    Pending,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum MaterialStatus {
    #[default]
    Installed,
    PendingRequest,
    NotNeeded,
}

/// One spare-part line consumed against a work order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialUsage {
    pub material: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_no: Option<String>,
    pub quantity: u32,
    pub unit_of_measure: String,
    pub unit_price: Decimal,
    /// `unit_price × quantity`, fixed when the line was added.
    pub total_price: Decimal,
    #[serde(default)]
    pub material_status: MaterialStatus,
}

impl MaterialUsage {
    /// Checks a line that did not come through [`NewMaterialUsage::into_usage`].
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.material.trim().is_empty() {
            return Err(ServiceError::validation("material name is required"));
        }
        if self.quantity == 0 {
            return Err(ServiceError::validation(format!(
                "quantity of '{}' must be greater than zero",
                self.material
            )));
        }
        if self.unit_of_measure.trim().is_empty() {
            return Err(ServiceError::validation("unit of measure is required"));
        }
        if self.unit_price.is_sign_negative() {
            return Err(ServiceError::validation("unit price must not be negative"));
        }
        if self.total_price != self.unit_price * Decimal::from(self.quantity) {
            return Err(ServiceError::validation(format!(
                "total price of '{}' does not match unit price times quantity",
                self.material
            )));
        }
        Ok(())
    }
}

/// Operator input for a material line before it is priced.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaterialUsage {
    pub material: String,
    pub part_no: Option<String>,
    pub quantity: i64,
    pub unit_of_measure: String,
    pub unit_price: Decimal,
    pub material_status: MaterialStatus,
}

impl NewMaterialUsage {
    /// Validates the line and prices it.
    pub fn into_usage(self) -> Result<MaterialUsage, ServiceError> {
        let material = self.material.trim().to_string();
        let unit_of_measure = self.unit_of_measure.trim().to_string();

        if material.is_empty() {
            return Err(ServiceError::validation("material name is required"));
        }
        if self.quantity <= 0 {
            return Err(ServiceError::validation(format!(
                "quantity must be greater than zero, got {}",
                self.quantity
            )));
        }
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            ServiceError::validation(format!("quantity {} is too large", self.quantity))
        })?;
        if unit_of_measure.is_empty() {
            return Err(ServiceError::validation("unit of measure is required"));
        }
        if self.unit_price.is_sign_negative() {
            return Err(ServiceError::validation("unit price must not be negative"));
        }

        Ok(MaterialUsage {
            material,
            part_no: common::non_blank(self.part_no),
            quantity,
            unit_of_measure,
            unit_price: self.unit_price,
            total_price: self.unit_price * Decimal::from(quantity),
            material_status: self.material_status,
        })
    }
}

/// One breakdown incident and everything spent fixing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub wo_number: String,
    pub date: NaiveDate,
    pub unit: String,
    #[serde(default)]
    pub unit_type: String,
    #[serde(default, with = "common::clock", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    pub component: String,
    pub sub_component: String,
    pub description: String,
    pub work_status: WorkStatus,
    pub status: WorkOrderStatus,
    #[serde(default, with = "common::clock", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_description: Option<String>,
    #[serde(default)]
    pub manpower: Vec<String>,
    #[serde(default)]
    pub materials: Vec<MaterialUsage>,
}

impl WorkOrder {
    pub fn is_open(&self) -> bool {
        self.status == WorkOrderStatus::Open
    }

    pub fn is_ready_for_use(&self) -> bool {
        self.status == WorkOrderStatus::Rfu
    }

    /// Sum of the priced material lines.
    pub fn material_cost(&self) -> Decimal {
        self.materials.iter().map(|m| m.total_price).sum()
    }

    pub fn add_manpower(&mut self, name: &str) -> Result<String, ServiceError> {
        push_manpower(&mut self.manpower, name)
    }

    pub fn remove_manpower(&mut self, index: usize) -> Result<String, ServiceError> {
        check_index(index, self.manpower.len())?;
        Ok(self.manpower.remove(index))
    }

    pub fn add_material(&mut self, line: NewMaterialUsage) -> Result<&MaterialUsage, ServiceError> {
        let usage = line.into_usage()?;
        self.materials.push(usage);
        Ok(&self.materials[self.materials.len() - 1])
    }

    pub fn remove_material(&mut self, index: usize) -> Result<MaterialUsage, ServiceError> {
        check_index(index, self.materials.len())?;
        Ok(self.materials.remove(index))
    }

    /// Recomputes the duration from the start and end times, clearing it when
    /// either is missing.
    pub fn refresh_duration(&mut self) {
        self.duration_minutes = compute_duration_minutes(self.start_time, self.end_time);
    }

    /// Re-derives OPEN/RFU after an edit.
    ///
    /// A closed order missing its end time or work description reopens; an
    /// open order that now has both is closed. Anything else keeps its status.
    pub fn rederive_status(&mut self) {
        let has_closure_fields = self.end_time.is_some() && self.work_description.is_some();
        match self.status {
            WorkOrderStatus::Rfu if !has_closure_fields => self.status = WorkOrderStatus::Open,
            WorkOrderStatus::Open if has_closure_fields => self.status = WorkOrderStatus::Rfu,
            _ => {}
        }
    }
}

/// Staging buffer for a close or edit session.
///
/// Seeded from a work order's current lists and committed by passing it to
/// the close or update command. Dropping it discards the staged changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkOrderDraft {
    manpower: Vec<String>,
    materials: Vec<MaterialUsage>,
}

impl WorkOrderDraft {
    pub fn from_work_order(work_order: &WorkOrder) -> Self {
        Self {
            manpower: work_order.manpower.clone(),
            materials: work_order.materials.clone(),
        }
    }

    pub fn manpower(&self) -> &[String] {
        &self.manpower
    }

    pub fn materials(&self) -> &[MaterialUsage] {
        &self.materials
    }

    /// Re-checks the staged lists before they are committed. Drafts seeded
    /// from a stored order inherit whatever that order held.
    pub fn validate(&self) -> Result<(), ServiceError> {
        for (position, name) in self.manpower.iter().enumerate() {
            if name.trim().is_empty() || name.trim() != name {
                return Err(ServiceError::validation(format!(
                    "manpower entry {} is blank or untrimmed",
                    position
                )));
            }
            if self.manpower[..position].contains(name) {
                return Err(ServiceError::validation(format!(
                    "manpower '{}' is listed more than once",
                    name
                )));
            }
        }
        self.materials.iter().try_for_each(MaterialUsage::validate)
    }

    pub fn add_manpower(&mut self, name: &str) -> Result<String, ServiceError> {
        push_manpower(&mut self.manpower, name)
    }

    pub fn remove_manpower(&mut self, index: usize) -> Result<String, ServiceError> {
        check_index(index, self.manpower.len())?;
        Ok(self.manpower.remove(index))
    }

    pub fn add_material(&mut self, line: NewMaterialUsage) -> Result<(), ServiceError> {
        self.materials.push(line.into_usage()?);
        Ok(())
    }

    pub fn remove_material(&mut self, index: usize) -> Result<MaterialUsage, ServiceError> {
        check_index(index, self.materials.len())?;
        Ok(self.materials.remove(index))
    }
}

fn push_manpower(list: &mut Vec<String>, name: &str) -> Result<String, ServiceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServiceError::validation("manpower name must not be blank"));
    }
    if list.iter().any(|existing| existing == name) {
        return Err(ServiceError::validation(format!(
            "manpower '{}' is already on this work order",
            name
        )));
    }
    list.push(name.to_string());
    Ok(name.to_string())
}
