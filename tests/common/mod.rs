#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use plant_maintenance::{
    commands::{units::CreateUnitCommand, workorders::CreateWorkOrderCommand},
    models::{MaterialStatus, NewMaterialUsage, WorkOrder, WorkStatus},
    storage::InMemoryStore,
    AppState,
};

/// Application state over a fresh in-memory store. The store handle is
/// returned too so tests can inspect what was persisted.
pub fn test_app() -> (AppState, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let state = AppState::load(store.clone());
    (state, store)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

pub fn create_command(unit: &str) -> CreateWorkOrderCommand {
    CreateWorkOrderCommand {
        date: date(2024, 6, 1),
        unit: unit.to_string(),
        unit_type: None,
        start_time: time(8, 0),
        component: "Engine".to_string(),
        sub_component: "Radiator".to_string(),
        description: "Overheating on haul road".to_string(),
        work_status: WorkStatus::InProgress,
    }
}

pub fn open_work_order(state: &mut AppState, unit: &str) -> WorkOrder {
    state
        .dispatch(create_command(unit))
        .expect("work order created")
}

pub fn add_unit(state: &mut AppState, code: &str, unit_type: &str, rate: Decimal) {
    state
        .dispatch(CreateUnitCommand {
            code: code.to_string(),
            display_name: None,
            unit_type: unit_type.to_string(),
            cost_per_operational_hour: rate,
        })
        .expect("unit created");
}

pub fn material(name: &str, quantity: i64, price: Decimal) -> NewMaterialUsage {
    NewMaterialUsage {
        material: name.to_string(),
        part_no: None,
        quantity,
        unit_of_measure: "pcs".to_string(),
        unit_price: price,
        material_status: MaterialStatus::Installed,
    }
}
