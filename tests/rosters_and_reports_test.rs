//! Unit roster, spare-part catalog and production log commands, and the
//! report totals built from them.

mod common;

use assert_matches::assert_matches;
use rust_decimal_macros::dec;

use common::{add_unit, date, material, open_work_order, test_app, time};
use plant_maintenance::{
    commands::{
        production::{CreateProductionRecordCommand, DeleteProductionRecordCommand},
        spareparts::{AddSparePartCommand, DeleteSparePartCommand},
        units::{CreateUnitCommand, DeleteUnitCommand},
        workorders::{AddMaterialCommand, CloseWorkOrderCommand},
    },
    errors::ServiceError,
    models::{ActivityType, MaterialStatus, Shift, WorkOrderDraft},
    services::export::WorkOrderExporter,
    AppState,
};

fn log_production(
    state: &mut AppState,
    unit: &str,
    activity: ActivityType,
    quantity: rust_decimal::Decimal,
    hours: rust_decimal::Decimal,
) -> Result<plant_maintenance::models::ProductionRecord, ServiceError> {
    state.dispatch(CreateProductionRecordCommand {
        date: date(2024, 6, 3),
        unit: unit.to_string(),
        shift: Shift::Night,
        activity_type: activity,
        quantity,
        duration_hours: hours,
        operator: Some("Andi".into()),
    })
}

#[test]
fn unit_codes_are_unique_and_rates_non_negative() {
    let (mut state, _store) = test_app();
    add_unit(&mut state, "BSS-75", "DUMP TRUCK", dec!(100000));

    let duplicate = CreateUnitCommand {
        code: " BSS-75 ".into(),
        display_name: None,
        unit_type: "DUMP TRUCK".into(),
        cost_per_operational_hour: dec!(0),
    };
    assert_matches!(state.dispatch(duplicate), Err(ServiceError::ValidationError(_)));

    let negative = CreateUnitCommand {
        code: "EX7-43".into(),
        display_name: Some("Excavator 43".into()),
        unit_type: "A2B".into(),
        cost_per_operational_hour: dec!(-1),
    };
    assert_matches!(state.dispatch(negative), Err(ServiceError::ValidationError(_)));

    assert_eq!(state.plant().units.len(), 1);
    assert_eq!(state.plant().units[0].display_name, "BSS-75");

    state
        .dispatch(DeleteUnitCommand {
            code: "BSS-75".into(),
        })
        .unwrap();
    assert_matches!(
        state.dispatch(DeleteUnitCommand {
            code: "BSS-75".into()
        }),
        Err(ServiceError::NotFound(_))
    );
}

#[test]
fn units_named_by_display_name_still_resolve() {
    let (mut state, _store) = test_app();
    state
        .dispatch(CreateUnitCommand {
            code: "EX7-43".into(),
            display_name: Some("Excavator 43".into()),
            unit_type: "A2B".into(),
            cost_per_operational_hour: dec!(150000),
        })
        .unwrap();

    let record =
        log_production(&mut state, "Excavator 43", ActivityType::Loading, dec!(40), dec!(2)).unwrap();
    assert_eq!(record.unit_type, "A2B");
    assert_eq!(record.estimated_cost, dec!(300000));

    let wo = open_work_order(&mut state, "Excavator 43");
    assert_eq!(wo.unit_type, "A2B");

    // A new code may equal another unit's display name
    state
        .dispatch(CreateUnitCommand {
            code: "Excavator 43".into(),
            display_name: None,
            unit_type: "SUPPORT".into(),
            cost_per_operational_hour: dec!(0),
        })
        .unwrap();
    assert_eq!(state.plant().unit("Excavator 43").unwrap().unit_type, "SUPPORT");
}

#[test]
fn production_snapshots_unit_type_and_cost() {
    let (mut state, _store) = test_app();
    add_unit(&mut state, "BSS-75", "DUMP TRUCK", dec!(100000));

    let record =
        log_production(&mut state, "BSS-75", ActivityType::Hauling, dec!(320), dec!(2.5)).unwrap();
    assert_eq!(record.unit_type, "DUMP TRUCK");
    assert_eq!(record.estimated_cost, dec!(250000));

    // Later rate changes leave logged records alone
    state
        .dispatch(DeleteUnitCommand {
            code: "BSS-75".into(),
        })
        .unwrap();
    add_unit(&mut state, "BSS-75", "DUMP TRUCK", dec!(999999));
    assert_eq!(state.plant().production_records[0].estimated_cost, dec!(250000));

    let unknown =
        log_production(&mut state, "XX-01", ActivityType::Loading, dec!(10), dec!(1)).unwrap();
    assert_eq!(unknown.unit_type, "N/A");
    assert_eq!(unknown.estimated_cost, dec!(0));

    assert_matches!(
        log_production(&mut state, "BSS-75", ActivityType::Loading, dec!(-1), dec!(1)),
        Err(ServiceError::ValidationError(_))
    );
    assert_matches!(
        log_production(&mut state, " ", ActivityType::Loading, dec!(1), dec!(1)),
        Err(ServiceError::ValidationError(_))
    );

    state
        .dispatch(DeleteProductionRecordCommand { id: unknown.id })
        .unwrap();
    assert_eq!(state.plant().production_records.len(), 1);
}

#[test]
fn catalog_parts_prefill_material_lines() {
    let (mut state, _store) = test_app();
    let part = state
        .dispatch(AddSparePartCommand {
            part_no: "600-211-1231".into(),
            name: "Fuel filter".into(),
            unit_price: dec!(185000),
            unit_of_measure: None,
        })
        .unwrap();
    assert_eq!(part.unit_of_measure, "pcs");

    assert_matches!(
        state.dispatch(AddSparePartCommand {
            part_no: "600-211-1231".into(),
            name: "Fuel filter".into(),
            unit_price: dec!(1),
            unit_of_measure: None,
        }),
        Err(ServiceError::ValidationError(_))
    );

    let wo = open_work_order(&mut state, "BSS-75");
    let line = state
        .plant()
        .spare_part("600-211-1231")
        .unwrap()
        .to_material_line(2, MaterialStatus::Installed);
    let usage = state
        .dispatch(AddMaterialCommand {
            wo_number: wo.wo_number,
            line,
        })
        .unwrap();
    assert_eq!(usage.part_no.as_deref(), Some("600-211-1231"));
    assert_eq!(usage.total_price, dec!(370000));

    state
        .dispatch(DeleteSparePartCommand {
            part_no: "600-211-1231".into(),
        })
        .unwrap();
    assert!(state.plant().spare_parts.is_empty());
}

#[test]
fn report_counts_only_rfu_maintenance_cost() {
    let (mut state, _store) = test_app();
    add_unit(&mut state, "EX7-43", "A2B", dec!(150000));

    for _ in 0..2 {
        let wo = open_work_order(&mut state, "EX7-43");
        let mut draft = WorkOrderDraft::from_work_order(&wo);
        draft.add_material(material("Hose", 2, dec!(100))).unwrap();
        state
            .dispatch(CloseWorkOrderCommand {
                wo_number: wo.wo_number,
                end_time: Some(time(9, 0)),
                work_description: "Replaced hose".into(),
                draft,
            })
            .unwrap();
    }
    let still_open = open_work_order(&mut state, "EX7-43");
    state
        .dispatch(AddMaterialCommand {
            wo_number: still_open.wo_number,
            line: material("Hose", 5, dec!(100)),
        })
        .unwrap();

    log_production(&mut state, "EX7-43", ActivityType::Overburden, dec!(500), dec!(2)).unwrap();
    log_production(&mut state, "EX7-43", ActivityType::Overburden, dec!(250), dec!(1)).unwrap();

    let summary = state.plant().report();
    assert_eq!(summary.total_maintenance_cost, dec!(400));
    assert_eq!(summary.closed_work_orders, 2);
    assert_eq!(summary.open_work_orders, 1);
    assert_eq!(summary.production_by_activity[&ActivityType::Overburden], dec!(750));
    assert_eq!(summary.production_by_activity[&ActivityType::Hauling], dec!(0));
    assert_eq!(summary.total_production_cost, dec!(450000));
}

#[test]
fn export_lists_every_work_order() {
    let (mut state, _store) = test_app();
    assert_matches!(
        WorkOrderExporter::to_csv(&state.plant().work_orders),
        Err(ServiceError::ValidationError(_))
    );

    open_work_order(&mut state, "BSS-75");
    open_work_order(&mut state, "LT-01");
    let csv = WorkOrderExporter::to_csv(&state.plant().work_orders).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("WO-00002,"));
    assert!(lines[2].ends_with(",OPEN"));
}
