use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::models::{ActivityType, ProductionRecord, WorkOrder};

/// Totals shown on the reports page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_maintenance_cost: Decimal,
    pub production_by_activity: BTreeMap<ActivityType, Decimal>,
    pub total_production_cost: Decimal,
    pub open_work_orders: usize,
    pub closed_work_orders: usize,
}

/// Read-only aggregations over the work-order ledger and production log.
///
/// Recomputed on every call; the collections are small.
pub struct ReportService;

impl ReportService {
    /// Material spend on work orders that reached RFU. Open orders count for
    /// nothing regardless of their material lines.
    pub fn total_maintenance_cost(work_orders: &[WorkOrder]) -> Decimal {
        work_orders
            .iter()
            .filter(|wo| wo.is_ready_for_use())
            .map(WorkOrder::material_cost)
            .sum()
    }

    pub fn total_by_activity(records: &[ProductionRecord], activity: ActivityType) -> Decimal {
        records
            .iter()
            .filter(|r| r.activity_type == activity)
            .map(|r| r.quantity)
            .sum()
    }

    pub fn total_production_cost(records: &[ProductionRecord]) -> Decimal {
        records.iter().map(|r| r.estimated_cost).sum()
    }

    pub fn summarize(work_orders: &[WorkOrder], records: &[ProductionRecord]) -> ReportSummary {
        let production_by_activity = ActivityType::iter()
            .map(|activity| (activity, Self::total_by_activity(records, activity)))
            .collect();
        let closed_work_orders = work_orders.iter().filter(|wo| wo.is_ready_for_use()).count();

        ReportSummary {
            total_maintenance_cost: Self::total_maintenance_cost(work_orders),
            production_by_activity,
            total_production_cost: Self::total_production_cost(records),
            open_work_orders: work_orders.len() - closed_work_orders,
            closed_work_orders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        MaterialStatus, NewMaterialUsage, Shift, WorkOrderStatus, WorkStatus,
    };
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn work_order(number: &str, status: WorkOrderStatus) -> WorkOrder {
        let mut wo = WorkOrder {
            wo_number: number.into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            unit: "EX7-43".into(),
            unit_type: "A2B".into(),
            start_time: NaiveTime::from_hms_opt(7, 0, 0),
            component: "Hydraulic".into(),
            sub_component: "Hose".into(),
            description: "Leak".into(),
            work_status: WorkStatus::InProgress,
            status,
            end_time: None,
            duration_minutes: None,
            work_description: None,
            manpower: vec![],
            materials: vec![],
        };
        wo.add_material(NewMaterialUsage {
            material: "Hose".into(),
            part_no: None,
            quantity: 2,
            unit_of_measure: "pcs".into(),
            unit_price: dec!(100),
            material_status: MaterialStatus::Installed,
        })
        .unwrap();
        wo
    }

    fn record(activity: ActivityType, quantity: Decimal, cost: Decimal) -> ProductionRecord {
        ProductionRecord {
            id: Uuid::now_v7(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            unit: "BSS-75".into(),
            unit_type: "DUMP TRUCK".into(),
            shift: Shift::Morning,
            activity_type: activity,
            quantity,
            duration_hours: dec!(1),
            operator: None,
            estimated_cost: cost,
        }
    }

    #[test]
    fn maintenance_cost_counts_only_rfu_orders() {
        let ledger = vec![
            work_order("WO-00001", WorkOrderStatus::Rfu),
            work_order("WO-00002", WorkOrderStatus::Rfu),
            work_order("WO-00003", WorkOrderStatus::Open),
        ];
        assert_eq!(ReportService::total_maintenance_cost(&ledger), dec!(400));
    }

    #[test]
    fn production_totals_group_by_activity() {
        let records = vec![
            record(ActivityType::Hauling, dec!(120.5), dec!(100000)),
            record(ActivityType::Hauling, dec!(80), dec!(50000)),
            record(ActivityType::Overburden, dec!(300), dec!(150000)),
        ];
        assert_eq!(
            ReportService::total_by_activity(&records, ActivityType::Hauling),
            dec!(200.5)
        );
        assert_eq!(
            ReportService::total_by_activity(&records, ActivityType::BrokenBlasting),
            dec!(0)
        );
        assert_eq!(ReportService::total_production_cost(&records), dec!(300000));
    }

    #[test]
    fn summary_covers_every_activity() {
        let ledger = vec![
            work_order("WO-00001", WorkOrderStatus::Rfu),
            work_order("WO-00002", WorkOrderStatus::Open),
        ];
        let summary = ReportService::summarize(&ledger, &[]);
        assert_eq!(summary.production_by_activity.len(), 5);
        assert_eq!(summary.open_work_orders, 1);
        assert_eq!(summary.closed_work_orders, 1);
        assert_eq!(summary.total_maintenance_cost, dec!(200));
        assert_eq!(summary.total_production_cost, dec!(0));
    }
}
