//! Flattens the work-order ledger into a spreadsheet document.
use crate::common::{format_currency, CLOCK_FORMAT, DATE_FORMAT};
use crate::errors::ServiceError;
use crate::models::{MaterialUsage, WorkOrder};

pub const EXPORT_FILE_NAME: &str = "Work_Orders_Export.csv";

const DELIMITER: char = ',';
const MISSING: &str = "-";

const HEADERS: [&str; 15] = [
    "WO Number",
    "Date",
    "Unit",
    "Type",
    "Component",
    "Sub Component",
    "Breakdown Info",
    "Start Time",
    "End Time",
    "Duration (min)",
    "Work Status",
    "Work Description (RFU)",
    "Manpower",
    "Spare Part Detail",
    "WO Status",
];

pub struct WorkOrderExporter;

impl WorkOrderExporter {
    /// Renders one header row plus one row per work order, in ledger order.
    pub fn to_csv(work_orders: &[WorkOrder]) -> Result<String, ServiceError> {
        if work_orders.is_empty() {
            return Err(ServiceError::validation("no work orders to export"));
        }

        let mut lines = Vec::with_capacity(work_orders.len() + 1);
        lines.push(join_row(HEADERS.iter().map(|h| h.to_string())));
        for wo in work_orders {
            lines.push(join_row(Self::row(wo)));
        }

        Ok(lines.join("\n"))
    }

    fn row(wo: &WorkOrder) -> Vec<String> {
        vec![
            wo.wo_number.clone(),
            wo.date.format(DATE_FORMAT).to_string(),
            wo.unit.clone(),
            wo.unit_type.clone(),
            wo.component.clone(),
            wo.sub_component.clone(),
            wo.description.clone(),
            wo.start_time
                .map(|t| t.format(CLOCK_FORMAT).to_string())
                .unwrap_or_default(),
            wo.end_time
                .map(|t| t.format(CLOCK_FORMAT).to_string())
                .unwrap_or_default(),
            wo.duration_minutes.map(|m| m.to_string()).unwrap_or_default(),
            wo.work_status.to_string(),
            wo.work_description.clone().unwrap_or_default(),
            wo.manpower.join(", "),
            wo.materials
                .iter()
                .map(material_detail)
                .collect::<Vec<_>>()
                .join("; "),
            wo.status.to_string(),
        ]
    }
}

fn material_detail(m: &MaterialUsage) -> String {
    format!(
        "{} (PartNo: {}, Qty: {}, UoM: {}, Price: {}, Total: {}, Status: {})",
        m.material,
        m.part_no.as_deref().unwrap_or(MISSING),
        m.quantity,
        m.unit_of_measure,
        format_currency(m.unit_price),
        format_currency(m.total_price),
        m.material_status
    )
}

fn join_row<I: IntoIterator<Item = String>>(fields: I) -> String {
    fields
        .into_iter()
        .map(|f| escape_field(&f))
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

fn escape_field(value: &str) -> String {
    if value.contains(DELIMITER) || value.contains(['"', '\n', '\r']) {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MaterialStatus, NewMaterialUsage, WorkOrderStatus, WorkStatus};
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal_macros::dec;

    fn closed_order() -> WorkOrder {
        let mut wo = WorkOrder {
            wo_number: "WO-00007".into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            unit: "LT-01".into(),
            unit_type: "SUPPORT".into(),
            start_time: NaiveTime::from_hms_opt(22, 30, 0),
            component: "Electrical".into(),
            sub_component: "Alternator".into(),
            description: "No charge, \"battery\" light on".into(),
            work_status: WorkStatus::InProgress,
            status: WorkOrderStatus::Rfu,
            end_time: NaiveTime::from_hms_opt(0, 15, 0),
            duration_minutes: Some(105),
            work_description: Some("Replaced alternator belt".into()),
            manpower: vec!["Budi".into(), "Sari".into()],
            materials: vec![],
        };
        wo.add_material(NewMaterialUsage {
            material: "V-belt".into(),
            part_no: Some("VB-13".into()),
            quantity: 1,
            unit_of_measure: "pcs".into(),
            unit_price: dec!(125000),
            material_status: MaterialStatus::Installed,
        })
        .unwrap();
        wo
    }

    #[test]
    fn line_breaks_force_quoting() {
        assert_eq!(escape_field("bolt\rnut"), "\"bolt\rnut\"");
        assert_eq!(escape_field("bolt\nnut"), "\"bolt\nnut\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("plain"), "plain");
    }

    #[test]
    fn empty_ledger_is_rejected() {
        assert!(matches!(
            WorkOrderExporter::to_csv(&[]),
            Err(ServiceError::ValidationError(_))
        ));
    }

    #[test]
    fn rows_are_flattened_and_quoted() {
        let csv = WorkOrderExporter::to_csv(&[closed_order()]).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("WO Number,Date,Unit"));

        let row = lines.next().unwrap();
        assert!(row.starts_with("WO-00007,2024-06-02,LT-01,SUPPORT"));
        assert!(row.contains("\"No charge, \"\"battery\"\" light on\""));
        assert!(row.contains(",22:30,00:15,105,InProgress,"));
        assert!(row.contains("\"Budi, Sari\""));
        assert!(row.contains(
            "V-belt (PartNo: VB-13, Qty: 1, UoM: pcs, Price: Rp 125.000, Total: Rp 125.000, Status: Installed)"
        ));
        assert!(row.ends_with(",RFU"));
    }
}
