pub mod production_record;
pub mod spare_part;
pub mod unit;
pub mod work_order;

pub use production_record::{ActivityType, ProductionRecord, Shift};
pub use spare_part::SparePart;
pub use unit::Unit;
pub use work_order::{
    MaterialStatus, MaterialUsage, NewMaterialUsage, WorkOrder, WorkOrderDraft, WorkOrderStatus,
    WorkStatus,
};
