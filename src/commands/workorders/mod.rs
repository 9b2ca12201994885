//! Work order ledger commands.
//!
//! Work orders are addressed by their `WO-NNNNN` number. The direct
//! sub-ledger commands change one line at a time; close and update take the
//! whole staged list from a [`WorkOrderDraft`](crate::models::WorkOrderDraft).

pub mod add_manpower_command;
pub mod add_material_command;
pub mod close_work_order_command;
pub mod create_work_order_command;
pub mod delete_work_order_command;
pub mod remove_manpower_command;
pub mod remove_material_command;
pub mod update_work_order_command;

pub use add_manpower_command::AddManpowerCommand;
pub use add_material_command::AddMaterialCommand;
pub use close_work_order_command::CloseWorkOrderCommand;
pub use create_work_order_command::CreateWorkOrderCommand;
pub use delete_work_order_command::DeleteWorkOrderCommand;
pub use remove_manpower_command::RemoveManpowerCommand;
pub use remove_material_command::RemoveMaterialCommand;
pub use update_work_order_command::{UpdateWorkOrderCommand, WorkOrderPatch};
