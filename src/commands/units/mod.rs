pub mod create_unit_command;
pub mod delete_unit_command;

pub use create_unit_command::CreateUnitCommand;
pub use delete_unit_command::DeleteUnitCommand;
