pub mod add_spare_part_command;
pub mod delete_spare_part_command;

pub use add_spare_part_command::AddSparePartCommand;
pub use delete_spare_part_command::DeleteSparePartCommand;
