pub mod create_production_record_command;
pub mod delete_production_record_command;

pub use create_production_record_command::CreateProductionRecordCommand;
pub use delete_production_record_command::DeleteProductionRecordCommand;
