use crate::{errors::ServiceError, storage::StorageKey, PlantState};

/// Command trait for implementing the Command Pattern
///
/// Each command carries everything one operator action needs, validates it,
/// and applies it to the in-memory state. A command that fails leaves the
/// state untouched.
pub trait Command {
    /// The return type of the command when executed successfully
    type Result;

    /// Stored collections this command may change. They are written back
    /// after a successful execution.
    fn touches(&self) -> &'static [StorageKey];

    fn execute(&self, state: &mut PlantState) -> Result<Self::Result, ServiceError>;
}

pub mod production;
pub mod spareparts;
pub mod units;
pub mod workorders;
