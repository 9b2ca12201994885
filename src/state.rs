use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    commands::Command,
    errors::ServiceError,
    models::{ProductionRecord, SparePart, Unit, WorkOrder},
    services::{
        reports::{ReportService, ReportSummary},
        sequence::{parse_wo_number, NumberingSequence},
        suggestions::SuggestionRegistry,
        units::UnitRosterClient,
    },
    storage::{load_or_default, to_document, StateStore, StorageKey},
};

/// Everything the application tracks, held in memory.
#[derive(Debug, Clone, Default)]
pub struct PlantState {
    /// Newest first.
    pub work_orders: Vec<WorkOrder>,
    pub sequence: NumberingSequence,
    pub suggestions: SuggestionRegistry,
    pub spare_parts: Vec<SparePart>,
    pub production_records: Vec<ProductionRecord>,
    pub units: Vec<Unit>,
}

impl PlantState {
    /// Loads every collection independently. A missing or broken document
    /// only empties its own collection.
    pub fn load(store: &dyn StateStore) -> Self {
        let mut state = Self {
            work_orders: load_or_default(store, StorageKey::WorkOrders),
            sequence: load_or_default(store, StorageKey::WoCounter),
            suggestions: load_or_default(store, StorageKey::Suggestions),
            spare_parts: load_or_default(store, StorageKey::SpareParts),
            production_records: load_or_default(store, StorageKey::ProductionRecords),
            units: load_or_default(store, StorageKey::Units),
        };
        state.realign_sequence();
        state
    }

    /// Moves the counter past the highest stored number if it fell behind,
    /// e.g. after the counter document was lost.
    fn realign_sequence(&mut self) {
        let highest = self
            .work_orders
            .iter()
            .filter_map(|wo| parse_wo_number(&wo.wo_number))
            .max();
        if let Some(highest) = highest {
            if self.sequence.current() <= highest {
                warn!(
                    stored = self.sequence.current(),
                    highest, "work order counter behind ledger, moving it forward"
                );
                self.sequence = NumberingSequence::starting_at(highest + 1);
            }
        }
    }

    /// Serializes the collection stored under `key`.
    pub fn document(&self, key: StorageKey) -> Result<String, ServiceError> {
        match key {
            StorageKey::WorkOrders => to_document(&self.work_orders),
            StorageKey::WoCounter => to_document(&self.sequence),
            StorageKey::Suggestions => to_document(&self.suggestions),
            StorageKey::SpareParts => to_document(&self.spare_parts),
            StorageKey::ProductionRecords => to_document(&self.production_records),
            StorageKey::Units => to_document(&self.units),
        }
    }

    pub fn work_order(&self, wo_number: &str) -> Option<&WorkOrder> {
        self.work_orders.iter().find(|wo| wo.wo_number == wo_number)
    }

    pub fn work_order_mut(&mut self, wo_number: &str) -> Result<&mut WorkOrder, ServiceError> {
        self.work_orders
            .iter_mut()
            .find(|wo| wo.wo_number == wo_number)
            .ok_or_else(|| ServiceError::not_found(format!("Work Order {} not found", wo_number)))
    }

    pub fn open_work_orders(&self) -> impl Iterator<Item = &WorkOrder> {
        self.work_orders.iter().filter(|wo| wo.is_open())
    }

    pub fn closed_work_orders(&self) -> impl Iterator<Item = &WorkOrder> {
        self.work_orders.iter().filter(|wo| wo.is_ready_for_use())
    }

    /// Roster entry for `name`, matched on the unit code first and then on
    /// the display name.
    pub fn unit(&self, name: &str) -> Option<&Unit> {
        self.units
            .iter()
            .find(|u| u.code == name)
            .or_else(|| self.units.iter().find(|u| u.display_name == name))
    }

    pub fn spare_part(&self, part_no: &str) -> Option<&SparePart> {
        self.spare_parts.iter().find(|p| p.part_no == part_no)
    }

    pub fn report(&self) -> ReportSummary {
        ReportService::summarize(&self.work_orders, &self.production_records)
    }
}

/// Application context: in-memory state plus the store it is persisted to.
#[derive(Clone)]
pub struct AppState {
    plant: PlantState,
    store: Arc<dyn StateStore>,
}

impl AppState {
    pub fn load(store: Arc<dyn StateStore>) -> Self {
        let plant = PlantState::load(store.as_ref());
        info!(
            work_orders = plant.work_orders.len(),
            units = plant.units.len(),
            spare_parts = plant.spare_parts.len(),
            production_records = plant.production_records.len(),
            "state loaded"
        );
        Self { plant, store }
    }

    pub fn plant(&self) -> &PlantState {
        &self.plant
    }

    /// Runs a command and writes back what it touched.
    ///
    /// Save failures are logged and do not undo the in-memory change.
    pub fn dispatch<C: Command>(&mut self, command: C) -> Result<C::Result, ServiceError> {
        let result = command.execute(&mut self.plant)?;
        for key in command.touches() {
            self.persist(*key);
        }
        Ok(result)
    }

    fn persist(&self, key: StorageKey) {
        let saved = self
            .plant
            .document(key)
            .and_then(|document| self.store.save(key, &document));
        if let Err(e) = saved {
            error!(key = %key, "failed to persist collection: {}", e);
        }
    }

    /// Fills an empty unit roster from the remote source, or the built-in
    /// defaults if that fails. Returns whether the roster was bootstrapped.
    pub async fn ensure_unit_roster(&mut self, client: &UnitRosterClient) -> bool {
        if !self.plant.units.is_empty() {
            return false;
        }
        self.plant.units = client.fetch_or_default().await;
        self.persist(StorageKey::Units);
        info!(units = self.plant.units.len(), "unit roster bootstrapped");
        true
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("plant", &self.plant)
            .finish_non_exhaustive()
    }
}
