use std::sync::Arc;

use crate::dao::{models::BotState, state_store::StateStore, storage::StorageResult};

/// Owner of the in-memory [`BotState`] and the store it is written through to.
///
/// Rollover and roster operations live in [`super::rollover`] and [`super::roster`]; every
/// mutating operation there ends with [`WeeklyTracker::persist`].
pub struct WeeklyTracker {
    pub(super) state: BotState,
    store: Arc<dyn StateStore>,
}

impl WeeklyTracker {
    /// Load the persisted document from `store` and take ownership of it.
    pub fn open(store: Arc<dyn StateStore>) -> Self {
        let state = store.load();
        Self { state, store }
    }

    /// Read-only view of the whole document.
    pub fn state(&self) -> &BotState {
        &self.state
    }

    /// Write the current document through to the store.
    pub(super) fn persist(&self) -> StorageResult<()> {
        self.store.save(&self.state)
    }
}
