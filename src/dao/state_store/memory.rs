use std::sync::{Mutex, PoisonError};

use crate::dao::{models::BotState, storage::StorageResult};

use super::StateStore;

/// Keeps the last saved document in memory. Useful when durability is not wanted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<Option<BotState>>,
}

impl MemoryStore {
    /// Empty store; the first load yields defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a document, as if it had been saved earlier.
    pub fn with_state(state: BotState) -> Self {
        Self {
            saved: Mutex::new(Some(state)),
        }
    }

    /// Last document handed to [`StateStore::save`], if any.
    pub fn snapshot(&self) -> Option<BotState> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> BotState {
        self.snapshot().unwrap_or_default()
    }

    fn save(&self, state: &BotState) -> StorageResult<()> {
        *self.saved.lock().unwrap_or_else(PoisonError::into_inner) = Some(state.clone());
        Ok(())
    }
}
