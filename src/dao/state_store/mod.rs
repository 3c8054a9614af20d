pub mod json_file;
pub mod memory;

use crate::dao::{models::BotState, storage::StorageResult};

pub use self::{json_file::JsonFileStore, memory::MemoryStore};

/// Abstraction over where the single bot state document lives.
///
/// Every mutation is written through immediately, so implementations always receive the
/// whole document and replace whatever they held before.
pub trait StateStore: Send + Sync {
    /// Load the persisted document, falling back to [`BotState::default`] when nothing usable exists.
    fn load(&self) -> BotState;
    /// Overwrite the persisted document with `state`.
    fn save(&self, state: &BotState) -> StorageResult<()>;
}
