use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::dao::{
    models::BotState,
    storage::{StorageError, StorageResult},
};

use super::StateStore;

/// Stores the bot state as a pretty-printed JSON file on local disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> BotState {
        match fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str::<BotState>(&contents) {
                Ok(state) => {
                    info!(
                        path = %self.path.display(),
                        users = state.users.len(),
                        "loaded bot state"
                    );
                    state
                }
                Err(err) => {
                    // Unreadable data is dropped rather than surfaced; the bot keeps running.
                    warn!(
                        path = %self.path.display(),
                        error = %err,
                        "failed to parse bot state; starting from defaults"
                    );
                    BotState::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %self.path.display(),
                    "bot state file not found; starting from defaults"
                );
                BotState::default()
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to read bot state; starting from defaults"
                );
                BotState::default()
            }
        }
    }

    fn save(&self, state: &BotState) -> StorageResult<()> {
        let payload =
            serde_json::to_string_pretty(state).map_err(|source| StorageError::Encode { source })?;
        fs::write(&self.path, payload).map_err(|source| StorageError::write(&self.path, source))
    }
}
