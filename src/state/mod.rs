pub mod rollover;
pub mod roster;
pub mod tracker;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{config::AppConfig, dao::state_store::StateStore};

pub use self::{
    rollover::Rollover,
    roster::{RosterError, WorkoutRecordResult},
    tracker::WeeklyTracker,
};

/// Cheaply clonable handle on [`AppState`].
pub type SharedState = Arc<AppState>;

/// Central application state shared by the bot handlers and the health routes.
pub struct AppState {
    config: AppConfig,
    tracker: Mutex<WeeklyTracker>,
}

impl AppState {
    /// Load the bot state from `store` and wrap everything in an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: AppConfig, store: Arc<dyn StateStore>) -> SharedState {
        Arc::new(Self {
            config,
            tracker: Mutex::new(WeeklyTracker::open(store)),
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Single-writer handle on the tracked week.
    ///
    /// Holders keep the lock for the whole handling of one inbound event, including the
    /// messages it sends, so load-modify-save sequences never interleave.
    pub fn tracker(&self) -> &Mutex<WeeklyTracker> {
        &self.tracker
    }
}
