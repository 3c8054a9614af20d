/// Persisted bot state model definitions.
pub mod models;
/// Bot state storage backends.
pub mod state_store;
/// Storage error types shared by every backend.
pub mod storage;
