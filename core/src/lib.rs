//! Business simulation core: the economic scoring engine, its tables,
//! recorded runs, history and SQLite persistence.

pub mod config;
pub mod decisions;
pub mod engine;
pub mod error;
pub mod history;
pub mod performance;
pub mod rng;
pub mod simulation;
pub mod store;
pub mod types;
