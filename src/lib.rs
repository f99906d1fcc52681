pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;

pub use database::{CardStore, MemoryCardStore, SqliteCardStore};
pub use error::{Error, Result};
pub use models::{Card, ReviewClock, ReviewQuality, ReviewSession, compute_next_review};
