//! Error type shared by the scheduler, stores, import/export and config.

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid quality signal {0}: expected 0 (again), 1 (good) or 2 (easy)")]
    InvalidQuality(u8),

    #[error("invalid ease factor {0}: must be a finite value of at least 1.3")]
    InvalidEaseFactor(f64),

    #[error("field '{0}' is required")]
    MissingField(&'static str),

    #[error("card not found: {0}")]
    CardNotFound(Uuid),

    #[error("review session has no card left to grade")]
    SessionComplete,

    #[error("next review date is out of range ({0} days ahead)")]
    ScheduleOverflow(i64),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
