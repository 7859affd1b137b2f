//! Storage layer for persisting health logs
//!
//! Every collection is a JSON document stored under a fixed key in a flat
//! key-value namespace. The namespace itself sits behind `KeyValueBackend`, so
//! the `LogStore` works the same on SQLite, a directory of JSON files, or
//! plain memory.

pub mod events;
pub mod file;
pub mod memory;
pub mod migrations;
pub mod seed;
pub mod sqlite;
pub mod store;

// Re-export the main storage types
pub use events::{ChangeEvent, Collection, SubscriptionId};
pub use file::JsonFileBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;
pub use store::LogStore;

use thiserror::Error;

use crate::domain::DomainError;

/// Storage key for the glucose log collection
pub const GLUCOSE_LOGS_KEY: &str = "glucoseLogs";
/// Storage key for the weight log collection
pub const WEIGHT_LOGS_KEY: &str = "weightLogs";
/// Storage key for the meal log collection
pub const MEAL_LOGS_KEY: &str = "mealLogs";
/// Storage key for the daily step record
pub const DAILY_STEPS_KEY: &str = "dailySteps";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("File storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Invalid(#[from] DomainError),

    #[error("Could not save {what}")]
    Save {
        what: &'static str,
        #[source]
        source: Box<StorageError>,
    },

    #[error("Could not delete {what}")]
    Delete {
        what: &'static str,
        #[source]
        source: Box<StorageError>,
    },

    #[error("Could not reset app data")]
    Reset {
        #[source]
        source: Box<StorageError>,
    },
}

impl StorageError {
    /// Wrap a low-level failure as a user-facing "could not save" error
    pub fn save(what: &'static str, source: StorageError) -> Self {
        StorageError::Save {
            what,
            source: Box::new(source),
        }
    }

    /// Wrap a low-level failure as a user-facing "could not delete" error
    pub fn delete(what: &'static str, source: StorageError) -> Self {
        StorageError::Delete {
            what,
            source: Box::new(source),
        }
    }
}

/// Trait defining a flat key-value namespace of JSON documents
///
/// Implementations replace a value wholesale on `set`; there is no partial
/// update. A failed `set` must leave the previous value in place.
pub trait KeyValueBackend: Send {
    /// Read the raw document stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous document
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for Box<B> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
