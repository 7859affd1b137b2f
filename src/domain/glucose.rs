//! GlucoseLog entity for blood glucose readings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::validate::ensure_positive;
use crate::domain::{classify, DomainError, GlucoseStatus, Identified, LogId, Timestamped};

/// A single blood glucose reading in mg/dL
///
/// The status is classified once, when the reading is created, and is stored
/// alongside the value. Loading a reading from storage keeps the stored status
/// as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlucoseLog {
    /// Unique identifier for this reading
    pub id: LogId,
    /// Reading in mg/dL
    pub value: f64,
    /// When the reading was logged
    pub timestamp: DateTime<Utc>,
    /// Category assigned at creation time
    pub status: GlucoseStatus,
}

impl GlucoseLog {
    /// Create a new reading with a fresh id and a classified status
    pub fn new(value: f64, timestamp: DateTime<Utc>) -> Result<Self, DomainError> {
        let value = ensure_positive(value, "Glucose value")?;

        Ok(Self {
            id: LogId::new(),
            value,
            timestamp,
            status: classify(value),
        })
    }

    /// Create a reading from existing data (used by storage and the seeder)
    pub fn from_existing(
        id: LogId,
        value: f64,
        timestamp: DateTime<Utc>,
        status: GlucoseStatus,
    ) -> Self {
        Self {
            id,
            value,
            timestamp,
            status,
        }
    }
}

impl Identified for GlucoseLog {
    fn log_id(&self) -> &LogId {
        &self.id
    }
}

impl Timestamped for GlucoseLog {
    fn recorded_at(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
