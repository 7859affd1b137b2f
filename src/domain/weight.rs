//! WeightLog entity for body weight entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::validate::ensure_positive;
use crate::domain::{DomainError, Identified, LogId, Timestamped, WeightUnit};

/// A body weight entry, kept in the unit it was entered in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightLog {
    pub id: LogId,
    pub value: f64,
    pub unit: WeightUnit,
    pub timestamp: DateTime<Utc>,
}

impl WeightLog {
    /// Create a new weight entry with a fresh id
    pub fn new(value: f64, unit: WeightUnit, timestamp: DateTime<Utc>) -> Result<Self, DomainError> {
        let value = ensure_positive(value, "Weight")?;

        Ok(Self {
            id: LogId::new(),
            value,
            unit,
            timestamp,
        })
    }

    /// Create an entry from existing data (used by storage and the seeder)
    pub fn from_existing(id: LogId, value: f64, unit: WeightUnit, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            value,
            unit,
            timestamp,
        }
    }
}

impl Identified for WeightLog {
    fn log_id(&self) -> &LogId {
        &self.id
    }
}

impl Timestamped for WeightLog {
    fn recorded_at(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
