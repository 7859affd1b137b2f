//! Core types shared by every log collection
//!
//! Identifiers, weight units, and the `Timestamped` trait that lets the
//! window filter treat glucose, weight and meal entries uniformly.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a log entry
///
/// New entries get a random UUID. Entries loaded from storage keep whatever
/// id string they were saved with, so older data with non-UUID ids still
/// round-trips untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogId(pub String);

impl LogId {
    /// Generate a new random log ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing id string (from storage or a caller)
    pub fn from_string(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LogId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unit a weight entry was recorded in
///
/// Stored exactly as entered; no conversion between units is ever applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lbs,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl Default for WeightUnit {
    fn default() -> Self {
        WeightUnit::Kg
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" => Ok(WeightUnit::Kg),
            "lbs" | "lb" => Ok(WeightUnit::Lbs),
            other => Err(DomainError::InvalidUnit(format!(
                "'{}' is not a weight unit (expected kg or lbs)",
                other
            ))),
        }
    }
}

/// Anything that carries the instant it was recorded at
pub trait Timestamped {
    fn recorded_at(&self) -> DateTime<Utc>;
}

/// Entries that can be deleted by id
pub trait Identified {
    fn log_id(&self) -> &LogId;
}
