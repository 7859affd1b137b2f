//! Glucose status classification
//!
//! Maps a reading in mg/dL onto one of four categories. The rule is pure and
//! total: every input gets exactly one status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Readings below this are Low
pub const LOW_BELOW: f64 = 70.0;
/// Readings above this (and not High) are Slightly High
pub const SLIGHTLY_HIGH_ABOVE: f64 = 125.0;
/// Readings above this are High
pub const HIGH_ABOVE: f64 = 180.0;

/// Category a glucose reading falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlucoseStatus {
    Low,
    Normal,
    #[serde(rename = "Slightly High")]
    SlightlyHigh,
    High,
}

impl GlucoseStatus {
    /// All statuses, lowest first
    pub const ALL: [GlucoseStatus; 4] = [
        GlucoseStatus::Low,
        GlucoseStatus::Normal,
        GlucoseStatus::SlightlyHigh,
        GlucoseStatus::High,
    ];

    /// Get the display name for this status
    pub fn display_name(&self) -> &'static str {
        match self {
            GlucoseStatus::Low => "Low",
            GlucoseStatus::Normal => "Normal",
            GlucoseStatus::SlightlyHigh => "Slightly High",
            GlucoseStatus::High => "High",
        }
    }
}

impl fmt::Display for GlucoseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Classify a glucose reading (mg/dL)
///
/// Checks run in a fixed order: below 70 is Low, above 180 is High, above 125
/// is Slightly High, anything else is Normal. Zero and negative values are
/// not rejected here; they classify as Low.
pub fn classify(value: f64) -> GlucoseStatus {
    if value < LOW_BELOW {
        GlucoseStatus::Low
    } else if value > HIGH_ABOVE {
        GlucoseStatus::High
    } else if value > SLIGHTLY_HIGH_ABOVE {
        GlucoseStatus::SlightlyHigh
    } else {
        GlucoseStatus::Normal
    }
}
