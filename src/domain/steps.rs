//! The daily step counter record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Steps accumulated for one calendar day
///
/// Only a single record is kept. A record whose date is not today is stale
/// and counts as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySteps {
    /// Local calendar day, serialized as YYYY-MM-DD
    pub date: NaiveDate,
    pub steps: u32,
}

impl DailySteps {
    pub fn new(date: NaiveDate, steps: u32) -> Self {
        Self { date, steps }
    }

    /// Steps counted for `today`, zero if the record belongs to another day
    pub fn steps_on(&self, today: NaiveDate) -> u32 {
        if self.date == today {
            self.steps
        } else {
            0
        }
    }

    /// Add steps on `today`, starting from zero if the record is stale
    pub fn add(&self, today: NaiveDate, steps: u32) -> Self {
        Self {
            date: today,
            steps: self.steps_on(today).saturating_add(steps),
        }
    }
}
