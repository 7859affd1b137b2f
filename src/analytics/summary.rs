//! Glucose statistics over a set of readings

use serde::Serialize;

use crate::domain::{GlucoseLog, GlucoseStatus};

/// How many readings fell into each status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusCounts {
    pub low: usize,
    pub normal: usize,
    pub slightly_high: usize,
    pub high: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: GlucoseStatus) {
        match status {
            GlucoseStatus::Low => self.low += 1,
            GlucoseStatus::Normal => self.normal += 1,
            GlucoseStatus::SlightlyHigh => self.slightly_high += 1,
            GlucoseStatus::High => self.high += 1,
        }
    }

    pub fn get(&self, status: GlucoseStatus) -> usize {
        match status {
            GlucoseStatus::Low => self.low,
            GlucoseStatus::Normal => self.normal,
            GlucoseStatus::SlightlyHigh => self.slightly_high,
            GlucoseStatus::High => self.high,
        }
    }
}

/// Count, range and average of a set of readings
///
/// Counts use each reading's stored status, not a fresh classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlucoseSummary {
    pub count: usize,
    pub average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub status_counts: StatusCounts,
}

impl GlucoseSummary {
    pub fn from_logs(logs: &[GlucoseLog]) -> Self {
        let mut status_counts = StatusCounts::default();
        let mut sum = 0.0;
        let mut min: Option<f64> = None;
        let mut max: Option<f64> = None;

        for log in logs {
            status_counts.record(log.status);
            sum += log.value;
            min = Some(min.map_or(log.value, |m| m.min(log.value)));
            max = Some(max.map_or(log.value, |m| m.max(log.value)));
        }

        let count = logs.len();
        Self {
            count,
            average: (count > 0).then(|| sum / count as f64),
            min,
            max,
            status_counts,
        }
    }

    /// Share of readings in the Normal band, as a percentage
    pub fn normal_percent(&self) -> Option<f64> {
        (self.count > 0).then(|| self.status_counts.normal as f64 / self.count as f64 * 100.0)
    }
}
