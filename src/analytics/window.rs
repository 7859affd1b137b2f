//! Time-range filtering for lists and charts

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, Duration, Local, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Timestamped};

/// Relative window of history to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    /// The last 7 days
    #[default]
    Week,
    /// The last 30 days
    Month,
    /// Everything
    All,
}

impl TimeWindow {
    /// Length of the window in days, `None` for all-time
    pub fn days(&self) -> Option<u64> {
        match self {
            TimeWindow::Week => Some(7),
            TimeWindow::Month => Some(30),
            TimeWindow::All => None,
        }
    }

    /// Earliest instant still inside the window
    ///
    /// Days are subtracted on the local calendar, so the cutoff keeps the
    /// wall-clock time of `now` across DST changes.
    pub fn cutoff(&self, now: &DateTime<Local>) -> Option<DateTime<Utc>> {
        let days = self.days()?;
        let cutoff = now
            .checked_sub_days(Days::new(days))
            .unwrap_or_else(|| *now - Duration::days(days as i64));
        Some(cutoff.with_timezone(&Utc))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::All => "all",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            "all" => Ok(TimeWindow::All),
            other => Err(DomainError::Validation {
                message: format!("Unknown time window '{}' (expected week, month or all)", other),
            }),
        }
    }
}

/// Display order for a list of entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// List order, as stored
    #[default]
    NewestFirst,
    /// Chart order, left-to-right in time
    OldestFirst,
}

/// Entries recorded at or after the window's cutoff, in their original order
pub fn filter_by_window<T>(logs: &[T], window: TimeWindow, now: &DateTime<Local>) -> Vec<T>
where
    T: Timestamped + Clone,
{
    match window.cutoff(now) {
        None => logs.to_vec(),
        Some(cutoff) => logs
            .iter()
            .filter(|log| log.recorded_at() >= cutoff)
            .cloned()
            .collect(),
    }
}

/// Windowed entries reversed from newest-first into chart order
pub fn chart_series<T>(logs: &[T], window: TimeWindow, now: &DateTime<Local>) -> Vec<T>
where
    T: Timestamped + Clone,
{
    let mut series = filter_by_window(logs, window, now);
    series.reverse();
    series
}
