//! Source of "now" for everything that depends on the current day
//!
//! Daily aggregation, the step counter reset and the window filter all work
//! from local calendar time. Going through a `Clock` lets tests pin "now".

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};

/// Provides the current local time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    /// Today's local calendar date
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// The wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Local midnight at the start of the day containing `now`
///
/// When midnight does not exist locally (a DST jump at 00:00) the day starts
/// at the first instant after the gap.
pub fn start_of_day(now: &DateTime<Local>) -> DateTime<Local> {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight).earliest() {
        Some(start) => start,
        None => *now - (now.time() - NaiveTime::MIN),
    }
}
