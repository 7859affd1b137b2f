//! Demo history for a first run
//!
//! Generates about three months of glucose readings and weight entries so a
//! fresh install has something to chart. Only collections that have never
//! been written are seeded; existing user data is never touched.

use chrono::{DateTime, Days, Local, NaiveTime, TimeZone, Utc};
use rand::Rng;
use serde::Serialize;

use crate::domain::{classify, GlucoseLog, LogId, WeightLog, WeightUnit};
use crate::storage::{Collection, LogStore, StorageError};

/// Days of history generated on first run
pub const SEED_DAYS: u32 = 90;

/// Weight is recorded every this many days
const WEIGHT_EVERY_DAYS: u32 = 5;

/// How many entries were written per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub glucose_logs: usize,
    pub weight_logs: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.glucose_logs == 0 && self.weight_logs == 0
    }
}

/// Local instant for `days_ago` days before `now` at the given wall-clock time
///
/// `None` when that wall-clock time doesn't exist locally (DST gap).
fn local_instant(now: &DateTime<Local>, days_ago: u32, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    let date = now.date_naive().checked_sub_days(Days::new(u64::from(days_ago)))?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Local
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|t| t.with_timezone(&Utc))
}

/// 2-4 readings per day between 08:00 and 21:59, drifting slowly with noise
///
/// Returned newest first.
pub fn generate_glucose_history<R: Rng>(
    now: &DateTime<Local>,
    days: u32,
    rng: &mut R,
) -> Vec<GlucoseLog> {
    let mut logs = Vec::new();

    for day in 0..days {
        let readings = rng.random_range(2u32..=4);
        let base = 110.0 + (f64::from(day) / 10.0).sin() * 10.0;

        for _ in 0..readings {
            let hour = rng.random_range(8u32..22);
            let minute = rng.random_range(0u32..60);
            let variation = f64::from(rng.random_range(-20i32..40));

            let Some(timestamp) = local_instant(now, day, hour, minute) else {
                continue;
            };
            let value = (base + variation).floor();
            logs.push(GlucoseLog::from_existing(
                LogId::new(),
                value,
                timestamp,
                classify(value),
            ));
        }
    }

    logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    logs
}

/// A morning weigh-in every few days, trending down from about 80 kg
///
/// Returned newest first.
pub fn generate_weight_history<R: Rng>(
    now: &DateTime<Local>,
    days: u32,
    rng: &mut R,
) -> Vec<WeightLog> {
    let mut logs = Vec::new();

    for day in (0..days).step_by(WEIGHT_EVERY_DAYS as usize) {
        let Some(timestamp) = local_instant(now, day, 8, 0) else {
            continue;
        };
        let raw = 80.0 - f64::from(day) * 0.05 + rng.random::<f64>() * 0.5;
        let value = (raw * 10.0).round() / 10.0;
        logs.push(WeightLog::from_existing(LogId::new(), value, WeightUnit::Kg, timestamp));
    }

    logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    logs
}

/// Seed glucose and weight history into collections that were never written
pub fn seed_missing_collections<R: Rng>(
    store: &LogStore,
    rng: &mut R,
) -> Result<SeedReport, StorageError> {
    let now = store.clock().now();
    let mut report = SeedReport::default();

    if !store.has_collection(Collection::Glucose)? {
        let logs = generate_glucose_history(&now, SEED_DAYS, rng);
        store.replace_collection(Collection::Glucose, &logs)?;
        report.glucose_logs = logs.len();
    }

    if !store.has_collection(Collection::Weight)? {
        let logs = generate_weight_history(&now, SEED_DAYS, rng);
        store.replace_collection(Collection::Weight, &logs)?;
        report.weight_logs = logs.len();
    }

    if !report.is_empty() {
        tracing::info!(
            "Seeded demo history: {} glucose readings, {} weight entries",
            report.glucose_logs,
            report.weight_logs
        );
    }
    Ok(report)
}
