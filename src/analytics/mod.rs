//! Derived views over the health logs
//!
//! Nothing here touches storage: every function takes the entries plus a
//! "now" and computes the view from scratch. Collections are small (one
//! person, one device), so there is no caching.

pub mod intake;
pub mod summary;
pub mod window;

pub use intake::{
    progress_percent, sum_nutrients, todays_intake, Aggregator, DailyGoals, GoalProgress,
    IntakeProgress, TodaysIntake,
};
pub use summary::{GlucoseSummary, StatusCounts};
pub use window::{chart_series, filter_by_window, SortOrder, TimeWindow};
