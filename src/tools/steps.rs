//! Step counter tools
//!
//! The counter holds a single day's total. It resets to zero the first time
//! it is read on a new local day.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{Aggregator, GoalProgress};
use crate::storage::LogStore;
use crate::tools::{NoParams, NumericInput, ToolResponse};
use crate::ServerError;

/// Parameters for adding steps
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddStepsParams {
    #[schemars(description = "Number of steps to add to today's total (whole number, at least 1)")]
    pub steps: NumericInput,
}

#[derive(Debug, Serialize)]
pub struct StepsResponse {
    pub success: bool,
    pub steps: u32,
    pub progress: GoalProgress,
    pub message: String,
}

impl ToolResponse for StepsResponse {
    fn message(&self) -> &str {
        &self.message
    }
}

fn steps_message(prefix: &str, steps: u32, progress: &GoalProgress) -> String {
    let mut message = format!(
        "{}{} steps today ({:.0}% of {} goal).",
        prefix, steps, progress.percent, progress.goal
    );
    if progress.is_reached() {
        message.push_str(" Daily goal reached!");
    }
    message
}

/// Add steps to today's counter
pub fn add_steps(
    store: &LogStore,
    aggregator: &Aggregator,
    params: AddStepsParams,
) -> Result<StepsResponse, ServerError> {
    let added = params.steps.to_step_count()?;
    let total = store.add_steps(added)?;
    let progress = aggregator.step_progress(total);

    Ok(StepsResponse {
        success: true,
        steps: total,
        message: steps_message(&format!("Added {} steps. ", added), total, &progress),
        progress,
    })
}

/// Today's step total
pub fn steps_today(
    store: &LogStore,
    aggregator: &Aggregator,
    _params: NoParams,
) -> Result<StepsResponse, ServerError> {
    let total = store.todays_steps();
    let progress = aggregator.step_progress(total);

    Ok(StepsResponse {
        success: true,
        steps: total,
        message: steps_message("", total, &progress),
        progress,
    })
}
