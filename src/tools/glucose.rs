//! Tools for logging and reviewing glucose readings
//!
//! This module implements the glucose_log, glucose_history and
//! glucose_delete MCP tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{chart_series, filter_by_window, GlucoseSummary, SortOrder, TimeWindow};
use crate::domain::{GlucoseLog, GlucoseStatus, LogId};
use crate::storage::LogStore;
use crate::tools::{format_number, format_time, DeleteParams, NumericInput, ToolResponse};
use crate::ServerError;

/// Parameters for logging a glucose reading
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogGlucoseParams {
    #[schemars(description = "Blood glucose reading in mg/dL")]
    pub value: NumericInput,
}

/// Response from logging a glucose reading
#[derive(Debug, Serialize)]
pub struct LogGlucoseResponse {
    pub success: bool,
    pub message: String,
    pub entry: GlucoseLog,
}

/// Parameters for listing history (shared by glucose and weight)
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct HistoryParams {
    #[serde(default)]
    #[schemars(description = "Time window: 'week' (default), 'month' or 'all'")]
    pub window: TimeWindow,
    #[serde(default)]
    #[schemars(description = "'newest_first' (default) for lists, 'oldest_first' for charts")]
    pub order: SortOrder,
}

/// Response with the readings in a window and their statistics
#[derive(Debug, Serialize)]
pub struct GlucoseHistoryResponse {
    pub window: TimeWindow,
    pub entries: Vec<GlucoseLog>,
    pub summary: GlucoseSummary,
    pub latest: Option<GlucoseLog>,
    pub message: String,
}

/// Response from deleting an entry
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted: bool,
    pub message: String,
}

impl ToolResponse for LogGlucoseResponse {
    fn message(&self) -> &str {
        &self.message
    }
}

impl ToolResponse for GlucoseHistoryResponse {
    fn message(&self) -> &str {
        &self.message
    }
}

impl ToolResponse for DeleteResponse {
    fn message(&self) -> &str {
        &self.message
    }
}

fn status_advice(status: GlucoseStatus) -> &'static str {
    match status {
        GlucoseStatus::Low => "This is below range. Consider fast-acting carbohydrates and re-check in 15 minutes.",
        GlucoseStatus::Normal => "This is within the target range.",
        GlucoseStatus::SlightlyHigh => "This is slightly above range.",
        GlucoseStatus::High => "This is above range. Follow your care plan for high readings.",
    }
}

/// Log a glucose reading taken now
pub fn log_glucose(store: &LogStore, params: LogGlucoseParams) -> Result<LogGlucoseResponse, ServerError> {
    let value = params.value.to_positive("Glucose value")?;
    let entry = store.add_glucose_log(value)?;

    Ok(LogGlucoseResponse {
        success: true,
        message: format!(
            "Logged {} mg/dL ({}). {}\nEntry ID: {}",
            format_number(entry.value),
            entry.status,
            status_advice(entry.status),
            entry.id
        ),
        entry,
    })
}

/// List readings in a time window with summary statistics
pub fn glucose_history(store: &LogStore, params: HistoryParams) -> Result<GlucoseHistoryResponse, ServerError> {
    let now = store.clock().now();
    let all = store.glucose_logs();
    let latest = all.first().cloned();

    let entries = match params.order {
        SortOrder::NewestFirst => filter_by_window(&all, params.window, &now),
        SortOrder::OldestFirst => chart_series(&all, params.window, &now),
    };
    let summary = GlucoseSummary::from_logs(&entries);

    let message = if entries.is_empty() {
        format!("No glucose readings in the last {}.", describe_window(params.window))
    } else {
        let header = format!(
            "Glucose ({}): {} readings, average {} mg/dL, range {}-{} mg/dL, {:.0}% in range",
            describe_window(params.window),
            summary.count,
            summary.average.map(format_number).unwrap_or_default(),
            summary.min.map(format_number).unwrap_or_default(),
            summary.max.map(format_number).unwrap_or_default(),
            summary.normal_percent().unwrap_or(0.0),
        );
        let lines = entries
            .iter()
            .map(|log| {
                format!(
                    "- {} | {} mg/dL | {} | id {}",
                    format_time(&log.timestamp),
                    format_number(log.value),
                    log.status,
                    log.id
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n\n{}", header, lines)
    };

    Ok(GlucoseHistoryResponse {
        window: params.window,
        entries,
        summary,
        latest,
        message,
    })
}

/// Delete a glucose reading; an unknown id is reported, not an error
pub fn delete_glucose(store: &LogStore, params: DeleteParams) -> Result<DeleteResponse, ServerError> {
    let id = LogId::from_string(params.id.trim());
    let deleted = store.delete_glucose_log(&id)?;

    Ok(delete_response("glucose reading", &id, deleted))
}

pub(crate) fn delete_response(what: &str, id: &LogId, deleted: bool) -> DeleteResponse {
    let message = if deleted {
        format!("Deleted {} {}.", what, id)
    } else {
        format!("No {} with ID {}; nothing was deleted.", what, id)
    };
    DeleteResponse {
        success: true,
        deleted,
        message,
    }
}

pub(crate) fn describe_window(window: TimeWindow) -> &'static str {
    match window {
        TimeWindow::Week => "7 days",
        TimeWindow::Month => "30 days",
        TimeWindow::All => "all time",
    }
}
