//! Tools for logging and reviewing weight
//!
//! This module implements the weight_log, weight_history and weight_delete
//! MCP tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{chart_series, filter_by_window, SortOrder, TimeWindow};
use crate::domain::{LogId, WeightLog, WeightUnit};
use crate::storage::LogStore;
use crate::tools::glucose::{delete_response, describe_window};
use crate::tools::{format_number, format_time, DeleteParams, DeleteResponse, HistoryParams, NumericInput, ToolResponse};
use crate::ServerError;

/// Parameters for logging a weight entry
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogWeightParams {
    #[schemars(description = "Body weight")]
    pub value: NumericInput,
    #[serde(default)]
    #[schemars(description = "'kg' (default) or 'lbs'")]
    pub unit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogWeightResponse {
    pub success: bool,
    pub message: String,
    pub entry: WeightLog,
}

#[derive(Debug, Serialize)]
pub struct WeightHistoryResponse {
    pub window: TimeWindow,
    pub entries: Vec<WeightLog>,
    pub latest: Option<WeightLog>,
    pub message: String,
}

impl ToolResponse for LogWeightResponse {
    fn message(&self) -> &str {
        &self.message
    }
}

impl ToolResponse for WeightHistoryResponse {
    fn message(&self) -> &str {
        &self.message
    }
}

/// Log a weight entry, in the unit given
pub fn log_weight(store: &LogStore, params: LogWeightParams) -> Result<LogWeightResponse, ServerError> {
    let value = params.value.to_positive("Weight")?;
    let unit = match params.unit.as_deref() {
        Some(unit) => unit.parse::<WeightUnit>()?,
        None => WeightUnit::default(),
    };

    let entry = store.add_weight_log(value, unit)?;

    Ok(LogWeightResponse {
        success: true,
        message: format!(
            "Logged weight {} {}.\nEntry ID: {}",
            format_number(entry.value),
            entry.unit,
            entry.id
        ),
        entry,
    })
}

/// List weight entries in a time window
pub fn weight_history(store: &LogStore, params: HistoryParams) -> Result<WeightHistoryResponse, ServerError> {
    let now = store.clock().now();
    let all = store.weight_logs();
    let latest = all.first().cloned();

    let entries = match params.order {
        SortOrder::NewestFirst => filter_by_window(&all, params.window, &now),
        SortOrder::OldestFirst => chart_series(&all, params.window, &now),
    };

    let message = if entries.is_empty() {
        format!("No weight entries in the last {}.", describe_window(params.window))
    } else {
        let header = format!("Weight ({}): {} entries", describe_window(params.window), entries.len());
        let lines = entries
            .iter()
            .map(|log| {
                format!(
                    "- {} | {} {} | id {}",
                    format_time(&log.timestamp),
                    format_number(log.value),
                    log.unit,
                    log.id
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n\n{}", header, lines)
    };

    Ok(WeightHistoryResponse {
        window: params.window,
        entries,
        latest,
        message,
    })
}

/// Delete a weight entry by id
pub fn delete_weight(store: &LogStore, params: DeleteParams) -> Result<DeleteResponse, ServerError> {
    let id = LogId::from_string(params.id.trim());
    let deleted = store.delete_weight_log(&id)?;

    Ok(delete_response("weight entry", &id, deleted))
}
