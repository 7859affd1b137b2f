//! Tools for meal logging and daily intake
//!
//! This module implements the meal_log, meal_delete and intake_today MCP
//! tools. Nutrition estimates come from the caller (image analysis or a food
//! lookup); this server only records them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{todays_intake, Aggregator, IntakeProgress, TodaysIntake};
use crate::domain::{LogId, LoggedItem, NewLoggedItem, Nutrients};
use crate::storage::LogStore;
use crate::tools::glucose::delete_response;
use crate::tools::{format_number, format_time, DeleteParams, DeleteResponse, NoParams, ToolResponse};
use crate::ServerError;

/// Parameters for logging a meal or food
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogMealParams {
    #[schemars(description = "Name of the meal or food")]
    pub name: String,
    #[serde(default)]
    #[schemars(description = "Carbohydrates in grams")]
    pub carbohydrates: f64,
    #[serde(default)]
    #[schemars(description = "Protein in grams")]
    pub protein: f64,
    #[serde(default)]
    #[schemars(description = "Fats in grams")]
    pub fats: f64,
    #[serde(default)]
    #[schemars(description = "Energy in kcal")]
    pub calories: f64,
    #[serde(default)]
    #[schemars(description = "Confidence of the nutrition estimate (optional)")]
    pub confidence: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogMealResponse {
    pub success: bool,
    pub message: String,
    pub entry: LoggedItem,
}

/// Today's intake with progress toward the daily goals
#[derive(Debug, Serialize)]
pub struct IntakeTodayResponse {
    pub intake: TodaysIntake,
    pub progress: IntakeProgress,
    pub message: String,
}

impl ToolResponse for LogMealResponse {
    fn message(&self) -> &str {
        &self.message
    }
}

impl ToolResponse for IntakeTodayResponse {
    fn message(&self) -> &str {
        &self.message
    }
}

/// Log a meal or food with its nutrition estimate
pub fn log_meal(store: &LogStore, params: LogMealParams) -> Result<LogMealResponse, ServerError> {
    let entry = store.add_logged_item(NewLoggedItem {
        name: params.name,
        nutrients: Nutrients {
            carbohydrates: params.carbohydrates,
            protein: params.protein,
            fats: params.fats,
            calories: params.calories,
        },
        confidence: params.confidence,
    })?;

    Ok(LogMealResponse {
        success: true,
        message: format!(
            "Logged {}: {} g carbs, {} g protein, {} g fats, {} kcal.\nEntry ID: {}",
            entry.name,
            format_number(entry.carbohydrates),
            format_number(entry.protein),
            format_number(entry.fats),
            format_number(entry.calories),
            entry.id
        ),
        entry,
    })
}

/// Delete a logged meal by id
pub fn delete_meal(store: &LogStore, params: DeleteParams) -> Result<DeleteResponse, ServerError> {
    let id = LogId::from_string(params.id.trim());
    let deleted = store.delete_logged_item(&id)?;

    Ok(delete_response("logged item", &id, deleted))
}

/// Summarize everything logged since midnight against the daily goals
pub fn intake_today(
    store: &LogStore,
    aggregator: &Aggregator,
    _params: NoParams,
) -> Result<IntakeTodayResponse, ServerError> {
    let intake = todays_intake(&store.logged_items(), &store.clock().now());
    let progress = aggregator.intake_progress(&intake.totals);

    let mut message = format!(
        "Today's intake: {} / {} g carbs ({:.0}%), {} / {} g protein ({:.0}%), {} / {} g fats ({:.0}%), {} / {} kcal ({:.0}%)",
        format_number(progress.carbohydrates.value),
        format_number(progress.carbohydrates.goal),
        progress.carbohydrates.percent,
        format_number(progress.protein.value),
        format_number(progress.protein.goal),
        progress.protein.percent,
        format_number(progress.fats.value),
        format_number(progress.fats.goal),
        progress.fats.percent,
        format_number(progress.calories.value),
        format_number(progress.calories.goal),
        progress.calories.percent,
    );

    if intake.items.is_empty() {
        message.push_str("\n\nNothing logged yet today.");
    } else {
        for item in &intake.items {
            message.push_str(&format!(
                "\n- {} | {} | {} g carbs, {} kcal | id {}",
                format_time(&item.logged_at),
                item.name,
                format_number(item.carbohydrates),
                format_number(item.calories),
                item.id
            ));
        }
    }

    Ok(IntakeTodayResponse {
        intake,
        progress,
        message,
    })
}
