//! MCP tools for health log management
//!
//! Each tool takes typed parameters (deserialized from the MCP call's
//! arguments) and returns a response with a human-readable `message` plus the
//! structured data behind it. Input validation happens here, before the
//! store is called.

pub mod glucose;
pub mod meals;
pub mod settings;
pub mod steps;
pub mod weight;

// Re-export tool functions for easy access
pub use glucose::*;
pub use meals::*;
pub use settings::*;
pub use steps::*;
pub use weight::*;

use chrono::{DateTime, Local, Utc};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domain::validate::{ensure_positive, ensure_step_count, parse_positive_number, parse_step_count};
use crate::domain::DomainError;

/// Common shape of every tool response
pub trait ToolResponse {
    /// Text shown to the user
    fn message(&self) -> &str;
}

/// A number as the user typed it: either a JSON number or numeric text
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Interpret as a positive decimal (glucose, weight)
    pub fn to_positive(&self, field: &str) -> Result<f64, DomainError> {
        match self {
            NumericInput::Number(value) => ensure_positive(*value, field),
            NumericInput::Text(text) => parse_positive_number(text, field),
        }
    }

    /// Interpret as a positive whole number of steps
    pub fn to_step_count(&self) -> Result<u32, DomainError> {
        match self {
            NumericInput::Number(value) => {
                if !value.is_finite() || value.fract() != 0.0 || *value < 0.0 {
                    return Err(DomainError::InvalidValue {
                        message: format!("Steps must be a positive whole number, got {}", value),
                    });
                }
                ensure_step_count(*value as u64)
            }
            NumericInput::Text(text) => parse_step_count(text),
        }
    }
}

/// Parameters for tools that take none
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Parameters for deleting an entry by id
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteParams {
    #[schemars(description = "ID of the entry to delete")]
    pub id: String,
}

/// Format a measurement without a trailing ".0"
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Format a stored instant in local time
pub(crate) fn format_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
