//! Settings tools: wiping all local data

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::storage::LogStore;
use crate::tools::ToolResponse;
use crate::ServerError;

/// Parameters for resetting all data
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ResetParams {
    #[serde(default)]
    #[schemars(description = "Must be true. Deletes all glucose, weight, meal and step data")]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
}

impl ToolResponse for ResetResponse {
    fn message(&self) -> &str {
        &self.message
    }
}

/// Delete every health log; requires explicit confirmation
pub fn reset_data(store: &LogStore, params: ResetParams) -> Result<ResetResponse, ServerError> {
    if !params.confirm {
        return Err(DomainError::Validation {
            message: "Resetting deletes all health data and cannot be undone; pass confirm: true to proceed"
                .to_string(),
        }
        .into());
    }

    store.reset_all()?;

    Ok(ResetResponse {
        success: true,
        message: "All app data has been reset.".to_string(),
    })
}
