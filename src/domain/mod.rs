//! Domain module containing the health log entities and their validation rules
//!
//! This module defines the records a user logs (glucose readings, weight,
//! meals, daily steps), the glucose status classifier, and the input checks
//! that run before anything reaches the store.

pub mod glucose;
pub mod meal;
pub mod status;
pub mod steps;
pub mod types;
pub mod validate;
pub mod weight;

// Re-export public types for easy access
pub use glucose::*;
pub use meal::*;
pub use status::*;
pub use steps::*;
pub use types::*;
pub use weight::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid unit: {0}")]
    InvalidUnit(String),
}
