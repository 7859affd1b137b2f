//! Input validation for user-entered numbers
//!
//! Values arrive as free text or loosely typed JSON. Anything non-numeric or
//! non-positive is rejected here, before a store call is made.

use crate::domain::DomainError;

/// Check that a measured value is a finite number above zero
pub fn ensure_positive(value: f64, field: &str) -> Result<f64, DomainError> {
    if !value.is_finite() {
        return Err(DomainError::InvalidValue {
            message: format!("{} must be a number", field),
        });
    }
    if value <= 0.0 {
        return Err(DomainError::InvalidValue {
            message: format!("{} must be greater than zero", field),
        });
    }
    Ok(value)
}

/// Check that a nutrient amount is a finite number, zero allowed
pub fn ensure_non_negative(value: f64, field: &str) -> Result<f64, DomainError> {
    if !value.is_finite() {
        return Err(DomainError::InvalidValue {
            message: format!("{} must be a number", field),
        });
    }
    if value < 0.0 {
        return Err(DomainError::InvalidValue {
            message: format!("{} cannot be negative", field),
        });
    }
    Ok(value)
}

/// Parse free text as a positive decimal number (glucose, weight)
pub fn parse_positive_number(input: &str, field: &str) -> Result<f64, DomainError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation {
            message: format!("{} is required", field),
        });
    }

    let value: f64 = trimmed.parse().map_err(|_| DomainError::InvalidValue {
        message: format!("{} must be a number, got '{}'", field, trimmed),
    })?;

    ensure_positive(value, field)
}

/// Check that a step increment is at least one
pub fn ensure_step_count(steps: u64) -> Result<u32, DomainError> {
    if steps == 0 {
        return Err(DomainError::InvalidValue {
            message: "Steps must be greater than zero".to_string(),
        });
    }
    u32::try_from(steps).map_err(|_| DomainError::InvalidValue {
        message: format!("Steps cannot exceed {}", u32::MAX),
    })
}

/// Parse free text as a positive whole number of steps
pub fn parse_step_count(input: &str) -> Result<u32, DomainError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation {
            message: "Steps is required".to_string(),
        });
    }

    match trimmed.parse::<u64>() {
        Ok(steps) => ensure_step_count(steps),
        Err(_) if trimmed.parse::<f64>().is_ok() => Err(DomainError::InvalidValue {
            message: format!("Steps must be a positive whole number, got '{}'", trimmed),
        }),
        Err(_) => Err(DomainError::InvalidValue {
            message: format!("Steps must be a number, got '{}'", trimmed),
        }),
    }
}
