//! LoggedItem entity for meals and foods
//!
//! A logged item is created when an analyzed meal or a looked-up food is
//! logged. It carries the macro estimate and, when the estimate came from
//! image analysis, a free-form confidence label.

use std::ops::AddAssign;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::validate::ensure_non_negative;
use crate::domain::{DomainError, Identified, LogId, Timestamped};

/// Maximum length of a food name
const MAX_NAME_LEN: usize = 200;

/// Macro-nutrient amounts: grams for carbohydrates, protein and fats, kcal for calories
///
/// Missing or `null` fields in stored JSON read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Nutrients {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub carbohydrates: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub protein: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub fats: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub calories: f64,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl AddAssign for Nutrients {
    fn add_assign(&mut self, other: Self) {
        self.carbohydrates += other.carbohydrates;
        self.protein += other.protein;
        self.fats += other.fats;
        self.calories += other.calories;
    }
}

/// A meal or food entry as stored in the meal log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedItem {
    pub id: LogId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub carbohydrates: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub protein: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub fats: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub calories: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    pub logged_at: DateTime<Utc>,
}

/// Everything a caller supplies when logging an item; id and time are assigned by the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewLoggedItem {
    pub name: String,
    pub nutrients: Nutrients,
    pub confidence: Option<String>,
}

impl LoggedItem {
    /// Create a new logged item with a fresh id
    ///
    /// The name must be non-blank; nutrient amounts must be finite and not
    /// negative (zero is fine, plenty of foods have no fat).
    pub fn new(item: NewLoggedItem, logged_at: DateTime<Utc>) -> Result<Self, DomainError> {
        let name = item.name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidName("Food name cannot be empty".to_string()));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::InvalidName(format!(
                "Food name cannot be longer than {} characters",
                MAX_NAME_LEN
            )));
        }

        let n = item.nutrients;
        Ok(Self {
            id: LogId::new(),
            name: name.to_string(),
            carbohydrates: ensure_non_negative(n.carbohydrates, "Carbohydrates")?,
            protein: ensure_non_negative(n.protein, "Protein")?,
            fats: ensure_non_negative(n.fats, "Fats")?,
            calories: ensure_non_negative(n.calories, "Calories")?,
            confidence: item.confidence.filter(|c| !c.trim().is_empty()),
            logged_at,
        })
    }

    /// The item's macro amounts
    pub fn nutrients(&self) -> Nutrients {
        Nutrients {
            carbohydrates: self.carbohydrates,
            protein: self.protein,
            fats: self.fats,
            calories: self.calories,
        }
    }
}

impl Identified for LoggedItem {
    fn log_id(&self) -> &LogId {
        &self.id
    }
}

impl Timestamped for LoggedItem {
    fn recorded_at(&self) -> DateTime<Utc> {
        self.logged_at
    }
}
