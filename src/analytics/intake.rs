//! Daily intake aggregation and goal progress
//!
//! "Today" is the local calendar day: an item counts when it was logged at or
//! after local midnight.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::clock::start_of_day;
use crate::domain::{LoggedItem, Nutrients};

/// Carbohydrate goal in grams
pub const DEFAULT_CARBOHYDRATES_GOAL: f64 = 150.0;
/// Protein goal in grams
pub const DEFAULT_PROTEIN_GOAL: f64 = 100.0;
/// Fat goal in grams
pub const DEFAULT_FATS_GOAL: f64 = 70.0;
/// Energy goal in kcal
pub const DEFAULT_CALORIES_GOAL: f64 = 2000.0;
/// Daily step goal
pub const DEFAULT_STEP_GOAL: u32 = 8000;

/// Today's logged items (newest first) and their summed nutrients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodaysIntake {
    pub items: Vec<LoggedItem>,
    pub totals: Nutrients,
}

/// Sum the macro amounts of a set of items
pub fn sum_nutrients(items: &[LoggedItem]) -> Nutrients {
    let mut totals = Nutrients::default();
    for item in items {
        totals += item.nutrients();
    }
    totals
}

/// Items logged since local midnight of `now`'s day, with their totals
pub fn todays_intake(items: &[LoggedItem], now: &DateTime<Local>) -> TodaysIntake {
    let midnight = start_of_day(now).with_timezone(&Utc);

    let mut today: Vec<LoggedItem> = items
        .iter()
        .filter(|item| item.logged_at >= midnight)
        .cloned()
        .collect();
    today.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));

    let totals = sum_nutrients(&today);
    TodaysIntake {
        items: today,
        totals,
    }
}

/// Percentage of `goal` reached, capped at 100; zero when the goal is zero
pub fn progress_percent(value: f64, goal: f64) -> f64 {
    if goal > 0.0 {
        (value / goal * 100.0).min(100.0)
    } else {
        0.0
    }
}

/// Daily targets the user measures intake and activity against
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyGoals {
    pub nutrients: Nutrients,
    pub steps: u32,
}

impl Default for DailyGoals {
    fn default() -> Self {
        Self {
            nutrients: Nutrients {
                carbohydrates: DEFAULT_CARBOHYDRATES_GOAL,
                protein: DEFAULT_PROTEIN_GOAL,
                fats: DEFAULT_FATS_GOAL,
                calories: DEFAULT_CALORIES_GOAL,
            },
            steps: DEFAULT_STEP_GOAL,
        }
    }
}

/// Progress toward one goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    pub value: f64,
    pub goal: f64,
    pub percent: f64,
}

impl GoalProgress {
    pub fn new(value: f64, goal: f64) -> Self {
        Self {
            value,
            goal,
            percent: progress_percent(value, goal),
        }
    }

    pub fn is_reached(&self) -> bool {
        self.goal > 0.0 && self.value >= self.goal
    }
}

/// Progress toward each nutrient goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntakeProgress {
    pub carbohydrates: GoalProgress,
    pub protein: GoalProgress,
    pub fats: GoalProgress,
    pub calories: GoalProgress,
}

/// Aggregation engine holding the user's daily goals
///
/// This struct turns raw logs into the "today" numbers shown on a dashboard:
/// intake totals, nutrient progress and step progress.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    goals: DailyGoals,
}

impl Aggregator {
    /// Create an aggregator with the default goals
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator with custom goals
    pub fn with_goals(goals: DailyGoals) -> Self {
        Self { goals }
    }

    pub fn goals(&self) -> &DailyGoals {
        &self.goals
    }

    /// Progress of intake totals toward the nutrient goals
    pub fn intake_progress(&self, totals: &Nutrients) -> IntakeProgress {
        let goals = &self.goals.nutrients;
        IntakeProgress {
            carbohydrates: GoalProgress::new(totals.carbohydrates, goals.carbohydrates),
            protein: GoalProgress::new(totals.protein, goals.protein),
            fats: GoalProgress::new(totals.fats, goals.fats),
            calories: GoalProgress::new(totals.calories, goals.calories),
        }
    }

    /// Progress of today's steps toward the step goal
    pub fn step_progress(&self, steps: u32) -> GoalProgress {
        GoalProgress::new(f64::from(steps), f64::from(self.goals.steps))
    }
}
