use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use diabetes_log_mcp::analytics::*;
use diabetes_log_mcp::*;

fn now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 6, 15, 20, 0, 0).unwrap()
}

fn reading(value: f64, ago: Duration) -> GlucoseLog {
    GlucoseLog::new(value, (now() - ago).with_timezone(&Utc)).unwrap()
}

fn meal(name: &str, carbs: f64, calories: f64, ago: Duration) -> LoggedItem {
    LoggedItem::new(
        NewLoggedItem {
            name: name.to_string(),
            nutrients: Nutrients {
                carbohydrates: carbs,
                protein: 5.0,
                fats: 3.0,
                calories,
            },
            confidence: None,
        },
        (now() - ago).with_timezone(&Utc),
    )
    .unwrap()
}

#[test]
fn test_week_window_keeps_recent_readings() {
    let logs = vec![
        reading(100.0, Duration::hours(2)),
        reading(130.0, Duration::days(6)),
        reading(190.0, Duration::days(8)),
        reading(60.0, Duration::days(40)),
    ];

    let week = filter_by_window(&logs, TimeWindow::Week, &now());
    let values: Vec<f64> = week.iter().map(|l| l.value).collect();
    assert_eq!(values, vec![100.0, 130.0]);

    assert_eq!(filter_by_window(&logs, TimeWindow::Month, &now()).len(), 3);
    assert_eq!(filter_by_window(&logs, TimeWindow::All, &now()).len(), 4);
}

#[test]
fn test_chart_series_is_oldest_first() {
    let logs = vec![
        reading(100.0, Duration::hours(1)),
        reading(110.0, Duration::days(1)),
        reading(120.0, Duration::days(2)),
    ];

    let series = chart_series(&logs, TimeWindow::Week, &now());
    let values: Vec<f64> = series.iter().map(|l| l.value).collect();
    assert_eq!(values, vec![120.0, 110.0, 100.0]);
}

#[test]
fn test_window_parse() {
    assert_eq!("Month".parse::<TimeWindow>().unwrap(), TimeWindow::Month);
    assert!("year".parse::<TimeWindow>().is_err());
    assert_eq!(TimeWindow::default(), TimeWindow::Week);
}

#[test]
fn test_todays_intake_totals() {
    let items = vec![
        meal("Dinner", 60.0, 650.0, Duration::hours(1)),
        meal("Lunch", 45.0, 520.0, Duration::hours(7)),
        meal("Yesterday's dessert", 30.0, 300.0, Duration::hours(21)),
    ];

    let intake = todays_intake(&items, &now());
    assert_eq!(intake.items.len(), 2);
    assert_eq!(intake.totals.carbohydrates, 105.0);
    assert_eq!(intake.totals.calories, 1170.0);
    assert_eq!(intake.totals.protein, 10.0);
    assert_eq!(intake.totals.fats, 6.0);
}

#[test]
fn test_empty_intake() {
    let intake = todays_intake(&[], &now());
    assert!(intake.items.is_empty());
    assert_eq!(intake.totals, Nutrients::default());
}

#[test]
fn test_goal_progress_caps_at_100() {
    let aggregator = Aggregator::new();
    let progress = aggregator.intake_progress(&Nutrients {
        carbohydrates: 300.0,
        protein: 50.0,
        fats: 0.0,
        calories: 1000.0,
    });

    assert_eq!(progress.carbohydrates.percent, 100.0);
    assert!(progress.carbohydrates.is_reached());
    assert_eq!(progress.protein.percent, 50.0);
    assert_eq!(progress.fats.percent, 0.0);
    assert_eq!(progress.calories.percent, 50.0);

    let steps = aggregator.step_progress(2000);
    assert_eq!(steps.percent, 25.0);
    assert!(!steps.is_reached());
}

#[test]
fn test_custom_goals() {
    let mut goals = DailyGoals::default();
    goals.steps = 10_000;
    let aggregator = Aggregator::with_goals(goals);

    assert_eq!(aggregator.step_progress(5000).percent, 50.0);
    assert_eq!(progress_percent(10.0, 0.0), 0.0);
}

#[test]
fn test_glucose_summary() {
    let logs = vec![
        reading(65.0, Duration::hours(1)),
        reading(100.0, Duration::hours(2)),
        reading(110.0, Duration::hours(3)),
        reading(200.0, Duration::hours(4)),
    ];

    let summary = GlucoseSummary::from_logs(&logs);
    assert_eq!(summary.count, 4);
    assert_eq!(summary.average, Some(118.75));
    assert_eq!(summary.min, Some(65.0));
    assert_eq!(summary.max, Some(200.0));
    assert_eq!(summary.status_counts.get(GlucoseStatus::Normal), 2);
    assert_eq!(summary.status_counts.get(GlucoseStatus::Low), 1);
    assert_eq!(summary.normal_percent(), Some(50.0));

    let empty = GlucoseSummary::from_logs(&[]);
    assert_eq!(empty.average, None);
    assert_eq!(empty.normal_percent(), None);
}
