use chrono::{NaiveDate, TimeZone, Utc};
use diabetes_log_mcp::domain::validate::{parse_positive_number, parse_step_count};
use diabetes_log_mcp::*;

#[test]
fn test_classification_bands() {
    let cases = [
        (40.0, GlucoseStatus::Low),
        (69.9, GlucoseStatus::Low),
        (70.0, GlucoseStatus::Normal),
        (125.0, GlucoseStatus::Normal),
        (125.5, GlucoseStatus::SlightlyHigh),
        (126.0, GlucoseStatus::SlightlyHigh),
        (180.0, GlucoseStatus::SlightlyHigh),
        (180.1, GlucoseStatus::High),
        (181.0, GlucoseStatus::High),
        (400.0, GlucoseStatus::High),
    ];
    for (value, expected) in cases {
        assert_eq!(classify(value), expected, "classify({})", value);
    }
}

#[test]
fn test_status_is_fixed_at_creation() {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let log = GlucoseLog::new(126.0, at).unwrap();
    assert_eq!(log.status, GlucoseStatus::SlightlyHigh);

    let json = serde_json::to_string(&log).unwrap();
    assert!(json.contains("\"Slightly High\""));
    let back: GlucoseLog = serde_json::from_str(&json).unwrap();
    assert_eq!(back, log);
}

#[test]
fn test_ids_are_unique() {
    let at = Utc::now();
    let a = WeightLog::new(80.0, WeightUnit::Kg, at).unwrap();
    let b = WeightLog::new(80.0, WeightUnit::Kg, at).unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn test_weight_units() {
    assert_eq!("kg".parse::<WeightUnit>().unwrap(), WeightUnit::Kg);
    assert_eq!("LBS".parse::<WeightUnit>().unwrap(), WeightUnit::Lbs);
    assert!("stone".parse::<WeightUnit>().is_err());
    assert_eq!(serde_json::to_string(&WeightUnit::Lbs).unwrap(), "\"lbs\"");
}

#[test]
fn test_numeric_text_parsing() {
    assert_eq!(parse_positive_number(" 98.6 ", "Glucose value").unwrap(), 98.6);
    assert!(parse_positive_number("abc", "Glucose value").is_err());
    assert!(parse_positive_number("0", "Glucose value").is_err());
    assert!(parse_positive_number("-3", "Weight").is_err());
    assert!(parse_positive_number("", "Weight").is_err());

    assert_eq!(parse_step_count("10000").unwrap(), 10000);
    assert!(parse_step_count("0").is_err());
    assert!(parse_step_count("1.5").is_err());
    assert!(parse_step_count("many").is_err());
}

#[test]
fn test_logged_item_validation() {
    let at = Utc::now();
    let named = |name: &str| NewLoggedItem {
        name: name.to_string(),
        nutrients: Nutrients::default(),
        confidence: None,
    };

    assert!(LoggedItem::new(named("Banana"), at).is_ok());
    assert!(LoggedItem::new(named("   "), at).is_err());

    let mut negative = named("Toast");
    negative.nutrients.fats = -1.0;
    assert!(LoggedItem::new(negative, at).is_err());
}

#[test]
fn test_logged_item_missing_numbers_read_as_zero() {
    let raw = r#"{"id":"1","name":"Tea","confidence":"High","loggedAt":"2024-06-01T09:00:00Z"}"#;
    let item: LoggedItem = serde_json::from_str(raw).unwrap();

    assert_eq!(item.nutrients(), Nutrients::default());
    assert_eq!(item.confidence.as_deref(), Some("High"));
}

#[test]
fn test_daily_steps_rollover() {
    let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    let tuesday = NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();

    let record = DailySteps::new(monday, 6000);
    assert_eq!(record.steps_on(monday), 6000);
    assert_eq!(record.steps_on(tuesday), 0);

    assert_eq!(record.add(monday, 500), DailySteps::new(monday, 6500));
    assert_eq!(record.add(tuesday, 500), DailySteps::new(tuesday, 500));
}
