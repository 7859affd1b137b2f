//! Data written through one store is visible to a store reopened on the same
//! backing files.

use chrono::{Local, Utc};
use diabetes_log_mcp::analytics::todays_intake;
use diabetes_log_mcp::clock::FixedClock;
use diabetes_log_mcp::*;
use serde_json::{json, Value};
use tempfile::TempDir;

fn lunch() -> NewLoggedItem {
    NewLoggedItem {
        name: "Lentil soup".to_string(),
        nutrients: Nutrients {
            carbohydrates: 40.0,
            protein: 18.0,
            fats: 6.0,
            calories: 290.0,
        },
        confidence: Some("High".to_string()),
    }
}

fn fill<B: KeyValueBackend + 'static>(backend: B, clock: FixedClock) -> (GlucoseLog, WeightLog, LoggedItem) {
    let store = LogStore::with_clock(backend, clock);
    let glucose = store.add_glucose_log(142.0).expect("glucose");
    let weight = store.add_weight_log(176.4, WeightUnit::Lbs).expect("weight");
    let meal = store.add_logged_item(lunch()).expect("meal");
    store.add_steps(4200).expect("steps");
    (glucose, weight, meal)
}

fn check(store: &LogStore, expected: &(GlucoseLog, WeightLog, LoggedItem)) {
    assert_eq!(store.glucose_logs(), vec![expected.0.clone()]);
    assert_eq!(store.glucose_logs()[0].status, GlucoseStatus::SlightlyHigh);
    assert_eq!(store.weight_logs(), vec![expected.1.clone()]);
    assert_eq!(store.logged_items(), vec![expected.2.clone()]);
    assert_eq!(store.todays_steps(), 4200);
}

#[test]
fn test_sqlite_survives_reopen() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("health_logs.db");
    let clock = FixedClock(Local::now());

    let written = fill(SqliteBackend::new(db_path.clone()).expect("open"), clock);

    let reopened = LogStore::with_clock(SqliteBackend::new(db_path).expect("reopen"), clock);
    check(&reopened, &written);
}

#[test]
fn test_json_files_survive_reopen() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let clock = FixedClock(Local::now());

    let written = fill(JsonFileBackend::new(dir.path().to_path_buf()).expect("open"), clock);
    assert!(dir.path().join("glucoseLogs.json").exists());
    assert!(dir.path().join("dailySteps.json").exists());

    let reopened = LogStore::with_clock(JsonFileBackend::new(dir.path().to_path_buf()).expect("reopen"), clock);
    check(&reopened, &written);
}

#[test]
fn test_stored_document_layout() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = LogStore::new(JsonFileBackend::new(dir.path().to_path_buf()).expect("open"));
    store.add_glucose_log(150.0).expect("glucose");
    store.add_logged_item(lunch()).expect("meal");

    let glucose: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("glucoseLogs.json")).unwrap()).unwrap();
    assert_eq!(glucose[0]["value"], 150.0);
    assert_eq!(glucose[0]["status"], "Slightly High");
    assert!(glucose[0]["timestamp"].is_string());
    assert!(glucose[0]["id"].is_string());

    let meals: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("mealLogs.json")).unwrap()).unwrap();
    assert_eq!(meals[0]["name"], "Lentil soup");
    assert!(meals[0]["loggedAt"].is_string());
}

#[test]
fn test_corrupt_file_reads_empty_and_is_not_overwritten() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("glucoseLogs.json");
    std::fs::write(&path, "[{\"broken\":").unwrap();

    let store = LogStore::new(JsonFileBackend::new(dir.path().to_path_buf()).expect("open"));
    assert!(store.glucose_logs().is_empty());

    let err = store.add_glucose_log(99.0).unwrap_err();
    assert_eq!(err.to_string(), "Could not save glucose log");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[{\"broken\":");

    // Other collections are unaffected
    store.add_weight_log(70.0, WeightUnit::Kg).expect("weight");
    assert_eq!(store.weight_logs().len(), 1);
}

fn rice(logged_at: &str) -> Value {
    json!({"id": "rice", "name": "Rice", "carbohydrates": 45, "protein": 4, "fats": 0.5, "calories": 205, "loggedAt": logged_at})
}

fn meal_store_with(dir: &TempDir, meals: Value) -> LogStore {
    std::fs::write(dir.path().join("mealLogs.json"), meals.to_string()).unwrap();
    let backend = JsonFileBackend::new(dir.path().to_path_buf()).expect("open");
    LogStore::with_clock(backend, FixedClock(Local::now()))
}

#[test]
fn test_meal_with_null_amounts_keeps_the_log_usable() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let now = Utc::now().to_rfc3339();
    let toast = json!({"id": "toast", "name": "Toast", "carbohydrates": 20, "protein": null, "fats": null, "calories": 90, "loggedAt": now});
    let store = meal_store_with(&dir, json!([toast, rice(&now)]));

    let items = store.logged_items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].protein, 0.0);

    let intake = todays_intake(&items, &store.clock().now());
    assert_eq!(intake.items.len(), 2);
    assert_eq!(intake.totals.carbohydrates, 65.0);
    assert_eq!(intake.totals.protein, 4.0);

    store.add_logged_item(lunch()).expect("meal after legacy entries");
    assert_eq!(store.logged_items().len(), 3);
}

#[test]
fn test_meal_without_timestamp_is_skipped_not_fatal() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let now = Utc::now().to_rfc3339();
    let undated = json!({"id": "undated", "name": "Muffin", "carbohydrates": 50, "calories": 400});
    let store = meal_store_with(&dir, json!([undated, rice(&now)]));

    let items = store.logged_items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Rice");

    let intake = todays_intake(&items, &store.clock().now());
    assert_eq!(intake.items.len(), 1);
    assert_eq!(intake.totals.carbohydrates, 45.0);

    let added = store.add_logged_item(lunch()).expect("meal after legacy entries");
    assert_eq!(store.logged_items()[0], added);

    // The undated entry is still on disk
    let raw: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("mealLogs.json")).unwrap()).unwrap();
    assert_eq!(raw.as_array().map(Vec::len), Some(3));
    assert_eq!(raw[1]["name"], "Muffin");
}

#[test]
fn test_reset_removes_everything_on_disk() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("health_logs.db");
    let clock = FixedClock(Local::now());
    fill(SqliteBackend::new(db_path.clone()).expect("open"), clock);

    let store = LogStore::with_clock(SqliteBackend::new(db_path.clone()).expect("reopen"), clock);
    store.reset_all().expect("reset");

    let reopened = LogStore::with_clock(SqliteBackend::new(db_path).expect("reopen"), clock);
    for collection in Collection::ALL {
        assert!(!reopened.has_collection(collection).unwrap());
    }
    assert_eq!(reopened.todays_steps(), 0);
}
