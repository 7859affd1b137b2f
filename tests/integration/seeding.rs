//! First-run demo history through the server constructor

use diabetes_log_mcp::*;
use tempfile::TempDir;

fn config(dir: &TempDir, seed: bool) -> ServerConfig {
    let mut config = ServerConfig::new(BackendKind::Sqlite, dir.path().join("health_logs.db"));
    config.seed_demo_data = seed;
    config
}

#[test]
fn test_first_start_seeds_glucose_and_weight() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let server = HealthLogServer::new(config(&dir, true)).expect("Failed to create server");

    let glucose = server.store().glucose_logs();
    assert!(glucose.len() >= 170 && glucose.len() <= 360, "got {}", glucose.len());
    assert!(glucose.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    assert_eq!(server.store().weight_logs().len(), 18);

    // Meals and steps are never seeded
    assert!(server.store().logged_items().is_empty());
    assert_eq!(server.store().todays_steps(), 0);
}

#[test]
fn test_restart_does_not_reseed() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let first = HealthLogServer::new(config(&dir, true)).expect("first start");
    let glucose = first.store().glucose_logs();
    let weight = first.store().weight_logs();
    drop(first);

    let second = HealthLogServer::new(config(&dir, true)).expect("second start");
    assert_eq!(second.store().glucose_logs(), glucose);
    assert_eq!(second.store().weight_logs(), weight);
}

#[test]
fn test_emptied_collection_is_not_reseeded() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let first = HealthLogServer::new(config(&dir, true)).expect("first start");
    for log in first.store().weight_logs() {
        first.store().delete_weight_log(&log.id).expect("delete");
    }
    drop(first);

    let second = HealthLogServer::new(config(&dir, true)).expect("second start");
    assert!(second.store().weight_logs().is_empty());
}

#[test]
fn test_no_seed_starts_empty() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let server = HealthLogServer::new(config(&dir, false)).expect("Failed to create server");

    assert!(server.store().glucose_logs().is_empty());
    assert!(server.store().weight_logs().is_empty());
    assert!(!server.store().has_collection(Collection::Glucose).unwrap());
}

#[test]
fn test_json_backend_server() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = ServerConfig::new(BackendKind::Json, dir.path().join("logs"));
    config.seed_demo_data = false;

    let server = HealthLogServer::new(config).expect("Failed to create server");
    server.store().add_glucose_log(65.0).expect("glucose");

    assert_eq!(server.store().latest_glucose_log().map(|l| l.status), Some(GlucoseStatus::Low));
    assert!(dir.path().join("logs").join("glucoseLogs.json").exists());
}
