//! End-to-end tool calls over the JSON-RPC line protocol

use diabetes_log_mcp::mcp::McpServer;
use diabetes_log_mcp::*;
use serde_json::{json, Value};

fn server() -> McpServer {
    let store = LogStore::new(MemoryBackend::new());
    McpServer::new(HealthLogServer::with_store(store, DailyGoals::default()))
}

async fn call_tool(server: &mut McpServer, id: u64, name: &str, arguments: Value) -> Value {
    let request = json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments},
    });
    let response = server
        .process_line(&request.to_string())
        .await
        .expect("tools/call always answers");
    let response = serde_json::to_value(response).unwrap();
    assert_eq!(response["id"], id);
    response["result"].clone()
}

fn text(result: &Value) -> &str {
    result["content"][0]["text"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn test_glucose_log_history_delete() {
    let mut server = server();

    let high = call_tool(&mut server, 1, "glucose_log", json!({"value": 190})).await;
    assert_eq!(high["isError"], false);
    assert_eq!(high["structuredContent"]["entry"]["status"], "High");

    let normal = call_tool(&mut server, 2, "glucose_log", json!({"value": "72"})).await;
    assert_eq!(normal["structuredContent"]["entry"]["status"], "Normal");

    let history = call_tool(&mut server, 3, "glucose_history", json!({})).await;
    let entries = history["structuredContent"]["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["value"], 72.0);
    assert_eq!(entries[1]["value"], 190.0);
    assert_eq!(history["structuredContent"]["summary"]["count"], 2);

    let chart = call_tool(&mut server, 4, "glucose_history", json!({"window": "all", "order": "oldest_first"})).await;
    assert_eq!(chart["structuredContent"]["entries"][0]["value"], 190.0);

    let id = high["structuredContent"]["entry"]["id"].as_str().unwrap().to_string();
    let deleted = call_tool(&mut server, 5, "glucose_delete", json!({"id": id})).await;
    assert_eq!(deleted["structuredContent"]["deleted"], true);

    let history = call_tool(&mut server, 6, "glucose_history", json!({"window": "month"})).await;
    assert_eq!(history["structuredContent"]["entries"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_inputs_do_not_store() {
    let mut server = server();

    for (id, value) in [(1, json!("abc")), (2, json!(0)), (3, json!(-5)), (4, json!(""))] {
        let result = call_tool(&mut server, id, "glucose_log", json!({"value": value})).await;
        assert_eq!(result["isError"], true, "value {} should be rejected", value);
    }

    let steps = call_tool(&mut server, 5, "steps_add", json!({"steps": "12.5"})).await;
    assert_eq!(steps["isError"], true);

    let unit = call_tool(&mut server, 6, "weight_log", json!({"value": 70, "unit": "stone"})).await;
    assert_eq!(unit["isError"], true);

    let history = call_tool(&mut server, 7, "glucose_history", json!({"window": "all"})).await;
    assert_eq!(history["structuredContent"]["entries"], json!([]));
}

#[tokio::test]
async fn test_meals_and_intake() {
    let mut server = server();

    let meal = call_tool(
        &mut server,
        1,
        "meal_log",
        json!({"name": "Oatmeal", "carbohydrates": 54, "protein": 10, "fats": 6, "calories": 310, "confidence": "High"}),
    )
    .await;
    assert_eq!(meal["isError"], false);
    assert!(meal["structuredContent"]["entry"]["loggedAt"].is_string());

    call_tool(&mut server, 2, "meal_log", json!({"name": "Apple", "carbohydrates": 25, "calories": 95})).await;

    let intake = call_tool(&mut server, 3, "intake_today", json!({})).await;
    let totals = &intake["structuredContent"]["intake"]["totals"];
    assert_eq!(totals["carbohydrates"], 79.0);
    assert_eq!(totals["calories"], 405.0);
    assert_eq!(intake["structuredContent"]["intake"]["items"][0]["name"], "Apple");
    assert!(text(&intake).contains("Oatmeal"));

    let id = meal["structuredContent"]["entry"]["id"].as_str().unwrap().to_string();
    call_tool(&mut server, 4, "meal_delete", json!({"id": id})).await;

    let intake = call_tool(&mut server, 5, "intake_today", json!({})).await;
    assert_eq!(intake["structuredContent"]["intake"]["totals"]["carbohydrates"], 25.0);
}

#[tokio::test]
async fn test_steps_and_reset() {
    let mut server = server();

    call_tool(&mut server, 1, "steps_add", json!({"steps": 3000})).await;
    let added = call_tool(&mut server, 2, "steps_add", json!({"steps": "1500"})).await;
    assert_eq!(added["structuredContent"]["steps"], 4500);

    let today = call_tool(&mut server, 3, "steps_today", json!({})).await;
    assert_eq!(today["structuredContent"]["steps"], 4500);
    assert_eq!(today["structuredContent"]["progress"]["goal"], 8000.0);

    call_tool(&mut server, 4, "weight_log", json!({"value": 81.3})).await;

    let refused = call_tool(&mut server, 5, "data_reset", json!({})).await;
    assert_eq!(refused["isError"], true);
    let weight = call_tool(&mut server, 6, "weight_history", json!({"window": "all"})).await;
    assert_eq!(weight["structuredContent"]["entries"].as_array().unwrap().len(), 1);

    let reset = call_tool(&mut server, 7, "data_reset", json!({"confirm": true})).await;
    assert_eq!(reset["isError"], false);

    let today = call_tool(&mut server, 8, "steps_today", json!({})).await;
    assert_eq!(today["structuredContent"]["steps"], 0);
    let weight = call_tool(&mut server, 9, "weight_history", json!({"window": "all"})).await;
    assert_eq!(weight["structuredContent"]["latest"], Value::Null);
}

#[tokio::test]
async fn test_delete_unknown_id_is_not_an_error() {
    let mut server = server();
    let result = call_tool(&mut server, 1, "weight_delete", json!({"id": "does-not-exist"})).await;

    assert_eq!(result["isError"], false);
    assert_eq!(result["structuredContent"]["deleted"], false);
}
