//! MCP server implementation that handles JSON-RPC communication
//!
//! This module implements the actual MCP server that:
//! 1. Reads JSON-RPC requests from stdin, one per line
//! 2. Routes tool calls to the health log tools
//! 3. Writes JSON-RPC responses to stdout

use std::collections::HashMap;

use schemars::gen::SchemaSettings;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools::{self, ToolResponse};
use crate::{HealthLogServer, ServerError};

/// Build a tool definition whose input schema is derived from `P`
fn tool<P: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    let generator = SchemaSettings::draft07()
        .with(|s| {
            s.inline_subschemas = true;
            s.meta_schema = None;
        })
        .into_generator();
    let schema = generator.into_root_schema_for::<P>();

    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: serde_json::to_value(schema).unwrap_or_else(|_| json!({"type": "object"})),
    }
}

/// Every tool this server offers
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool::<tools::LogGlucoseParams>(
            "glucose_log",
            "Log a blood glucose reading in mg/dL, taken now. The reading is classified as Low (<70), Normal (70-125), Slightly High (126-180) or High (>180)",
        ),
        tool::<tools::HistoryParams>(
            "glucose_history",
            "List glucose readings for the last week, month or all time, with average, range and status counts",
        ),
        tool::<tools::DeleteParams>("glucose_delete", "Delete a glucose reading by ID"),
        tool::<tools::LogWeightParams>("weight_log", "Log a body weight entry in kg or lbs"),
        tool::<tools::HistoryParams>("weight_history", "List weight entries for the last week, month or all time"),
        tool::<tools::DeleteParams>("weight_delete", "Delete a weight entry by ID"),
        tool::<tools::LogMealParams>(
            "meal_log",
            "Log a meal or food with its estimated carbohydrates, protein, fats (grams) and calories (kcal)",
        ),
        tool::<tools::DeleteParams>("meal_delete", "Delete a logged meal or food by ID"),
        tool::<tools::NoParams>(
            "intake_today",
            "Show everything eaten today with total nutrients and progress toward the daily goals",
        ),
        tool::<tools::AddStepsParams>("steps_add", "Add steps to today's step count"),
        tool::<tools::NoParams>("steps_today", "Show today's step count and progress toward the step goal"),
        tool::<tools::ResetParams>(
            "data_reset",
            "Permanently delete all glucose, weight, meal and step data. Requires confirm: true",
        ),
    ]
}

/// Deserialize a tool's arguments, run it, and wrap the outcome for MCP
fn invoke<P, R, F>(name: &str, args: HashMap<String, Value>, call: F) -> ToolCallResult
where
    P: DeserializeOwned,
    R: ToolResponse + Serialize,
    F: FnOnce(P) -> Result<R, ServerError>,
{
    let params: P = match serde_json::from_value(Value::Object(args.into_iter().collect())) {
        Ok(params) => params,
        Err(e) => {
            debug!("Rejected arguments for {}: {}", name, e);
            return ToolCallResult::error(format!("Invalid arguments for {}: {}", name, e));
        }
    };

    match call(params) {
        Ok(response) => {
            let structured = serde_json::to_value(&response).ok();
            ToolCallResult::success(response.message().to_string(), structured)
        }
        Err(e) => {
            warn!(
                "Tool {} failed (code {}): {}",
                name,
                server_error_to_json_rpc_code(&e),
                e
            );
            ToolCallResult::error(e.to_string())
        }
    }
}

/// MCP server that handles communication with the client
pub struct McpServer {
    server: HealthLogServer,
    /// Whether the client has finished the initialize handshake
    initialized: bool,
}

impl McpServer {
    pub fn new(server: HealthLogServer) -> Self {
        Self {
            server,
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and notifications.
    pub async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        if request.is_notification() {
            self.handle_notification(&request);
            return None;
        }

        Some(self.handle_request(request).await)
    }

    fn handle_notification(&mut self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => self.initialized = true,
            other => debug!("Ignoring notification '{}'", other),
        }
    }

    async fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request).await,
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(request.id, json!(null))
            }
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request).await,
            "tools/call" => self.handle_tools_call(request).await,
            _ => JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        }
    }

    async fn handle_initialize(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let params: InitializeParams = request
            .params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();
        match &params.client_info {
            Some(client) => info!(
                "MCP client connected: {} {} (protocol {})",
                client.name,
                client.version,
                params.protocol_version.as_deref().unwrap_or("unknown")
            ),
            None => info!("MCP client connected"),
        }

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: "Diabetes Log MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        respond(request.id, &result)
    }

    async fn handle_tools_list(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(request.id, json!({ "tools": tool_definitions() }))
    }

    async fn handle_tools_call(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match request.params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        request.id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let store = self.server.store();
        let aggregator = self.server.aggregator();
        let name = tool_params.name.as_str();
        let args = tool_params.arguments;

        let result = match name {
            "glucose_log" => invoke(name, args, |p| tools::log_glucose(store, p)),
            "glucose_history" => invoke(name, args, |p| tools::glucose_history(store, p)),
            "glucose_delete" => invoke(name, args, |p| tools::delete_glucose(store, p)),
            "weight_log" => invoke(name, args, |p| tools::log_weight(store, p)),
            "weight_history" => invoke(name, args, |p| tools::weight_history(store, p)),
            "weight_delete" => invoke(name, args, |p| tools::delete_weight(store, p)),
            "meal_log" => invoke(name, args, |p| tools::log_meal(store, p)),
            "meal_delete" => invoke(name, args, |p| tools::delete_meal(store, p)),
            "intake_today" => invoke(name, args, |p| tools::intake_today(store, aggregator, p)),
            "steps_add" => invoke(name, args, |p| tools::add_steps(store, aggregator, p)),
            "steps_today" => invoke(name, args, |p| tools::steps_today(store, aggregator, p)),
            "data_reset" => invoke(name, args, |p| tools::reset_data(store, p)),
            _ => ToolCallResult::error(format!("Unknown tool: {}", name)),
        };

        respond(request.id, &result)
    }
}

/// Serialize a result into a success response
fn respond<T: Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to serialize result: {}", e),
            None,
        ),
    }
}
