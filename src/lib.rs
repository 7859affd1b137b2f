//! Public library interface for the diabetes log MCP server
//!
//! This crate keeps a local, single-user health log (glucose readings, weight,
//! meals and a daily step counter) and exposes it to MCP clients as tools over
//! JSON-RPC on stdin/stdout.

use std::path::PathBuf;

use clap::ValueEnum;
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod analytics;
pub mod clock;
pub mod domain;
pub mod mcp;
pub mod storage;
pub mod tools;

// Re-export the types most callers need
pub use analytics::{Aggregator, DailyGoals};
pub use domain::*;
pub use storage::{
    ChangeEvent, Collection, JsonFileBackend, KeyValueBackend, LogStore, MemoryBackend, SqliteBackend, StorageError,
};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    Database(#[from] storage::StorageError),

    #[error("{0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the key-value documents are kept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// A single SQLite database file
    #[default]
    Sqlite,
    /// One JSON file per collection in a directory
    Json,
    /// Nothing persisted; data is lost on exit
    Memory,
}

/// Startup configuration for the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub backend: BackendKind,
    /// Database file for `Sqlite`, directory for `Json`, ignored for `Memory`
    pub data_path: PathBuf,
    /// Generate demo history for collections that have never been written
    pub seed_demo_data: bool,
    pub goals: DailyGoals,
}

impl ServerConfig {
    pub fn new(backend: BackendKind, data_path: PathBuf) -> Self {
        Self {
            backend,
            data_path,
            seed_demo_data: true,
            goals: DailyGoals::default(),
        }
    }
}

/// Main health log server that implements the MCP protocol
///
/// This server owns the log store and the aggregator that turns raw logs into
/// daily totals and goal progress.
pub struct HealthLogServer {
    store: LogStore,
    aggregator: Aggregator,
}

impl HealthLogServer {
    /// Open the configured backend and build a server over it
    ///
    /// On first run (or after a reset) glucose and weight get demo history
    /// unless seeding is disabled. A failed seed is logged, not fatal.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        info!(
            "Initializing health log server with {:?} backend at {}",
            config.backend,
            config.data_path.display()
        );

        let mut store = match config.backend {
            BackendKind::Sqlite => LogStore::new(SqliteBackend::new(config.data_path.clone())?),
            BackendKind::Json => LogStore::new(JsonFileBackend::new(config.data_path.clone())?),
            BackendKind::Memory => LogStore::new(MemoryBackend::new()),
        };

        store.subscribe(|event: &ChangeEvent| {
            debug!("Collection '{}' changed", event.collection);
        });

        if config.seed_demo_data {
            if let Err(e) = storage::seed::seed_missing_collections(&store, &mut rand::rng()) {
                warn!("Failed to seed demo history: {}", e);
            }
        }

        Ok(Self::with_store(store, config.goals))
    }

    /// Build a server over an existing store
    pub fn with_store(store: LogStore, goals: DailyGoals) -> Self {
        Self {
            store,
            aggregator: Aggregator::with_goals(goals),
        }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin is closed or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        info!(
            "Server started: {} glucose readings, {} weight entries, {} logged items",
            self.store.glucose_logs().len(),
            self.store.weight_logs().len(),
            self.store.logged_items().len()
        );

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Get a reference to the log store (useful for testing)
    pub fn store(&self) -> &LogStore {
        &self.store
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }
}
