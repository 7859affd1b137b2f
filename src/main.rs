//! Main entry point for the diabetes log MCP server
//!
//! This file sets up logging, parses command line arguments, and starts the MCP server.
//! The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use diabetes_log_mcp::{BackendKind, HealthLogServer, ServerConfig};

const DATA_DIR_NAME: &str = "diabetes_log";
const DATABASE_FILE: &str = "health_logs.db";
const JSON_DIR: &str = "logs";

/// Find a writable data directory with a fallback strategy
fn get_default_data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        // 1. User's home directory (preferred)
        dirs::home_dir().map(|mut p| {
            p.push(format!(".{}", DATA_DIR_NAME));
            p
        }),
        // 2. User's data directory (platform-specific)
        dirs::data_dir().map(|mut p| {
            p.push(DATA_DIR_NAME);
            p
        }),
        // 3. User's config directory
        dirs::config_dir().map(|mut p| {
            p.push(DATA_DIR_NAME);
            p
        }),
        // 4. Current working directory (last resort)
        std::env::current_dir().ok().map(|mut p| {
            p.push(format!(".{}", DATA_DIR_NAME));
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_ok() {
            let test_file = potential_path.join(".test_write");
            if std::fs::write(&test_file, "test").is_ok() {
                let _ = std::fs::remove_file(&test_file);
                return Ok(potential_path.clone());
            }
        }
    }

    let mut temp_path = std::env::temp_dir();
    temp_path.push(DATA_DIR_NAME);
    std::fs::create_dir_all(&temp_path)?;

    tracing::warn!("Using temporary directory for health data: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for the diabetes log MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file, or the data directory for the json backend
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Storage backend
    #[arg(long, value_enum, default_value_t = BackendKind::Sqlite)]
    backend: BackendKind,

    /// Don't generate demo history on first run
    #[arg(long)]
    no_seed: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("diabetes_log_mcp={}", log_level))
        .with_writer(std::io::stderr) // stdout carries the protocol
        .init();

    info!("Starting diabetes log MCP server");

    let data_path = match args.database {
        Some(path) => {
            let dir = match args.backend {
                BackendKind::Json => Some(path.as_path()),
                _ => path.parent(),
            };
            if let Some(dir) = dir {
                if !dir.as_os_str().is_empty() && !dir.exists() {
                    std::fs::create_dir_all(dir)?;
                }
            }
            path
        }
        None => {
            let dir = get_default_data_dir()?;
            match args.backend {
                BackendKind::Json => dir.join(JSON_DIR),
                _ => dir.join(DATABASE_FILE),
            }
        }
    };

    info!("Using {:?} storage at: {}", args.backend, data_path.display());

    let mut config = ServerConfig::new(args.backend, data_path);
    config.seed_demo_data = !args.no_seed;

    let server = HealthLogServer::new(config)?;
    server.run().await?;

    info!("Diabetes log MCP server shutdown complete");
    Ok(())
}
