//! CLI command implementations
//!
//! Every command that touches the database loads and validates the config
//! file first. `validate` works on stdin alone.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{log_event, log_event_with_fields, Event, MetricsRegistry};
use crate::store::{SqliteStudentStore, IN_MEMORY_PATH};
use crate::students::{sanitize, validate as validate_fields, StudentInput, StudentService};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_response};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file, or `:memory:` (required)
    pub database_path: String,

    /// HTTP listener settings (optional)
    #[serde(default)]
    pub http: HttpServerConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.database_path.trim().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }

        self.http.validate().map_err(CliError::config_error)
    }

    /// True when the database lives only for the life of the process
    pub fn is_in_memory(&self) -> bool {
        self.database_path == IN_MEMORY_PATH
    }

    /// Get database path as Path
    pub fn database_path(&self) -> &Path {
        Path::new(&self.database_path)
    }

    /// Open the store, refusing a file database that `init` never created.
    ///
    /// Silent, so `list` prints only its response line.
    fn open_existing_store(&self) -> CliResult<SqliteStudentStore> {
        if !self.is_in_memory() && !self.database_path().exists() {
            return Err(CliError::not_initialized(&self.database_path));
        }
        Ok(SqliteStudentStore::open(self.database_path())?)
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
        Command::List { config, search } => list(&config, search.as_deref()),
        Command::Validate => validate(),
    }
}

/// Create the database file and the students table
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;

    if !config.is_in_memory() && config.database_path().exists() {
        return Err(CliError::already_initialized(&config.database_path));
    }

    SqliteStudentStore::open(config.database_path())?;

    write_response(json!({
        "initialized": true,
        "database_path": config.database_path,
    }))?;

    Ok(())
}

/// Open the store and serve HTTP until ctrl-c
pub fn start(config_path: &Path) -> CliResult<()> {
    log_event(Event::BootStart);

    let config = Config::load(config_path)?;
    let port = config.http.port.to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("database_path", config.database_path.as_str()), ("port", port.as_str())],
    );

    let store = config.open_existing_store()?;
    log_event_with_fields(Event::StoreOpened, &[("database_path", config.database_path.as_str())]);
    let service = Arc::new(StudentService::new(store, Arc::new(MetricsRegistry::new())));
    let server = HttpServer::with_config(config.http.clone(), service);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(server.start())
        .map_err(|e| CliError::boot_failed(format!("HTTP server error: {}", e)))
}

/// Print students, oldest first, optionally filtered
pub fn list(config_path: &Path, search: Option<&str>) -> CliResult<()> {
    write_response(list_students(config_path, search)?)?;
    Ok(())
}

fn list_students(config_path: &Path, search: Option<&str>) -> CliResult<Value> {
    let config = Config::load(config_path)?;
    let store = config.open_existing_store()?;
    let service = StudentService::new(store, Arc::new(MetricsRegistry::new()));

    let students = service
        .list(search)
        .map_err(|e| CliError::store_error(e.to_string()))?;

    Ok(serde_json::to_value(students)?)
}

/// Read one raw student object from stdin and report what a write would see
pub fn validate() -> CliResult<()> {
    let request = read_request()?;
    write_response(check_request(request)?)?;
    Ok(())
}

fn check_request(request: Value) -> CliResult<Value> {
    let input: StudentInput = serde_json::from_value(request)
        .map_err(|e| CliError::io_error(format!("Invalid request body: {}", e)))?;

    let fields = sanitize(&input);
    let validation = validate_fields(&fields);

    Ok(json!({
        "student": fields,
        "valid": validation.is_valid(),
        "validationErrors": validation.errors(),
    }))
}
