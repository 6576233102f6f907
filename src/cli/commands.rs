//! CLI command implementations
//!
//! A request names a collection, the filters and selection to apply, and one
//! action. It is a serialized call chain, executed exactly like the library
//! calls it stands for:
//!
//! ```json
//! {
//!   "collection": "contacts",
//!   "filters": [{"kind": "contains", "field": "tags", "value": "x"}],
//!   "select": ["name"],
//!   "action": "rows"
//! }
//! ```

use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::StoreConfig;
use crate::query::Filter;
use crate::store::Store;

use super::args::{Command, StoreArgs};
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// One request read from stdin
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// Target collection
    pub collection: String,

    /// Filters applied in order (AND)
    #[serde(default)]
    pub filters: Vec<Filter>,

    /// Dotted paths for `rows`
    #[serde(default)]
    pub select: Vec<String>,

    /// What to do with the filtered collection
    #[serde(flatten)]
    pub action: Action,
}

/// Request actions
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Project the working set
    Rows,
    /// Fetch one record of the working set by key
    Get { key: String },
    /// Insert, or update when filtered
    Save { data: Value },
    /// Remove matched records
    Delete,
    /// Empty the collection
    Truncate,
}

impl StoreArgs {
    /// Resolves the store configuration
    pub fn to_config(&self) -> CliResult<StoreConfig> {
        match &self.config {
            Some(path) => Ok(StoreConfig::load(path)?),
            None => {
                let config = StoreConfig::new(&self.data_dir);
                config.validate()?;
                Ok(config)
            }
        }
    }
}

/// Parse arguments and run
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command, reporting failures as an error envelope
pub fn run_command(cmd: Command) -> CliResult<()> {
    let outcome = match cmd {
        Command::Exec { store } => exec(&store),
        Command::Truncate { collection, store } => truncate(&collection, &store),
    };

    match outcome {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Execute one request from stdin
pub fn exec(args: &StoreArgs) -> CliResult<Value> {
    let config = args.to_config()?;
    let request: Request = serde_json::from_value(read_request()?)
        .map_err(|e| CliError::bad_request(e.to_string()))?;

    let store = Store::open(&config);
    execute(&store, request)
}

/// Empty one collection
pub fn truncate(collection: &str, args: &StoreArgs) -> CliResult<Value> {
    let config = args.to_config()?;
    let store = Store::open(&config);
    let result = store.truncate(collection)?;
    Ok(json!({ "keys": result.keys }))
}

/// Runs a request against a store
pub fn execute(store: &Store, request: Request) -> CliResult<Value> {
    if let Action::Truncate = request.action {
        let result = store.truncate(&request.collection)?;
        return Ok(json!({ "keys": result.keys }));
    }

    let mut session = store.from(&request.collection)?;
    for filter in request.filters {
        session = session.filter(filter);
    }
    let session = session.select(request.select);

    match request.action {
        Action::Rows => Ok(serde_json::to_value(session.rows())?),
        Action::Get { key } => Ok(session
            .get(&key)
            .map(|record| Value::Object(record.clone()))
            .unwrap_or(Value::Null)),
        Action::Save { data } => {
            let result = session.save(data)?;
            Ok(json!({ "keys": result.keys }))
        }
        Action::Delete => {
            let result = session.delete()?;
            Ok(json!({ "keys": result.keys }))
        }
        Action::Truncate => {
            let result = session.truncate()?;
            Ok(json!({ "keys": result.keys }))
        }
    }
}
