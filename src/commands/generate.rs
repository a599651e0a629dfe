use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::Args;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::config::{self, ServiceOverrides};
use crate::generation::{ContextData, TextGenerator, build_payload};
use crate::logging;

pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("PG_GIT_SHA"),
    "\nbuilt: ",
    env!("PG_BUILD_TS")
);

#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    /// Question about the product. Read from stdin when omitted.
    query: Option<String>,

    /// Product data passed to the model verbatim (usually JSON).
    #[arg(long, conflicts_with_all = ["data_file", "field"])]
    data: Option<String>,

    /// Read product data from a file.
    #[arg(long, value_name = "PATH", conflicts_with = "field")]
    data_file: Option<PathBuf>,

    /// Build product data from KEY=VALUE pairs (repeatable).
    #[arg(long, value_name = "KEY=VALUE")]
    field: Vec<String>,

    /// Chat-completions endpoint URL.
    #[arg(long)]
    api_url: Option<String>,

    #[arg(long)]
    model: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Print the request that would be sent and exit.
    #[arg(long)]
    dry_run: bool,

    /// Print the answer as a JSON object.
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

pub async fn run(args: GenerateArgs) -> Result<(), String> {
    logging::init(args.verbose, args.quiet);

    let query = read_query(args.query.as_deref())?;
    let data = read_context_data(args.data.as_deref(), args.data_file.as_deref(), &args.field)?;

    let overrides = ServiceOverrides {
        api_url: args.api_url.clone(),
        model: args.model.clone(),
        timeout_secs: args.timeout,
    };
    let settings = config::resolve_settings(&overrides)?;
    debug!(
        api_key_present = settings.api_key_present(),
        timeout_secs = ?settings.timeout_secs,
        "resolved generation settings"
    );

    if args.dry_run {
        let context_data = data.normalize();
        let url = settings.api_url()?;
        let model = settings.model()?;
        let payload = build_payload(model, &query, &context_data);
        let body = json!({
            "dry_run": true,
            "url": url,
            "model": model,
            "payload": payload,
        });
        println!("{body}");
        return Ok(());
    }

    let config = settings.into_config()?;
    let mut generator = TextGenerator::new(&config).map_err(|err| err.to_string())?;
    let content = {
        let mut session = generator.session().map_err(|err| err.to_string())?;
        session.generate_text(&query, data).await
    };

    if args.json {
        println!("{}", json!({ "content": content }));
    } else {
        println!("{content}");
    }
    Ok(())
}

fn read_query(arg: Option<&str>) -> Result<String, String> {
    if let Some(query) = arg {
        return Ok(query.to_string());
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Err("No query provided. Pass QUERY or pipe it on stdin.".to_string());
    }

    let mut buffer = String::new();
    stdin
        .lock()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("Failed to read query from stdin: {err}"))?;
    Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
}

fn read_context_data(
    inline: Option<&str>,
    file: Option<&Path>,
    fields: &[String],
) -> Result<ContextData, String> {
    if let Some(raw) = inline {
        return Ok(ContextData::from(raw));
    }
    if let Some(path) = file {
        let raw = fs::read_to_string(path)
            .map_err(|err| format!("Failed to read data file '{}': {err}", path.display()))?;
        return Ok(ContextData::from(raw));
    }
    if fields.is_empty() {
        return Ok(ContextData::from("{}"));
    }

    parse_fields(fields).map(|map| ContextData::Structured(Value::Object(map)))
}

/// Turns `KEY=VALUE` pairs into a JSON object; `null` maps to JSON null.
fn parse_fields(fields: &[String]) -> Result<Map<String, Value>, String> {
    let mut map = Map::new();
    for field in fields {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| format!("Invalid --field '{field}'. Expected KEY=VALUE."))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("Invalid --field '{field}'. Key must not be empty."));
        }
        let value = match value {
            "null" => Value::Null,
            other => Value::String(other.to_string()),
        };
        map.insert(key.to_string(), value);
    }
    Ok(map)
}
