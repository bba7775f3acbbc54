use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use serde_json::Value;
use tracing::debug;
use vledger_contract::operations::{QUERY_ALL_ASSETS, QUERY_ASSET_HISTORY};
use vledger_contract::{OperationRegistry, Payload, TransactionDispatcher};
use vledger_server::{LedgerServer, ServerConfig};
use vledger_store::{JournalConfig, JournalStore};
use vledger_types::Record;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Invoke(args) => cmd_invoke(&cli.journal, &cli.format, args),
        Command::Assets => cmd_assets(&cli.journal, &cli.format),
        Command::History(args) => cmd_history(&cli.journal, &cli.format, args),
        Command::Operations => cmd_operations(&cli.format),
        Command::Serve(args) => cmd_serve(&cli.journal, args),
    }
}

fn open_dispatcher(journal: &Path) -> anyhow::Result<TransactionDispatcher> {
    let store = JournalStore::open(journal, JournalConfig::default())
        .with_context(|| format!("opening journal {}", journal.display()))?;
    debug!(path = %journal.display(), entries = store.len(), "journal opened");
    Ok(TransactionDispatcher::new(
        Arc::new(OperationRegistry::standard()),
        Arc::new(store),
    ))
}

/// Dispatch one call, turning a contract failure into a tagged error.
fn run(dispatcher: &TransactionDispatcher, function: &str, args: &[String]) -> anyhow::Result<Payload> {
    dispatcher
        .dispatch(function, args)
        .map_err(|e| anyhow::anyhow!("{}: {}", e.kind(), e))
}

fn print_json(payload: &[u8]) -> anyhow::Result<()> {
    let value: Value = serde_json::from_slice(payload).context("payload is not JSON")?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn cmd_invoke(journal: &Path, format: &OutputFormat, args: InvokeArgs) -> anyhow::Result<()> {
    let dispatcher = open_dispatcher(journal)?;
    let payload = run(&dispatcher, &args.function, &args.args)?;
    match (format, payload.is_empty()) {
        (OutputFormat::Json, true) => println!("{}", serde_json::json!({ "status": "success" })),
        (_, true) => println!("{} {} committed", "✓".green().bold(), args.function.yellow()),
        (_, false) => print_json(&payload)?,
    }
    Ok(())
}

fn cmd_assets(journal: &Path, format: &OutputFormat) -> anyhow::Result<()> {
    let dispatcher = open_dispatcher(journal)?;
    let payload = run(&dispatcher, QUERY_ALL_ASSETS, &[])?;
    if let OutputFormat::Json = format {
        return print_json(&payload);
    }
    let rows = parse_asset_rows(&payload)?;
    if rows.is_empty() {
        println!("No assets recorded.");
    }
    for (key, record) in &rows {
        println!("{}  {}", key.yellow().bold(), describe(record));
    }
    Ok(())
}

fn cmd_history(journal: &Path, format: &OutputFormat, args: HistoryArgs) -> anyhow::Result<()> {
    let dispatcher = open_dispatcher(journal)?;
    let payload = run(&dispatcher, QUERY_ASSET_HISTORY, &[args.key.clone()])?;
    if let OutputFormat::Json = format {
        return print_json(&payload);
    }
    let versions: Vec<Record> = serde_json::from_slice(&payload)?;
    if versions.is_empty() {
        println!("No history for {}.", args.key.yellow());
    }
    for (i, record) in versions.iter().enumerate() {
        println!("{}  {}", format!("#{}", i + 1).dimmed(), describe(record));
    }
    Ok(())
}

fn cmd_operations(format: &OutputFormat) -> anyhow::Result<()> {
    let registry = OperationRegistry::standard();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&registry.names())?),
        OutputFormat::Text => {
            for name in registry.names() {
                println!("  {}", name.cyan());
            }
        }
    }
    Ok(())
}

fn cmd_serve(journal: &Path, args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_toml_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if args.memory {
        config.journal_path = None;
    } else if config.journal_path.is_none() {
        config.journal_path = Some(journal.to_path_buf());
    }
    config.seed_on_start |= args.seed;

    let server = LedgerServer::open(config)?;
    println!("Ledger server on {}", server.config().bind_addr.to_string().bold());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

/// `(key, record)` pairs from a `queryAllAssets` payload.
fn parse_asset_rows(payload: &[u8]) -> anyhow::Result<Vec<(String, Record)>> {
    let rows: Vec<Value> = serde_json::from_slice(payload)?;
    rows.into_iter()
        .map(|mut row| {
            let key = row["Key"].as_str().context("row without Key")?.to_string();
            let record: Record = serde_json::from_value(row["Record"].take())?;
            Ok((key, record))
        })
        .collect()
}

fn describe(record: &Record) -> String {
    format!(
        "{} held by {} at ({}, {}) [{}]",
        record.name.bold(),
        record.holder.green(),
        record.latitude,
        record.longitude,
        record.trans_id.dimmed(),
    )
}
