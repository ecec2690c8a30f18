//! radixmap CLI - Command line interface for radixmap
//!
//! Each invocation loads a JSON mapping document into a radix tree, runs one
//! operation against it, and writes the document back if it changed.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use radixmap::logging::{init_logging, LoggingConfig};
use radixmap::{mapping, Prefix, RadixTree, RouteTable};
use serde::Serialize;
use serde_json::Value;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "radixmap")]
#[command(about = "Query and edit a JSON key-value mapping through a radix tree")]
#[command(version)]
struct Cli {
    /// Path to the mapping file
    #[arg(short, long, default_value = "radix.json")]
    file: PathBuf,

    /// Output format (json or text)
    #[arg(short = 'o', long, default_value = "json")]
    format: OutputFormat,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty mapping file
    Init,

    /// Insert or overwrite a key
    Insert {
        /// The key
        key: String,
        /// The value, parsed as JSON when possible, otherwise stored as a string
        value: String,
    },

    /// Delete a key
    Delete {
        /// The key
        key: String,
    },

    /// Get the value of a key
    Get {
        /// The key
        key: String,
    },

    /// Find the longest stored key that is a prefix of the input
    Match {
        /// The input to match against
        key: String,
    },

    /// List every entry under a prefix
    Collect {
        /// The prefix
        prefix: String,
        /// Only print keys
        #[arg(short, long)]
        keys_only: bool,
    },

    /// Show the smallest key
    Top,

    /// Show the largest key
    Bottom,

    /// List entries in key order
    List {
        /// Maximum number of entries to return
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the number of keys
    Len,

    /// Resolve an IPv4 address against keys read as CIDR prefixes
    Route {
        /// The destination address
        address: String,
    },
}

#[derive(Serialize)]
struct Entry<'a> {
    key: &'a str,
    value: &'a Value,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig::from_verbosity(cli.verbose));

    match cli.command {
        Commands::Init => {
            if cli.file.exists() {
                bail!("{} already exists", cli.file.display());
            }
            mapping::save_file(&RadixTree::<Value>::new(), &cli.file)?;
            info!(path = %cli.file.display(), "created mapping");
            output(
                cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "message": format!("Created mapping at {}", cli.file.display())
                }),
            )?;
        }

        Commands::Insert { key, value } => {
            let mut tree = open_tree(&cli.file)?;
            let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
            let inserted = tree.insert(&key, value);
            mapping::save_file(&tree, &cli.file)?;
            info!(key = %key, inserted, "stored key");
            output(
                cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "key": key,
                    "inserted": inserted,
                    "len": tree.len()
                }),
            )?;
        }

        Commands::Delete { key } => {
            let mut tree = open_tree(&cli.file)?;
            match tree.remove(&key) {
                Some(value) => {
                    mapping::save_file(&tree, &cli.file)?;
                    info!(key = %key, "deleted key");
                    output(
                        cli.format,
                        &serde_json::json!({
                            "status": "ok",
                            "key": key,
                            "value": value,
                            "len": tree.len()
                        }),
                    )?;
                }
                None => not_found(cli.format, &key)?,
            }
        }

        Commands::Get { key } => {
            let tree = open_tree(&cli.file)?;
            match tree.get(&key) {
                Some(value) => output(
                    cli.format,
                    &serde_json::json!({
                        "status": "ok",
                        "key": key,
                        "value": value
                    }),
                )?,
                None => not_found(cli.format, &key)?,
            }
        }

        Commands::Match { key } => {
            let tree = open_tree(&cli.file)?;
            match tree.longest_match(&key) {
                Some((matched, value)) => output(
                    cli.format,
                    &serde_json::json!({
                        "status": "ok",
                        "input": key,
                        "key": matched,
                        "value": value
                    }),
                )?,
                None => not_found(cli.format, &key)?,
            }
        }

        Commands::Collect { prefix, keys_only } => {
            let tree = open_tree(&cli.file)?;
            let body = if keys_only {
                let keys = tree.collect_keys(&prefix);
                serde_json::json!({
                    "status": "ok",
                    "prefix": prefix,
                    "count": keys.len(),
                    "keys": keys
                })
            } else {
                let entries: Vec<Entry<'_>> = tree
                    .collect(&prefix)
                    .into_iter()
                    .map(|(key, value)| Entry { key, value })
                    .collect();
                serde_json::json!({
                    "status": "ok",
                    "prefix": prefix,
                    "count": entries.len(),
                    "entries": entries
                })
            };
            output(cli.format, &body)?;
        }

        Commands::Top => {
            let tree = open_tree(&cli.file)?;
            show_entry(cli.format, tree.top(), "top")?;
        }

        Commands::Bottom => {
            let tree = open_tree(&cli.file)?;
            show_entry(cli.format, tree.bottom(), "bottom")?;
        }

        Commands::List { limit } => {
            let tree = open_tree(&cli.file)?;
            let mut entries = Vec::new();
            tree.walk(|key, value| {
                if limit.is_some_and(|n| entries.len() >= n) {
                    return true;
                }
                entries.push(Entry { key, value });
                false
            });
            output(
                cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "count": entries.len(),
                    "total": tree.len(),
                    "entries": entries
                }),
            )?;
        }

        Commands::Len => {
            let tree = open_tree(&cli.file)?;
            output(
                cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "len": tree.len()
                }),
            )?;
        }

        Commands::Route { address } => {
            let tree = open_tree(&cli.file)?;
            let addr: Ipv4Addr = address
                .parse()
                .with_context(|| format!("Invalid address: {address}"))?;

            let mut table = RouteTable::new();
            for (key, value) in &tree {
                match key.parse::<Prefix>() {
                    Ok(prefix) => {
                        if !table.insert(prefix, value) {
                            warn!(
                                key = %key,
                                prefix = %prefix,
                                "key overrides an earlier route for the same prefix"
                            );
                        }
                    }
                    Err(err) => warn!(key = %key, error = %err, "skipping non-CIDR key"),
                }
            }

            match table.lookup(addr) {
                Some((prefix, value)) => output(
                    cli.format,
                    &serde_json::json!({
                        "status": "ok",
                        "address": address,
                        "prefix": prefix.to_string(),
                        "value": value
                    }),
                )?,
                None => not_found(cli.format, &address)?,
            }
        }
    }

    Ok(())
}

fn open_tree(path: &Path) -> anyhow::Result<RadixTree<Value>> {
    let tree = mapping::load_file(path).with_context(|| {
        format!(
            "Cannot open mapping {} (run `radixmap init` to create it)",
            path.display()
        )
    })?;
    Ok(tree)
}

fn output(format: OutputFormat, value: &Value) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        OutputFormat::Text => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

fn show_entry(
    format: OutputFormat,
    found: Option<(&str, &Value)>,
    what: &str,
) -> anyhow::Result<()> {
    match found {
        Some((key, value)) => output(
            format,
            &serde_json::json!({
                "status": "ok",
                "key": key,
                "value": value
            }),
        ),
        None => not_found(format, what),
    }
}

fn not_found(format: OutputFormat, key: &str) -> anyhow::Result<()> {
    output(
        format,
        &serde_json::json!({
            "status": "not_found",
            "key": key
        }),
    )?;
    std::process::exit(1);
}
