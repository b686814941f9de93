//! `jsonkv` CLI: parse a restricted JSON body into a hashtable store and inspect it.
//!
//! ## Usage
//!
//! ```sh
//! # Parse stdin and print the store
//! echo '{"a":1,"b":"hello","c":true}' | jsonkv parse
//!
//! # Parse a file and print the store as compact JSON
//! jsonkv parse -i body.json --json
//!
//! # Dump slot indices and overflow chains
//! jsonkv parse -i body.json --slots
//!
//! # Look up a nested value
//! jsonkv get outer.inner -i body.json
//!
//! # Show table statistics with custom limits
//! jsonkv stats -i body.json --config limits.json
//!
//! # Log parser internals
//! jsonkv -vv parse -i body.json
//! ```

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use jsonkv_core::{ParseConfig, Table};
use log::{debug, LevelFilter};
use std::io::{self, Read};

#[derive(Parser)]
#[command(
    name = "jsonkv",
    version,
    about = "Parse restricted JSON objects into a typed hashtable store"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Raise the log level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a body and print the resulting store
    Parse {
        #[command(flatten)]
        source: Source,
        /// Print compact JSON instead of the indented rendering
        #[arg(long, conflicts_with = "slots")]
        json: bool,
        /// Print one line per stored entry with its slot index
        #[arg(long)]
        slots: bool,
    },
    /// Look up a value by dotted path (e.g. `outer.inner`)
    Get {
        /// Dotted key path
        path: String,
        #[command(flatten)]
        source: Source,
    },
    /// Show key, slot, chain and depth counts for a body
    Stats {
        #[command(flatten)]
        source: Source,
    },
}

#[derive(Args)]
struct Source {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// JSON file with parser limits
    #[arg(long)]
    config: Option<String>,
}

impl Source {
    /// Load the limits, read the body and parse it.
    fn parse(&self) -> Result<Table> {
        let config = load_config(self.config.as_deref())?;
        let body = read_input(self.input.as_deref())?;
        let table = jsonkv_core::parse_with(&body, &config).context("Failed to parse body")?;
        debug!("parsed {} key(s) from {} bytes", table.len(), body.len());
        Ok(table)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Parse {
            source,
            json,
            slots,
        } => {
            let table = source.parse()?;
            let rendered = if json {
                serde_json::to_string(&table).context("Failed to serialize store")?
            } else if slots {
                jsonkv_core::format_slots(&table)
            } else {
                jsonkv_core::format(&table)
            };
            write_output(&rendered);
            jsonkv_core::dispose(table);
        }
        Commands::Get { path, source } => {
            let table = source.parse()?;
            let value = table
                .get_path(&path)
                .with_context(|| format!("key not found: {path}"))?;
            write_output(&value.to_string());
        }
        Commands::Stats { source } => {
            let table = source.parse()?;
            println!("Keys:     {}", table.len());
            println!("Primary:  {}", table.count());
            println!("Chained:  {}", table.chained());
            println!("Depth:    {}", table.depth());
        }
    }

    Ok(())
}

/// `RUST_LOG` is honoured unless `-v` was given, which wins.
fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    let level = match verbose {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    };
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.init();
}

fn load_config(path: Option<&str>) -> Result<ParseConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path))?;
            ParseConfig::from_json(&text).with_context(|| format!("Invalid config: {}", path))
        }
        None => Ok(ParseConfig::default()),
    }
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    let body = match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read file: {}", path))?
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    Ok(trim_trailing_newlines(body))
}

/// Trailing newlines are not part of the body.
fn trim_trailing_newlines(mut body: Vec<u8>) -> Vec<u8> {
    while matches!(body.last(), Some(b'\n' | b'\r')) {
        body.pop();
    }
    body
}

fn write_output(content: &str) {
    println!("{}", content);
}
