//! memo - drive a memocache from a command script

mod command;
mod handler;
mod reply;
mod script;

use anyhow::{Context, Result};
use clap::Parser;
use memocache::{CacheConfig, SharedCache, DEFAULT_CAPACITY};
use memocore::DEFAULT_MIN_CAPACITY;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::info;

use crate::handler::CommandHandler;
use crate::script::{run_script, DEMO_CAPACITY, DEMO_SCRIPT};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of entries)
    #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Eviction policy
    #[arg(short, long, default_value = "LRU")]
    policy: String,

    /// Smallest capacity accepted
    #[arg(long, default_value_t = DEFAULT_MIN_CAPACITY)]
    min_capacity: usize,

    /// Command script to run (reads stdin when omitted)
    #[arg(short, long, conflicts_with = "demo")]
    script: Option<PathBuf>,

    /// Run the built-in walkthrough on a capacity-3 cache
    #[arg(long)]
    demo: bool,

    /// Render INFO as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so replies on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let capacity = if args.demo { DEMO_CAPACITY } else { args.capacity };
    let config = CacheConfig::new(capacity)
        .policy_name(&args.policy)?
        .min_capacity(args.min_capacity);
    let cache = SharedCache::with_config(config)?;

    info!(
        "memo v{} ready: policy {}, capacity {}",
        env!("CARGO_PKG_VERSION"),
        config.policy,
        capacity
    );

    let handler = CommandHandler::new(cache, args.json);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = if args.demo {
        run_script(&handler, DEMO_SCRIPT.as_bytes(), &mut out, true)?
    } else if let Some(path) = &args.script {
        let file = File::open(path)
            .with_context(|| format!("failed to open script {}", path.display()))?;
        run_script(&handler, BufReader::new(file), &mut out, false)?
    } else {
        run_script(&handler, io::stdin().lock(), &mut out, false)?
    };

    info!(
        "ran {} commands ({} errors)",
        summary.commands, summary.errors
    );

    Ok(())
}
