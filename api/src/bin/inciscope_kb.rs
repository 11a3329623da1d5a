//! Assembles the ingredient knowledge base file from one or more source datasets.
//!
//! Sources are merged in the order given; the first spelling of a key wins.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use inciscope_core::infrastructure::knowledge_base::{assemble, write_dataset};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "inciscope-kb", version, about = "Build the ingredient knowledge base")]
struct KbArgs {
    /// Source dataset, highest priority first. Repeatable.
    #[arg(long = "source", required = true)]
    sources: Vec<PathBuf>,

    #[arg(long, default_value = "data/ingredients_db.json")]
    output: PathBuf,

    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    log_filter: String,
}

fn main() -> Result<(), anyhow::Error> {
    let args = KbArgs::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&args.log_filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let dataset = assemble(&args.sources).context("failed to assemble knowledge base")?;

    if dataset.duplicates > 0 {
        warn!(
            duplicates = dataset.duplicates,
            "later sources repeated keys that were kept from earlier ones"
        );
    }

    write_dataset(&args.output, &dataset.entries)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(
        entries = dataset.entries.len(),
        output = %args.output.display(),
        "knowledge base written"
    );

    Ok(())
}
