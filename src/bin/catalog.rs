//! Catalog binary - prints the built-in language table as JSON
//!
//! Usage:
//!   cargo run --bin catalog                # Pretty-printed JSON to stdout
//!   cargo run --bin catalog -- out.json    # Write to a file instead

use anyhow::{Context, Result};
use geo_quiz::catalog::LanguageCatalog;
use std::fs;
use tracing::info;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("catalog=info".parse()?),
        )
        .init();

    let catalog = LanguageCatalog::get();
    let json = serde_json::to_string_pretty(catalog.languages())
        .context("Failed to serialize language catalog")?;

    match std::env::args().nth(1) {
        Some(output_path) => {
            fs::write(&output_path, json)
                .with_context(|| format!("Failed to write catalog to {}", output_path))?;
            info!("✓ Exported {} languages to {}", catalog.len(), output_path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
