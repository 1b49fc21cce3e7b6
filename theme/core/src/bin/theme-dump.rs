//! Theme Dump
//!
//! Loads the configured palette and prints every resolved theme as one JSON
//! object on stdout, for display layers that consume JSON.
//!
//! # Usage
//!
//! ```bash
//! # Uses ~/.config/wal-theme/config.toml and ~/.cache/wal/colors.json
//! theme-dump
//!
//! # Point at another cache and log what happens
//! WAL_THEME_CACHE_FILE=/tmp/colors.json RUST_LOG=theme_core=debug theme-dump
//! ```

use anyhow::{bail, Context};
use serde_json::json;
use theme_core::{load_config, ThemeContext};
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let config = load_config().context("Failed to load configuration")?;
    info!(
        cache_file = %config.cache_file.display(),
        source = %config.source(),
        "Configuration loaded"
    );

    let mut ctx = ThemeContext::new(config).context("Invalid configuration")?;
    if !ctx.reload() {
        bail!(
            "No palette available at {}",
            ctx.config().cache_file.display()
        );
    }

    let output = json!({
        "palette": ctx.base_palette(),
        "syntax": ctx.syntax_theme(),
        "state_cursors": ctx.state_cursors(),
        "evil_cursors": ctx.evil_cursors(),
    });

    let rendered = serde_json::to_string_pretty(&output)?;
    println!("{rendered}");
    Ok(())
}
