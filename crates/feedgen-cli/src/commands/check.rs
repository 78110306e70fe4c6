//! `feedgen check` command implementation.

use std::path::PathBuf;

use clap::Args;
use feedgen::{Feed, Format, render};
use feedgen_config::Config;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover feedgen.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns the first configuration or rendering failure.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        if let Some(path) = &config.config_path {
            output.info(&format!("Checking {}", path.display()));
        }

        let feed = config.to_feed();
        for (format, bytes) in render_all(&feed)? {
            output.success(&format!("{format}: ok ({bytes} bytes)"));
        }

        Ok(())
    }
}

/// Render every format, returning each output size or the first failure.
fn render_all(feed: &Feed) -> Result<Vec<(Format, usize)>, CliError> {
    Format::ALL
        .into_iter()
        .map(|format| {
            tracing::debug!(%format, "Rendering");
            render(feed, format)
                .map(|text| (format, text.len()))
                .map_err(|source| CliError::Render { format, source })
        })
        .collect()
}
