//! `feedgen render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use feedgen::{Format, render};
use feedgen_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to configuration file (default: auto-discover feedgen.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format: rss2, atom1 or json1 (overrides config).
    #[arg(short, long)]
    format: Option<Format>,

    /// Output file or directory (overrides config; default: stdout). A
    /// directory receives `feed.<rss|atom|json>`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, rendering or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            format: self.format,
            output: self.output,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let format = config.output.format;

        let feed = config.to_feed();
        tracing::info!(%format, items = feed.items().len(), "Rendering feed");
        let text = render(&feed, format).map_err(|source| CliError::Render { format, source })?;

        match &config.output.path {
            Some(path) => {
                let path = output_file(path, format);
                write_file(&path, &text)?;
                output.success(&format!("Wrote {format} feed to {}", path.display()));
            }
            None => write_stdout(&mut std::io::stdout().lock(), &text)?,
        }

        Ok(())
    }
}

/// Destination file for `path`: an existing directory gets the conventional
/// file name for the format.
fn output_file(path: &Path, format: Format) -> PathBuf {
    if path.is_dir() {
        path.join(format!("feed.{}", format.extension()))
    } else {
        path.to_path_buf()
    }
}

/// Write rendered text to a file, creating parent directories.
fn write_file(path: &Path, text: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "Feed written");
    Ok(())
}

/// Write rendered text followed by a newline.
fn write_stdout(out: &mut impl Write, text: &str) -> Result<(), CliError> {
    out.write_all(text.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("public/nested/feed.xml");
        write_file(&path, "<rss/>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<rss/>");
    }

    #[test]
    fn test_write_file_bare_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.json");
        write_file(&path, "{}").unwrap();
        write_file(&path, "[]").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_output_file_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            output_file(dir.path(), Format::Atom1),
            dir.path().join("feed.atom")
        );
        assert_eq!(
            output_file(dir.path(), Format::Json1),
            dir.path().join("feed.json")
        );
    }

    #[test]
    fn test_output_file_keeps_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("public/rss.xml");
        assert_eq!(output_file(&path, Format::Rss2), path);
    }

    #[test]
    fn test_write_stdout_appends_newline() {
        let mut buf = Vec::new();
        write_stdout(&mut buf, "<feed/>").unwrap();
        assert_eq!(buf, b"<feed/>\n");
    }
}
