//! feedgen CLI - syndication feed generator.
//!
//! Provides commands for:
//! - `render`: Render the configured feed as RSS 2.0, Atom 1.0 or JSON Feed
//! - `check`: Validate the configuration by rendering every format

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, RenderArgs};
use output::Output;

/// feedgen - syndication feed generator.
#[derive(Parser)]
#[command(name = "feedgen", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the configured feed.
    Render(RenderArgs),
    /// Check that the configured feed renders in every format.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_args() {
        let cli = Cli::try_parse_from([
            "feedgen", "render", "--format", "atom1", "--output", "feed.atom", "-v",
        ])
        .unwrap();
        assert!(matches!(&cli.command, Commands::Render(args) if args.verbose));
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        let err = Cli::try_parse_from(["feedgen", "render", "--format", "rdf"])
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(err.contains("rdf"), "{err}");
    }

    #[test]
    fn test_parse_check_args() {
        let cli = Cli::try_parse_from(["feedgen", "check", "--config", "site/feedgen.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::Check(_)));
    }
}
