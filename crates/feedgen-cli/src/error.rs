//! CLI error types.

use feedgen::FeedError;
use feedgen_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{format}: {source}")]
    Render {
        format: feedgen::Format,
        source: FeedError,
    },
}
