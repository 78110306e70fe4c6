//! Configuration management for feedgen.
//!
//! Parses `feedgen.toml` files with serde and discovers them in the current
//! directory or its parents. The `[feed]` table describes the feed itself and
//! can be turned into a [`Feed`] with [`FeedConfig::to_feed`].
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! URL-bearing feed options support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `feed.id`
//! - `feed.link`
//! - `feed.feed`
//! - `feed.feed_links.rss`, `feed.feed_links.atom`, `feed.feed_links.json`
//! - `feed.hub`
//! - `feed.image`
//! - `feed.favicon`
//! - `feed.docs`

mod expand;

use std::path::{Path, PathBuf};

use feedgen::{Author, Extension, Feed, FeedOptions, Format, Item};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output format.
    pub format: Option<Format>,
    /// Override output path.
    pub output: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "feedgen.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Output configuration.
    #[serde(default)]
    pub output: OutputConfig,
    /// Feed description.
    pub feed: FeedConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Output configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format to render.
    pub format: Format,
    /// Destination file. Relative paths resolve against the config file's
    /// directory; `None` writes to stdout.
    pub path: Option<PathBuf>,
}

/// Feed contents as declared in `[feed]`.
#[derive(Debug, Deserialize)]
pub struct FeedConfig {
    /// Feed options (`id`, `title`, `link`, ...).
    #[serde(flatten)]
    pub options: FeedOptions,
    /// Feed category names.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Feed items, in output order.
    #[serde(default)]
    pub items: Vec<Item>,
    /// Feed contributors.
    #[serde(default)]
    pub contributors: Vec<Author>,
    /// Feed-level extensions.
    #[serde(default)]
    pub extensions: Vec<Extension>,
}

impl FeedConfig {
    /// Build a feed, appending everything in declaration order.
    #[must_use]
    pub fn to_feed(&self) -> Feed {
        let mut feed = Feed::new(self.options.clone());
        for category in &self.categories {
            feed.add_category(category.clone());
        }
        for contributor in &self.contributors {
            feed.add_contributor(contributor.clone());
        }
        for extension in &self.extensions {
            feed.add_extension(extension.clone());
        }
        for item in &self.items {
            feed.add_item(item.clone());
        }
        feed
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`feed.link`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field, when set, to use http:// or https:// scheme.
fn require_http_url(url: Option<&str>, field: &str) -> Result<(), ConfigError> {
    let Some(url) = url else {
        return Ok(());
    };
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `feedgen.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if no config file is found or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => path.to_path_buf(),
            None => Self::discover_config().ok_or_else(|| {
                let cwd = std::env::current_dir().unwrap_or_default();
                ConfigError::NotFound(cwd.join(CONFIG_FILENAME))
            })?,
        };

        let mut config = Self::load_from_file(&path)?;

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Parse configuration from a TOML string.
    ///
    /// Expands environment variables and validates, but resolves no paths.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(format) = settings.format {
            self.output.format = format;
        }
        if let Some(output) = &settings.output {
            self.output.path = Some(output.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Discovered config file");
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!(path = %path.display(), "Loading config");

        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Build the configured feed.
    #[must_use]
    pub fn to_feed(&self) -> Feed {
        self.feed.to_feed()
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let options = &self.feed.options;
        require_non_empty(&options.id, "feed.id")?;
        require_non_empty(&options.title, "feed.title")?;

        let urls = [
            (options.link.as_deref(), "feed.link"),
            (options.feed.as_deref(), "feed.feed"),
            (options.feed_links.rss.as_deref(), "feed.feed_links.rss"),
            (options.feed_links.atom.as_deref(), "feed.feed_links.atom"),
            (options.feed_links.json.as_deref(), "feed.feed_links.json"),
            (options.hub.as_deref(), "feed.hub"),
            (options.image.as_deref(), "feed.image"),
            (options.favicon.as_deref(), "feed.favicon"),
            (options.docs.as_deref(), "feed.docs"),
        ];
        for (url, field) in urls {
            require_http_url(url, field)?;
        }

        for (index, item) in self.feed.items.iter().enumerate() {
            require_http_url(item.link.as_deref(), &format!("feed.items[{index}].link"))?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let options = &mut self.feed.options;
        options.id = expand::expand_env(&options.id, "feed.id")?;
        expand::expand_opt(&mut options.link, "feed.link")?;
        expand::expand_opt(&mut options.feed, "feed.feed")?;
        expand::expand_opt(&mut options.feed_links.rss, "feed.feed_links.rss")?;
        expand::expand_opt(&mut options.feed_links.atom, "feed.feed_links.atom")?;
        expand::expand_opt(&mut options.feed_links.json, "feed.feed_links.json")?;
        expand::expand_opt(&mut options.hub, "feed.hub")?;
        expand::expand_opt(&mut options.image, "feed.image")?;
        expand::expand_opt(&mut options.favicon, "feed.favicon")?;
        expand::expand_opt(&mut options.docs, "feed.docs")?;
        Ok(())
    }

    /// Resolve the output path relative to the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        if let Some(path) = &self.output.path {
            self.output.path = Some(config_dir.join(path));
        }
    }
}
