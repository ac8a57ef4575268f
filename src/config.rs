use crate::error::{KeypluckError, KeypluckResult};
use crate::extract::Field;
use crate::finder::{SearchOptions, Traversal, ValuePolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default cap on input size (1 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 1024 * 1024;

pub const DEFAULT_FETCH_TIMEOUT_SECONDS: u64 = 10;

/// Where the example document comes from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExampleSource {
    /// The document compiled into the binary
    #[default]
    Bundled,
    /// A local file
    Path(PathBuf),
    /// An HTTP(S) URL
    Url(url::Url),
}

impl ExampleSource {
    /// Parse a config value: `bundled`, an `http(s)://` URL, or a path.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("bundled") {
            return ExampleSource::Bundled;
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            if let Ok(url) = url::Url::parse(trimmed) {
                return ExampleSource::Url(url);
            }
        }
        ExampleSource::Path(PathBuf::from(trimmed))
    }

    pub fn describe(&self) -> String {
        match self {
            ExampleSource::Bundled => "bundled".to_string(),
            ExampleSource::Path(path) => path.display().to_string(),
            ExampleSource::Url(url) => url.to_string(),
        }
    }
}

impl Serialize for ExampleSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.describe())
    }
}

impl<'de> Deserialize<'de> for ExampleSource {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(ExampleSource::parse(&value))
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fields to extract, in display order
    pub fields: Vec<Field>,

    /// Descend into arrays while searching
    pub search_arrays: bool,

    /// Count `null`, `false`, `0` and `""` as a match
    pub accept_empty_values: bool,

    /// Reject inputs larger than this many bytes
    pub max_input_bytes: u64,

    /// Example document loaded by Ctrl+E / `extract --example`
    pub example: ExampleSource,

    /// Log file for interactive mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// How long the "Copied!" badge stays visible
    pub copy_badge_seconds: u64,

    /// Give up on a URL example after this many seconds
    pub fetch_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fields: Field::ALL.to_vec(),
            search_arrays: false,
            accept_empty_values: false,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            example: ExampleSource::Bundled,
            log_file: None,
            copy_badge_seconds: 2,
            fetch_timeout_seconds: DEFAULT_FETCH_TIMEOUT_SECONDS,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/keypluck/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("keypluck").join("config.toml"))
    }

    /// `<data dir>/keypluck/keypluck.log`
    pub fn default_log_path() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("keypluck"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keypluck.log")
    }

    /// Load configuration from file, falling back to defaults when it does not exist
    pub async fn load_from_file(path: &Path) -> KeypluckResult<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| KeypluckError::config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| KeypluckError::config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &Path) -> KeypluckResult<()> {
        self.validate()?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| KeypluckError::config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| KeypluckError::config(format!("Failed to create config directory: {}", e)))?;
        }

        tokio::fs::write(path, content)
            .await
            .map_err(|e| KeypluckError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> KeypluckResult<()> {
        if self.fields.is_empty() {
            return Err(KeypluckError::config("At least one field must be configured"));
        }

        if self.max_input_bytes == 0 {
            return Err(KeypluckError::config("max_input_bytes must be greater than 0"));
        }

        if self.fetch_timeout_seconds == 0 {
            return Err(KeypluckError::config("fetch_timeout_seconds must be greater than 0"));
        }

        Ok(())
    }

    pub fn search_options(&self) -> SearchOptions {
        let traversal = if self.search_arrays {
            Traversal::ObjectsAndArrays
        } else {
            Traversal::ObjectsOnly
        };
        let values = if self.accept_empty_values {
            ValuePolicy::AnyValue
        } else {
            ValuePolicy::NonEmpty
        };
        SearchOptions::new(traversal, values)
    }

    pub fn copy_badge_duration(&self) -> Duration {
        Duration::from_secs(self.copy_badge_seconds)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }
}
