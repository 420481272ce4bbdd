use serde_yaml::Value;
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default name of the grading configuration document under the root.
pub const DEFAULT_CONFIG_FILE: &str = "grading.config.yml";

/// Process-level settings read from the environment (and `.env`).
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub telemetry: TelemetryConfig,
    /// `DUE_DATE`: outranks the configured deadline.
    pub deadline_override: Option<String>,
    /// `GITHUB_EVENT_PATH`: CI event payload carrying commit timestamps.
    pub ci_event_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        let log_level = env::var("GRADER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            telemetry: TelemetryConfig { log_level },
            deadline_override: non_empty_var("DUE_DATE"),
            ci_event_path: non_empty_var("GITHUB_EVENT_PATH").map(PathBuf::from),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Flat key/value grading document, e.g. `deadline: 2025-10-08T23:59:59+03:00`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradingFile {
    entries: BTreeMap<String, Value>,
}

impl GradingFile {
    /// Reads the document, falling back to an empty configuration when the
    /// file is missing or malformed.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(file) => file,
            Err(ConfigError::Missing { .. }) => {
                debug!(path = %path.display(), "no grading config; using defaults");
                Self::default()
            }
            Err(err) => {
                warn!(%err, "ignoring grading config; using defaults");
                Self::default()
            }
        }
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::Missing {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        Self::parse(&raw).map_err(|source| ConfigError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, serde_yaml::Error> {
        let entries: Option<BTreeMap<String, Value>> = serde_yaml::from_str(raw)?;
        Ok(Self {
            entries: entries.unwrap_or_default(),
        })
    }

    /// Scalar value for `key` rendered as text; nested values are ignored.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match self.entries.get(key)? {
            Value::String(value) => value.trim().to_string(),
            Value::Number(value) => value.to_string(),
            Value::Bool(value) => value.to_string(),
            _ => return None,
        };
        Some(value).filter(|value| !value.is_empty())
    }

    pub fn deadline(&self) -> Option<String> {
        self.get("deadline")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing {
        path: PathBuf,
    },
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Malformed {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing { path } => {
                write!(f, "grading config {} does not exist", path.display())
            }
            ConfigError::Io { path, .. } => {
                write!(f, "unable to read grading config {}", path.display())
            }
            ConfigError::Malformed { path, .. } => {
                write!(f, "grading config {} is not a flat key/value document", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Missing { .. } => None,
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Malformed { source, .. } => Some(source),
        }
    }
}
