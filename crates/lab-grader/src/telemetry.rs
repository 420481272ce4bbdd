use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    InvalidLevel { directive: String, source: ParseError },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidLevel { directive, .. } => {
                write!(f, "GRADER_LOG_LEVEL '{}' is not a valid log filter", directive)
            }
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "log subscriber already installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidLevel { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(&**err),
        }
    }
}

/// `RUST_LOG` wins when it parses; otherwise the configured level applies.
pub fn grader_filter(
    rust_log: Option<&str>,
    config: &TelemetryConfig,
) -> Result<EnvFilter, TelemetryError> {
    if let Some(filter) = rust_log.and_then(|raw| EnvFilter::try_new(raw).ok()) {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::InvalidLevel {
        directive: config.log_level.clone(),
        source,
    })
}

/// Installs the global subscriber on stderr; stdout is reserved for the
/// rendered report.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = grader_filter(rust_log.as_deref(), config)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(raw: &str) -> TelemetryConfig {
        TelemetryConfig {
            log_level: raw.to_string(),
        }
    }

    #[test]
    fn configured_level_is_used_without_rust_log() {
        assert!(grader_filter(None, &level("debug")).is_ok());
    }

    #[test]
    fn valid_rust_log_masks_a_bad_configured_level() {
        assert!(grader_filter(Some("lab_grader=trace"), &level("lab_grader=notalevel")).is_ok());
    }

    #[test]
    fn unparseable_level_is_reported() {
        match grader_filter(Some("grader=bogus"), &level("lab_grader=notalevel")) {
            Err(TelemetryError::InvalidLevel { directive, .. }) => {
                assert_eq!(directive, "lab_grader=notalevel")
            }
            other => panic!("expected invalid level, got {other:?}"),
        }
    }
}
