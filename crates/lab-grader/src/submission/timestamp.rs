use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

pub type Timestamp = DateTime<FixedOffset>;

/// Why one source in a resolution chain yielded nothing.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no value provided")]
    NotProvided,

    #[error("'{value}' is not an ISO-8601 timestamp")]
    Unparseable { value: String },

    #[error("unable to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid event payload {path:?}: {source}")]
    Payload {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("event payload {path:?} carries no commit timestamp")]
    NoCommitTimestamp { path: PathBuf },

    #[error("git log failed: {0}")]
    Git(String),
}

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M%:z",
];

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Accepts RFC 3339, ISO-8601 date-times with or without seconds and with an
/// extended (`+03:00`) or basic (`+0300`) offset, naive date-times (read as
/// UTC) and a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, SourceError> {
    let trimmed = raw.trim();
    let unparseable = || SourceError::Unparseable {
        value: trimmed.to_string(),
    };
    if trimmed.is_empty() {
        return Err(SourceError::NotProvided);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }

    // A trailing `Z` marks UTC; the remainder is parsed as a naive date-time.
    let (body, zulu) = match trimmed.strip_suffix('Z').or_else(|| trimmed.strip_suffix('z')) {
        Some(body) => (body, true),
        None => (trimmed, false),
    };

    if !zulu {
        if let Some(dt) = OFFSET_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(body, format).ok())
        {
            return Ok(dt);
        }
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(body, format).ok())
    {
        return Ok(Utc.from_utc_datetime(&naive).into());
    }

    if zulu {
        return Err(unparseable());
    }

    if let Ok(date) = NaiveDate::parse_from_str(body, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(unparseable)?;
        return Ok(Utc.from_utc_datetime(&midnight).into());
    }

    Err(unparseable())
}

/// Submission time in UTC, as shown in the reports.
pub fn format_utc(value: &Timestamp) -> String {
    value
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Timestamp rendered in its own offset.
pub fn format_local(value: &Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// A value together with the source that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<S> {
    pub value: Timestamp,
    pub source: S,
}

pub type Resolver<C> = fn(&C) -> Result<Timestamp, SourceError>;

/// Tries each resolver in order; the first success wins.
pub fn first_resolved<C, S>(context: &C, chain: &[(S, Resolver<C>)]) -> Option<Resolved<S>>
where
    S: Copy + Debug,
{
    chain.iter().find_map(|(source, resolve)| match resolve(context) {
        Ok(value) => Some(Resolved {
            value,
            source: *source,
        }),
        Err(err) => {
            debug!(?source, %err, "timestamp source unavailable; falling through");
            None
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampSource {
    Override,
    CiEvent,
    Git,
    Clock,
}

impl TimestampSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Override => "command line override",
            Self::CiEvent => "CI event payload",
            Self::Git => "git history",
            Self::Clock => "current time",
        }
    }
}

/// Everything the submission-time chain may consult.
#[derive(Debug, Clone)]
pub struct TimestampInputs {
    pub override_value: Option<String>,
    pub ci_event_path: Option<PathBuf>,
    pub repo_root: PathBuf,
    pub now: Timestamp,
}

impl TimestampInputs {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            override_value: None,
            ci_event_path: None,
            repo_root: repo_root.into(),
            now: Utc::now().into(),
        }
    }

    pub fn resolve(&self) -> Resolved<TimestampSource> {
        const CHAIN: [(TimestampSource, Resolver<TimestampInputs>); 3] = [
            (TimestampSource::Override, from_override),
            (TimestampSource::CiEvent, from_ci_event),
            (TimestampSource::Git, from_git),
        ];

        first_resolved(self, &CHAIN).unwrap_or(Resolved {
            value: self.now,
            source: TimestampSource::Clock,
        })
    }
}

fn from_override(inputs: &TimestampInputs) -> Result<Timestamp, SourceError> {
    let raw = inputs
        .override_value
        .as_deref()
        .ok_or(SourceError::NotProvided)?;
    parse_timestamp(raw)
}

fn from_ci_event(inputs: &TimestampInputs) -> Result<Timestamp, SourceError> {
    let path = inputs
        .ci_event_path
        .as_deref()
        .ok_or(SourceError::NotProvided)?;
    let raw = commit_timestamp_from_payload(path)?;
    parse_timestamp(&raw)
}

fn commit_timestamp_from_payload(path: &Path) -> Result<String, SourceError> {
    let body = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let payload: Value = serde_json::from_str(&body).map_err(|source| SourceError::Payload {
        path: path.to_path_buf(),
        source,
    })?;

    let last_commit = payload
        .get("commits")
        .and_then(Value::as_array)
        .and_then(|commits| commits.last())
        .and_then(|commit| commit.get("timestamp"));

    let found = [
        payload.pointer("/head_commit/timestamp"),
        payload.pointer("/workflow_run/head_commit/timestamp"),
        last_commit,
    ]
    .into_iter()
    .flatten()
    .filter_map(Value::as_str)
    .find(|value| !value.trim().is_empty())
    .map(str::to_string)
    .ok_or_else(|| SourceError::NoCommitTimestamp {
        path: path.to_path_buf(),
    });
    found
}

fn from_git(inputs: &TimestampInputs) -> Result<Timestamp, SourceError> {
    let output = Command::new("git")
        .arg("-C")
        .arg(&inputs.repo_root)
        .arg("log")
        .arg("-1")
        .arg("--pretty=format:%cI")
        .output()
        .map_err(|err| SourceError::Git(err.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SourceError::Git(stderr.trim().to_string()));
    }

    parse_timestamp(&String::from_utf8_lossy(&output.stdout))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(raw: &str) -> Timestamp {
        parse_timestamp(raw).expect("valid timestamp")
    }

    fn inputs(root: &Path) -> TimestampInputs {
        TimestampInputs {
            override_value: None,
            ci_event_path: None,
            repo_root: root.to_path_buf(),
            now: ts("2030-01-01T00:00:00Z"),
        }
    }

    #[test]
    fn parses_supported_formats() {
        assert_eq!(
            format_utc(&ts("2025-10-08T23:59:59+03:00")),
            "2025-10-08T20:59:59Z"
        );
        assert_eq!(format_utc(&ts("2025-10-08T12:00:00")), "2025-10-08T12:00:00Z");
        assert_eq!(format_utc(&ts("2025-10-08")), "2025-10-08T00:00:00Z");
        assert_eq!(
            format_local(&ts("2025-10-08T23:59:59+03:00")),
            "2025-10-08T23:59:59+03:00"
        );
        assert!(matches!(
            parse_timestamp("next tuesday"),
            Err(SourceError::Unparseable { .. })
        ));
    }

    #[test]
    fn accepts_iso_forms_without_seconds_or_with_basic_offsets() {
        assert_eq!(format_utc(&ts("2025-10-09T10:00+03:00")), "2025-10-09T07:00:00Z");
        assert_eq!(format_utc(&ts("2025-10-09T10:00")), "2025-10-09T10:00:00Z");
        assert_eq!(format_utc(&ts("2025-10-09T10:00Z")), "2025-10-09T10:00:00Z");
        assert_eq!(format_utc(&ts("2025-10-09T10:00:00+0300")), "2025-10-09T07:00:00Z");
        assert_eq!(
            format_local(&ts("2025-10-09T10:00:00+0300")),
            "2025-10-09T10:00:00+03:00"
        );
        assert_eq!(
            format_utc(&ts("2025-10-09T10:00:00.250+0300")),
            "2025-10-09T07:00:00.250Z"
        );
    }

    #[test]
    fn override_without_seconds_is_not_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut inputs = inputs(dir.path());
        inputs.override_value = Some("2025-10-09T10:00+03:00".to_string());

        let resolved = inputs.resolve();
        assert_eq!(resolved.source, TimestampSource::Override);
        assert_eq!(resolved.value, ts("2025-10-09T07:00:00Z"));
    }

    #[test]
    fn override_wins_over_every_other_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let event = dir.path().join("event.json");
        std::fs::write(&event, r#"{"head_commit":{"timestamp":"2025-10-01T00:00:00Z"}}"#)
            .expect("write event");

        let mut inputs = inputs(dir.path());
        inputs.override_value = Some("2025-10-05T10:00:00Z".to_string());
        inputs.ci_event_path = Some(event);

        let resolved = inputs.resolve();
        assert_eq!(resolved.source, TimestampSource::Override);
        assert_eq!(resolved.value, ts("2025-10-05T10:00:00Z"));
    }

    #[test]
    fn unparseable_override_falls_through_to_ci_event() {
        let dir = tempfile::tempdir().expect("tempdir");
        let event = dir.path().join("event.json");
        std::fs::write(
            &event,
            r#"{"commits":[{"timestamp":"2025-09-30T08:00:00Z"},{"timestamp":"2025-10-02T09:30:00-04:00"}]}"#,
        )
        .expect("write event");

        let mut inputs = inputs(dir.path());
        inputs.override_value = Some("soon".to_string());
        inputs.ci_event_path = Some(event);

        let resolved = inputs.resolve();
        assert_eq!(resolved.source, TimestampSource::CiEvent);
        assert_eq!(resolved.value, ts("2025-10-02T13:30:00Z"));
    }

    #[test]
    fn payload_prefers_head_commit_then_workflow_run() {
        let dir = tempfile::tempdir().expect("tempdir");
        let event = dir.path().join("event.json");
        std::fs::write(
            &event,
            r#"{"workflow_run":{"head_commit":{"timestamp":"2025-10-03T00:00:00Z"}},
                "commits":[{"timestamp":"2025-10-04T00:00:00Z"}]}"#,
        )
        .expect("write event");

        assert_eq!(
            commit_timestamp_from_payload(&event).expect("timestamp present"),
            "2025-10-03T00:00:00Z"
        );
    }

    #[test]
    fn falls_back_to_clock_outside_a_repository() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut inputs = inputs(dir.path());
        inputs.ci_event_path = Some(dir.path().join("missing.json"));

        let resolved = inputs.resolve();
        assert_eq!(resolved.source, TimestampSource::Clock);
        assert_eq!(resolved.value, inputs.now);
    }
}
