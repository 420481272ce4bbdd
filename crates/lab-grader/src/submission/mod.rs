//! Submission timeliness: resolve when the work was submitted, resolve the
//! deadline, and score the submission as on time or late.

mod timestamp;

pub use timestamp::{
    first_resolved, format_local, format_utc, parse_timestamp, Resolved, Resolver, SourceError,
    Timestamp, TimestampInputs, TimestampSource,
};

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEFAULT_DEADLINE: &str = "2025-10-08T23:59:59+03:00";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineSource {
    Env,
    Config,
    Default,
}

/// Deadline candidates in precedence order: environment, config, built-in.
#[derive(Debug, Clone, Default)]
pub struct DeadlineInputs {
    pub env_value: Option<String>,
    pub config_value: Option<String>,
}

impl DeadlineInputs {
    pub fn resolve(&self) -> Resolved<DeadlineSource> {
        const CHAIN: [(DeadlineSource, Resolver<DeadlineInputs>); 3] = [
            (DeadlineSource::Env, from_env),
            (DeadlineSource::Config, from_config),
            (DeadlineSource::Default, from_default),
        ];

        first_resolved(self, &CHAIN).unwrap_or(Resolved {
            value: DateTime::<Utc>::MAX_UTC.into(),
            source: DeadlineSource::Default,
        })
    }
}

fn from_env(inputs: &DeadlineInputs) -> Result<Timestamp, SourceError> {
    parse_timestamp(inputs.env_value.as_deref().ok_or(SourceError::NotProvided)?)
}

fn from_config(inputs: &DeadlineInputs) -> Result<Timestamp, SourceError> {
    parse_timestamp(inputs.config_value.as_deref().ok_or(SourceError::NotProvided)?)
}

fn from_default(_: &DeadlineInputs) -> Result<Timestamp, SourceError> {
    parse_timestamp(DEFAULT_DEADLINE)
}

/// Resolved submission time and deadline for one grading run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTiming {
    pub submitted_at: Resolved<TimestampSource>,
    pub deadline: Resolved<DeadlineSource>,
}

impl SubmissionTiming {
    pub fn new(submitted_at: Resolved<TimestampSource>, deadline: Resolved<DeadlineSource>) -> Self {
        Self {
            submitted_at,
            deadline,
        }
    }

    pub fn is_late(&self) -> bool {
        self.submitted_at.value > self.deadline.value
    }
}

/// Two-valued submission score: no partial credit for degrees of lateness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmissionPolicy {
    pub on_time_score: u32,
    pub late_score: u32,
}

impl SubmissionPolicy {
    pub const fn standard() -> Self {
        Self {
            on_time_score: 20,
            late_score: 10,
        }
    }

    pub fn maximum(&self) -> u32 {
        self.on_time_score.max(self.late_score)
    }

    pub fn evaluate(&self, timing: &SubmissionTiming) -> SubmissionOutcome {
        let late = timing.is_late();
        SubmissionOutcome {
            timing: *timing,
            late,
            score: if late {
                self.late_score
            } else {
                self.on_time_score
            },
            maximum: self.maximum(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub timing: SubmissionTiming,
    pub late: bool,
    pub score: u32,
    pub maximum: u32,
}

impl SubmissionOutcome {
    pub const fn status_label(&self) -> &'static str {
        if self.late {
            "Late"
        } else {
            "On time"
        }
    }
}
