pub mod config;
pub mod error;
pub mod grading;
pub mod report;
pub mod rubric;
pub mod sources;
pub mod submission;
pub mod telemetry;

pub use grading::{Grader, GradingPolicy, GradingRun};
pub use sources::{SourceSet, SourceSpec};
