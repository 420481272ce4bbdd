use crate::grading::GradingRun;
use crate::rubric::{CategoryKind, CategoryOutcome, FloorDecision, TaskOutcome};
use crate::sources::FileStatus;
use crate::submission::{format_local, format_utc, DeadlineSource, TimestampSource};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub category: CategoryKind,
    pub category_label: &'static str,
    pub earned: u32,
    pub maximum: u32,
    pub checked: usize,
    pub passed: usize,
    pub achieved: Vec<&'static str>,
    pub missed: Vec<&'static str>,
}

impl From<&CategoryOutcome> for CategoryView {
    fn from(outcome: &CategoryOutcome) -> Self {
        Self {
            category: outcome.kind,
            category_label: outcome.kind.label(),
            earned: outcome.earned,
            maximum: outcome.max_points,
            checked: outcome.checked,
            passed: outcome.passed,
            achieved: outcome.achieved.clone(),
            missed: outcome.missed.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub key: &'static str,
    pub name: &'static str,
    pub raw_score: u32,
    pub final_score: u32,
    pub maximum: u32,
    pub categories: Vec<CategoryView>,
}

impl From<&TaskOutcome> for TaskView {
    fn from(task: &TaskOutcome) -> Self {
        Self {
            key: task.key,
            name: task.name,
            raw_score: task.raw_score,
            final_score: task.final_score,
            maximum: task.maximum,
            categories: task.categories().into_iter().map(CategoryView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionView {
    pub submitted_at: String,
    pub submitted_at_source: TimestampSource,
    pub deadline: String,
    pub deadline_source: DeadlineSource,
    pub late: bool,
    pub status_label: &'static str,
    pub score: u32,
    pub maximum: u32,
}

/// Every constant the run was graded under.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyView {
    pub no_attempt_score: u32,
    pub floor: u32,
    pub max_tasks_total: u32,
    pub completeness_threshold: u32,
    pub correctness_threshold: u32,
    pub on_time_score: u32,
    pub late_score: u32,
    pub floor_decision: FloorDecision,
}

/// Machine-readable mirror of the Markdown report.
#[derive(Debug, Clone, Serialize)]
pub struct GradeReport {
    pub title: &'static str,
    pub submission: SubmissionView,
    pub files: Vec<FileStatus>,
    pub attempt_detected: bool,
    pub fully_complete: bool,
    pub tasks: Vec<TaskView>,
    pub raw_tasks_total: u32,
    pub tasks_total: u32,
    pub max_tasks_total: u32,
    pub grand_total: u32,
    pub grand_maximum: u32,
    pub policy: PolicyView,
}

impl GradeReport {
    pub fn from_run(run: &GradingRun) -> Self {
        let timing = &run.submission.timing;

        Self {
            title: run.title,
            submission: SubmissionView {
                submitted_at: format_utc(&timing.submitted_at.value),
                submitted_at_source: timing.submitted_at.source,
                deadline: format_local(&timing.deadline.value),
                deadline_source: timing.deadline.source,
                late: run.submission.late,
                status_label: run.submission.status_label(),
                score: run.submission.score,
                maximum: run.submission.maximum,
            },
            files: run.files.clone(),
            attempt_detected: run.attempt_detected,
            fully_complete: run.fully_complete,
            tasks: run.tasks.iter().map(TaskView::from).collect(),
            raw_tasks_total: run.raw_tasks_total,
            tasks_total: run.tasks_total,
            max_tasks_total: run.max_tasks_total,
            grand_total: run.grand_total(),
            grand_maximum: run.grand_maximum(),
            policy: PolicyView {
                no_attempt_score: run.policy.floor.no_attempt_score,
                floor: run.policy.floor.floor,
                max_tasks_total: run.max_tasks_total,
                completeness_threshold: run.policy.completion.completeness,
                correctness_threshold: run.policy.completion.correctness,
                on_time_score: run.policy.submission.on_time_score,
                late_score: run.policy.submission.late_score,
                floor_decision: run.floor_decision,
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
