use crate::rubric::{
    AttemptDetector, CompletionThreshold, FloorDecision, FloorPolicy, Rubric, TaskOutcome,
    TaskScore,
};
use crate::sources::{FileStatus, SourceSet};
use crate::submission::{SubmissionOutcome, SubmissionPolicy, SubmissionTiming};
use serde::Serialize;
use tracing::info;

/// Global policy constants applied to every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradingPolicy {
    pub floor: FloorPolicy,
    pub completion: CompletionThreshold,
    pub submission: SubmissionPolicy,
}

impl GradingPolicy {
    /// 0 for no attempt, at least 60 of 80 for any attempt, raw scores once
    /// every task reaches 7/8 completeness and 5/6 correctness.
    pub const fn standard() -> Self {
        Self {
            floor: FloorPolicy {
                floor: 60,
                no_attempt_score: 0,
            },
            completion: CompletionThreshold {
                completeness: 7,
                correctness: 5,
            },
            submission: SubmissionPolicy::standard(),
        }
    }
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Stateless grader: identical inputs always produce identical runs.
#[derive(Debug, Clone)]
pub struct Grader {
    rubric: Rubric,
    detector: AttemptDetector,
    policy: GradingPolicy,
}

impl Grader {
    pub fn new(rubric: Rubric, detector: AttemptDetector, policy: GradingPolicy) -> Self {
        Self {
            rubric,
            detector,
            policy,
        }
    }

    pub fn study_buddy() -> Self {
        Self::new(
            Rubric::study_buddy(),
            AttemptDetector::standard(),
            GradingPolicy::standard(),
        )
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    pub fn detector(&self) -> &AttemptDetector {
        &self.detector
    }

    pub fn policy(&self) -> &GradingPolicy {
        &self.policy
    }

    pub fn grade(&self, sources: &SourceSet, timing: SubmissionTiming) -> GradingRun {
        let mut tasks = self.rubric.evaluate(sources);
        let attempt_detected = self.detector.detect(sources);
        let fully_complete = tasks
            .iter()
            .all(|task| task.meets(self.policy.completion));
        let raw_tasks_total: u32 = tasks.iter().map(|task| task.raw_score).sum();

        let scores: Vec<TaskScore> = tasks
            .iter()
            .map(|task| TaskScore::new(task.raw_score, task.maximum))
            .collect();
        let floor = self
            .policy
            .floor
            .apply(&scores, attempt_detected, fully_complete);
        for (task, score) in tasks.iter_mut().zip(&floor.scores) {
            task.final_score = *score;
        }
        let tasks_total = floor.total();

        let submission = self.policy.submission.evaluate(&timing);

        info!(
            attempt_detected,
            fully_complete,
            raw_tasks_total,
            tasks_total,
            decision = floor.decision.label(),
            submission_score = submission.score,
            late = submission.late,
            "graded submission"
        );

        GradingRun {
            title: self.rubric.title,
            files: sources.statuses(),
            tasks,
            attempt_detected,
            fully_complete,
            raw_tasks_total,
            tasks_total,
            max_tasks_total: self.rubric.maximum(),
            floor_decision: floor.decision,
            submission,
            policy: self.policy,
        }
    }
}

/// Result of one grading invocation; consumed read-only by the reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradingRun {
    pub title: &'static str,
    pub files: Vec<FileStatus>,
    pub tasks: Vec<TaskOutcome>,
    pub attempt_detected: bool,
    pub fully_complete: bool,
    pub raw_tasks_total: u32,
    pub tasks_total: u32,
    pub max_tasks_total: u32,
    pub floor_decision: FloorDecision,
    pub submission: SubmissionOutcome,
    pub policy: GradingPolicy,
}

impl GradingRun {
    pub fn grand_total(&self) -> u32 {
        self.tasks_total + self.submission.score
    }

    pub fn grand_maximum(&self) -> u32 {
        self.max_tasks_total + self.submission.maximum
    }
}
