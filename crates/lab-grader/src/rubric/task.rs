use super::category::{Category, CategoryKind, CategoryOutcome};
use crate::sources::SourceSet;
use serde::Serialize;

/// One graded unit of work: exactly three categories.
#[derive(Debug, Clone)]
pub struct TaskRubric {
    pub key: &'static str,
    pub name: &'static str,
    pub completeness: Category,
    pub correctness: Category,
    pub quality: Category,
}

impl TaskRubric {
    pub fn maximum(&self) -> u32 {
        self.completeness.max_points + self.correctness.max_points + self.quality.max_points
    }

    pub fn category(&self, kind: CategoryKind) -> &Category {
        match kind {
            CategoryKind::Completeness => &self.completeness,
            CategoryKind::Correctness => &self.correctness,
            CategoryKind::CodeQuality => &self.quality,
        }
    }

    /// Categories in report order.
    pub fn categories(&self) -> [&Category; 3] {
        CategoryKind::ordered().map(|kind| self.category(kind))
    }

    pub fn evaluate(&self, corpus: &SourceSet) -> TaskOutcome {
        let completeness = self.completeness.evaluate(corpus);
        let correctness = self.correctness.evaluate(corpus);
        let quality = self.quality.evaluate(corpus);
        let raw_score = completeness.earned + correctness.earned + quality.earned;

        TaskOutcome {
            key: self.key,
            name: self.name,
            maximum: self.maximum(),
            raw_score,
            final_score: raw_score,
            completeness,
            correctness,
            quality,
        }
    }
}

/// Per-task minimums that make a submission "fully complete".
///
/// Code quality is not part of the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionThreshold {
    pub completeness: u32,
    pub correctness: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub key: &'static str,
    pub name: &'static str,
    pub maximum: u32,
    /// Sum of the three categories' earned points.
    pub raw_score: u32,
    /// Score after the floor policy; never below zero nor above `maximum`.
    pub final_score: u32,
    pub completeness: CategoryOutcome,
    pub correctness: CategoryOutcome,
    pub quality: CategoryOutcome,
}

impl TaskOutcome {
    /// Category outcomes in report order.
    pub fn categories(&self) -> [&CategoryOutcome; 3] {
        CategoryKind::ordered().map(|kind| self.category(kind))
    }

    pub fn category(&self, kind: CategoryKind) -> &CategoryOutcome {
        match kind {
            CategoryKind::Completeness => &self.completeness,
            CategoryKind::Correctness => &self.correctness,
            CategoryKind::CodeQuality => &self.quality,
        }
    }

    pub fn meets(&self, threshold: CompletionThreshold) -> bool {
        self.completeness.earned >= threshold.completeness
            && self.correctness.earned >= threshold.correctness
    }
}
