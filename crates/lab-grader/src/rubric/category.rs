use super::check::Check;
use crate::sources::SourceSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Completeness,
    Correctness,
    CodeQuality,
}

impl CategoryKind {
    pub const fn ordered() -> [Self; 3] {
        [Self::Completeness, Self::Correctness, Self::CodeQuality]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Completeness => "Completeness",
            Self::Correctness => "Correctness",
            Self::CodeQuality => "Code Quality",
        }
    }
}

/// Capped point bucket made of independently evaluated checks.
///
/// The check points may add up to more than `max_points`; earned points are
/// clamped to the cap.
#[derive(Debug, Clone)]
pub struct Category {
    pub kind: CategoryKind,
    pub max_points: u32,
    pub checks: Vec<Check>,
}

impl Category {
    pub fn new(kind: CategoryKind, max_points: u32, checks: Vec<Check>) -> Self {
        Self {
            kind,
            max_points,
            checks,
        }
    }

    pub fn evaluate(&self, corpus: &SourceSet) -> CategoryOutcome {
        let mut sum: u32 = 0;
        let mut achieved = Vec::new();
        let mut missed = Vec::new();

        for check in &self.checks {
            if check.passes(corpus) {
                sum = sum.saturating_add(check.points);
                achieved.push(check.description);
            } else {
                missed.push(check.description);
            }
        }

        CategoryOutcome {
            kind: self.kind,
            earned: sum.min(self.max_points),
            max_points: self.max_points,
            passed: achieved.len(),
            checked: self.checks.len(),
            achieved,
            missed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOutcome {
    pub kind: CategoryKind,
    pub earned: u32,
    pub max_points: u32,
    pub achieved: Vec<&'static str>,
    pub missed: Vec<&'static str>,
    pub checked: usize,
    pub passed: usize,
}
