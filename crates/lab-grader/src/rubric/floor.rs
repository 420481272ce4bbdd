use serde::Serialize;

/// Current score and cap of one task, as seen by the floor policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskScore {
    pub score: u32,
    pub maximum: u32,
}

impl TaskScore {
    pub fn new(score: u32, maximum: u32) -> Self {
        Self {
            score: score.min(maximum),
            maximum,
        }
    }

    fn room(&self) -> u32 {
        self.maximum.saturating_sub(self.score)
    }
}

/// Which branch of the floor policy produced the final scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FloorDecision {
    NoAttempt,
    RawStands,
    Redistributed { granted: u32 },
}

impl FloorDecision {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoAttempt => "no attempt detected",
            Self::RawStands => "raw scores stand",
            Self::Redistributed { .. } => "floor redistributed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorOutcome {
    pub decision: FloorDecision,
    pub scores: Vec<u32>,
}

impl FloorOutcome {
    pub fn total(&self) -> u32 {
        self.scores.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FloorPolicy {
    /// Guaranteed tasks total for any detected attempt.
    pub floor: u32,
    /// Tasks total awarded when no attempt is detected, spread across tasks
    /// the same way as the floor.
    pub no_attempt_score: u32,
}

impl FloorPolicy {
    pub fn apply(&self, scores: &[TaskScore], attempted: bool, fully_complete: bool) -> FloorOutcome {
        if !attempted {
            let cleared: Vec<TaskScore> = scores
                .iter()
                .map(|task| TaskScore::new(0, task.maximum))
                .collect();
            return FloorOutcome {
                decision: FloorDecision::NoAttempt,
                scores: redistribute(&cleared, self.no_attempt_score),
            };
        }

        let raw: Vec<u32> = scores.iter().map(|task| task.score).collect();
        let raw_total: u32 = raw.iter().sum();
        if fully_complete || raw_total >= self.floor {
            return FloorOutcome {
                decision: FloorDecision::RawStands,
                scores: raw,
            };
        }

        let redistributed = redistribute(scores, self.floor);
        let granted = redistributed.iter().sum::<u32>() - raw_total;
        FloorOutcome {
            decision: FloorDecision::Redistributed { granted },
            scores: redistributed,
        }
    }
}

/// Raises task scores one point at a time, round-robin by index, until the
/// total reaches `floor` or every task is at its maximum.
pub fn redistribute(scores: &[TaskScore], floor: u32) -> Vec<u32> {
    let mut tasks = scores.to_vec();
    let total: u32 = tasks.iter().map(|task| task.score).sum();
    let mut deficit = floor.saturating_sub(total);

    while deficit > 0 && tasks.iter().any(|task| task.room() > 0) {
        for task in tasks.iter_mut() {
            if deficit == 0 {
                break;
            }
            if task.room() > 0 {
                task.score += 1;
                deficit -= 1;
            }
        }
    }

    tasks.into_iter().map(|task| task.score).collect()
}
