//! Rubric model: checks grouped into capped categories, three categories per
//! task, plus the attempt gate and the floor policy applied across tasks.

mod attempt;
mod category;
mod check;
mod floor;
mod standard;
mod task;

pub use attempt::AttemptDetector;
pub use category::{Category, CategoryKind, CategoryOutcome};
pub use check::{Check, Condition};
pub use floor::{redistribute, FloorDecision, FloorOutcome, FloorPolicy, TaskScore};
pub use task::{CompletionThreshold, TaskOutcome, TaskRubric};

use crate::sources::SourceSet;

#[derive(Debug, Clone)]
pub struct Rubric {
    pub title: &'static str,
    tasks: Vec<TaskRubric>,
}

impl Rubric {
    pub fn new(title: &'static str, tasks: Vec<TaskRubric>) -> Self {
        Self { title, tasks }
    }

    /// The four-task rubric for the Study Buddy rendering-lists lab.
    pub fn study_buddy() -> Self {
        Self::new(standard::TITLE, standard::task_rubrics())
    }

    pub fn tasks(&self) -> &[TaskRubric] {
        &self.tasks
    }

    pub fn maximum(&self) -> u32 {
        self.tasks.iter().map(TaskRubric::maximum).sum()
    }

    pub fn evaluate(&self, corpus: &SourceSet) -> Vec<TaskOutcome> {
        self.tasks.iter().map(|task| task.evaluate(corpus)).collect()
    }
}
