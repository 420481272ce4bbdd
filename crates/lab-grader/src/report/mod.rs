//! Deterministic grading reports: a structured JSON view and a Markdown
//! rendering of the same run.

mod markdown;
mod views;
mod writer;

pub use markdown::render_markdown;
pub use views::{CategoryView, GradeReport, PolicyView, SubmissionView, TaskView};
pub use writer::{write_outputs, JSON_REPORT_FILE, MARKDOWN_REPORT_FILE};
