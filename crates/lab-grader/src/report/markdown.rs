use crate::grading::GradingRun;
use crate::rubric::{CategoryOutcome, TaskOutcome};
use crate::submission::{format_local, format_utc};
use std::fmt::Write;

/// Student-facing report. Category breakdowns show the raw check outcomes.
pub fn render_markdown(run: &GradingRun) -> String {
    let mut out = String::new();
    let timing = &run.submission.timing;

    let _ = writeln!(out, "# {}", run.title);
    let _ = writeln!(out);
    let _ = writeln!(out, "**Commit Time:** {}", format_utc(&timing.submitted_at.value));
    let _ = writeln!(out, "**Due Date:** {}", format_local(&timing.deadline.value));
    let _ = writeln!(
        out,
        "**Submission:** {}/{} ({})",
        run.submission.score,
        run.submission.maximum,
        run.submission.status_label()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "**Files detected**");
    for file in &run.files {
        let _ = writeln!(
            out,
            "- {}: {}",
            file.label,
            file.path.as_deref().unwrap_or("NOT FOUND")
        );
    }

    for task in &run.tasks {
        let _ = writeln!(out);
        render_task(&mut out, task);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Totals");
    let _ = writeln!(out, "- Tasks Total: **{}/{}**", run.tasks_total, run.max_tasks_total);
    let _ = writeln!(
        out,
        "- Submission: **{}/{}**",
        run.submission.score, run.submission.maximum
    );
    let _ = writeln!(
        out,
        "- **Grand Total: {}/{}**",
        run.grand_total(),
        run.grand_maximum()
    );

    out
}

fn render_task(out: &mut String, task: &TaskOutcome) {
    let _ = writeln!(out, "## {}", task.name);
    let _ = writeln!(out);
    for category in task.categories() {
        render_category(out, category);
    }
    let _ = writeln!(out, "**Score:** {}/{}", task.final_score, task.maximum);
}

fn render_category(out: &mut String, category: &CategoryOutcome) {
    let _ = writeln!(
        out,
        "### {} — {}/{}",
        category.kind.label(),
        category.earned,
        category.max_points
    );
    if category.achieved.is_empty() {
        let _ = writeln!(out, "_No checks achieved yet._");
    } else {
        let _ = writeln!(out, "**What you achieved:**");
        for description in &category.achieved {
            let _ = writeln!(out, "- ✅ {description}");
        }
    }
    if !category.missed.is_empty() {
        let _ = writeln!(out, "**What to improve:**");
        for description in &category.missed {
            let _ = writeln!(out, "- ❌ {description}");
        }
    }
    let _ = writeln!(out);
}
