use lab_grader::report::{render_markdown, GradeReport};
use lab_grader::rubric::{CategoryKind, FloorDecision};
use lab_grader::sources::{SourceSet, STUDY_BUDDY_SOURCES};
use lab_grader::submission::{
    parse_timestamp, DeadlineSource, Resolved, SubmissionTiming, TimestampSource,
    DEFAULT_DEADLINE,
};
use lab_grader::{Grader, GradingRun};
use std::path::PathBuf;

fn fixture(name: &str) -> SourceSet {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    SourceSet::load(&root, &STUDY_BUDDY_SOURCES)
}

fn submitted_at(raw: &str) -> SubmissionTiming {
    SubmissionTiming::new(
        Resolved {
            value: parse_timestamp(raw).expect("valid submission time"),
            source: TimestampSource::Override,
        },
        Resolved {
            value: parse_timestamp(DEFAULT_DEADLINE).expect("valid deadline"),
            source: DeadlineSource::Default,
        },
    )
}

fn grade(name: &str, raw_time: &str) -> GradingRun {
    Grader::study_buddy().grade(&fixture(name), submitted_at(raw_time))
}

#[test]
fn complete_solution_earns_full_marks_on_time() {
    let run = grade("complete", "2025-10-05T10:00:00Z");

    assert!(run.attempt_detected);
    assert!(run.fully_complete);
    assert_eq!(run.floor_decision, FloorDecision::RawStands);
    for task in &run.tasks {
        assert_eq!(
            task.final_score, 20,
            "{} missed {:?}",
            task.name,
            task.categories()
                .into_iter()
                .flat_map(|category| category.missed.clone())
                .collect::<Vec<_>>()
        );
    }
    assert_eq!(run.tasks_total, 80);
    assert_eq!(run.submission.score, 20);
    assert_eq!(run.grand_total(), 100);
    assert!(run.files.iter().all(|file| file.path.is_some()));
}

#[test]
fn complete_solution_submitted_a_day_late_loses_half_the_submission_points() {
    let run = grade("complete", "2025-10-09T23:59:59+03:00");

    assert!(run.submission.late);
    assert_eq!(run.submission.score, 10);
    assert_eq!(run.tasks_total, 80);
    assert_eq!(run.grand_total(), 90);
    assert!(render_markdown(&run).contains("**Submission:** 10/20 (Late)"));
}

#[test]
fn partial_attempt_is_raised_to_the_floor() {
    let run = grade("partial", "2025-10-05T10:00:00Z");

    assert!(run.attempt_detected);
    assert!(!run.fully_complete);
    assert_eq!(run.raw_tasks_total, 14);
    assert_eq!(run.tasks_total, 60);
    assert_eq!(run.floor_decision, FloorDecision::Redistributed { granted: 46 });
    assert_eq!(
        run.tasks.iter().map(|task| task.final_score).collect::<Vec<_>>(),
        vec![20, 14, 13, 13]
    );
    assert_eq!(run.tasks[0].raw_score, 14);
    assert_eq!(run.grand_total(), 80);

    let missing: Vec<_> = run
        .files
        .iter()
        .filter(|file| file.path.is_none())
        .map(|file| file.label)
        .collect();
    assert_eq!(missing, vec!["CourseCard.jsx", "TaskItem.jsx", "DueBadge.jsx"]);
}

#[test]
fn untouched_starter_scores_only_the_submission_points() {
    let run = grade("starter", "2025-10-05T10:00:00Z");

    assert!(!run.attempt_detected);
    assert_eq!(run.floor_decision, FloorDecision::NoAttempt);
    assert_eq!(run.tasks_total, 0);
    assert_eq!(run.grand_total(), 20);

    let completeness = run.tasks[1].category(CategoryKind::Completeness);
    assert!(completeness.achieved.is_empty());
    assert_eq!(completeness.missed.len(), 2);

    let markdown = render_markdown(&run);
    assert!(markdown.contains("- TaskItem.jsx: NOT FOUND"));
    assert!(markdown.contains("- **Grand Total: 20/100**"));
}

#[test]
fn json_report_mirrors_the_run() {
    let run = grade("partial", "2025-10-05T10:00:00Z");
    let json = GradeReport::from_run(&run).to_json().expect("report serializes");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["tasks_total"], 60);
    assert_eq!(value["max_tasks_total"], 80);
    assert_eq!(value["grand_total"], 80);
    assert_eq!(value["submission"]["submitted_at"], "2025-10-05T10:00:00Z");
    assert_eq!(value["submission"]["submitted_at_source"], "override");
    assert_eq!(value["submission"]["late"], false);
    assert_eq!(value["policy"]["floor"], 60);
    assert_eq!(value["policy"]["floor_decision"]["kind"], "redistributed");
    assert_eq!(value["policy"]["floor_decision"]["granted"], 46);
    assert_eq!(value["tasks"][0]["raw_score"], 14);
    assert_eq!(value["tasks"][0]["final_score"], 20);
    assert_eq!(value["tasks"][0]["categories"][2]["category"], "code_quality");
}

#[test]
fn regrading_the_same_tree_is_byte_identical() {
    let first = grade("complete", "2025-10-05T10:00:00Z");
    let second = grade("complete", "2025-10-05T10:00:00Z");

    assert_eq!(render_markdown(&first), render_markdown(&second));
    assert_eq!(
        GradeReport::from_run(&first).to_json().expect("json"),
        GradeReport::from_run(&second).to_json().expect("json")
    );
}
