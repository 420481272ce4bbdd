use clap::{Args, Parser, Subcommand, ValueEnum};
use lab_grader::config::{AppConfig, GradingFile, DEFAULT_CONFIG_FILE};
use lab_grader::error::AppError;
use lab_grader::report::{render_markdown, write_outputs, GradeReport};
use lab_grader::sources::{SourceSet, STUDY_BUDDY_SOURCES};
use lab_grader::submission::{DeadlineInputs, SubmissionTiming, TimestampInputs};
use lab_grader::{telemetry, Grader};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "lab-grader",
    about = "Grade the Study Buddy React lab by inspecting its source files",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    /// Grading flags accepted without the `grade` keyword
    #[command(flatten)]
    grade: GradeArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Grade a submission and write grade-report.md / grade-report.json (default command)
    Grade(GradeArgs),
    /// List every task, category and check with its points
    Rubric,
}

#[derive(Args, Debug)]
struct GradeArgs {
    /// Root directory of the submission
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Flat key/value grading config (defaults to grading.config.yml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Explicit ISO-8601 submission time, overriding CI and git metadata
    #[arg(long = "submitted-at", alias = "submittedAt")]
    submitted_at: Option<String>,
    /// Report printed to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,
    /// Skip writing the report files under the root
    #[arg(long)]
    no_write: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

/// Always exits 0; errors are printed to stderr.
fn main() {
    if let Err(err) = run_cli() {
        eprintln!("grading error: {err}");
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    if let Err(err) = telemetry::init(&config.telemetry) {
        eprintln!("warning: {err}; continuing without logs");
    }

    match cli.command.unwrap_or(Command::Grade(cli.grade)) {
        Command::Grade(args) => run_grade(args, &config),
        Command::Rubric => run_rubric(),
    }
}

fn run_grade(args: GradeArgs, config: &AppConfig) -> Result<(), AppError> {
    let GradeArgs {
        root,
        config: config_path,
        submitted_at,
        format,
        no_write,
    } = args;

    let config_path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let grading_file = GradingFile::load(&config_path);
    let sources = SourceSet::load(&root, &STUDY_BUDDY_SOURCES);

    let mut timestamp_inputs = TimestampInputs::new(root.clone());
    timestamp_inputs.override_value = submitted_at;
    timestamp_inputs.ci_event_path = config.ci_event_path.clone();

    let deadline_inputs = DeadlineInputs {
        env_value: config.deadline_override.clone(),
        config_value: grading_file.deadline(),
    };

    let timing = SubmissionTiming::new(timestamp_inputs.resolve(), deadline_inputs.resolve());
    info!(
        submitted_at_source = timing.submitted_at.source.label(),
        deadline_source = ?timing.deadline.source,
        "resolved submission timing"
    );

    let run = Grader::study_buddy().grade(&sources, timing);
    let markdown = render_markdown(&run);
    let json = GradeReport::from_run(&run).to_json()?;

    if !no_write {
        write_outputs(&root, &markdown, &json);
    }

    let mut stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Markdown => writeln!(stdout, "{markdown}")?,
        OutputFormat::Json => writeln!(stdout, "{json}")?,
    }

    Ok(())
}

fn run_rubric() -> Result<(), AppError> {
    let grader = Grader::study_buddy();
    let rubric = grader.rubric();
    let policy = grader.policy();
    let mut stdout = std::io::stdout().lock();

    writeln!(stdout, "{}", rubric.title)?;
    writeln!(
        stdout,
        "Tasks: {} points, submission: {} on time / {} late",
        rubric.maximum(),
        policy.submission.on_time_score,
        policy.submission.late_score
    )?;

    writeln!(
        stdout,
        "Attempt signals: {}",
        grader.detector().signals().join("  ")
    )?;

    for task in rubric.tasks() {
        writeln!(stdout)?;
        writeln!(stdout, "{} [{}] ({} points)", task.name, task.key, task.maximum())?;
        for category in task.categories() {
            writeln!(
                stdout,
                "  {} (max {})",
                category.kind.label(),
                category.max_points
            )?;
            for check in &category.checks {
                writeln!(stdout, "    - [{}] {}", check.points, check.description)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_is_the_default_command() {
        let cli = Cli::try_parse_from(["lab-grader"]).expect("no arguments parse");
        assert!(cli.command.is_none());
        assert_eq!(cli.grade.root, PathBuf::from("."));
        assert_eq!(cli.grade.format, OutputFormat::Markdown);
    }

    #[test]
    fn grading_flags_work_without_the_grade_keyword() {
        let cli = Cli::try_parse_from([
            "lab-grader",
            "--root",
            "submission",
            "--submittedAt",
            "2025-10-01T00:00:00Z",
            "--no-write",
        ])
        .expect("flags parse");

        assert!(cli.command.is_none());
        assert_eq!(cli.grade.root, PathBuf::from("submission"));
        assert_eq!(cli.grade.submitted_at.as_deref(), Some("2025-10-01T00:00:00Z"));
        assert!(cli.grade.no_write);
    }

    #[test]
    fn accepts_camel_case_submitted_at_alias() {
        let cli = Cli::try_parse_from([
            "lab-grader",
            "grade",
            "--submittedAt",
            "2025-10-01T00:00:00Z",
            "--format",
            "json",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Grade(args)) => {
                assert_eq!(args.submitted_at.as_deref(), Some("2025-10-01T00:00:00Z"));
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("expected grade command, got {other:?}"),
        }
    }
}
