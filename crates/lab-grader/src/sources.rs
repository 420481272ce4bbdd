use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Names one graded file relative to the submission root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub relative_path: &'static str,
}

impl SourceSpec {
    pub const fn new(key: &'static str, label: &'static str, relative_path: &'static str) -> Self {
        Self {
            key,
            label,
            relative_path,
        }
    }
}

/// The four component files the Study Buddy lab asks students to edit.
pub const STUDY_BUDDY_SOURCES: [SourceSpec; 4] = [
    SourceSpec::new("app", "App.jsx", "src/App.jsx"),
    SourceSpec::new(
        "course_card",
        "CourseCard.jsx",
        "src/components/CourseCard.jsx",
    ),
    SourceSpec::new("task_item", "TaskItem.jsx", "src/components/TaskItem.jsx"),
    SourceSpec::new("due_badge", "DueBadge.jsx", "src/components/DueBadge.jsx"),
];

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub key: &'static str,
    pub label: &'static str,
    pub path: PathBuf,
    contents: Option<String>,
}

impl SourceFile {
    pub fn found(&self) -> bool {
        self.contents.is_some()
    }

    /// File text, or `None` when the file was missing or unreadable.
    pub fn text(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn status(&self) -> FileStatus {
        FileStatus {
            key: self.key,
            label: self.label,
            path: self
                .found()
                .then(|| self.path.display().to_string()),
        }
    }
}

/// Per-file presence entry carried into the reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStatus {
    pub key: &'static str,
    pub label: &'static str,
    pub path: Option<String>,
}

/// Immutable corpus of graded file texts, keyed by [`SourceSpec::key`].
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    files: Vec<SourceFile>,
}

impl SourceSet {
    /// Reads every file under `root`, which is canonicalized so reports show
    /// absolute paths. Invalid UTF-8 is replaced rather than rejected.
    pub fn load(root: &Path, specs: &[SourceSpec]) -> Self {
        let root = root.canonicalize().unwrap_or_else(|err| {
            debug!(root = %root.display(), %err, "unable to canonicalize submission root");
            root.to_path_buf()
        });

        let files = specs
            .iter()
            .map(|spec| {
                let path = root.join(spec.relative_path);
                let contents = match std::fs::read(&path) {
                    Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
                    Err(err) => {
                        debug!(file = spec.label, path = %path.display(), %err, "graded file not found");
                        None
                    }
                };
                SourceFile {
                    key: spec.key,
                    label: spec.label,
                    path,
                    contents,
                }
            })
            .collect();

        Self { files }
    }

    /// Builds a set from in-memory texts; `None` marks a missing file.
    pub fn from_texts<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (SourceSpec, Option<&'a str>)>,
    {
        let files = entries
            .into_iter()
            .map(|(spec, text)| SourceFile {
                key: spec.key,
                label: spec.label,
                path: PathBuf::from(spec.relative_path),
                contents: text.map(str::to_string),
            })
            .collect();

        Self { files }
    }

    pub fn get(&self, key: &str) -> Option<&SourceFile> {
        self.files.iter().find(|file| file.key == key)
    }

    /// Text of the file registered under `key`; empty files count as absent.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(SourceFile::text)
            .filter(|text| !text.is_empty())
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .filter_map(SourceFile::text)
            .filter(|text| !text.is_empty())
    }

    pub fn statuses(&self) -> Vec<FileStatus> {
        self.files.iter().map(SourceFile::status).collect()
    }
}
