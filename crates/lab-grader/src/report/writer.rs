use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const MARKDOWN_REPORT_FILE: &str = "grade-report.md";
pub const JSON_REPORT_FILE: &str = "grade-report.json";

/// Writes both reports under `root`. A failed write is logged and skipped;
/// the returned paths are the ones actually written.
pub fn write_outputs(root: &Path, markdown: &str, json: &str) -> Vec<PathBuf> {
    [(MARKDOWN_REPORT_FILE, markdown), (JSON_REPORT_FILE, json)]
        .into_iter()
        .filter_map(|(name, contents)| {
            let path = root.join(name);
            match std::fs::write(&path, contents) {
                Ok(()) => {
                    info!(path = %path.display(), "wrote grade report");
                    Some(path)
                }
                Err(err) => {
                    warn!(path = %path.display(), %err, "unable to write grade report");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_both_reports() {
        let dir = tempfile::tempdir().expect("tempdir");
        let written = write_outputs(dir.path(), "# report\n", "{}");

        assert_eq!(written.len(), 2);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(MARKDOWN_REPORT_FILE)).expect("markdown"),
            "# report\n"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join(JSON_REPORT_FILE)).expect("json"),
            "{}"
        );
    }

    #[test]
    fn unwritable_root_is_not_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing_root = dir.path().join("does/not/exist");

        assert!(write_outputs(&missing_root, "md", "{}").is_empty());
    }
}
