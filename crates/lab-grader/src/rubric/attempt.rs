use super::check::pattern_matches;
use crate::sources::SourceSet;

/// Coarse, rubric-independent gate: any sign of engagement in any file.
#[derive(Debug, Clone)]
pub struct AttemptDetector {
    signals: Vec<&'static str>,
}

impl AttemptDetector {
    pub fn new(signals: Vec<&'static str>) -> Self {
        Self { signals }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            r"useState\s*\(",
            r"onChange=\{",
            r"onClick=\{",
            r"<TaskItem\b",
            r"<DueBadge\b",
            r"onMutateCourse\s*\(",
            r"setTitle\s*\(",
            r"setDate\s*\(",
            r"isDone",
        ])
    }

    pub fn signals(&self) -> &[&'static str] {
        &self.signals
    }

    pub fn detect(&self, corpus: &SourceSet) -> bool {
        self.signals.iter().any(|signal| {
            corpus
                .texts()
                .any(|text| pattern_matches(signal, text))
        })
    }
}
