use crate::sources::SourceSet;
use regex::Regex;
use tracing::warn;

/// Declarative predicate over the graded file texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Regex search over the text of a single file.
    Matches {
        file: &'static str,
        pattern: &'static str,
    },
    All(Vec<Condition>),
    Any(Vec<Condition>),
}

impl Condition {
    pub const fn matches(file: &'static str, pattern: &'static str) -> Self {
        Self::Matches { file, pattern }
    }

    /// Absent files and invalid patterns evaluate to `false`.
    pub fn holds(&self, corpus: &SourceSet) -> bool {
        match self {
            Condition::Matches { file, pattern } => corpus
                .text(file)
                .map(|text| pattern_matches(pattern, text))
                .unwrap_or(false),
            Condition::All(conditions) => conditions.iter().all(|c| c.holds(corpus)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.holds(corpus)),
        }
    }
}

pub(crate) fn pattern_matches(pattern: &str, text: &str) -> bool {
    match Regex::new(pattern) {
        Ok(regex) => regex.is_match(text),
        Err(err) => {
            warn!(pattern, %err, "invalid check pattern; treating as not matched");
            false
        }
    }
}

/// Atomic pass/fail test worth a fixed number of points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub description: &'static str,
    pub condition: Condition,
    pub points: u32,
}

impl Check {
    pub fn new(description: &'static str, points: u32, condition: Condition) -> Self {
        Self {
            description,
            condition,
            points,
        }
    }

    pub fn passes(&self, corpus: &SourceSet) -> bool {
        self.condition.holds(corpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::STUDY_BUDDY_SOURCES;

    fn corpus(app: Option<&str>) -> SourceSet {
        SourceSet::from_texts([(STUDY_BUDDY_SOURCES[0], app)])
    }

    #[test]
    fn matches_against_named_file_only() {
        let check = Check::new(
            "Uses course.id as key",
            2,
            Condition::matches("app", r"key=\{?\s*course\.id\s*\}?"),
        );

        assert!(check.passes(&corpus(Some("<CourseCard key={course.id} />"))));
        assert!(!check.passes(&corpus(Some("<CourseCard key={idx} />"))));
        assert!(!check.passes(&corpus(None)));
    }

    #[test]
    fn all_and_any_combine_conditions() {
        let text = "course={course} index={idx}";
        let all = Condition::All(vec![
            Condition::matches("app", r"course=\{?course\}?"),
            Condition::matches("app", r"onMutateCourse="),
        ]);
        let any = Condition::Any(vec![
            Condition::matches("app", r"onMutateCourse="),
            Condition::matches("app", r"index=\{?idx\}?"),
        ]);

        assert!(!all.holds(&corpus(Some(text))));
        assert!(any.holds(&corpus(Some(text))));
    }

    #[test]
    fn invalid_pattern_fails_closed() {
        let condition = Condition::matches("app", r"(unclosed");
        assert!(!condition.holds(&corpus(Some("(unclosed"))));
    }

    #[test]
    fn unknown_file_key_never_matches() {
        let condition = Condition::matches("styles", r".*");
        assert!(!condition.holds(&corpus(Some("anything"))));
    }
}
