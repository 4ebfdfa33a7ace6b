use std::{collections::BTreeMap, fmt};

///
/// ErrorTree
/// Validation messages aggregated across a whole scan, grouped by the
/// component class (or pseudo-subject) they were recorded against.
///

#[derive(Clone, Debug, Default)]
pub struct ErrorTree {
    entries: BTreeMap<String, Vec<String>>,
}

impl ErrorTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message under a subject.
    pub fn add(&mut self, subject: &str, message: impl Into<String>) {
        self.entries
            .entry(subject.to_string())
            .or_default()
            .push(message.into());
    }

    /// Fold another tree into this one, preserving subject grouping.
    pub fn merge(&mut self, other: Self) {
        for (subject, mut messages) in other.entries {
            self.entries
                .entry(subject)
                .or_default()
                .append(&mut messages);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of messages across all subjects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} violation(s)", self.len())?;
        for (subject, messages) in &self.entries {
            writeln!(f, "{subject}:")?;
            for message in messages {
                writeln!(f, "  - {message}")?;
            }
        }

        Ok(())
    }
}

///
/// err!
/// Push a formatted message onto an [`ErrorTree`] under a subject.
///

#[macro_export]
macro_rules! err {
    ($errs:expr, $subject:expr, $($arg:tt)+) => {
        $errs.add($subject, format!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_reports_ok() {
        let errs = ErrorTree::new();
        assert!(errs.is_empty());
        errs.result().expect("empty tree should be Ok");
    }

    #[test]
    fn messages_group_under_their_subject() {
        let mut errs = ErrorTree::new();
        err!(errs, "demo::Board", "bad route");
        err!(errs, "demo::Board", "bad binding");
        err!(errs, "demo::Search", "bad nav");

        assert_eq!(errs.len(), 3);
        assert_eq!(errs.subjects().count(), 2);

        let rendered = errs.to_string();
        assert!(rendered.contains("3 violation(s)"), "got: {rendered}");
        assert!(rendered.contains("demo::Board:"), "got: {rendered}");
        assert!(rendered.contains("  - bad binding"), "got: {rendered}");
    }

    #[test]
    fn merge_appends_messages_per_subject() {
        let mut left = ErrorTree::new();
        err!(left, "demo::Board", "first");

        let mut right = ErrorTree::new();
        err!(right, "demo::Board", "second");
        err!(right, "demo::Search", "third");

        left.merge(right);
        assert_eq!(left.len(), 3);
        left.result().expect_err("non-empty tree must fail");
    }

    #[test]
    fn subjects_render_in_sorted_order() {
        let mut errs = ErrorTree::new();
        err!(errs, "zz::Last", "late");
        err!(errs, "aa::First", "early");

        let rendered = errs.to_string();
        let first = rendered.find("aa::First").expect("subject missing");
        let last = rendered.find("zz::Last").expect("subject missing");
        assert!(first < last, "subjects should sort, got: {rendered}");
    }
}
