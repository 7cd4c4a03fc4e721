//! Tracking of templates applied during this process.

use std::collections::HashSet;

/// Result of [`AppliedSet::try_mark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The name was new and is now recorded.
    Applied,
    /// The name was already recorded; nothing changed.
    AlreadyApplied,
}

/// Names of templates already appended to the target file.
///
/// Keyed by file name only, so two templates sharing a name in different
/// cache directories count as the same template. Lives for one process and
/// is never persisted.
#[derive(Debug, Default, Clone)]
pub struct AppliedSet {
    names: HashSet<String>,
}

impl AppliedSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check-and-set `name`.
    pub fn try_mark(&mut self, name: &str) -> MarkOutcome {
        if self.names.contains(name) {
            MarkOutcome::AlreadyApplied
        } else {
            self.names.insert(name.to_string());
            MarkOutcome::Applied
        }
    }

    /// Forget `name` after its write failed, so it can be retried.
    pub fn release(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    /// Whether `name` has been applied.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of distinct names applied.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing has been applied yet.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_mark_applies() {
        let mut set = AppliedSet::new();
        assert_eq!(set.try_mark("Go.gitignore"), MarkOutcome::Applied);
        assert!(set.contains("Go.gitignore"));
    }

    #[test]
    fn repeated_marks_are_already_applied() {
        let mut set = AppliedSet::new();
        set.try_mark("Go.gitignore");
        for _ in 0..3 {
            assert_eq!(set.try_mark("Go.gitignore"), MarkOutcome::AlreadyApplied);
        }
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn cardinality_tracks_distinct_names() {
        let mut set = AppliedSet::new();
        for name in ["Go.gitignore", "Rust.gitignore", "Go.gitignore", "Node.gitignore"] {
            set.try_mark(name);
        }
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn release_allows_retry() {
        let mut set = AppliedSet::new();
        set.try_mark("Go.gitignore");
        assert!(set.release("Go.gitignore"));
        assert!(set.is_empty());
        assert_eq!(set.try_mark("Go.gitignore"), MarkOutcome::Applied);
    }

    #[test]
    fn release_unknown_name_is_false() {
        let mut set = AppliedSet::new();
        assert!(!set.release("Go.gitignore"));
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut set = AppliedSet::new();
        set.try_mark("Go.gitignore");
        assert_eq!(set.try_mark("go.gitignore"), MarkOutcome::Applied);
    }
}
