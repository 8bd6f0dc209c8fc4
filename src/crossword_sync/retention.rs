//! # Retention Policy
//!
//! Decides which archived files are stale. Two independent pressures apply:
//!
//! 1. **Age**: any file older than `max_age_days` goes.
//! 2. **Count**: if the listing holds more than `max_count` entries, the oldest
//!    datable files go until the excess is covered.
//!
//! The policy is a pure function of the listing and the limits. Local and cloud
//! cleanup share it; only the listing and delete primitives differ per store.
//!
//! Files with an unknown age (unparseable names) are never selected by either pass,
//! though they still count towards the listing size.

use crate::error::{Result, SyncError};
use crate::model::ArchivedFile;
use std::collections::HashSet;

/// Validated limits for one store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionLimits {
    max_age_days: i64,
    max_count: usize,
}

impl RetentionLimits {
    pub fn new(max_age_days: u32, max_count: u32) -> Result<Self> {
        if max_count == 0 {
            return Err(SyncError::InvalidConfig(
                "file count limit must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            max_age_days: i64::from(max_age_days),
            max_count: max_count as usize,
        })
    }

    pub fn max_age_days(&self) -> i64 {
        self.max_age_days
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }
}

/// Why a file was selected. Both flags may be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reasons {
    pub age_exceeded: bool,
    pub count_excess: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub age_days: i64,
    pub reasons: Reasons,
}

/// The files selected for deletion, without duplicates.
///
/// Ordered for display: age violators in listing order, then count-excess files
/// oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionDecision {
    pub candidates: Vec<Candidate>,
}

impl RetentionDecision {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn names(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.name.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.candidates.iter().any(|c| c.name == name)
    }
}

pub fn select_for_deletion(files: &[ArchivedFile], limits: RetentionLimits) -> RetentionDecision {
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut selected: HashSet<&str> = HashSet::new();

    for file in files {
        let Some(age) = file.age_days() else { continue };
        if age > limits.max_age_days && selected.insert(file.name.as_str()) {
            candidates.push(Candidate {
                name: file.name.clone(),
                age_days: age,
                reasons: Reasons {
                    age_exceeded: true,
                    count_excess: false,
                },
            });
        }
    }

    if files.len() > limits.max_count {
        let excess = files.len() - limits.max_count;

        let mut ranked: Vec<(i64, &str)> = files
            .iter()
            .filter_map(|f| f.age_days().map(|age| (age, f.name.as_str())))
            .collect();
        // Oldest first; equal ages by name.
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        ranked.dedup_by(|a, b| a.1 == b.1);

        for (age, name) in ranked.into_iter().take(excess) {
            if selected.insert(name) {
                candidates.push(Candidate {
                    name: name.to_string(),
                    age_days: age,
                    reasons: Reasons {
                        age_exceeded: false,
                        count_excess: true,
                    },
                });
            } else if let Some(existing) = candidates.iter_mut().find(|c| c.name == name) {
                existing.reasons.count_excess = true;
            }
        }
    }

    RetentionDecision { candidates }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PuzzleKind;
    use crate::naming::{FileAge, ParsedName};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn aged(name: &str, age: i64) -> ArchivedFile {
        ArchivedFile {
            name: name.to_string(),
            parsed: ParsedName::Known {
                kind: PuzzleKind::Quick,
                date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            },
            age: FileAge::Days(age),
        }
    }

    fn unknown(name: &str) -> ArchivedFile {
        ArchivedFile {
            name: name.to_string(),
            parsed: ParsedName::Unparseable,
            age: FileAge::Unknown,
        }
    }

    fn limits(max_age: u32, max_count: u32) -> RetentionLimits {
        RetentionLimits::new(max_age, max_count).unwrap()
    }

    #[test]
    fn zero_count_limit_is_rejected() {
        let err = RetentionLimits::new(30, 0).unwrap_err();
        assert!(matches!(err, SyncError::InvalidConfig(_)));
    }

    #[test]
    fn empty_listing_selects_nothing() {
        assert!(select_for_deletion(&[], limits(30, 10)).is_empty());
    }

    #[test]
    fn age_pass_selects_stale_files() {
        let files = [aged("A", 40), aged("B", 10), aged("C", 5)];
        let decision = select_for_deletion(&files, limits(30, 10));
        assert_eq!(decision.names(), vec!["A"]);
        assert!(decision.candidates[0].reasons.age_exceeded);
        assert!(!decision.candidates[0].reasons.count_excess);
    }

    #[test]
    fn age_equal_to_limit_is_kept() {
        let files = [aged("A", 30)];
        assert!(select_for_deletion(&files, limits(30, 10)).is_empty());
    }

    #[test]
    fn count_pass_evicts_oldest_excess() {
        let files = [aged("A", 5), aged("B", 4), aged("C", 3)];
        let decision = select_for_deletion(&files, limits(100, 2));
        assert_eq!(decision.names(), vec!["A"]);
        assert!(decision.candidates[0].reasons.count_excess);
    }

    #[test]
    fn count_pass_ties_break_by_name() {
        let files = [aged("c", 7), aged("a", 7), aged("b", 7)];
        let decision = select_for_deletion(&files, limits(100, 1));
        assert_eq!(decision.names(), vec!["a", "b"]);
    }

    #[test]
    fn file_under_both_pressures_appears_once() {
        let files = [aged("old", 50), aged("mid", 20), aged("new", 1)];
        let decision = select_for_deletion(&files, limits(30, 1));
        // Excess is 2: "old" (already selected by age) and "mid".
        assert_eq!(decision.names(), vec!["old", "mid"]);
        assert_eq!(
            decision.candidates[0].reasons,
            Reasons {
                age_exceeded: true,
                count_excess: true
            }
        );
    }

    #[test]
    fn unknown_ages_count_but_are_never_selected() {
        let files = [unknown("x.pdf"), unknown("y.pdf"), aged("A", 3)];
        let decision = select_for_deletion(&files, limits(1, 1));
        // Two over the limit, but only one datable file exists.
        assert_eq!(decision.names(), vec!["A"]);
    }

    #[test]
    fn future_dated_files_survive() {
        let files = [aged("future", -3), aged("A", 2), aged("B", 1)];
        let decision = select_for_deletion(&files, limits(30, 2));
        assert_eq!(decision.names(), vec!["A"]);
    }

    #[test]
    fn display_order_is_age_then_count() {
        let files = [aged("B", 31), aged("A", 40), aged("C", 20), aged("D", 25)];
        let decision = select_for_deletion(&files, limits(30, 1));
        assert_eq!(decision.names(), vec!["B", "A", "D"]);
    }

    fn any_file() -> impl Strategy<Value = ArchivedFile> {
        prop_oneof![
            ("[a-z]{1,6}", -5i64..200).prop_map(|(n, a)| aged(&n, a)),
            "[a-z]{1,6}\\.bin".prop_map(|n| unknown(&n)),
        ]
    }

    proptest! {
        #[test]
        fn selection_is_idempotent(
            files in prop::collection::vec(any_file(), 0..40),
            max_age in 0u32..150,
            max_count in 1u32..50,
        ) {
            let l = limits(max_age, max_count);
            prop_assert_eq!(select_for_deletion(&files, l), select_for_deletion(&files, l));
        }

        #[test]
        fn unknown_ages_never_selected(
            files in prop::collection::vec(any_file(), 0..40),
            max_age in 0u32..150,
            max_count in 1u32..50,
        ) {
            let decision = select_for_deletion(&files, limits(max_age, max_count));
            for file in files.iter().filter(|f| f.age_days().is_none()) {
                prop_assert!(!decision.contains(&file.name));
            }
        }

        #[test]
        fn selection_has_no_duplicates(
            files in prop::collection::vec(any_file(), 0..40),
            max_age in 0u32..150,
            max_count in 1u32..50,
        ) {
            let names = select_for_deletion(&files, limits(max_age, max_count)).names();
            let unique: HashSet<_> = names.iter().collect();
            prop_assert_eq!(unique.len(), names.len());
        }

        #[test]
        fn within_limits_selects_nothing(
            ages in prop::collection::vec(-5i64..=60, 0..20),
        ) {
            let files: Vec<_> = ages.iter().enumerate().map(|(i, a)| aged(&format!("f{i}"), *a)).collect();
            let decision = select_for_deletion(&files, limits(60, 20));
            prop_assert!(decision.is_empty());
        }
    }
}
