//! Subject list mutation
//!
//! Pure functions that compute the subject list a binding should hold after an
//! add or a remove. Order is significant: untouched subjects keep their
//! relative order and new subjects are appended in the order given.
//!
//! ```rust
//! use rolebind_core::subject_set::{merge, subtract};
//! use rolebind_core::types::Subject;
//!
//! let current = vec![Subject::user("bar")];
//! let merged = merge(&current, &[Subject::user("baz"), Subject::user("bar")]);
//! assert_eq!(merged, vec![Subject::user("bar"), Subject::user("baz")]);
//!
//! let remaining = subtract(&merged, &[Subject::user("baz")]);
//! assert_eq!(remaining, vec![Subject::user("bar")]);
//! ```

use crate::types::Subject;
use std::collections::HashSet;

/// Appends every subject of `to_add` that is not already present.
///
/// The result holds no duplicates; a subject repeated in either input is kept
/// at its first occurrence.
pub fn merge(current: &[Subject], to_add: &[Subject]) -> Vec<Subject> {
    let mut seen: HashSet<&Subject> = HashSet::with_capacity(current.len() + to_add.len());
    let mut merged = Vec::with_capacity(current.len() + to_add.len());

    for subject in current.iter().chain(to_add) {
        if seen.insert(subject) {
            merged.push(subject.clone());
        }
    }

    merged
}

/// Removes every subject structurally equal to a member of `to_remove`.
///
/// Removing a subject that is not present is a no-op.
pub fn subtract(current: &[Subject], to_remove: &[Subject]) -> Vec<Subject> {
    let removed: HashSet<&Subject> = to_remove.iter().collect();

    current
        .iter()
        .filter(|subject| !removed.contains(subject))
        .cloned()
        .collect()
}

/// Whether `subjects` holds no structural duplicates.
pub fn is_distinct(subjects: &[Subject]) -> bool {
    let mut seen = HashSet::with_capacity(subjects.len());
    subjects.iter().all(|subject| seen.insert(subject))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users(names: &[&str]) -> Vec<Subject> {
        names.iter().map(|n| Subject::user(*n)).collect()
    }

    /// Whether `needle` appears in `haystack` in the same relative order.
    fn is_subsequence(needle: &[Subject], haystack: &[Subject]) -> bool {
        let mut it = haystack.iter();
        needle.iter().all(|s| it.any(|h| h == s))
    }

    fn samples() -> Vec<Vec<Subject>> {
        vec![
            vec![],
            users(&["foo"]),
            users(&["foo", "bar"]),
            users(&["bar", "baz", "foo"]),
            users(&["baz", "baz"]),
            vec![Subject::user("foo"), Subject::group("foo")],
            vec![
                Subject::service_account("ci", "deployer"),
                Subject::user("qux"),
                Subject::group("admins"),
            ],
        ]
    }

    #[test]
    fn test_merge_appends_in_order() {
        let merged = merge(&users(&["bar"]), &users(&["baz", "qux"]));
        assert_eq!(merged, users(&["bar", "baz", "qux"]));
    }

    #[test]
    fn test_merge_skips_present_subjects() {
        let merged = merge(&users(&["foo", "bar"]), &users(&["bar", "baz"]));
        assert_eq!(merged, users(&["foo", "bar", "baz"]));
    }

    #[test]
    fn test_merge_distinguishes_kinds() {
        let merged = merge(&users(&["foo"]), &[Subject::group("foo")]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_properties() {
        for s in samples() {
            for a in samples() {
                let merged = merge(&s, &a);
                assert!(is_distinct(&merged), "duplicates in {merged:?}");
                assert!(s.iter().all(|x| merged.contains(x)));
                assert!(a.iter().all(|x| merged.contains(x)));
                if is_distinct(&s) {
                    assert!(merged.starts_with(&s), "order of {s:?} lost in {merged:?}");
                }
                assert_eq!(merge(&merged, &a), merged, "merge is not idempotent");
            }
        }
    }

    #[test]
    fn test_subtract_removes_matches() {
        let remaining = subtract(&users(&["bar", "baz"]), &users(&["baz"]));
        assert_eq!(remaining, users(&["bar"]));
    }

    #[test]
    fn test_subtract_missing_subject_is_noop() {
        let current = users(&["foo", "bar"]);
        assert_eq!(subtract(&current, &users(&["nobody"])), current);
        assert_eq!(subtract(&current, &[Subject::group("foo")]), current);
    }

    #[test]
    fn test_subtract_properties() {
        for s in samples() {
            for r in samples() {
                let remaining = subtract(&s, &r);
                assert!(remaining.iter().all(|x| !r.contains(x)));
                assert!(is_subsequence(&remaining, &s));
                assert_eq!(
                    s.iter().filter(|x| !r.contains(x)).count(),
                    remaining.len()
                );
                assert_eq!(subtract(&remaining, &r), remaining);
            }
        }
    }
}
