//! 三向比對：reference (mainframe) 對 comparison (cloud)。
//!
//! 成員判斷只看是否存在，不計重複次數。

use crate::domain::model::{Identifier, Reconciliation, RecordSet};
use std::collections::HashSet;

fn membership(items: &[Identifier]) -> HashSet<&str> {
    items.iter().map(String::as_str).collect()
}

/// reference 中不存在於 comparison 的項目，保留 reference 順序
pub fn find_unmatched(reference: &[Identifier], comparison: &[Identifier]) -> RecordSet {
    let present = membership(comparison);
    reference
        .iter()
        .filter(|item| !present.contains(item.as_str()))
        .cloned()
        .collect()
}

/// reference 中同時存在於 comparison 的項目，保留 reference 順序
pub fn find_matched(reference: &[Identifier], comparison: &[Identifier]) -> RecordSet {
    let present = membership(comparison);
    reference
        .iter()
        .filter(|item| present.contains(item.as_str()))
        .cloned()
        .collect()
}

/// comparison 中未被 matched 或 unmatched 涵蓋的項目，保留 comparison 順序
pub fn find_unprocessed(
    comparison: &[Identifier],
    unmatched: &[Identifier],
    matched: &[Identifier],
) -> RecordSet {
    let processed: HashSet<&str> = matched
        .iter()
        .chain(unmatched.iter())
        .map(String::as_str)
        .collect();

    comparison
        .iter()
        .filter(|item| !processed.contains(item.as_str()))
        .cloned()
        .collect()
}

pub fn reconcile(reference: &[Identifier], comparison: &[Identifier]) -> Reconciliation {
    let unmatched = find_unmatched(reference, comparison);
    let matched = find_matched(reference, comparison);
    let unprocessed = find_unprocessed(comparison, &unmatched, &matched);

    Reconciliation {
        unmatched,
        matched,
        unprocessed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[&str]) -> RecordSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let result = reconcile(&ids(&["X", "Y", "X"]), &ids(&["Y"]));

        assert_eq!(result.unmatched, ids(&["X", "X"]));
        assert_eq!(result.matched, ids(&["Y"]));
        assert!(result.unprocessed.is_empty());
    }

    #[test]
    fn test_unprocessed_keeps_comparison_order() {
        let reference = ids(&["571=A", "571=B"]);
        let comparison = ids(&["571=Z", "571=B", "571=Y", "571=Z"]);

        let result = reconcile(&reference, &comparison);

        assert_eq!(result.unmatched, ids(&["571=A"]));
        assert_eq!(result.matched, ids(&["571=B"]));
        assert_eq!(result.unprocessed, ids(&["571=Z", "571=Y", "571=Z"]));
    }

    #[test]
    fn test_matched_and_unmatched_partition_reference() {
        let reference = ids(&["a", "b", "c", "d", "b", "e"]);
        let comparison = ids(&["b", "e", "x", "a"]);

        let result = reconcile(&reference, &comparison);

        assert_eq!(
            result.matched.len() + result.unmatched.len(),
            reference.len()
        );
        for item in &reference {
            let in_matched = result.matched.contains(item);
            let in_unmatched = result.unmatched.contains(item);
            assert!(in_matched ^ in_unmatched, "{} must be in exactly one bucket", item);
        }
        for item in result.matched.iter().chain(result.unmatched.iter()) {
            assert!(reference.contains(item));
        }
    }

    #[test]
    fn test_unprocessed_only_contains_unaccounted_comparison_items() {
        let reference = ids(&["a", "b"]);
        let comparison = ids(&["b", "c", "d"]);

        let result = reconcile(&reference, &comparison);

        for item in &result.unprocessed {
            assert!(comparison.contains(item));
            assert!(!result.matched.contains(item));
            assert!(!result.unmatched.contains(item));
        }
        assert_eq!(result.unprocessed, ids(&["c", "d"]));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let reference = ids(&["a", "b", "a", "c"]);
        let comparison = ids(&["c", "d", "a"]);

        assert_eq!(
            reconcile(&reference, &comparison),
            reconcile(&reference, &comparison)
        );
    }

    #[test]
    fn test_empty_inputs() {
        let empty: RecordSet = Vec::new();

        let result = reconcile(&empty, &empty);
        assert_eq!(result, Reconciliation::default());

        let only_comparison = reconcile(&empty, &ids(&["a"]));
        assert!(only_comparison.unmatched.is_empty());
        assert!(only_comparison.matched.is_empty());
        assert_eq!(only_comparison.unprocessed, ids(&["a"]));

        let only_reference = reconcile(&ids(&["a"]), &empty);
        assert_eq!(only_reference.unmatched, ids(&["a"]));
        assert!(only_reference.unprocessed.is_empty());
    }

    #[test]
    fn test_duplicates_use_presence_not_count() {
        // comparison 只有一個 "a"，reference 的兩個 "a" 都算 matched
        let result = reconcile(&ids(&["a", "a"]), &ids(&["a"]));
        assert_eq!(result.matched, ids(&["a", "a"]));
        assert!(result.unprocessed.is_empty());
    }
}
