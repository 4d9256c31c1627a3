// outcome.rs - Success-or-failure result of one search, with union.

use std::collections::HashSet;

use tracing::debug;

use crate::error::SearchError;
use crate::sort::hybrid_sort_by_key;

/// Common view of the records a search yields.
pub trait TagRecord {
    /// Position of the opening literal; identifies the record in a union.
    fn start_index(&self) -> usize;

    /// Position of the closing literal.
    fn end_index(&self) -> usize;

    /// Whether the record carries what its kind requires (an anchor needs an
    /// `href`; a generic tag is always valid).
    fn is_valid(&self) -> bool;
}

/// Message used when a failure is reported without one.
const UNSPECIFIED_FAILURE: &str = "search failed without a message";

/// Either the records of a search or the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<T> {
    Found(Vec<T>),
    /// Non-empty failure message.
    Failed(String),
}

impl<T> SearchOutcome<T> {
    /// A failed outcome. A blank message is replaced by a generic one.
    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            SearchOutcome::Failed(UNSPECIFIED_FAILURE.to_owned())
        } else {
            SearchOutcome::Failed(message)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn records(&self) -> Option<&[T]> {
        match self {
            SearchOutcome::Found(records) => Some(records),
            SearchOutcome::Failed(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SearchOutcome::Found(_) => None,
            SearchOutcome::Failed(message) => Some(message),
        }
    }

    /// Convert every record, keeping a failure as is.
    pub fn map_records<U, F>(self, f: F) -> SearchOutcome<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            SearchOutcome::Found(records) => SearchOutcome::Found(records.into_iter().map(f).collect()),
            SearchOutcome::Failed(message) => SearchOutcome::Failed(message),
        }
    }

    /// The records, or [`SearchError::Failed`] carrying the message.
    pub fn into_result(self) -> Result<Vec<T>, SearchError> {
        match self {
            SearchOutcome::Found(records) => Ok(records),
            SearchOutcome::Failed(message) => Err(SearchError::Failed { message }),
        }
    }
}

impl<T: TagRecord> SearchOutcome<T> {
    /// Combine two outcomes.
    ///
    /// Two successes merge their records, keeping the first record seen for
    /// each start position. Two failures join their messages with `". "`.
    /// When a success meets a failure, the success wins if it has records;
    /// an empty success carries nothing and yields to the failure.
    pub fn union(self, other: SearchOutcome<T>) -> SearchOutcome<T> {
        match (self, other) {
            (SearchOutcome::Found(first), SearchOutcome::Found(second)) => {
                let mut seen = HashSet::with_capacity(first.len() + second.len());
                let records = first
                    .into_iter()
                    .chain(second)
                    .filter(|record| seen.insert(record.start_index()))
                    .collect();
                SearchOutcome::Found(records)
            }
            (SearchOutcome::Failed(first), SearchOutcome::Failed(second)) => {
                SearchOutcome::Failed(format!("{}. {}", first, second))
            }
            (SearchOutcome::Failed(message), SearchOutcome::Found(records))
            | (SearchOutcome::Found(records), SearchOutcome::Failed(message)) => {
                if records.is_empty() {
                    SearchOutcome::Failed(message)
                } else {
                    debug!(
                        %message,
                        kept = records.len(),
                        "union dropped a failure in favour of found records"
                    );
                    SearchOutcome::Found(records)
                }
            }
        }
    }

    /// Order the records by start position.
    pub fn sort_by_start(&mut self)
    where
        T: Clone,
    {
        if let SearchOutcome::Found(records) = self {
            hybrid_sort_by_key(records, |record| record.start_index());
        }
    }

    /// Drop records that are not valid for their kind.
    pub fn retain_valid(&mut self) {
        if let SearchOutcome::Found(records) = self {
            records.retain(|record| record.is_valid());
        }
    }
}

impl<T> From<Result<Vec<T>, SearchError>> for SearchOutcome<T> {
    fn from(result: Result<Vec<T>, SearchError>) -> Self {
        match result {
            Ok(records) => SearchOutcome::Found(records),
            Err(err) => SearchOutcome::failed(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Rec(usize, &'static str);

    impl TagRecord for Rec {
        fn start_index(&self) -> usize {
            self.0
        }

        fn end_index(&self) -> usize {
            self.0 + 1
        }

        fn is_valid(&self) -> bool {
            !self.1.is_empty()
        }
    }

    #[test]
    fn union_deduplicates_by_start() {
        let lower = SearchOutcome::Found(vec![Rec(0, "a"), Rec(10, "b")]);
        let upper = SearchOutcome::Found(vec![Rec(10, "B"), Rec(5, "C")]);
        let merged = lower.union(upper);
        assert_eq!(merged.records().unwrap(), [Rec(0, "a"), Rec(10, "b"), Rec(5, "C")]);
    }

    #[test]
    fn union_of_failures_joins_messages() {
        let merged: SearchOutcome<Rec> =
            SearchOutcome::failed("first").union(SearchOutcome::failed("second"));
        assert_eq!(merged.error_message(), Some("first. second"));
        assert!(!merged.is_success());
    }

    #[test]
    fn found_records_survive_a_failure() {
        let ok = SearchOutcome::Found(vec![Rec(1, "a")]);
        let merged = ok.clone().union(SearchOutcome::failed("broken"));
        assert_eq!(merged, ok);
        let merged = SearchOutcome::failed("broken").union(ok.clone());
        assert_eq!(merged, ok);
    }

    #[test]
    fn empty_success_yields_to_failure() {
        let empty: SearchOutcome<Rec> = SearchOutcome::Found(Vec::new());
        let merged = SearchOutcome::failed("broken").union(empty.clone());
        assert_eq!(merged, SearchOutcome::Failed("broken".into()));
        let merged = empty.union(SearchOutcome::failed("broken"));
        assert_eq!(merged.error_message(), Some("broken"));
    }

    #[test]
    fn blank_failure_gets_a_message() {
        let outcome: SearchOutcome<Rec> = SearchOutcome::failed("  ");
        assert_eq!(outcome.error_message(), Some(UNSPECIFIED_FAILURE));
    }

    #[test]
    fn sort_and_filter() {
        let mut outcome = SearchOutcome::Found(vec![Rec(9, "x"), Rec(0, ""), Rec(4, "y")]);
        outcome.sort_by_start();
        assert_eq!(outcome.records().unwrap(), [Rec(0, ""), Rec(4, "y"), Rec(9, "x")]);
        outcome.retain_valid();
        assert_eq!(outcome.records().unwrap(), [Rec(4, "y"), Rec(9, "x")]);
    }

    #[test]
    fn into_result_and_back() {
        let failed: SearchOutcome<Rec> = SearchOutcome::failed("bad");
        assert_eq!(
            failed.into_result(),
            Err(SearchError::Failed { message: "bad".into() })
        );

        let outcome: SearchOutcome<Rec> = Err(SearchError::markup("<a", "</a>", 2, 1)).into();
        assert_eq!(
            outcome.error_message(),
            Some("invalid markup: 2 `<a` openers vs 1 `</a>` closers")
        );
    }
}
