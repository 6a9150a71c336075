//! Result aggregator for ordering parallel solver results
//!
//! Workers finish in any order, but output is printed in (year, day, part)
//! order. Two min-heaps track what is still expected and what has arrived
//! early; a result is released as soon as everything before it is out.

use crate::executor::{SolverResult, WorkItem};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Key for ordering results (year, day, part) - ordered ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl ResultKey {
    pub fn new(year: u16, day: u8, part: u8) -> Self {
        Self { year, day, part }
    }

    /// One key per part of every work item
    pub fn for_work_items(work_items: &[WorkItem]) -> Vec<ResultKey> {
        work_items
            .iter()
            .flat_map(|w| w.parts.clone().map(move |part| Self::new(w.year, w.day, part)))
            .collect()
    }
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self::new(r.year, r.day, r.part)
    }
}

/// Min-heap entry ordered by the result's key
struct Pending(SolverResult);

impl Pending {
    fn key(&self) -> ResultKey {
        ResultKey::from(&self.0)
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // reversed: BinaryHeap is a max-heap
        other.key().cmp(&self.key())
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Pending {}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

/// Aggregator that buffers results and emits them in sorted order
pub struct ResultAggregator {
    expected: BinaryHeap<Reverse<ResultKey>>,
    pending: BinaryHeap<Pending>,
}

impl ResultAggregator {
    /// Create aggregator from list of expected keys
    pub fn new(expected_keys: Vec<ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().map(Reverse).collect(),
            pending: BinaryHeap::new(),
        }
    }

    /// Add a result and return any results ready for output (in order)
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.push(Pending(result));

        let mut ready = Vec::new();
        while let (Some(Reverse(next_expected)), Some(top_pending)) =
            (self.expected.peek(), self.pending.peek())
        {
            if top_pending.key() != *next_expected {
                break;
            }
            self.expected.pop();
            if let Some(Pending(result)) = self.pending.pop() {
                ready.push(result);
            }
        }
        ready
    }

    /// Drain remaining results in order (for final output)
    pub fn drain(&mut self) -> Vec<SolverResult> {
        let mut results: Vec<_> = self.pending.drain().map(|p| p.0).collect();
        results.sort_by_key(|r| ResultKey::from(r));
        results
    }

    /// Expected keys with no result yet, in order
    pub fn missing(&self) -> Vec<ResultKey> {
        let mut keys: Vec<_> = self.expected.iter().map(|Reverse(key)| *key).collect();
        keys.sort();
        keys
    }

    /// Check if all expected results have been received
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}
