use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A candidate with its computed compatibility score.
///
/// Ordering is total: higher score ranks higher, and among equal scores the
/// lexicographically smaller user key ranks higher. This is what makes the
/// final top-K output reproducible regardless of worker completion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCandidate {
    pub user_key: String,
    pub score: u8,
}

impl Ord for RankedCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| other.user_key.cmp(&self.user_key))
    }
}

impl PartialOrd for RankedCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Bounded selection of the K best candidates seen so far.
///
/// Internally a min-heap of capacity `k`: the weakest retained candidate
/// sits at the top and is evicted when a stronger one arrives. Callers that
/// share a selection across workers must wrap it in a mutex so that the
/// capacity check and the insert happen as one atomic step.
#[derive(Debug)]
pub struct TopSelection {
    capacity: usize,
    heap: BinaryHeap<Reverse<RankedCandidate>>,
}

impl TopSelection {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1)),
        }
    }

    /// Offer a candidate: insert while below capacity, otherwise replace
    /// the current minimum only if the candidate outranks it.
    pub fn offer(&mut self, candidate: RankedCandidate) {
        if self.capacity == 0 {
            return;
        }
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(candidate));
            return;
        }
        // peek() is Some here: capacity > 0 and the heap is full
        let outranks_weakest = self
            .heap
            .peek()
            .map_or(false, |weakest| candidate > weakest.0);
        if outranks_weakest {
            self.heap.pop();
            self.heap.push(Reverse(candidate));
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drain into a vector sorted best-first: descending by score, equal
    /// scores ascending by user key.
    pub fn into_ranked(self) -> Vec<RankedCandidate> {
        let mut ranked: Vec<RankedCandidate> =
            self.heap.into_iter().map(|Reverse(c)| c).collect();
        ranked.sort_by(|a, b| b.cmp(a));
        ranked
    }
}
