// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Bounded candidate retention between search rounds.
//!
//! The `CandidateBuffer` is the beam of the search: an approximate top-K
//! container holding the near-best frontier of one round so the next round
//! can grow it. It keeps entries sorted ascending by score, admits nothing
//! below the current floor, rejects exact duplicates (identical selection
//! masks, not merely equal scores), and evicts the lowest-scoring entry
//! once capacity is exceeded. Bounding the beam is what keeps the search
//! from exploring the full power set.

use crate::candidate::Candidate;
use fixedbitset::FixedBitSet;
use rustc_hash::FxHashSet;

/// A capacity-limited, score-sorted, de-duplicating candidate container.
///
/// # Examples
///
/// ```rust
/// use covermax_search::buffer::CandidateBuffer;
/// use covermax_search::candidate::Candidate;
/// use covermax_model::index::SourceIndex;
/// use fixedbitset::FixedBitSet;
///
/// let mut buffer = CandidateBuffer::new(4);
/// buffer.reset_floor(1);
///
/// let mut row = FixedBitSet::with_capacity(2);
/// row.insert(0);
/// let candidate = Candidate::root(2, 2).extended(SourceIndex::new(0), &row);
/// assert!(buffer.offer(&candidate));
/// assert!(!buffer.offer(&candidate)); // exact duplicate
/// assert_eq!(buffer.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CandidateBuffer {
    entries: Vec<Candidate>, // sorted ascending by score
    seen: FxHashSet<FixedBitSet>,
    capacity: usize,
    floor: usize,
}

impl CandidateBuffer {
    /// Creates an empty buffer retaining at most `capacity` candidates.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "candidate buffer needs room for at least one entry");
        Self {
            entries: Vec::with_capacity(capacity + 1),
            seen: FxHashSet::default(),
            capacity,
            floor: 0,
        }
    }

    /// Returns the fixed capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current admission floor.
    #[inline]
    pub fn floor(&self) -> usize {
        self.floor
    }

    /// Returns the current number of retained candidates.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no candidates are retained.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears all contents and sets a new admission floor. Subsequent
    /// offers below `min_score` are rejected outright.
    pub fn reset_floor(&mut self, min_score: usize) {
        self.floor = min_score;
        self.entries.clear();
        self.seen.clear();
    }

    /// Offers a candidate for retention. Returns `true` iff the candidate
    /// ends up retained.
    ///
    /// Rejection cases, in order: score below the floor; a candidate with
    /// an identical selection mask already present; buffer at capacity with
    /// the new candidate scoring strictly below every retained entry. An
    /// accepted candidate is inserted at its sorted position (after entries
    /// with equal score), and if that pushes the buffer past capacity the
    /// lowest-scoring entry is evicted.
    ///
    /// # Panics
    ///
    /// Panics if the buffer already holds more than `capacity` entries;
    /// that state is unreachable under correct bookkeeping and indicates a
    /// bug in the scoring or insertion logic.
    pub fn offer(&mut self, candidate: &Candidate) -> bool {
        assert!(
            self.entries.len() <= self.capacity,
            "candidate buffer holds {} entries, capacity is {}",
            self.entries.len(),
            self.capacity
        );

        let score = candidate.score();
        if score < self.floor {
            return false;
        }
        if self.seen.contains(candidate.mask()) {
            return false;
        }

        // First slot whose entry scores strictly higher; ties go before it.
        let index = self.entries.partition_point(|entry| entry.score() <= score);
        if index == 0 && self.entries.len() == self.capacity {
            // Strictly below every retained entry and no room left.
            return false;
        }

        self.entries.insert(index, candidate.clone());
        self.seen.insert(candidate.mask().clone());

        if self.entries.len() > self.capacity {
            let evicted = self.entries.remove(0);
            self.seen.remove(evicted.mask());
        }

        true
    }

    /// Returns the retained candidates in ascending score order. The result
    /// is a snapshot; mutating it does not touch the buffer.
    #[inline]
    pub fn snapshot(&self) -> Vec<Candidate> {
        self.entries.clone()
    }
}
