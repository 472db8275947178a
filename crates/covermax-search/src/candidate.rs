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

//! Search frontier entries.
//!
//! A `Candidate` pairs a selection mask over source indices with the
//! coverage mask it implies and a cached score (the popcount of the
//! coverage mask, i.e. the number of distinct covered products). Candidates
//! are built incrementally: extending one by a single source is a mask
//! clone, one bit set, and one bitset union, so the inner search loop never
//! recomputes coverage from scratch.
//!
//! Identity is the selection mask alone. Ordering compares masks bit by
//! bit, most significant source (index 0) first, so identical masks compare
//! equal and duplicate detection costs O(sources) per comparison.

use covermax_model::index::SourceIndex;
use fixedbitset::FixedBitSet;
use std::cmp::Ordering;

/// A selection mask, its coverage mask, and the cached coverage score.
#[derive(Debug, Clone)]
pub struct Candidate {
    mask: FixedBitSet,     // one bit per source index
    coverage: FixedBitSet, // one bit per product index
    score: usize,          // == coverage.count_ones(..)
}

impl Candidate {
    /// Creates the empty candidate: nothing selected, nothing covered.
    #[inline]
    pub fn root(num_sources: usize, num_products: usize) -> Self {
        Self {
            mask: FixedBitSet::with_capacity(num_sources),
            coverage: FixedBitSet::with_capacity(num_products),
            score: 0,
        }
    }

    /// Builds a new candidate by adding one source: the selection gains the
    /// source's bit and the coverage gains the source's production row.
    #[inline]
    pub fn extended(&self, source_index: SourceIndex, row: &FixedBitSet) -> Self {
        debug_assert!(source_index.get() < self.mask.len());
        debug_assert_eq!(row.len(), self.coverage.len());
        debug_assert!(!self.mask.contains(source_index.get()));

        let mut mask = self.mask.clone();
        mask.insert(source_index.get());
        let mut coverage = self.coverage.clone();
        coverage.union_with(row);
        let score = coverage.count_ones(..);

        Self {
            mask,
            coverage,
            score,
        }
    }

    /// Returns the number of distinct products this candidate covers.
    #[inline]
    pub fn score(&self) -> usize {
        self.score
    }

    /// Returns the selection mask over source indices.
    #[inline]
    pub fn mask(&self) -> &FixedBitSet {
        &self.mask
    }

    /// Returns the coverage mask over product indices.
    #[inline]
    pub fn coverage(&self) -> &FixedBitSet {
        &self.coverage
    }

    /// Returns `true` iff the given source is already selected.
    #[inline]
    pub fn contains_source(&self, source_index: SourceIndex) -> bool {
        self.mask.contains(source_index.get())
    }

    /// Returns the number of selected sources.
    #[inline]
    pub fn selected_count(&self) -> usize {
        self.mask.count_ones(..)
    }
}

impl PartialEq for Candidate {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.mask == other.mask
    }
}

impl Eq for Candidate {}

impl std::hash::Hash for Candidate {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.mask.hash(state);
    }
}

impl PartialOrd for Candidate {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert_eq!(self.mask.len(), other.mask.len());
        for index in 0..self.mask.len() {
            match (self.mask.contains(index), other.mask.contains(index)) {
                (true, false) => return Ordering::Greater,
                (false, true) => return Ordering::Less,
                _ => {}
            }
        }
        Ordering::Equal
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Candidate(sources: {}, score: {})",
            self.selected_count(),
            self.score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(num_products: usize, bits: &[usize]) -> FixedBitSet {
        let mut row = FixedBitSet::with_capacity(num_products);
        for &bit in bits {
            row.insert(bit);
        }
        row
    }

    #[test]
    fn test_root_is_empty() {
        let root = Candidate::root(4, 6);
        assert_eq!(root.score(), 0);
        assert_eq!(root.selected_count(), 0);
    }

    #[test]
    fn test_extended_unions_coverage() {
        let root = Candidate::root(3, 4);
        let a = root.extended(SourceIndex::new(0), &row(4, &[0, 1]));
        assert_eq!(a.score(), 2);
        assert!(a.contains_source(SourceIndex::new(0)));

        // Overlapping row: only the new product raises the score.
        let ab = a.extended(SourceIndex::new(1), &row(4, &[1, 3]));
        assert_eq!(ab.score(), 3);
        assert_eq!(ab.selected_count(), 2);
    }

    #[test]
    fn test_identity_is_the_mask() {
        let root = Candidate::root(3, 4);
        // Same mask reached through different rows still compares equal.
        let left = root.extended(SourceIndex::new(1), &row(4, &[0]));
        let right = root.extended(SourceIndex::new(1), &row(4, &[0]));
        assert_eq!(left, right);
        assert_eq!(left.cmp(&right), Ordering::Equal);
    }

    #[test]
    fn test_ordering_most_significant_source_first() {
        let root = Candidate::root(3, 4);
        let first = root.extended(SourceIndex::new(0), &row(4, &[0]));
        let second = root.extended(SourceIndex::new(1), &row(4, &[0, 1, 2]));
        // Source 0 outranks source 1 regardless of score.
        assert!(first > second);
        let both = first.extended(SourceIndex::new(1), &row(4, &[1]));
        assert!(both > first);
    }
}
