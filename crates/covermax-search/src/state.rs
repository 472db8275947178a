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

//! The round-by-round beam search state machine.
//!
//! `SearchState` walks combination sizes incrementally: round k builds every
//! k-source combination reachable by adding one source to a seed from round
//! k-1, retains a bounded near-best buffer of them, and tracks the set of
//! combinations tied at the round's maximum score as "best". Each round
//! requires coverage to improve by at least one product over the previous
//! round's best; the first round where no candidate clears that bar ends
//! the search. The required improvement is a fixed policy of the tool this
//! engine reproduces, not a derived bound.
//!
//! Every step is synchronous, CPU-bound bitset work. Callers that want a
//! responsive UI run each `advance` on a background task; the state itself
//! needs no awareness of that.

use crate::{buffer::CandidateBuffer, candidate::Candidate, stats::SearchStatistics};
use covermax_model::{combination::Combination, index::SourceIndex, matrix::CoverageMatrix};
use num_traits::Float;
use std::collections::BTreeSet;

/// Maximum number of candidates retained between rounds:
/// `floor(n * ln(n + e))` for `n` sources. A heuristic width that grows
/// slowly with problem size, trading completeness for bounded memory and
/// time; a tunable constant rather than a correctness requirement.
///
/// # Examples
///
/// ```rust
/// use covermax_search::state::beam_capacity;
///
/// assert_eq!(beam_capacity(1), 1);
/// assert_eq!(beam_capacity(10), 25);
/// ```
#[inline]
pub fn beam_capacity(num_sources: usize) -> usize {
    let n = num_sources as f64;
    (n * (n + std::f64::consts::E).ln()) as usize
}

/// Incremental beam search over source combinations of growing size.
///
/// # Examples
///
/// ```rust
/// use covermax_model::builder::MatrixBuilder;
/// use covermax_model::entity::{Product, Source};
/// use covermax_search::state::SearchState;
///
/// let mut builder = MatrixBuilder::<f32>::new();
/// builder.declare_production(Source::new("A").unwrap(), Product::new("P1").unwrap(), 1.0);
/// builder.declare_production(Source::new("B").unwrap(), Product::new("P1").unwrap(), 1.0);
/// builder.declare_production(Source::new("B").unwrap(), Product::new("P2").unwrap(), 1.0);
/// let matrix = builder.compile().unwrap();
///
/// let mut state = SearchState::new(&matrix);
/// assert!(state.advance());
/// assert_eq!(state.depth(), 1);
/// assert_eq!(state.best_score(), 2); // {B} covers both products
/// assert!(!state.advance()); // adding A cannot improve coverage
/// ```
#[derive(Debug, Clone)]
pub struct SearchState<'a, T>
where
    T: Float,
{
    matrix: &'a CoverageMatrix<T>,
    depth: usize,
    best_score: usize,
    best: BTreeSet<Candidate>, // mask-ordered, all tied at best_score
    buffer: CandidateBuffer,
    stats: SearchStatistics,
}

impl<'a, T> SearchState<'a, T>
where
    T: Float,
{
    /// Creates a fresh search over the given matrix at depth zero. The
    /// matrix is guaranteed non-empty by compilation, so there is no
    /// failure mode here.
    pub fn new(matrix: &'a CoverageMatrix<T>) -> Self {
        Self {
            matrix,
            depth: 0,
            best_score: 0,
            best: BTreeSet::new(),
            buffer: CandidateBuffer::new(beam_capacity(matrix.num_sources())),
            stats: SearchStatistics::default(),
        }
    }

    /// Returns the matrix this search runs over.
    #[inline]
    pub fn matrix(&self) -> &'a CoverageMatrix<T> {
        self.matrix
    }

    /// Returns the current depth (sources per combination, rounds run).
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the best coverage score achieved by any completed round.
    /// A failed final round leaves this value at the last achieved score.
    #[inline]
    pub fn best_score(&self) -> usize {
        self.best_score
    }

    /// Returns the number of combinations tied at the latest round's best
    /// score.
    #[inline]
    pub fn best_count(&self) -> usize {
        self.best.len()
    }

    /// Returns the number of near-best candidates currently retained for
    /// the next round.
    #[inline]
    pub fn candidate_count(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the statistics collected so far.
    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.stats
    }

    /// Runs one round of beam expansion: grows every seed combination by
    /// each not-yet-selected source, refreshes the near-best buffer, and
    /// rebuilds the "best" set.
    ///
    /// Returns `true` iff some combination of the new depth improved
    /// coverage by at least one product over the previous round's best;
    /// `false` signals that callers should stop iterating. The search
    /// always terminates within `num_sources` rounds, since every source is
    /// eventually exhausted as a candidate to add.
    pub fn advance(&mut self) -> bool {
        let seeds = if self.depth == 0 {
            vec![Candidate::root(
                self.matrix.num_sources(),
                self.matrix.num_products(),
            )]
        } else {
            self.buffer.snapshot()
        };

        self.best.clear();
        self.depth += 1;
        // Fixed policy: each extra source must buy at least one product.
        // The floor stays separate from best_score so a failed final round
        // does not inflate the reported best.
        let mut round_best = self.best_score + 1;
        self.buffer.reset_floor(round_best);

        for seed in &seeds {
            for source_index in 0..self.matrix.num_sources() {
                let source_index = SourceIndex::new(source_index);
                if seed.contains_source(source_index) {
                    continue;
                }
                let candidate = seed.extended(source_index, self.matrix.row(source_index));
                self.stats.on_candidate_generated();

                // Do not pre-filter by score here: near-best combinations
                // below the current maximum still belong in the buffer.
                let score = candidate.score();
                if self.buffer.offer(&candidate) {
                    self.stats.on_candidate_retained();
                    if score >= round_best {
                        if score > round_best {
                            self.best.clear();
                            round_best = score;
                        }
                        self.best.insert(candidate);
                    }
                }
            }
        }

        self.stats.on_round_completed();
        if self.best.is_empty() {
            // Failed round: best_score keeps the last achieved value.
            return false;
        }
        self.best_score = round_best;
        self.stats.set_best_score(self.best_score as u64);
        true
    }

    /// Returns the combinations tied at the latest round's best score, in
    /// selection-mask order. Each call builds fresh `Combination` values;
    /// the internal sets stay untouched.
    pub fn best_combinations(&self) -> Vec<Combination<'a, T>> {
        self.best
            .iter()
            .map(|candidate| {
                Combination::from_mask(self.matrix, candidate.mask().clone())
                    .expect("search masks match the matrix dimensions")
            })
            .collect()
    }

    /// Returns the near-best combinations currently retained, best first.
    /// Typically a superset of the best set, scored at or above the
    /// round's floor but not all at the maximum.
    pub fn near_best_combinations(&self) -> Vec<Combination<'a, T>> {
        self.buffer
            .snapshot()
            .iter()
            .rev()
            .map(|candidate| {
                Combination::from_mask(self.matrix, candidate.mask().clone())
                    .expect("search masks match the matrix dimensions")
            })
            .collect()
    }
}
