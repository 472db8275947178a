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

//! Outcome types produced by a finished exploration run.

use crate::stats::SearchStatistics;
use covermax_model::combination::Combination;
use num_traits::Float;
use std::fmt;

/// Why an exploration run stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// No candidate of the current round reached the required score.
    Exhausted,
    /// The configured maximum selection depth was reached.
    DepthLimitReached,
    /// A monitor requested termination with the given reason.
    Stopped(String),
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::Exhausted => write!(f, "search space exhausted"),
            TerminationReason::DepthLimitReached => write!(f, "depth limit reached"),
            TerminationReason::Stopped(reason) => write!(f, "stopped by monitor: {}", reason),
        }
    }
}

/// The result of a single completed round of the exploration.
#[derive(Debug, Clone)]
pub struct RoundSummary<'a, T>
where
    T: Float,
{
    depth: usize,
    best_score: usize,
    best: Vec<Combination<'a, T>>,
    near_best: Vec<Combination<'a, T>>,
}

impl<'a, T> RoundSummary<'a, T>
where
    T: Float,
{
    /// Creates a new `RoundSummary`.
    #[inline]
    pub fn new(
        depth: usize,
        best_score: usize,
        best: Vec<Combination<'a, T>>,
        near_best: Vec<Combination<'a, T>>,
    ) -> Self {
        Self {
            depth,
            best_score,
            best,
            near_best,
        }
    }

    /// Returns the selection depth of this round.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the best coverage score reached in this round.
    #[inline]
    pub fn best_score(&self) -> usize {
        self.best_score
    }

    /// Returns the combinations tied for the best score, in mask order.
    #[inline]
    pub fn best(&self) -> &[Combination<'a, T>] {
        &self.best
    }

    /// Returns the retained runner-up combinations, best first.
    #[inline]
    pub fn near_best(&self) -> &[Combination<'a, T>] {
        &self.near_best
    }
}

/// The complete outcome of an exploration run: one summary per round plus
/// aggregate statistics and the reason the run stopped.
#[derive(Debug)]
pub struct ExplorationOutcome<'a, T>
where
    T: Float,
{
    rounds: Vec<RoundSummary<'a, T>>,
    statistics: SearchStatistics,
    termination: TerminationReason,
}

impl<'a, T> ExplorationOutcome<'a, T>
where
    T: Float,
{
    /// Creates a new `ExplorationOutcome`.
    #[inline]
    pub fn new(
        rounds: Vec<RoundSummary<'a, T>>,
        statistics: SearchStatistics,
        termination: TerminationReason,
    ) -> Self {
        Self {
            rounds,
            statistics,
            termination,
        }
    }

    /// Returns the per-round summaries, shallowest depth first.
    #[inline]
    pub fn rounds(&self) -> &[RoundSummary<'a, T>] {
        &self.rounds
    }

    /// Returns the aggregate statistics of the run.
    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns the reason the run stopped.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination
    }

    /// Returns the summary of the deepest completed round, if any round
    /// completed at all.
    #[inline]
    pub fn final_round(&self) -> Option<&RoundSummary<'a, T>> {
        self.rounds.last()
    }
}
