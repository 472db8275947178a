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

//! # Explorer
//!
//! High-level driver that runs the round-by-round beam search to
//! completion and collects one summary per round.
//!
//! # Usage
//!
//! ```
//! use covermax_model::builder::MatrixBuilder;
//! use covermax_model::entity::{Product, Source};
//! use covermax_search::explorer::Explorer;
//! use covermax_search::monitor::no_op::NoOpMonitor;
//!
//! let mut builder = MatrixBuilder::new();
//! builder.declare_production(
//!     Source::new("A").unwrap(),
//!     Product::new("P1").unwrap(),
//!     1.0_f32,
//! );
//! builder.declare_production(
//!     Source::new("B").unwrap(),
//!     Product::new("P2").unwrap(),
//!     1.0_f32,
//! );
//! let matrix = builder.compile().unwrap();
//!
//! let explorer = Explorer::builder().build();
//! let mut monitor = NoOpMonitor::new();
//! let outcome = explorer.run(&matrix, &mut monitor);
//! assert_eq!(outcome.final_round().unwrap().depth(), 2);
//! ```

use crate::monitor::round_monitor::{RoundMonitor, SearchCommand};
use crate::result::{ExplorationOutcome, RoundSummary, TerminationReason};
use crate::state::SearchState;
use covermax_model::matrix::CoverageMatrix;
use num_traits::Float;
use std::time::Instant;

/// Builder for [`Explorer`].
#[derive(Debug, Clone, Default)]
pub struct ExplorerBuilder {
    max_depth: Option<usize>,
}

impl ExplorerBuilder {
    /// Creates a new `ExplorerBuilder` with no depth limit.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the exploration to combinations of at most `max_depth`
    /// sources.
    #[inline]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Finishes the builder.
    #[inline]
    pub fn build(self) -> Explorer {
        Explorer {
            max_depth: self.max_depth,
        }
    }
}

/// Drives the beam search round by round until it exhausts the search
/// space, hits the optional depth limit, or a monitor asks to stop.
#[derive(Debug, Clone)]
pub struct Explorer {
    max_depth: Option<usize>,
}

impl Explorer {
    /// Returns a builder for configuring an `Explorer`.
    #[inline]
    pub fn builder() -> ExplorerBuilder {
        ExplorerBuilder::new()
    }

    /// Returns the configured depth limit, if any.
    #[inline]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Runs the full exploration over the given matrix.
    ///
    /// Every completed round yields a [`RoundSummary`] with the best and
    /// near-best combinations of that depth. The monitor sees the state
    /// after each round and may terminate the run early.
    pub fn run<'a, T, M>(
        &self,
        matrix: &'a CoverageMatrix<T>,
        monitor: &mut M,
    ) -> ExplorationOutcome<'a, T>
    where
        T: Float,
        M: RoundMonitor<T> + ?Sized,
    {
        monitor.on_enter_search(matrix);
        let start_time = Instant::now();

        let mut state = SearchState::new(matrix);
        let mut rounds = Vec::new();
        let termination = loop {
            if let Some(max_depth) = self.max_depth {
                if state.depth() >= max_depth {
                    break TerminationReason::DepthLimitReached;
                }
            }
            if !state.advance() {
                break TerminationReason::Exhausted;
            }
            rounds.push(RoundSummary::new(
                state.depth(),
                state.best_score(),
                state.best_combinations(),
                state.near_best_combinations(),
            ));
            match monitor.on_round_complete(&state) {
                SearchCommand::Continue => {}
                SearchCommand::Terminate(reason) => {
                    break TerminationReason::Stopped(reason);
                }
            }
        };

        let mut statistics = state.statistics().clone();
        statistics.set_total_time(start_time.elapsed());
        monitor.on_exit_search(&statistics);

        ExplorationOutcome::new(rounds, statistics, termination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::depth_limit::DepthLimitMonitor;
    use crate::monitor::no_op::NoOpMonitor;
    use covermax_model::builder::MatrixBuilder;
    use covermax_model::entity::{Product, Source};

    fn build_matrix(entries: &[(&str, &str)]) -> CoverageMatrix<f32> {
        let mut builder = MatrixBuilder::new();
        for (source, product) in entries {
            builder.declare_production(
                Source::new(*source).unwrap(),
                Product::new(*product).unwrap(),
                1.0,
            );
        }
        builder.compile().unwrap()
    }

    #[test]
    fn test_run_to_exhaustion() {
        // B covers both products, so depth 2 adds nothing and the run
        // stops after a single productive round.
        let matrix = build_matrix(&[("A", "P1"), ("B", "P1"), ("B", "P2")]);
        let explorer = Explorer::builder().build();
        let mut monitor = NoOpMonitor::new();
        let outcome = explorer.run(&matrix, &mut monitor);

        assert_eq!(outcome.termination_reason(), &TerminationReason::Exhausted);
        assert_eq!(outcome.rounds().len(), 1);

        let round = outcome.final_round().unwrap();
        assert_eq!(round.depth(), 1);
        assert_eq!(round.best_score(), 2);
        assert_eq!(round.best().len(), 1);
        let best = &round.best()[0];
        let selected: Vec<&str> = best
            .selected_sources()
            .iter()
            .map(|source| source.name())
            .collect();
        assert_eq!(selected, vec!["B"]);
    }

    #[test]
    fn test_depth_limit_stops_run() {
        let matrix = build_matrix(&[("A", "P1"), ("B", "P2"), ("C", "P3"), ("D", "P4")]);
        let explorer = Explorer::builder().with_max_depth(2).build();
        let mut monitor = NoOpMonitor::new();
        let outcome = explorer.run(&matrix, &mut monitor);

        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::DepthLimitReached
        );
        assert_eq!(outcome.rounds().len(), 2);
        assert_eq!(outcome.final_round().unwrap().depth(), 2);
    }

    #[test]
    fn test_monitor_stop() {
        let matrix = build_matrix(&[("A", "P1"), ("B", "P2"), ("C", "P3"), ("D", "P4")]);
        let explorer = Explorer::builder().build();
        let mut monitor = DepthLimitMonitor::new(1);
        let outcome = explorer.run(&matrix, &mut monitor);

        assert!(matches!(
            outcome.termination_reason(),
            TerminationReason::Stopped(_)
        ));
        assert_eq!(outcome.rounds().len(), 1);
    }

    #[test]
    fn test_statistics_cover_all_rounds() {
        let matrix = build_matrix(&[("A", "P1"), ("B", "P2"), ("C", "P3")]);
        let explorer = Explorer::builder().build();
        let mut monitor = NoOpMonitor::new();
        let outcome = explorer.run(&matrix, &mut monitor);

        // Three disjoint sources: depth 3 covers all products, depth 4
        // does not exist, so the failed fourth round also counts.
        assert_eq!(outcome.rounds().len(), 3);
        assert_eq!(outcome.statistics().rounds, 4);
        assert!(outcome.statistics().candidates_generated > 0);
    }
}
