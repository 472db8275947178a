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

use crate::{state::SearchState, stats::SearchStatistics};
use covermax_model::matrix::CoverageMatrix;
use num_traits::Float;

/// Verdict a monitor returns after a completed round.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    /// Keep exploring.
    #[default]
    Continue,
    /// Stop the exploration, with a human-readable reason.
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Trait for observing and controlling an exploration run.
///
/// Callbacks take `&mut self`; monitors are assumed single-threaded. Keep
/// them lightweight, as `on_round_complete` sits between search rounds.
pub trait RoundMonitor<T>
where
    T: Float,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called once before the first round.
    fn on_enter_search(&mut self, _matrix: &CoverageMatrix<T>) {}

    /// Called after every completed round. Returning
    /// `SearchCommand::Terminate` stops the exploration before the next
    /// round starts.
    fn on_round_complete(&mut self, _state: &SearchState<'_, T>) -> SearchCommand {
        SearchCommand::Continue
    }

    /// Called once after the search ends, successful or stopped.
    fn on_exit_search(&mut self, _statistics: &SearchStatistics) {}
}

impl<T> std::fmt::Debug for dyn RoundMonitor<T> + '_
where
    T: Float,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RoundMonitor({})", self.name())
    }
}
