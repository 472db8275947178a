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

use crate::monitor::round_monitor::RoundMonitor;
use crate::{state::SearchState, stats::SearchStatistics};
use covermax_model::matrix::CoverageMatrix;
use num_traits::Float;
use std::time::Instant;

/// A monitor printing one table row per completed round to stdout.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl LogMonitor {
    /// Creates a new `LogMonitor`.
    #[inline]
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    fn print_header(&self) {
        println!(
            "{:<9} | {:<6} | {:<10} | {:<6} | {:<10} | {:<10}",
            "Elapsed", "Depth", "Best Score", "Best", "Candidates", "Generated"
        );
        println!("{}", "-".repeat(66));
    }
}

impl<T> RoundMonitor<T> for LogMonitor
where
    T: Float,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, matrix: &CoverageMatrix<T>) {
        self.start_time = Instant::now();
        println!(
            "Exploring {} sources x {} products",
            matrix.num_sources(),
            matrix.num_products()
        );
        self.print_header();
    }

    fn on_round_complete(
        &mut self,
        state: &SearchState<'_, T>,
    ) -> crate::monitor::round_monitor::SearchCommand {
        let elapsed = format!("{:.1}s", self.start_time.elapsed().as_secs_f32());
        println!(
            "{:<9} | {:<6} | {:<10} | {:<6} | {:<10} | {:<10}",
            elapsed,
            state.depth(),
            state.best_score(),
            state.best_count(),
            state.candidate_count(),
            state.statistics().candidates_generated
        );
        crate::monitor::round_monitor::SearchCommand::Continue
    }

    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        println!("{}", statistics);
    }
}
