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

//! Fan-out monitor combinator.
//!
//! `CompositeMonitor` forwards every event to its children in insertion
//! order. `on_round_complete` short-circuits on the first non-`Continue`
//! response, so put stricter stop conditions first.

use crate::monitor::round_monitor::{RoundMonitor, SearchCommand};
use crate::{state::SearchState, stats::SearchStatistics};
use covermax_model::matrix::CoverageMatrix;
use num_traits::Float;

/// A monitor that aggregates multiple monitors and forwards events to all
/// of them.
pub struct CompositeMonitor<'a, T>
where
    T: Float,
{
    monitors: Vec<Box<dyn RoundMonitor<T> + 'a>>,
}

impl<'a, T> Default for CompositeMonitor<'a, T>
where
    T: Float,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeMonitor<'a, T>
where
    T: Float,
{
    /// Creates a new, empty `CompositeMonitor`.
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Adds a monitor to the composite.
    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: RoundMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the composite.
    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn RoundMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the number of aggregated monitors.
    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if no monitors are aggregated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> RoundMonitor<T> for CompositeMonitor<'a, T>
where
    T: Float,
{
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, matrix: &CoverageMatrix<T>) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(matrix);
        }
    }

    fn on_round_complete(&mut self, state: &SearchState<'_, T>) -> SearchCommand {
        for monitor in &mut self.monitors {
            match monitor.on_round_complete(state) {
                SearchCommand::Continue => {}
                terminate => return terminate,
            }
        }
        SearchCommand::Continue
    }

    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }
}
