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

//! Monitor that stops the exploration at a fixed selection depth.

use crate::monitor::round_monitor::{RoundMonitor, SearchCommand};
use crate::state::SearchState;
use num_traits::Float;

/// Terminates the search once the round depth reaches `max_depth`.
///
/// Useful when combinations beyond a certain size are not of interest,
/// for example when at most five sources can be deployed at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthLimitMonitor {
    max_depth: usize,
}

impl DepthLimitMonitor {
    /// Creates a new `DepthLimitMonitor` with the given depth limit.
    #[inline]
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Returns the configured depth limit.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl<T> RoundMonitor<T> for DepthLimitMonitor
where
    T: Float,
{
    fn name(&self) -> &str {
        "DepthLimitMonitor"
    }

    fn on_round_complete(&mut self, state: &SearchState<'_, T>) -> SearchCommand {
        if state.depth() >= self.max_depth {
            SearchCommand::Terminate("depth limit reached".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covermax_model::builder::MatrixBuilder;
    use covermax_model::entity::{Product, Source};

    #[test]
    fn test_terminates_at_limit() {
        let mut builder = MatrixBuilder::new();
        for (source, product) in [("A", "P1"), ("B", "P2"), ("C", "P3")] {
            builder.declare_production(
                Source::new(source).unwrap(),
                Product::new(product).unwrap(),
                1.0_f32,
            );
        }
        let matrix = builder.compile().unwrap();
        let mut state = crate::state::SearchState::new(&matrix);
        let mut monitor = DepthLimitMonitor::new(2);

        assert!(state.advance());
        assert!(matches!(
            monitor.on_round_complete(&state),
            SearchCommand::Continue
        ));

        assert!(state.advance());
        assert!(matches!(
            monitor.on_round_complete(&state),
            SearchCommand::Terminate(_)
        ));
    }
}
