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

use std::time::Duration;

/// Statistics collected while the beam search runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchStatistics {
    /// Rounds completed so far (equals the current search depth).
    pub rounds: u64,
    /// Candidates built by extending a seed with one source.
    pub candidates_generated: u64,
    /// Candidates actually retained by the buffer.
    pub candidates_retained: u64,
    /// Best coverage score achieved by any completed round, not the
    /// admission floor. A failed final round does not change it.
    pub best_score: u64,
    /// Total wall-clock time spent exploring.
    pub time_total: Duration,
}

impl SearchStatistics {
    #[inline]
    pub fn on_round_completed(&mut self) {
        self.rounds = self.rounds.saturating_add(1);
    }

    #[inline]
    pub fn on_candidate_generated(&mut self) {
        self.candidates_generated = self.candidates_generated.saturating_add(1);
    }

    #[inline]
    pub fn on_candidate_retained(&mut self) {
        self.candidates_retained = self.candidates_retained.saturating_add(1);
    }

    #[inline]
    pub fn set_best_score(&mut self, score: u64) {
        self.best_score = score;
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchStatistics(rounds: {}, generated: {}, retained: {}, best score: {}, time: {:.3}s)",
            self.rounds,
            self.candidates_generated,
            self.candidates_retained,
            self.best_score,
            self.time_total.as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = SearchStatistics::default();
        stats.on_round_completed();
        stats.on_candidate_generated();
        stats.on_candidate_generated();
        stats.on_candidate_retained();
        stats.set_best_score(7);
        assert_eq!(stats.rounds, 1);
        assert_eq!(stats.candidates_generated, 2);
        assert_eq!(stats.candidates_retained, 1);
        assert_eq!(stats.best_score, 7);
    }

    #[test]
    fn test_display_mentions_rounds() {
        let stats = SearchStatistics::default();
        assert!(format!("{}", stats).contains("rounds: 0"));
    }
}
