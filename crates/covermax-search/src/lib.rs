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

//! # Covermax Search
//!
//! Incremental beam search over source combinations. Exploring the full
//! power set of sources is exponential, so the engine walks combination
//! sizes one at a time: each round extends the previous round's near-best
//! frontier by a single source, keeps the combinations tied at the round's
//! maximum coverage as "best", and retains a bounded, score-sorted buffer of
//! near-best candidates as seeds for the next round.
//!
//! ## Modules
//!
//! - `candidate`: the search frontier entry pairing a selection mask with
//!   its memoized coverage mask and cached score.
//! - `buffer`: the bounded, de-duplicating, score-sorted candidate buffer
//!   that acts as both pruning filter and next-round seed pool.
//! - `state`: the round-by-round `SearchState` with its `advance` step.
//! - `explorer`: a high-level driver that runs rounds to completion under a
//!   pluggable monitor.
//! - `monitor`: progress observation and early-stop control.
//! - `stats`: counters collected across rounds.
//! - `result`: per-round summaries and the final exploration outcome.

pub mod buffer;
pub mod candidate;
pub mod explorer;
pub mod monitor;
pub mod result;
pub mod state;
pub mod stats;
