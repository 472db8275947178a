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

//! # Covermax Model
//!
//! **The Core Domain Model for the Covermax Coverage Explorer.**
//!
//! This crate defines the data structures describing a bipartite
//! source-to-product production relation: which sources produce which
//! products, and in what amount. It serves as the data interchange layer
//! between data ingestion (`covermax-io`) and the beam-search engine
//! (`covermax-search`).
//!
//! ## Architecture
//!
//! The crate is designed around a strict separation of concerns between
//! **accumulation** and **querying**:
//!
//! * **`index`**: Strongly-typed wrappers (`SourceIndex`, `ProductIndex`) to
//!   prevent logical indexing errors between the two index spaces.
//! * **`entity`**: Name-keyed value objects (`Source`, `Product`) ordered by
//!   case-sensitive lexical name comparison.
//! * **`builder`**: The mutable `MatrixBuilder`, which collects sources,
//!   products, and accumulated production amounts from one or more inputs.
//! * **`matrix`**: The immutable `CoverageMatrix` produced by compilation,
//!   optimized for index-addressed reads and binary-search name lookup.
//! * **`combination`**: A read-only view selecting a subset of a matrix's
//!   sources with derived coverage statistics.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Source and product indices are distinct types and
//!     cannot be swapped accidentally.
//! 2.  **Fail-Fast**: Constructors validate their inputs eagerly and return
//!     descriptive errors; the search engine never sees an invalid matrix.
//! 3.  **Immutability After Compile**: a `CoverageMatrix` never changes once
//!     built, so it is freely shareable across threads, and every collection
//!     handed out by its accessors is a snapshot rather than an alias into
//!     internal state.

pub mod builder;
pub mod combination;
pub mod entity;
pub mod index;
pub mod matrix;
