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

//! The immutable, compiled form of the production relation.
//!
//! A `CoverageMatrix` is the fast, read-only storage the search engine and
//! all presentation consumers work on. Sources and products occupy fixed,
//! name-sorted index spaces; presence is one bitset row per source and the
//! numeric amounts live in a single flattened vector for cache locality.
//!
//! Presence and amount are deliberately independent fields: an amount of
//! exactly zero still counts as "produced" when it was declared upstream,
//! while the default zero at unset cells is never read as a production
//! signal. Once built, the matrix never changes, which makes it safe to
//! share read-only across threads.

use crate::{
    entity::{Product, Source},
    index::{ProductIndex, SourceIndex},
};
use fixedbitset::FixedBitSet;
use num_traits::Float;

/// Immutable, index-addressable view of a compiled production relation.
///
/// Built once via `MatrixBuilder::compile`; all accessors are read-only and
/// every returned collection is a snapshot, never an alias into internal
/// state.
///
/// # Examples
///
/// ```rust
/// use covermax_model::builder::MatrixBuilder;
/// use covermax_model::entity::{Product, Source};
///
/// let mut builder = MatrixBuilder::<f32>::new();
/// builder.declare_production(
///     Source::new("A").unwrap(),
///     Product::new("P1").unwrap(),
///     4.0,
/// );
/// let matrix = builder.compile().unwrap();
///
/// let si = matrix.index_of_source("A").unwrap();
/// let pi = matrix.index_of_product("P1").unwrap();
/// assert!(matrix.produces(si, pi));
/// assert_eq!(matrix.value(si, pi), 4.0);
/// assert!(matrix.index_of_source("unknown").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct CoverageMatrix<T>
where
    T: Float,
{
    sources: Vec<Source>,   // sorted ascending by name
    products: Vec<Product>, // sorted ascending by name
    rows: Vec<FixedBitSet>, // len = num_sources, each num_products bits
    amounts: Vec<T>,        // len = num_sources * num_products, flattened
}

#[inline(always)]
fn flatten_index(num_products: usize, source_index: SourceIndex, product_index: ProductIndex) -> usize {
    source_index.get() * num_products + product_index.get()
}

impl<T> CoverageMatrix<T>
where
    T: Float,
{
    /// Assembles a matrix from pre-sorted, pre-validated parts.
    /// Only `MatrixBuilder::compile` constructs matrices.
    pub(crate) fn from_parts(
        sources: Vec<Source>,
        products: Vec<Product>,
        rows: Vec<FixedBitSet>,
        amounts: Vec<T>,
    ) -> Self {
        debug_assert!(!sources.is_empty() && !products.is_empty());
        debug_assert_eq!(rows.len(), sources.len());
        debug_assert!(rows.iter().all(|row| row.len() == products.len()));
        debug_assert_eq!(amounts.len(), sources.len() * products.len());
        debug_assert!(sources.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(products.windows(2).all(|w| w[0] < w[1]));

        Self {
            sources,
            products,
            rows,
            amounts,
        }
    }

    /// Returns the number of sources.
    #[inline]
    pub fn num_sources(&self) -> usize {
        self.sources.len()
    }

    /// Returns the number of products.
    #[inline]
    pub fn num_products(&self) -> usize {
        self.products.len()
    }

    /// Returns all sources in index order (ascending by name).
    #[inline]
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Returns all products in index order (ascending by name).
    #[inline]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Returns the source at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `source_index` is not in `0..num_sources()`.
    #[inline]
    pub fn source(&self, source_index: SourceIndex) -> &Source {
        &self.sources[source_index.get()]
    }

    /// Returns the product at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `product_index` is not in `0..num_products()`.
    #[inline]
    pub fn product(&self, product_index: ProductIndex) -> &Product {
        &self.products[product_index.get()]
    }

    /// Maps a source name to its index, or `None` if no source has that
    /// name. Binary search over the name-sorted array, O(log n).
    #[inline]
    pub fn index_of_source(&self, name: &str) -> Option<SourceIndex> {
        self.sources
            .binary_search_by(|s| s.name().cmp(name))
            .ok()
            .map(SourceIndex::new)
    }

    /// Maps a product name to its index, or `None` if no product has that
    /// name. Binary search over the name-sorted array, O(log n).
    #[inline]
    pub fn index_of_product(&self, name: &str) -> Option<ProductIndex> {
        self.products
            .binary_search_by(|p| p.name().cmp(name))
            .ok()
            .map(ProductIndex::new)
    }

    /// Returns `true` iff the source produces the product.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn produces(&self, source_index: SourceIndex, product_index: ProductIndex) -> bool {
        debug_assert!(product_index.get() < self.num_products());
        self.rows[source_index.get()].contains(product_index.get())
    }

    /// Returns the declared amount for the given cell. Meaningful only where
    /// `produces` is true; unset cells read as zero.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn value(&self, source_index: SourceIndex, product_index: ProductIndex) -> T {
        debug_assert!(source_index.get() < self.num_sources());
        debug_assert!(product_index.get() < self.num_products());
        self.amounts[flatten_index(self.num_products(), source_index, product_index)]
    }

    /// Returns the presence row of a source as a bitset over product
    /// indices. This is the representation the search engine unions into
    /// its coverage masks.
    ///
    /// # Panics
    ///
    /// Panics if `source_index` is out of range.
    #[inline]
    pub fn row(&self, source_index: SourceIndex) -> &FixedBitSet {
        &self.rows[source_index.get()]
    }

    /// Lists all products produced by the given source, in index order.
    /// O(num_products).
    pub fn products_of(&self, source_index: SourceIndex) -> Vec<&Product> {
        self.rows[source_index.get()]
            .ones()
            .map(|pi| &self.products[pi])
            .collect()
    }

    /// Lists all sources producing the given product, in index order.
    /// O(num_sources).
    pub fn sources_producing(&self, product_index: ProductIndex) -> Vec<&Source> {
        debug_assert!(product_index.get() < self.num_products());
        self.sources
            .iter()
            .enumerate()
            .filter(|(si, _)| self.rows[*si].contains(product_index.get()))
            .map(|(_, source)| source)
            .collect()
    }
}
