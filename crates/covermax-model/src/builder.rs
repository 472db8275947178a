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

//! Mutable accumulator for source-product production data.
//!
//! The `MatrixBuilder` is the slow, order-preserving intermediate storage
//! that collects data from one or more inputs before compilation. Sources
//! and products live in name-ordered sets, and the sparse production
//! relation is a nested map with accumulation semantics: declaring the same
//! (source, product) pair twice adds the amounts together. A builder is
//! consumed exactly once by `compile`, which produces the immutable,
//! index-addressed `CoverageMatrix` the search engine works on.

use crate::{
    entity::{Product, Source},
    matrix::CoverageMatrix,
};
use fixedbitset::FixedBitSet;
use num_traits::Float;
use std::collections::{btree_map::Entry, BTreeMap, BTreeSet};

/// The error type for matrix compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileError {
    /// The builder contains no sources.
    NoSources,
    /// The builder contains no products.
    NoProducts,
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::NoSources => write!(f, "cannot compile a matrix without sources"),
            CompileError::NoProducts => write!(f, "cannot compile a matrix without products"),
        }
    }
}

impl std::error::Error for CompileError {}

/// Mutable accumulator collecting sources, products, and production amounts.
///
/// # Examples
///
/// ```rust
/// use covermax_model::builder::MatrixBuilder;
/// use covermax_model::entity::{Product, Source};
///
/// let mut builder = MatrixBuilder::<f32>::new();
/// let a = Source::new("A").unwrap();
/// let p1 = Product::new("P1").unwrap();
/// builder.declare_production(a, p1, 2.0);
/// assert_eq!(builder.num_sources(), 1);
/// assert_eq!(builder.num_products(), 1);
///
/// let matrix = builder.compile().unwrap();
/// assert_eq!(matrix.num_sources(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MatrixBuilder<T>
where
    T: Float,
{
    sources: BTreeSet<Source>,
    products: BTreeSet<Product>,
    production: BTreeMap<Source, BTreeMap<Product, T>>,
}

impl<T> Default for MatrixBuilder<T>
where
    T: Float,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MatrixBuilder<T>
where
    T: Float,
{
    /// Creates a new, empty builder.
    #[inline]
    pub fn new() -> Self {
        Self {
            sources: BTreeSet::new(),
            products: BTreeSet::new(),
            production: BTreeMap::new(),
        }
    }

    /// Registers a source. Returns `false` if a source with the same name
    /// was already present.
    #[inline]
    pub fn add_source(&mut self, source: Source) -> bool {
        self.sources.insert(source)
    }

    /// Registers a product. Returns `false` if a product with the same name
    /// was already present.
    #[inline]
    pub fn add_product(&mut self, product: Product) -> bool {
        self.products.insert(product)
    }

    /// Returns the number of distinct sources registered so far.
    #[inline]
    pub fn num_sources(&self) -> usize {
        self.sources.len()
    }

    /// Returns the number of distinct products registered so far.
    #[inline]
    pub fn num_products(&self) -> usize {
        self.products.len()
    }

    /// Looks up a registered source by name.
    #[inline]
    pub fn source(&self, name: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.name() == name)
    }

    /// Looks up a registered product by name.
    #[inline]
    pub fn product(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name() == name)
    }

    /// Returns the accumulated amount for a (source, product) pair, if any
    /// production has been declared for it.
    #[inline]
    pub fn amount(&self, source: &Source, product: &Product) -> Option<T> {
        self.production
            .get(source)
            .and_then(|per_source| per_source.get(product))
            .copied()
    }

    /// Declares that `source` produces `amount` of `product`.
    ///
    /// Unseen sources and products are registered automatically. Repeated
    /// declarations for the same pair accumulate: the new amount is added to
    /// the stored one. A stored NaN is treated as zero before adding, so a
    /// single bad upstream cell cannot poison every later declaration.
    pub fn declare_production(&mut self, source: Source, product: Product, amount: T) {
        self.sources.insert(source.clone());
        self.products.insert(product.clone());

        let per_source = self.production.entry(source).or_default();
        match per_source.entry(product) {
            Entry::Occupied(mut occupied) => {
                let old = *occupied.get();
                let base = if old.is_nan() { T::zero() } else { old };
                occupied.insert(base + amount);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(amount);
            }
        }
    }

    /// Compiles the accumulated data into an immutable `CoverageMatrix`,
    /// consuming the builder.
    ///
    /// The result is deterministic: sources and products are laid out in
    /// ascending name order, so compiling equal builders yields matrices
    /// with identical index spaces and identical cell contents.
    ///
    /// # Errors
    ///
    /// Fails with `CompileError::NoSources` or `CompileError::NoProducts`
    /// if either dimension is empty.
    pub fn compile(self) -> Result<CoverageMatrix<T>, CompileError> {
        if self.sources.is_empty() {
            return Err(CompileError::NoSources);
        }
        if self.products.is_empty() {
            return Err(CompileError::NoProducts);
        }

        // BTreeSet iteration order is the name order the matrix relies on
        // for binary-search lookups.
        let sources: Vec<Source> = self.sources.into_iter().collect();
        let products: Vec<Product> = self.products.into_iter().collect();
        let num_products = products.len();

        let mut rows = vec![FixedBitSet::with_capacity(num_products); sources.len()];
        let mut amounts = vec![T::zero(); sources.len() * num_products];

        for (source_index, source) in sources.iter().enumerate() {
            if let Some(per_source) = self.production.get(source) {
                for (product, &amount) in per_source {
                    let product_index = products
                        .binary_search(product)
                        .expect("declared product is registered");
                    rows[source_index].insert(product_index);
                    amounts[source_index * num_products + product_index] = amount;
                }
            }
        }

        Ok(CoverageMatrix::from_parts(sources, products, rows, amounts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src(name: &str) -> Source {
        Source::new(name).unwrap()
    }

    fn prod(name: &str) -> Product {
        Product::new(name).unwrap()
    }

    #[test]
    fn test_auto_registration() {
        let mut builder = MatrixBuilder::<f32>::new();
        builder.declare_production(src("A"), prod("P1"), 1.0);
        assert_eq!(builder.num_sources(), 1);
        assert_eq!(builder.num_products(), 1);
        assert!(builder.source("A").is_some());
        assert!(builder.product("P1").is_some());
        assert!(builder.source("B").is_none());
    }

    #[test]
    fn test_insertion_deduplicates_by_name() {
        let mut builder = MatrixBuilder::<f32>::new();
        assert!(builder.add_source(src("A")));
        assert!(!builder.add_source(src("A")));
        assert!(builder.add_product(prod("P1")));
        assert!(!builder.add_product(prod("P1")));
        assert_eq!(builder.num_sources(), 1);
        assert_eq!(builder.num_products(), 1);
    }

    #[test]
    fn test_repeated_declarations_accumulate() {
        let mut builder = MatrixBuilder::<f32>::new();
        builder.declare_production(src("A"), prod("P1"), 1.5);
        builder.declare_production(src("A"), prod("P1"), 2.0);
        assert_eq!(builder.amount(&src("A"), &prod("P1")), Some(3.5));
    }

    #[test]
    fn test_nan_is_treated_as_zero_when_accumulating() {
        let mut builder = MatrixBuilder::<f32>::new();
        builder.declare_production(src("A"), prod("P1"), f32::NAN);
        builder.declare_production(src("A"), prod("P1"), 2.0);
        assert_eq!(builder.amount(&src("A"), &prod("P1")), Some(2.0));
    }

    #[test]
    fn test_compile_empty_dimensions() {
        let builder = MatrixBuilder::<f32>::new();
        assert_eq!(builder.compile().unwrap_err(), CompileError::NoSources);

        let mut builder = MatrixBuilder::<f32>::new();
        builder.add_source(src("A"));
        assert_eq!(builder.compile().unwrap_err(), CompileError::NoProducts);

        let mut builder = MatrixBuilder::<f32>::new();
        builder.add_product(prod("P1"));
        assert_eq!(builder.compile().unwrap_err(), CompileError::NoSources);
    }

    #[test]
    fn test_compile_accumulated_amount_lands_in_matrix() {
        let mut builder = MatrixBuilder::<f32>::new();
        builder.declare_production(src("A"), prod("P1"), 1.0);
        builder.declare_production(src("A"), prod("P1"), 2.0);
        let matrix = builder.compile().unwrap();
        let si = matrix.index_of_source("A").unwrap();
        let pi = matrix.index_of_product("P1").unwrap();
        assert!(matrix.produces(si, pi));
        assert_eq!(matrix.value(si, pi), 3.0);
    }

    #[test]
    fn test_compile_determinism() {
        let build = || {
            let mut builder = MatrixBuilder::<f64>::new();
            builder.declare_production(src("B"), prod("P2"), 1.0);
            builder.declare_production(src("A"), prod("P1"), 2.0);
            builder.declare_production(src("C"), prod("P1"), 3.0);
            builder.compile().unwrap()
        };
        let first = build();
        let second = build();

        let names = |m: &CoverageMatrix<f64>| {
            (0..m.num_sources())
                .map(|i| m.source(crate::index::SourceIndex::new(i)).name().to_owned())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&first), vec!["A", "B", "C"]);
        assert_eq!(names(&first), names(&second));
        for si in 0..first.num_sources() {
            for pi in 0..first.num_products() {
                let si = crate::index::SourceIndex::new(si);
                let pi = crate::index::ProductIndex::new(pi);
                assert_eq!(first.produces(si, pi), second.produces(si, pi));
                assert_eq!(first.value(si, pi), second.value(si, pi));
            }
        }
    }
}
