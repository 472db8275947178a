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

//! Read-only source subsets with derived coverage statistics.
//!
//! A `Combination` selects a subset of a `CoverageMatrix`'s sources and
//! answers which products that subset covers, how often each product is
//! covered, and which products a single selected source contributes
//! exclusively. Coverage counts are computed eagerly at construction: the
//! constant cost is small next to the search that creates combinations, and
//! it makes every accessor safe to call concurrently without interior
//! mutability.
//!
//! Combinations are produced by the search engine, but callers may also
//! construct one directly from a hand-picked selection to replay a
//! "what if" scenario without involving the search at all.

use crate::{
    entity::{Product, Source},
    index::{ProductIndex, SourceIndex},
    matrix::CoverageMatrix,
};
use fixedbitset::FixedBitSet;
use num_traits::Float;
use smallvec::SmallVec;

/// The error type for combination construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinationError {
    /// The selection has zero length.
    EmptySelection,
    /// The selection length does not match the matrix's source count.
    SelectionLength {
        /// Source count of the owning matrix.
        expected: usize,
        /// Length of the selection that was passed in.
        actual: usize,
    },
}

impl std::fmt::Display for CombinationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CombinationError::EmptySelection => write!(f, "selection must not be empty"),
            CombinationError::SelectionLength { expected, actual } => write!(
                f,
                "selection has {} entries, expected {} (one per source)",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for CombinationError {}

/// A selected subset of a matrix's sources and its coverage statistics.
///
/// # Examples
///
/// ```rust
/// use covermax_model::builder::MatrixBuilder;
/// use covermax_model::combination::Combination;
/// use covermax_model::entity::{Product, Source};
///
/// let mut builder = MatrixBuilder::<f32>::new();
/// builder.declare_production(Source::new("A").unwrap(), Product::new("P1").unwrap(), 1.0);
/// builder.declare_production(Source::new("B").unwrap(), Product::new("P2").unwrap(), 1.0);
/// let matrix = builder.compile().unwrap();
///
/// let combination = Combination::new(&matrix, &[true, false]).unwrap();
/// assert_eq!(combination.covered_product_count(), 1);
/// assert_eq!(combination.selected_source_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Combination<'a, T>
where
    T: Float,
{
    matrix: &'a CoverageMatrix<T>,
    selection: FixedBitSet, // one bit per source index
    counts: Vec<u32>,       // per product: number of selected sources producing it
    covered: usize,         // products with count > 0
}

impl<'a, T> Combination<'a, T>
where
    T: Float,
{
    /// Creates a combination from a boolean selection, one entry per source
    /// index of the matrix. The selection is copied, never aliased.
    ///
    /// # Errors
    ///
    /// Fails with `CombinationError::EmptySelection` for a zero-length
    /// selection and `CombinationError::SelectionLength` when the length
    /// does not equal the matrix's source count.
    pub fn new(matrix: &'a CoverageMatrix<T>, selection: &[bool]) -> Result<Self, CombinationError> {
        let mut mask = FixedBitSet::with_capacity(selection.len());
        for (index, &selected) in selection.iter().enumerate() {
            if selected {
                mask.insert(index);
            }
        }
        Self::from_mask(matrix, mask)
    }

    /// Creates a combination from a selection bitset over source indices.
    ///
    /// # Errors
    ///
    /// Same failure modes as `new`.
    pub fn from_mask(
        matrix: &'a CoverageMatrix<T>,
        mask: FixedBitSet,
    ) -> Result<Self, CombinationError> {
        if mask.len() == 0 {
            return Err(CombinationError::EmptySelection);
        }
        if mask.len() != matrix.num_sources() {
            return Err(CombinationError::SelectionLength {
                expected: matrix.num_sources(),
                actual: mask.len(),
            });
        }

        let mut counts = vec![0u32; matrix.num_products()];
        for source_index in mask.ones() {
            for product_index in matrix.row(SourceIndex::new(source_index)).ones() {
                counts[product_index] += 1;
            }
        }
        let covered = counts.iter().filter(|&&count| count > 0).count();

        Ok(Self {
            matrix,
            selection: mask,
            counts,
            covered,
        })
    }

    /// Returns the matrix this combination selects over.
    #[inline]
    pub fn matrix(&self) -> &'a CoverageMatrix<T> {
        self.matrix
    }

    /// Returns the number of distinct products covered by the selection.
    #[inline]
    pub fn covered_product_count(&self) -> usize {
        self.covered
    }

    /// Returns `true` iff the product at the given index is covered by at
    /// least one selected source.
    ///
    /// # Panics
    ///
    /// Panics if `product_index` is out of range.
    #[inline]
    pub fn covers(&self, product_index: ProductIndex) -> bool {
        self.counts[product_index.get()] > 0
    }

    /// Returns `true` iff the source at the given index is selected.
    ///
    /// # Panics
    ///
    /// Panics if `source_index` is out of range.
    #[inline]
    pub fn selected(&self, source_index: SourceIndex) -> bool {
        assert!(source_index.get() < self.selection.len());
        self.selection.contains(source_index.get())
    }

    /// Returns the number of selected sources.
    #[inline]
    pub fn selected_source_count(&self) -> usize {
        self.selection.count_ones(..)
    }

    /// Lists the selected sources in matrix-index order.
    pub fn selected_sources(&self) -> Vec<&'a Source> {
        self.selection
            .ones()
            .map(|si| self.matrix.source(SourceIndex::new(si)))
            .collect()
    }

    /// Lists the covered products in matrix-index order.
    pub fn covered_products(&self) -> Vec<&'a Product> {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(pi, _)| self.matrix.product(ProductIndex::new(pi)))
            .collect()
    }

    /// Lists the selected sources that produce the given product. Empty when
    /// the product is unknown to the matrix or not covered here.
    pub fn producers_of(&self, product: &Product) -> SmallVec<[&'a Source; 8]> {
        let mut producers = SmallVec::new();
        let Some(product_index) = self.matrix.index_of_product(product.name()) else {
            return producers;
        };
        if self.counts[product_index.get()] == 0 {
            return producers;
        }
        for source_index in self.selection.ones() {
            let source_index = SourceIndex::new(source_index);
            if self.matrix.produces(source_index, product_index) {
                producers.push(self.matrix.source(source_index));
            }
        }
        producers
    }

    /// Counts the products that only the given source covers within this
    /// combination, i.e. products it produces whose coverage count is
    /// exactly one. This is the statistic that ranks "irreplaceable"
    /// sources.
    ///
    /// Returns `None` when the source is not selected (or unknown to the
    /// matrix).
    pub fn unique_product_count_for(&self, source: &Source) -> Option<usize> {
        let source_index = self.matrix.index_of_source(source.name())?;
        if !self.selection.contains(source_index.get()) {
            return None;
        }
        let unique = self
            .matrix
            .row(source_index)
            .ones()
            .filter(|&pi| self.counts[pi] == 1)
            .count();
        Some(unique)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MatrixBuilder;

    fn src(name: &str) -> Source {
        Source::new(name).unwrap()
    }

    fn prod(name: &str) -> Product {
        Product::new(name).unwrap()
    }

    /// A: {P1}, B: {P1, P2}, C: {P3}
    fn sample() -> CoverageMatrix<f32> {
        let mut builder = MatrixBuilder::new();
        builder.declare_production(src("A"), prod("P1"), 1.0);
        builder.declare_production(src("B"), prod("P1"), 2.0);
        builder.declare_production(src("B"), prod("P2"), 3.0);
        builder.declare_production(src("C"), prod("P3"), 4.0);
        builder.compile().unwrap()
    }

    #[test]
    fn test_selection_length_must_match() {
        let matrix = sample();
        assert_eq!(
            Combination::new(&matrix, &[true, false]).unwrap_err(),
            CombinationError::SelectionLength {
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(
            Combination::new(&matrix, &[]).unwrap_err(),
            CombinationError::EmptySelection
        );
    }

    #[test]
    fn test_coverage_counts() {
        let matrix = sample();
        let all = Combination::new(&matrix, &[true, true, true]).unwrap();
        assert_eq!(all.covered_product_count(), 3);
        assert_eq!(all.selected_source_count(), 3);

        let ab = Combination::new(&matrix, &[true, true, false]).unwrap();
        assert_eq!(ab.covered_product_count(), 2);
        assert!(ab.covers(matrix.index_of_product("P1").unwrap()));
        assert!(!ab.covers(matrix.index_of_product("P3").unwrap()));
    }

    #[test]
    fn test_adding_a_source_never_decreases_coverage() {
        let matrix = sample();
        for base_bits in 0..8u32 {
            let base: Vec<bool> = (0..3).map(|i| base_bits & (1 << i) != 0).collect();
            let base_combination = Combination::new(&matrix, &base).unwrap();
            for add in 0..3 {
                let mut extended = base.clone();
                extended[add] = true;
                let extended_combination = Combination::new(&matrix, &extended).unwrap();
                assert!(
                    extended_combination.covered_product_count()
                        >= base_combination.covered_product_count()
                );
            }
        }
    }

    #[test]
    fn test_covered_products_in_index_order() {
        let matrix = sample();
        let bc = Combination::new(&matrix, &[false, true, true]).unwrap();
        let names: Vec<&str> = bc.covered_products().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["P1", "P2", "P3"]);

        let names: Vec<&str> = bc.selected_sources().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn test_producers_restricted_to_selection() {
        let matrix = sample();
        let ac = Combination::new(&matrix, &[true, false, true]).unwrap();
        let names: Vec<&str> = ac
            .producers_of(&prod("P1"))
            .iter()
            .map(|s| s.name())
            .collect();
        // B also produces P1 but is not selected.
        assert_eq!(names, vec!["A"]);
        assert!(ac.producers_of(&prod("P2")).is_empty());
        assert!(ac.producers_of(&prod("unknown")).is_empty());
    }

    #[test]
    fn test_unique_count_sentinel_for_unselected_source() {
        let matrix = sample();
        let ab = Combination::new(&matrix, &[true, true, false]).unwrap();
        assert_eq!(ab.unique_product_count_for(&src("C")), None);
        assert_eq!(ab.unique_product_count_for(&src("unknown")), None);
        // P1 is covered twice, so A contributes nothing unique.
        assert_eq!(ab.unique_product_count_for(&src("A")), Some(0));
        // P2 is only covered by B.
        assert_eq!(ab.unique_product_count_for(&src("B")), Some(1));
    }

    #[test]
    fn test_disjoint_private_products_plus_shared_one() {
        // Three sources, each with one private product, all sharing one.
        let mut builder = MatrixBuilder::<f32>::new();
        for (source, private) in [("A", "PA"), ("B", "PB"), ("C", "PC")] {
            builder.declare_production(src(source), prod(private), 1.0);
            builder.declare_production(src(source), prod("shared"), 1.0);
        }
        let matrix = builder.compile().unwrap();
        let all = Combination::new(&matrix, &[true, true, true]).unwrap();
        assert_eq!(all.covered_product_count(), 4);
        for source in ["A", "B", "C"] {
            // The private product counts; the shared one does not.
            assert_eq!(all.unique_product_count_for(&src(source)), Some(1));
        }
    }
}
