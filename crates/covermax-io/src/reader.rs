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

//! Tab-separated production table reader.
//!
//! The expected format mirrors what spreadsheet exports typically produce:
//!
//! ```raw
//! <ignored>  SourceA  SourceB  SourceC
//! Product1   1.5      0.0      3.0
//! Product2            2.5
//! ```
//!
//! The first header cell is ignored; the remaining header cells name the
//! sources, one per column. Every following non-blank line names a product
//! in its first cell and carries one amount cell per source column. Cells
//! that are empty or fail to parse are skipped, as are amounts below the
//! configured minimum. Blank lines and cells beyond the header width are
//! ignored. A source name that appears in several columns contributes all
//! of its columns to the same source.

use covermax_model::builder::MatrixBuilder;
use covermax_model::entity::{InvalidNameError, Product, Source};
use num_traits::Float;
use std::{
    fmt::{Debug, Display},
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// The error type for the table reading process.
#[derive(Debug)]
pub enum ReadError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input stream contained no header line.
    NoHeader,
    /// The header line declared no source columns.
    NoSources,
    /// A header or product cell held an invalid entity name.
    InvalidName(InvalidNameError),
}

impl Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::NoHeader => write!(f, "Input contains no header line"),
            Self::NoSources => write!(f, "Header line declares no source columns"),
            Self::InvalidName(e) => write!(f, "Invalid name: {}", e),
        }
    }
}

impl std::error::Error for ReadError {}

impl From<std::io::Error> for ReadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<InvalidNameError> for ReadError {
    fn from(e: InvalidNameError) -> Self {
        Self::InvalidName(e)
    }
}

/// A configurable reader for tab-separated production tables.
///
/// # Configuration
/// * `min_amount`: Cells whose parsed amount is below this value are
///   skipped entirely. Defaults to negative infinity, which keeps every
///   parseable cell and drops only NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableReader<T> {
    min_amount: T,
}

impl<T> Default for TableReader<T>
where
    T: Float,
{
    fn default() -> Self {
        Self {
            min_amount: T::neg_infinity(),
        }
    }
}

impl<T> TableReader<T>
where
    T: Float + FromStr + Debug,
{
    /// Creates a new `TableReader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum amount a cell must carry to be declared. Amounts
    /// below the threshold are dropped as if the cell were empty.
    #[inline]
    pub fn with_min_amount(mut self, min_amount: T) -> Self {
        self.min_amount = min_amount;
        self
    }

    /// Reads a table from a type implementing `BufRead` into a fresh
    /// builder. The builder still has to be compiled by the caller, which
    /// also leaves room for declaring further production by hand.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<MatrixBuilder<T>, ReadError> {
        let mut lines = rdr.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(ReadError::NoHeader),
        };

        // Header: first cell is a corner label, the rest name sources.
        let mut sources = Vec::new();
        for cell in header.trim_end().split('\t').skip(1) {
            sources.push(Source::new(cell)?);
        }
        if sources.is_empty() {
            return Err(ReadError::NoSources);
        }

        let mut builder = MatrixBuilder::new();
        for source in &sources {
            builder.add_source(source.clone());
        }

        for line in lines {
            let line = line?;
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                continue;
            }

            let mut cells = trimmed.split('\t');
            let product_name = cells.next().unwrap_or_default();
            let mut amounts = cells;
            if amounts.clone().next().is_none() {
                // A lone product name declares nothing.
                continue;
            }

            let product = Product::new(product_name)?;
            builder.add_product(product.clone());

            for (source, cell) in sources.iter().zip(&mut amounts) {
                let Ok(amount) = cell.parse::<T>() else {
                    continue;
                };
                // NaN cells fail this comparison and are dropped.
                if self.min_amount <= amount {
                    builder.declare_production(source.clone(), product.clone(), amount);
                }
            }
        }

        Ok(builder)
    }

    /// Reads a table from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<MatrixBuilder<T>, ReadError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Reads a table from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<MatrixBuilder<T>, ReadError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Reads a table from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<MatrixBuilder<T>, ReadError> {
        self.from_reader(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let input = "id\tA\tB\nP1\t1.5\t0.0\nP2\t\t2.5\n";
        let builder = TableReader::<f32>::new().from_str(input).unwrap();

        assert_eq!(builder.num_sources(), 2);
        assert_eq!(builder.num_products(), 2);

        let a = builder.source("A").unwrap().clone();
        let b = builder.source("B").unwrap().clone();
        let p1 = builder.product("P1").unwrap().clone();
        let p2 = builder.product("P2").unwrap().clone();

        assert_eq!(builder.amount(&a, &p1), Some(1.5));
        assert_eq!(builder.amount(&b, &p1), Some(0.0));
        assert_eq!(builder.amount(&a, &p2), None);
        assert_eq!(builder.amount(&b, &p2), Some(2.5));
    }

    #[test]
    fn test_empty_input_is_no_header() {
        let result = TableReader::<f32>::new().from_str("");
        assert!(matches!(result, Err(ReadError::NoHeader)));
    }

    #[test]
    fn test_header_without_sources() {
        let result = TableReader::<f32>::new().from_str("id\nP1\t1.0\n");
        assert!(matches!(result, Err(ReadError::NoSources)));
    }

    #[test]
    fn test_min_amount_filters_cells() {
        let input = "id\tA\nP1\t0.4\nP2\t0.6\n";
        let builder = TableReader::<f32>::new()
            .with_min_amount(0.5)
            .from_str(input)
            .unwrap();

        let a = builder.source("A").unwrap().clone();
        let p1 = builder.product("P1").unwrap().clone();
        let p2 = builder.product("P2").unwrap().clone();

        // P1 is still registered as a product, just without production.
        assert_eq!(builder.amount(&a, &p1), None);
        assert_eq!(builder.amount(&a, &p2), Some(0.6));
    }

    #[test]
    fn test_malformed_and_extra_cells_are_skipped() {
        let input = "id\tA\tB\nP1\tabc\t2.0\t9.0\t9.0\n";
        let builder = TableReader::<f32>::new().from_str(input).unwrap();

        let a = builder.source("A").unwrap().clone();
        let b = builder.source("B").unwrap().clone();
        let p1 = builder.product("P1").unwrap().clone();

        assert_eq!(builder.amount(&a, &p1), None);
        assert_eq!(builder.amount(&b, &p1), Some(2.0));
    }

    #[test]
    fn test_duplicate_source_columns_accumulate() {
        let input = "id\tA\tA\nP1\t1.0\t2.0\n";
        let builder = TableReader::<f32>::new().from_str(input).unwrap();

        assert_eq!(builder.num_sources(), 1);
        let a = builder.source("A").unwrap().clone();
        let p1 = builder.product("P1").unwrap().clone();
        assert_eq!(builder.amount(&a, &p1), Some(3.0));
    }

    #[test]
    fn test_blank_lines_and_lone_products_are_ignored() {
        let input = "id\tA\n\nP1\n   \nP2\t1.0\n";
        let builder = TableReader::<f32>::new().from_str(input).unwrap();

        assert!(builder.product("P1").is_none());
        assert!(builder.product("P2").is_some());
    }

    #[test]
    fn test_empty_source_name_is_rejected() {
        let result = TableReader::<f32>::new().from_str("id\tA\t\tB\nP1\t1.0\n");
        assert!(matches!(result, Err(ReadError::InvalidName(_))));
    }

    #[test]
    fn test_reader_output_compiles() {
        let input = "id\tA\tB\nP1\t1.0\t\nP2\t\t2.0\n";
        let builder = TableReader::<f64>::new().from_str(input).unwrap();
        let matrix = builder.compile().unwrap();

        assert_eq!(matrix.num_sources(), 2);
        assert_eq!(matrix.num_products(), 2);
    }
}
