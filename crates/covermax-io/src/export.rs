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

//! Plain-text export of compiled matrices and combination reports.
//!
//! Both exports are tab separated with CRLF line ends so that the output
//! pastes cleanly into common spreadsheet tools.

use covermax_model::combination::Combination;
use covermax_model::index::{ProductIndex, SourceIndex};
use covermax_model::matrix::CoverageMatrix;
use num_traits::Float;
use std::io::{self, Write};

/// Writes the production table of a compiled matrix as `1`/`0` cells.
///
/// The header row is `product` followed by one column per source; every
/// following row names a product and marks which sources produce it.
pub fn write_matrix<T, W>(matrix: &CoverageMatrix<T>, writer: &mut W) -> io::Result<()>
where
    T: Float,
    W: Write,
{
    write!(writer, "product")?;
    for source in matrix.sources() {
        write!(writer, "\t{}", source.name())?;
    }
    write!(writer, "\r\n")?;

    for (product_index, product) in matrix.products().iter().enumerate() {
        write!(writer, "{}", product.name())?;
        for source_index in 0..matrix.num_sources() {
            let produced = matrix.produces(
                SourceIndex::new(source_index),
                ProductIndex::new(product_index),
            );
            write!(writer, "\t{}", if produced { '1' } else { '0' })?;
        }
        write!(writer, "\r\n")?;
    }
    Ok(())
}

/// Writes a human-readable report of one combination.
///
/// The report lists the coverage score, each selected source with the
/// number of products only it covers within the selection, and each
/// covered product with the selected sources producing it.
pub fn write_combination_report<T, W>(
    combination: &Combination<'_, T>,
    writer: &mut W,
) -> io::Result<()>
where
    T: Float,
    W: Write,
{
    write!(
        writer,
        "covered\t{} of {}\r\n",
        combination.covered_product_count(),
        combination.matrix().num_products()
    )?;

    write!(writer, "source\tunique products\r\n")?;
    for source in combination.selected_sources() {
        let unique = combination
            .unique_product_count_for(source)
            .unwrap_or_default();
        write!(writer, "{}\t{}\r\n", source.name(), unique)?;
    }

    write!(writer, "product\tproduced by\r\n")?;
    for product in combination.covered_products() {
        write!(writer, "{}", product.name())?;
        for source in combination.producers_of(product) {
            write!(writer, "\t{}", source.name())?;
        }
        write!(writer, "\r\n")?;
    }
    Ok(())
}
