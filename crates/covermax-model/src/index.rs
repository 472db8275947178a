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

//! Strongly typed indices for the two index spaces of a compiled matrix.
//!
//! A `CoverageMatrix` addresses sources and products by position in its
//! name-sorted arrays. Raw `usize` invites accidental swaps between the two
//! spaces, so both index kinds are wrapped in `#[repr(transparent)]` newtypes
//! that compile down to a plain `usize` with no runtime overhead.

/// A strongly typed index into the source dimension of a `CoverageMatrix`.
///
/// # Examples
///
/// ```rust
/// use covermax_model::index::SourceIndex;
///
/// let s = SourceIndex::new(3);
/// assert_eq!(s.get(), 3);
/// assert_eq!(format!("{}", s), "SourceIndex(3)");
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceIndex(usize);

/// A strongly typed index into the product dimension of a `CoverageMatrix`.
///
/// # Examples
///
/// ```rust
/// use covermax_model::index::ProductIndex;
///
/// let p = ProductIndex::new(7);
/// assert_eq!(p.get(), 7);
/// assert_eq!(format!("{}", p), "ProductIndex(7)");
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductIndex(usize);

macro_rules! impl_typed_index {
    ($name:ident) => {
        impl $name {
            /// Creates a new index from a raw position.
            #[inline(always)]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Returns the underlying `usize` position.
            #[inline(always)]
            pub const fn get(&self) -> usize {
                self.0
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            fn from(index: $name) -> Self {
                index.0
            }
        }
    };
}

impl_typed_index!(SourceIndex);
impl_typed_index!(ProductIndex);
