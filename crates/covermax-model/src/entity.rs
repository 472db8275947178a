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

//! Name-keyed entity identifiers.
//!
//! `Source` and `Product` are immutable value objects holding a non-empty
//! name. Identity, equality, and ordering are defined by case-sensitive
//! lexical comparison of the name, derived directly on the type rather than
//! routed through a shared comparator object. Two entities with the same name
//! are the same identity wherever they are compared.

/// Error returned when an entity is constructed with an empty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidNameError {
    kind: &'static str,
}

impl InvalidNameError {
    #[inline]
    fn new(kind: &'static str) -> Self {
        Self { kind }
    }
}

impl std::fmt::Display for InvalidNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} name must not be empty", self.kind)
    }
}

impl std::error::Error for InvalidNameError {}

/// A named producer entity.
///
/// # Examples
///
/// ```rust
/// use covermax_model::entity::Source;
///
/// let a = Source::new("Lab A").unwrap();
/// let b = Source::new("Lab B").unwrap();
/// assert!(a < b);
/// assert!(Source::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Source {
    name: String,
}

impl Source {
    /// Creates a new source with the given name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNameError` if the name is empty.
    #[inline]
    pub fn new<N>(name: N) -> Result<Self, InvalidNameError>
    where
        N: Into<String>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidNameError::new("source"));
        }
        Ok(Self { name })
    }

    /// Returns the name of this source.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A named produced entity.
///
/// # Examples
///
/// ```rust
/// use covermax_model::entity::Product;
///
/// let p = Product::new("P1").unwrap();
/// assert_eq!(p.name(), "P1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Product {
    name: String,
}

impl Product {
    /// Creates a new product with the given name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNameError` if the name is empty.
    #[inline]
    pub fn new<N>(name: N) -> Result<Self, InvalidNameError>
    where
        N: Into<String>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidNameError::new("product"));
        }
        Ok(Self { name })
    }

    /// Returns the name of this product.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_rejected() {
        assert!(Source::new("").is_err());
        assert!(Product::new("").is_err());
        assert!(Source::new(String::new()).is_err());
    }

    #[test]
    fn test_error_message_names_the_kind() {
        let err = Source::new("").unwrap_err();
        assert_eq!(format!("{}", err), "source name must not be empty");
        let err = Product::new("").unwrap_err();
        assert_eq!(format!("{}", err), "product name must not be empty");
    }

    #[test]
    fn test_equality_and_ordering_by_name() {
        let a1 = Source::new("A").unwrap();
        let a2 = Source::new("A").unwrap();
        let b = Source::new("B").unwrap();
        assert_eq!(a1, a2);
        assert!(a1 < b);
        // Case-sensitive lexical comparison: uppercase sorts before lowercase.
        assert!(Source::new("Z").unwrap() < Source::new("a").unwrap());
    }

    #[test]
    fn test_display_is_the_name() {
        let p = Product::new("P1").unwrap();
        assert_eq!(format!("{}", p), "P1");
    }
}
