//! Growable list of matched feature names.

use alloc::vec::Vec;
use core::fmt::{self, Write};

/// Names of the required features found present, in profile order.
///
/// Renders as the lowercase names joined by single spaces. Clearing keeps the
/// allocation so one list can be reused across levels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchedFeatures {
    names: Vec<&'static str>,
}

impl MatchedFeatures {
    /// Empty list
    pub const fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Empty list with room for `capacity` names
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            names: Vec::with_capacity(capacity),
        }
    }

    /// Append a name
    #[inline]
    pub fn push(&mut self, name: &'static str) {
        self.names.push(name);
    }

    /// Drop every name, keeping the allocation
    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Number of names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Current allocation, in names
    pub fn capacity(&self) -> usize {
        self.names.capacity()
    }

    /// Names as stored (mixed case)
    pub fn as_slice(&self) -> &[&'static str] {
        &self.names
    }

    /// Iterate over the names as stored
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }
}

impl<'a> IntoIterator for &'a MatchedFeatures {
    type Item = &'a &'static str;
    type IntoIter = core::slice::Iter<'a, &'static str>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

impl fmt::Display for MatchedFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            for c in name.chars() {
                f.write_char(c.to_ascii_lowercase())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display_lowercase() {
        let mut list = MatchedFeatures::new();
        list.push("SSE4.1");
        list.push("LAHF_SAHF");
        list.push("AVX512-F");
        assert_eq!(list.to_string(), "sse4.1 lahf_sahf avx512-f");
    }

    #[test]
    fn test_empty_display() {
        assert_eq!(MatchedFeatures::new().to_string(), "");
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut list = MatchedFeatures::with_capacity(9);
        for name in ["AVX", "FMA", "BMI1"] {
            list.push(name);
        }
        let capacity = list.capacity();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.capacity(), capacity);
        assert!(capacity >= 9);
    }

    #[test]
    fn test_order_preserved() {
        let mut list = MatchedFeatures::new();
        list.push("B");
        list.push("A");
        assert_eq!(list.as_slice(), ["B", "A"]);
        assert_eq!(list.iter().collect::<alloc::vec::Vec<_>>(), ["B", "A"]);
        assert_eq!(list.len(), 2);
    }
}
