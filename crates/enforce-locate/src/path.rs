//! Logical path segments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A segment in a logical document path.
///
/// Mapping keys contribute `Key` segments and sequence positions contribute
/// `Index` segments. The same type keys [`RangeMap`](crate::RangeMap)
/// children and appears in [`AbstractError`](crate::AbstractError) paths, so
/// the validator's paths and the indexer's records can never disagree on
/// representation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// Mapping key
    Key(String),
    /// Sequence index
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{}", key),
            Segment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_display() {
        assert_eq!(Segment::from("images").to_string(), "images");
        assert_eq!(Segment::from(3).to_string(), "[3]");
    }

    #[test]
    fn test_segment_ordering_is_deterministic() {
        let mut segments = vec![
            Segment::from(1),
            Segment::from("b"),
            Segment::from(0),
            Segment::from("a"),
        ];
        segments.sort();
        assert_eq!(
            segments,
            vec![
                Segment::from("a"),
                Segment::from("b"),
                Segment::from(0),
                Segment::from(1),
            ]
        );
    }
}
