//! Resolving abstract validation errors to source locations.

use crate::{RangeMap, Segment};
use enforce_source_map::Location;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which position of a range-map node an error should point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The mapping key (e.g. an unknown key).
    Key,
    /// The start of the value.
    ValueStart,
    /// The end of the value (e.g. a missing key inside it).
    ValueEnd,
    /// Document-level; no finer position than the root.
    Meta,
}

/// An abstract error produced by the structure validator.
///
/// This core only consumes these records; it never constructs them. A
/// document-level error carries an empty path and [`ErrorKind::Meta`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbstractError {
    pub message: String,
    pub path: Vec<Segment>,
    pub kind: ErrorKind,
}

impl AbstractError {
    pub fn new(message: impl Into<String>, path: Vec<Segment>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            path,
            kind,
        }
    }

    /// A document-level error with no path.
    pub fn meta(message: impl Into<String>) -> Self {
        Self::new(message, Vec::new(), ErrorKind::Meta)
    }
}

/// A resolved source position for one abstract error.
///
/// `via` holds the position of each alias hop traversed on the way to
/// `primary`, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub primary: Location,
    pub via: Vec<Location>,
}

impl fmt::Display for ResolvedLocation {
    /// Renders as `L3:5` with a ` via L4:4` suffix per alias hop, the form
    /// a reporter appends after the error message.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}:{}", self.primary.line, self.primary.column)?;
        for hop in &self.via {
            write!(f, " via L{}:{}", hop.line, hop.column)?;
        }
        Ok(())
    }
}

/// Resolve an abstract error against a document's range map.
///
/// Walks the error's path segment by segment, unwinding alias indirection
/// before each step and recording every hop. Resolution is best effort: a
/// segment the indexer never recorded stops the walk at the last resolved
/// ancestor instead of failing, since this is diagnostic output rather than
/// control flow. An empty path resolves to the document root.
pub fn locate(error: &AbstractError, map: &RangeMap) -> ResolvedLocation {
    let mut cursor = map;
    let mut via = Vec::new();

    for segment in &error.path {
        while let Some(target) = &cursor.alias_target {
            via.push(cursor.value_range.start);
            cursor = target;
        }

        match cursor.get(segment) {
            Some(child) => cursor = child,
            None => break,
        }
    }

    // Trailing indirection: the path may end on an alias node.
    while let Some(target) = &cursor.alias_target {
        via.push(cursor.value_range.start);
        cursor = target;
    }

    let primary = match error.kind {
        ErrorKind::Key => cursor
            .key_range
            .map_or(cursor.value_range.start, |r| r.start),
        ErrorKind::ValueEnd => cursor.value_range.end,
        ErrorKind::ValueStart | ErrorKind::Meta => cursor.value_range.start,
    };

    ResolvedLocation { primary, via }
}
