//! Source positions for yaml-enforce
//!
//! This crate provides the position types shared by the parser and the
//! locator: byte [`Span`]s, line/column [`Location`]s and [`Range`]s, and the
//! [`LineCounter`] that converts between them.
//!
//! # Example
//!
//! ```rust
//! use enforce_source_map::{LineCounter, Span};
//!
//! let source = "name: snake\nage: 3\n";
//! let lc = LineCounter::new(source);
//!
//! // "age" starts at byte offset 12
//! let loc = lc.location(12);
//! assert_eq!(loc.line, 2);
//! assert_eq!(loc.column, 1);
//!
//! let range = Span::new(12, 15).to_range(&lc);
//! assert_eq!(range.end.column, 4);
//! ```

pub mod line_counter;
pub mod types;

pub use line_counter::LineCounter;
pub use types::{Location, Range, Span};
