//! # enforce-yaml
//!
//! YAML parsing with byte-span tracking and preserved anchors/aliases.
//!
//! This crate provides [`YamlNode`], which pairs an owned `yaml_rust2::Yaml`
//! value with the byte span it came from in the source text. Unlike plain
//! `yaml-rust2` loading, anchors and aliases are kept in the tree: an alias
//! stays an [`NodeKind::Alias`] node carrying the referenced anchor id, while
//! its `yaml` field holds the resolved logical value. This is what lets the
//! downstream range indexer report an error *through* an alias back to the
//! anchored text.
//!
//! ## Design
//!
//! Uses the owned data approach: each node owns a complete `Yaml` value with
//! a parallel structure for span tracking. Trade-off: extra memory for
//! simplicity and freedom from lifetime parameters.
//!
//! ## Example
//!
//! ```rust
//! use enforce_yaml::parse;
//!
//! let doc = parse("title: My Document\n").unwrap();
//! let title = doc.get("title").unwrap();
//! assert_eq!(title.yaml.as_str(), Some("My Document"));
//! assert_eq!(title.span.start, 7);
//! ```

mod error;
mod node;
mod parser;

pub use error::{Error, Result};
pub use node::{MappingEntry, NodeKind, YamlNode};
pub use parser::parse;

// The span types live in enforce-source-map; re-exported for convenience.
pub use enforce_source_map::Span;
