//! # enforce-locate
//!
//! Source-location indexing and error-location resolution for validated
//! YAML documents.
//!
//! Validating a document against an expected structure produces abstract
//! errors that only know the *logical* path of the offending value
//! (`["images", 0, "uri"]`). This crate maps those paths back to concrete
//! source positions:
//!
//! - [`RangeMap::build`] walks a parsed [`enforce_yaml::YamlNode`] tree once
//!   and records the source range of every logical position, resolving YAML
//!   alias indirection recursively (with a cycle guard).
//! - [`locate`] resolves one [`AbstractError`] against that map into a
//!   [`ResolvedLocation`]: a primary position plus the alias hops traversed
//!   to reach it.
//!
//! The structure validator itself is a collaborator reached only through
//! the [`AbstractError`] record; this crate never constructs errors and
//! never fails to resolve one (resolution degrades to the deepest recorded
//! ancestor).
//!
//! ## Example
//!
//! ```rust
//! use enforce_locate::{load, locate, AbstractError, ErrorKind};
//!
//! let doc = load("name: snake\nimages:\n  - uri: pic.png\n").unwrap();
//!
//! let err = AbstractError::new(
//!     "extra key",
//!     vec!["images".into(), 0.into(), "uri".into()],
//!     ErrorKind::Key,
//! );
//! let resolved = locate(&err, &doc.map);
//! assert_eq!(resolved.to_string(), "L3:5");
//! ```

mod locate;
mod path;
mod range_map;

pub use locate::{locate, AbstractError, ErrorKind, ResolvedLocation};
pub use path::Segment;
pub use range_map::RangeMap;

pub use enforce_source_map::{LineCounter, Location, Range};
pub use enforce_yaml::YamlNode;

use thiserror::Error;

/// A parsed document together with its range map.
#[derive(Debug, Clone)]
pub struct LoadedYaml {
    /// The logical document tree.
    pub root: YamlNode,

    /// Source positions for every recorded logical path.
    pub map: RangeMap,
}

/// Errors from [`load`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The source text could not be parsed; no range map exists, and
    /// callers should report without position information.
    #[error(transparent)]
    Parse(#[from] enforce_yaml::Error),
}

/// Parse a YAML document and build its range map in one step.
///
/// # Errors
///
/// Returns an error if the source is not valid YAML or holds no document.
pub fn load(source: &str) -> Result<LoadedYaml, LoadError> {
    let root = enforce_yaml::parse(source)?;
    let lc = LineCounter::new(source);
    let map = RangeMap::build(&root, &lc);
    Ok(LoadedYaml { root, map })
}
