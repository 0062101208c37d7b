//! Source-tracked YAML tree.

use enforce_source_map::Span;
use yaml_rust2::Yaml;

/// A YAML value with span tracking and preserved anchor/alias structure.
///
/// The `yaml` field is the complete owned logical value: for containers it
/// includes all descendants, and for aliases it is a clone of the anchored
/// value (or `Yaml::BadValue` when the anchor was not yet defined at the
/// point of use). Code that only needs the data can ignore `kind` entirely;
/// the range indexer walks `kind` to recover the physical shape.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlNode {
    /// The complete logical value (owned, aliases resolved).
    pub yaml: Yaml,

    /// Byte span of this node in the source text.
    pub span: Span,

    /// Anchor id if this node carries an `&name` anchor.
    ///
    /// yaml-rust2 interns anchor names as `usize` ids; within a single
    /// document ids and names are interchangeable.
    pub anchor: Option<usize>,

    /// The physical shape of this node.
    pub kind: NodeKind,
}

/// The physical shape of a [`YamlNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A scalar leaf (string, number, boolean, null).
    Scalar,

    /// A sequence with span-tracked items.
    Sequence(Vec<YamlNode>),

    /// A mapping with span-tracked entries, in document order.
    Mapping(Vec<MappingEntry>),

    /// An alias (`*name`) referencing the anchor with the given id.
    Alias(usize),
}

/// A key-value pair in a YAML mapping with span tracking.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingEntry {
    /// The key with span tracking.
    pub key: YamlNode,

    /// The value with span tracking.
    pub value: YamlNode,
}

impl YamlNode {
    /// Create a scalar leaf node.
    pub fn scalar(yaml: Yaml, span: Span, anchor: Option<usize>) -> Self {
        Self {
            yaml,
            span,
            anchor,
            kind: NodeKind::Scalar,
        }
    }

    /// Create a sequence node.
    pub fn sequence(yaml: Yaml, span: Span, anchor: Option<usize>, items: Vec<YamlNode>) -> Self {
        Self {
            yaml,
            span,
            anchor,
            kind: NodeKind::Sequence(items),
        }
    }

    /// Create a mapping node.
    pub fn mapping(
        yaml: Yaml,
        span: Span,
        anchor: Option<usize>,
        entries: Vec<MappingEntry>,
    ) -> Self {
        Self {
            yaml,
            span,
            anchor,
            kind: NodeKind::Mapping(entries),
        }
    }

    /// Create an alias node referencing `anchor_id`.
    pub fn alias(yaml: Yaml, span: Span, anchor_id: usize) -> Self {
        Self {
            yaml,
            span,
            anchor: None,
            kind: NodeKind::Alias(anchor_id),
        }
    }

    /// Check if this is a scalar leaf.
    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, NodeKind::Scalar)
    }

    /// Check if this is a sequence.
    pub fn is_sequence(&self) -> bool {
        matches!(self.kind, NodeKind::Sequence(_))
    }

    /// Check if this is a mapping.
    pub fn is_mapping(&self) -> bool {
        matches!(self.kind, NodeKind::Mapping(_))
    }

    /// Check if this is an alias.
    pub fn is_alias(&self) -> bool {
        matches!(self.kind, NodeKind::Alias(_))
    }

    /// Get sequence items if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[YamlNode]> {
        match &self.kind {
            NodeKind::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Get mapping entries if this is a mapping.
    pub fn as_mapping(&self) -> Option<&[MappingEntry]> {
        match &self.kind {
            NodeKind::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Get a mapping value by key (string comparison).
    pub fn get(&self, key: &str) -> Option<&YamlNode> {
        match &self.kind {
            NodeKind::Mapping(entries) => entries.iter().find_map(|entry| {
                if entry.key.yaml.as_str() == Some(key) {
                    Some(&entry.value)
                } else {
                    None
                }
            }),
            _ => None,
        }
    }

    /// Get a sequence item by index.
    pub fn get_item(&self, index: usize) -> Option<&YamlNode> {
        match &self.kind {
            NodeKind::Sequence(items) => items.get(index),
            _ => None,
        }
    }

    /// Number of children (sequence length or mapping entry count).
    pub fn len(&self) -> usize {
        match &self.kind {
            NodeKind::Scalar | NodeKind::Alias(_) => 0,
            NodeKind::Sequence(items) => items.len(),
            NodeKind::Mapping(entries) => entries.len(),
        }
    }

    /// Check if this node has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MappingEntry {
    pub fn new(key: YamlNode, value: YamlNode) -> Self {
        Self { key, value }
    }
}
