//! Range maps: source positions mirroring a document's logical shape.

use crate::Segment;
use enforce_source_map::{LineCounter, Range, Span};
use enforce_yaml::{NodeKind, YamlNode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use yaml_rust2::Yaml;

/// Source positions for one logical position in a document.
///
/// A `RangeMap` mirrors the shape of a parsed document: each node records
/// the range of the value at that logical position, the range of the mapping
/// key that introduced it (when there is one), and the children that were
/// reached on the way to some scalar or alias leaf. For an alias, the node
/// additionally carries the range map built at the anchor's defining node,
/// so a lookup can be unwound through the indirection.
///
/// Built once per document by [`RangeMap::build`] and immutable afterwards.
/// Absence of a child segment means "no recorded position", not "the
/// segment does not exist in the document".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeMap {
    /// Range of the value at this logical position.
    pub value_range: Range,

    /// Range of the mapping key this value belongs to, when reached as a
    /// mapping entry's value. The root never has one.
    pub key_range: Option<Range>,

    /// Children by path segment, recorded lazily during indexing.
    pub children: BTreeMap<Segment, RangeMap>,

    /// Range map rooted at the anchor's defining node, for alias nodes
    /// whose anchor could be resolved.
    pub alias_target: Option<Box<RangeMap>>,
}

impl RangeMap {
    fn new(value_range: Range, key_range: Option<Range>) -> Self {
        Self {
            value_range,
            key_range,
            children: BTreeMap::new(),
            alias_target: None,
        }
    }

    /// Build the range map for a parsed document.
    ///
    /// Walks the tree once, depth first, registering anchors as they are
    /// defined and resolving each alias against the anchors seen so far. An
    /// alias whose anchor is still under construction (a self-referential or
    /// mutually-referential chain) is left without a target rather than
    /// recursing; the rest of the document is indexed normally.
    pub fn build(root: &YamlNode, lc: &LineCounter) -> RangeMap {
        let mut ctx = IndexContext {
            lc,
            anchors: HashMap::new(),
            in_progress: HashSet::new(),
        };
        build_map(root, &mut ctx)
    }

    /// Look up a direct child by segment.
    pub fn get(&self, segment: &Segment) -> Option<&RangeMap> {
        self.children.get(segment)
    }
}

/// Traversal state for one indexing invocation.
///
/// Threaded explicitly through the recursion; nothing survives past
/// [`RangeMap::build`].
struct IndexContext<'a> {
    lc: &'a LineCounter,

    /// Anchor id to defining node, populated as anchors are encountered.
    anchors: HashMap<usize, &'a YamlNode>,

    /// Anchors whose subtrees are currently being expanded. Re-entering one
    /// of these through an alias would recurse forever.
    in_progress: HashSet<usize>,
}

/// One ancestor hop on the way down to a leaf.
struct PathStep {
    segment: Segment,
    key_span: Option<Span>,
    value_span: Span,
}

fn build_map<'a>(root: &'a YamlNode, ctx: &mut IndexContext<'a>) -> RangeMap {
    let mut map = RangeMap::new(root.span.to_range(ctx.lc), None);
    let mut path = Vec::new();
    walk(root, &mut path, &mut map, ctx);
    map
}

fn walk<'a>(
    node: &'a YamlNode,
    path: &mut Vec<PathStep>,
    map: &mut RangeMap,
    ctx: &mut IndexContext<'a>,
) {
    let mut entered_anchor = None;
    if let Some(id) = node.anchor {
        ctx.anchors.entry(id).or_insert(node);
        if ctx.in_progress.insert(id) {
            entered_anchor = Some(id);
        }
    }

    match &node.kind {
        NodeKind::Scalar => {
            record_leaf(map, path, node.span, None, ctx);
        }

        NodeKind::Alias(anchor_id) => {
            let target = match ctx.anchors.get(anchor_id) {
                Some(target) if !ctx.in_progress.contains(anchor_id) => Some(*target),
                _ => None,
            };
            let alias_map = target.map(|t| build_map(t, ctx));
            record_leaf(map, path, node.span, alias_map, ctx);
        }

        NodeKind::Sequence(items) => {
            // The index comes from the traversal itself; sequences may hold
            // duplicate values, so a value search would be wrong.
            for (index, item) in items.iter().enumerate() {
                path.push(PathStep {
                    segment: Segment::Index(index),
                    key_span: None,
                    value_span: item.span,
                });
                walk(item, path, map, ctx);
                path.pop();
            }
        }

        NodeKind::Mapping(entries) => {
            for entry in entries {
                let Some(segment) = key_segment(&entry.key) else {
                    // Complex key: nothing beneath it gets a recorded position.
                    continue;
                };
                path.push(PathStep {
                    segment,
                    key_span: Some(entry.key.span),
                    value_span: entry.value.span,
                });
                walk(&entry.value, path, map, ctx);
                path.pop();
            }
        }
    }

    if let Some(id) = entered_anchor {
        ctx.in_progress.remove(&id);
    }
}

/// Record one scalar/alias leaf, materializing its ancestor chain.
///
/// Ancestor entries are created on first visit only; a later visit to the
/// same segment descends into the existing entry. The terminal node takes
/// the leaf's own range and, for a resolved alias, the target's range map.
fn record_leaf(
    map: &mut RangeMap,
    path: &[PathStep],
    leaf_span: Span,
    alias_target: Option<RangeMap>,
    ctx: &IndexContext<'_>,
) {
    let lc = ctx.lc;
    let mut cursor = map;
    for step in path {
        cursor = cursor
            .children
            .entry(step.segment.clone())
            .or_insert_with(|| {
                RangeMap::new(
                    step.value_span.to_range(lc),
                    step.key_span.map(|s| s.to_range(lc)),
                )
            });
    }

    cursor.value_range = leaf_span.to_range(lc);
    if let Some(target) = alias_target {
        cursor.alias_target = Some(Box::new(target));
    }
}

/// Derive the path segment for a mapping key, when it has a scalar key.
fn key_segment(key: &YamlNode) -> Option<Segment> {
    match &key.yaml {
        Yaml::String(s) => Some(Segment::Key(s.clone())),
        Yaml::Integer(i) => Some(Segment::Key(i.to_string())),
        Yaml::Real(s) => Some(Segment::Key(s.clone())),
        Yaml::Boolean(b) => Some(Segment::Key(b.to_string())),
        Yaml::Null => Some(Segment::Key("null".to_string())),
        _ => None,
    }
}
