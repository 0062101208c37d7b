//! YAML parser that builds span-tracked YamlNode trees.

use crate::{Error, MappingEntry, Result, Span, YamlNode};
use std::collections::HashMap;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};
use yaml_rust2::Yaml;

/// Parse YAML from a string, producing a span-tracked [`YamlNode`] tree.
///
/// This parses a single YAML document. If the input contains multiple
/// documents, only the first one will be parsed. Anchors and aliases are
/// preserved in the tree: an alias keeps its own span and anchor id, with
/// its logical value resolved from the anchor when possible.
///
/// # Example
///
/// ```rust
/// use enforce_yaml::parse;
///
/// let doc = parse("title: My Document").unwrap();
/// assert!(doc.is_mapping());
/// ```
///
/// # Errors
///
/// Returns an error if the YAML is invalid or the input holds no document.
pub fn parse(content: &str) -> Result<YamlNode> {
    let mut parser = Parser::new_from_str(content);
    let mut builder = YamlBuilder::new(content);

    parser
        .load(&mut builder, false) // false = single document only
        .map_err(Error::from)?;

    builder.result()
}

/// Builder that implements MarkedEventReceiver to construct YamlNode trees.
struct YamlBuilder<'a> {
    /// The source text being parsed, used to measure alias tokens.
    source: &'a str,

    /// Stack of container nodes being constructed.
    stack: Vec<BuildNode>,

    /// Logical values of completed anchored nodes, keyed by anchor id.
    ///
    /// An alias that fires before its anchor completes (a forward or
    /// self reference) resolves to `Yaml::BadValue`.
    anchors: HashMap<usize, Yaml>,

    /// The completed root node.
    root: Option<YamlNode>,
}

/// A container being constructed during parsing.
enum BuildNode {
    Sequence {
        start_marker: Marker,
        anchor: Option<usize>,
        items: Vec<YamlNode>,
    },

    Mapping {
        start_marker: Marker,
        anchor: Option<usize>,
        entries: Vec<(YamlNode, Option<YamlNode>)>,
    },
}

impl<'a> YamlBuilder<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            stack: Vec::new(),
            anchors: HashMap::new(),
            root: None,
        }
    }

    fn result(self) -> Result<YamlNode> {
        self.root.ok_or(Error::EmptyDocument)
    }

    fn push_complete(&mut self, node: YamlNode) {
        if self.stack.is_empty() {
            // This is the root
            self.root = Some(node);
            return;
        }

        // Add to the parent node
        match self.stack.last_mut().unwrap() {
            BuildNode::Sequence { items, .. } => {
                items.push(node);
            }
            BuildNode::Mapping { entries, .. } => {
                if let Some((_, value)) = entries.last_mut() {
                    if value.is_none() {
                        *value = Some(node);
                    } else {
                        // This is a new key
                        entries.push((node, None));
                    }
                } else {
                    // First key
                    entries.push((node, None));
                }
            }
        }
    }

    /// Register a completed anchored value so later aliases can resolve it.
    fn register_anchor(&mut self, anchor_id: usize, yaml: &Yaml) {
        // yaml-rust2 uses 0 for "no anchor"
        if anchor_id > 0 {
            self.anchors.insert(anchor_id, yaml.clone());
        }
    }

    fn scalar_span(&self, marker: &Marker, value: &str, style: TScalarStyle) -> Span {
        let start = marker.index();
        let bytes = self.source.as_bytes();
        match style {
            // The marker sits on the opening quote; the event value has the
            // quotes and escapes stripped, so measure the token from the
            // source instead.
            TScalarStyle::SingleQuoted if bytes.get(start) == Some(&b'\'') => {
                Span::new(start, self.quoted_end(start, b'\''))
            }
            TScalarStyle::DoubleQuoted if bytes.get(start) == Some(&b'"') => {
                Span::new(start, self.quoted_end(start, b'"'))
            }
            // Block scalars: the marker sits on the `|`/`>` indicator and
            // the folded body cannot be recovered from the value; the span
            // covers the indicator so locations still point at the scalar.
            TScalarStyle::Literal | TScalarStyle::Folded => Span::new(start, start + 1),
            _ => Span::new(start, start + value.len()),
        }
    }

    /// Find the offset just past the closing quote of the token at `start`.
    fn quoted_end(&self, start: usize, quote: u8) -> usize {
        let bytes = self.source.as_bytes();
        let mut i = start + 1;
        while i < bytes.len() {
            if bytes[i] == b'\\' && quote == b'"' {
                i += 2;
            } else if bytes[i] == quote {
                // Single-quoted style escapes a quote by doubling it.
                if quote == b'\'' && bytes.get(i + 1) == Some(&quote) {
                    i += 2;
                } else {
                    return i + 1;
                }
            } else {
                i += 1;
            }
        }
        bytes.len()
    }

    /// Measure the `*name` token starting at `marker`.
    fn alias_span(&self, marker: &Marker) -> Span {
        let start = marker.index();
        let rest = &self.source.as_bytes()[start.min(self.source.len())..];
        let len = rest
            .iter()
            .position(|b| b.is_ascii_whitespace() || matches!(b, b',' | b']' | b'}'))
            .unwrap_or(rest.len());
        Span::new(start, start + len)
    }
}

impl<'a> MarkedEventReceiver for YamlBuilder<'a> {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        match ev {
            Event::Nothing => {}

            Event::StreamStart => {}
            Event::StreamEnd => {}
            Event::DocumentStart => {}
            Event::DocumentEnd => {}

            Event::Scalar(value, style, anchor_id, _tag) => {
                let span = self.scalar_span(&marker, &value, style);
                let yaml = parse_scalar_value(&value, style);
                self.register_anchor(anchor_id, &yaml);

                let anchor = (anchor_id > 0).then_some(anchor_id);
                self.push_complete(YamlNode::scalar(yaml, span, anchor));
            }

            Event::SequenceStart(anchor_id, _tag) => {
                self.stack.push(BuildNode::Sequence {
                    start_marker: marker,
                    anchor: (anchor_id > 0).then_some(anchor_id),
                    items: Vec::new(),
                });
            }

            Event::SequenceEnd => {
                let build_node = self.stack.pop().expect("SequenceEnd without SequenceStart");

                if let BuildNode::Sequence {
                    start_marker,
                    anchor,
                    items,
                } = build_node
                {
                    // The block start marker can trail the first token, so
                    // anchor the span to the first item when there is one.
                    let start = items
                        .first()
                        .map_or(start_marker.index(), |item| {
                            item.span.start.min(start_marker.index())
                        });
                    let span = Span::new(start, marker.index());

                    let yaml_items: Vec<Yaml> = items.iter().map(|n| n.yaml.clone()).collect();
                    let yaml = Yaml::Array(yaml_items);
                    if let Some(id) = anchor {
                        self.register_anchor(id, &yaml);
                    }

                    self.push_complete(YamlNode::sequence(yaml, span, anchor, items));
                } else {
                    panic!("Expected Sequence build node");
                }
            }

            Event::MappingStart(anchor_id, _tag) => {
                self.stack.push(BuildNode::Mapping {
                    start_marker: marker,
                    anchor: (anchor_id > 0).then_some(anchor_id),
                    entries: Vec::new(),
                });
            }

            Event::MappingEnd => {
                let build_node = self.stack.pop().expect("MappingEnd without MappingStart");

                if let BuildNode::Mapping {
                    start_marker,
                    anchor,
                    entries,
                } = build_node
                {
                    // For block mappings the start marker sits past the
                    // first key token; anchor the span to the first key.
                    let start = entries
                        .first()
                        .map_or(start_marker.index(), |(key, _)| {
                            key.span.start.min(start_marker.index())
                        });
                    let span = Span::new(start, marker.index());

                    let mut tracked_entries = Vec::new();
                    let mut yaml_pairs = Vec::new();

                    for (key, value) in entries {
                        let value = value.expect("Mapping entry without value");
                        yaml_pairs.push((key.yaml.clone(), value.yaml.clone()));
                        tracked_entries.push(MappingEntry::new(key, value));
                    }

                    let yaml = Yaml::Hash(yaml_pairs.into_iter().collect());
                    if let Some(id) = anchor {
                        self.register_anchor(id, &yaml);
                    }

                    self.push_complete(YamlNode::mapping(yaml, span, anchor, tracked_entries));
                } else {
                    panic!("Expected Mapping build node");
                }
            }

            Event::Alias(anchor_id) => {
                let span = self.alias_span(&marker);
                let yaml = self
                    .anchors
                    .get(&anchor_id)
                    .cloned()
                    .unwrap_or(Yaml::BadValue);
                self.push_complete(YamlNode::alias(yaml, span, anchor_id));
            }
        }
    }
}

/// Parse a plain scalar string into the appropriate Yaml type.
///
/// Quoted and block scalars are always strings; plain scalars get type
/// inference for integers, floats, booleans and null.
fn parse_scalar_value(value: &str, style: TScalarStyle) -> Yaml {
    if style != TScalarStyle::Plain {
        return Yaml::String(value.to_string());
    }

    if let Ok(i) = value.parse::<i64>() {
        return Yaml::Integer(i);
    }

    if value.parse::<f64>().is_ok() {
        return Yaml::Real(value.to_string());
    }

    match value {
        "true" | "True" | "TRUE" => return Yaml::Boolean(true),
        "false" | "False" | "FALSE" => return Yaml::Boolean(false),
        "null" | "Null" | "NULL" | "~" | "" => return Yaml::Null,
        _ => {}
    }

    Yaml::String(value.to_string())
}
