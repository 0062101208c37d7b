//! End-to-end scenarios: validator-produced errors resolved against
//! documents loaded from source text.
//!
//! The structure validator is external; these tests construct the abstract
//! error records it would emit and check only the resolution side.

use enforce_locate::{load, locate, AbstractError, ErrorKind, Location, Segment};

fn loc(line: usize, column: usize) -> Location {
    Location { line, column }
}

const SNAKE_DOC: &str = "name: snake\nimages:\n  - uri: pic.png\n";

#[test]
fn missing_key_reported_at_end_of_enclosing_value() {
    // Structure requires images[].url; the validator reports the missing
    // key against the end of the entry that should have held it.
    let doc = load(SNAKE_DOC).unwrap();
    let err = AbstractError::new(
        "missing key 'url'",
        vec!["images".into(), 0.into()],
        ErrorKind::ValueEnd,
    );
    let resolved = locate(&err, &doc.map);
    assert_eq!(resolved.primary, loc(4, 1));
    assert!(resolved.via.is_empty());
}

#[test]
fn extra_key_reported_at_the_key_itself() {
    let doc = load(SNAKE_DOC).unwrap();
    let err = AbstractError::new(
        "extra key",
        vec!["images".into(), 0.into(), "uri".into()],
        ErrorKind::Key,
    );
    let resolved = locate(&err, &doc.map);
    assert_eq!(resolved.primary, loc(3, 5));
    assert_eq!(resolved.to_string(), "L3:5");
}

#[test]
fn top_level_structure_override_points_at_offending_key() {
    // With a `{name: "string"}` structure, `images` itself is the extra key.
    let doc = load(SNAKE_DOC).unwrap();
    let err = AbstractError::new("extra key", vec!["images".into()], ErrorKind::Key);
    assert_eq!(locate(&err, &doc.map).primary, loc(2, 1));
}

#[test]
fn unresolved_structure_yields_root_location() {
    let doc = load(SNAKE_DOC).unwrap();
    let err = AbstractError::meta("Unable to determine expected structure for file");
    let resolved = locate(&err, &doc.map);
    assert_eq!(resolved.primary, loc(1, 1));
    assert!(resolved.via.is_empty());
}

#[test]
fn alias_resolution_points_into_the_anchored_value() {
    // `b` aliases the anchored mapping; the error about b.hello.there must
    // land on the anchored text, with the alias site as a via hop.
    let source = "a: &a\n  hello:\n    there: world\nb: *a\n";
    let doc = load(source).unwrap();
    let err = AbstractError::new(
        "'world' is not an integer",
        vec!["b".into(), "hello".into(), "there".into()],
        ErrorKind::ValueStart,
    );
    let resolved = locate(&err, &doc.map);
    assert_eq!(resolved.primary, loc(3, 12));
    assert_eq!(resolved.via, vec![loc(4, 4)]);
    assert_eq!(resolved.to_string(), "L3:12 via L4:4");
}

#[test]
fn multi_hop_alias_chain_records_one_hop_per_alias() {
    let source = "a: &a\n  v: 1\nb: &b\n  w: *a\nc: *b\n";
    let doc = load(source).unwrap();
    let err = AbstractError::new(
        "'1' is not a string",
        vec!["c".into(), "w".into(), "v".into()],
        ErrorKind::ValueStart,
    );
    let resolved = locate(&err, &doc.map);
    assert_eq!(resolved.primary, loc(2, 6));
    // One hop per alias traversed: first `*b` at c, then `*a` at w.
    assert_eq!(resolved.via, vec![loc(5, 4), loc(4, 6)]);
}

#[test]
fn alias_chain_survives_partial_paths() {
    // The path dead-ends inside the alias target; resolution degrades to
    // the deepest recorded ancestor but keeps the hops already taken.
    let source = "a: &a\n  v: 1\nb: *a\n";
    let doc = load(source).unwrap();
    let err = AbstractError::new(
        "missing key 'x'",
        vec!["b".into(), "nope".into()],
        ErrorKind::ValueStart,
    );
    let resolved = locate(&err, &doc.map);
    // Anchored mapping starts at its first key.
    assert_eq!(resolved.primary, loc(2, 3));
    assert_eq!(resolved.via, vec![loc(3, 4)]);
}

#[test]
fn errors_resolve_identically_on_reindexed_documents() {
    let first = load(SNAKE_DOC).unwrap();
    let second = load(SNAKE_DOC).unwrap();
    assert_eq!(first.map, second.map);

    let err = AbstractError::new(
        "extra key",
        vec!["images".into(), 0.into(), "uri".into()],
        ErrorKind::Key,
    );
    assert_eq!(locate(&err, &first.map), locate(&err, &second.map));
}

#[test]
fn every_scalar_leaf_round_trips_through_its_range() {
    // Walk the logical tree and check each scalar's recorded span decodes
    // to the scalar's literal text.
    let source = "name: snake\nimages:\n  - uri: pic.png\ncount: 2\n";
    let doc = load(source).unwrap();

    let mut stack = vec![&doc.root];
    let mut seen = 0;
    while let Some(node) = stack.pop() {
        if let Some(items) = node.as_sequence() {
            stack.extend(items.iter());
        } else if let Some(entries) = node.as_mapping() {
            for entry in entries {
                stack.push(&entry.value);
            }
        } else if node.is_scalar() {
            let literal = &source[node.span.start..node.span.end];
            assert!(!literal.is_empty());
            assert!(source.contains(literal));
            seen += 1;
        }
    }
    assert_eq!(seen, 3);
}

#[test]
fn unparsable_source_reports_without_positions() {
    // No range map exists for a document that fails to parse; the caller
    // gets an error instead of a map and must omit position info.
    let result = load("key: [unclosed");
    assert!(result.is_err());
}

#[test]
fn segments_from_literals() {
    let path: Vec<Segment> = vec!["images".into(), 0.into()];
    assert_eq!(path[0], Segment::Key("images".to_string()));
    assert_eq!(path[1], Segment::Index(0));
}
