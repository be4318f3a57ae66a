//! Property tests for the annotation engine.
//!
//! Covers the lenient scanner, the right-biased merge and the
//! `to_docs` → `parse_lines` round trip.

use indexmap::IndexMap;
use proptest::prelude::*;
use tgmodel::{DirectiveSyntax, Tags, parse_comment, parse_lines};

// ============================================================================
// STRATEGIES
// ============================================================================

/// Keys with a fixed prefix so generated garbage can never collide with them.
fn arb_key() -> impl Strategy<Value = String> {
    "k_[a-z0-9_.\\-]{1,8}"
}

/// Values that need no quoting.
fn arb_bare_value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_./:\\-]{1,12}"
}

/// Any printable value, including quotes, commas and newlines.
fn arb_value() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "\\PC{0,24}",
        1 => "[a-z ,`\"\\\\]{0,12}",
        1 => "[a-z]{1,4}\n[a-z]{1,4}",
    ]
}

/// Keys of any shape a bare word can take, not just identifiers.
fn arb_word_key() -> impl Strategy<Value = String> {
    "[0-9A-Za-z_./:@#+\\-]{1,8}"
}

/// Fragments that never produce a `k_` key.
fn arb_garbage() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("="),
            Just("=="),
            Just(","),
            Just("\"open"),
            Just("`"),
            Just("9bad"),
            Just("free prose"),
        ],
        0..6,
    )
    .prop_map(|parts| parts.join(" "))
}

fn arb_tags() -> impl Strategy<Value = Tags> {
    proptest::collection::vec((arb_key(), arb_value()), 0..6)
        .prop_map(|pairs| pairs.into_iter().collect())
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_well_formed_pairs_survive_garbage(
        pairs in proptest::collection::btree_map(arb_key(), arb_bare_value(), 1..6),
        garbage in arb_garbage(),
    ) {
        let body: Vec<String> = pairs.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let line = format!("// @tg {}, {}", body.join(","), garbage);

        let tags = parse_comment(&line);
        for (key, value) in &pairs {
            prop_assert_eq!(tags.get(key), Some(value.as_str()));
        }
    }

    #[test]
    fn prop_arbitrary_lines_never_panic(line in "\\PC{0,64}") {
        let tags = parse_comment(&format!("// @tg {line}"));
        for (key, _) in tags.iter() {
            prop_assert!(!key.is_empty());
        }
    }

    #[test]
    fn prop_docs_roundtrip(tags in arb_tags()) {
        let docs = tags.to_docs();
        prop_assert_eq!(docs.len(), tags.len());

        let reparsed = parse_lines(&docs.join("\n"));
        prop_assert_eq!(reparsed, tags);
    }

    #[test]
    fn prop_docs_roundtrip_word_keys(
        pairs in proptest::collection::vec((arb_word_key(), arb_value()), 0..6),
    ) {
        let tags: Tags = pairs.into_iter().collect();
        let reparsed = parse_lines(&tags.to_docs().join("\n"));
        prop_assert_eq!(reparsed, tags);
    }

    #[test]
    fn prop_docs_never_invent_keys(
        pairs in proptest::collection::vec(("\\PC{0,8}", arb_bare_value()), 0..6),
    ) {
        let tags: Tags = pairs.into_iter().collect();
        let reparsed = parse_lines(&tags.to_docs().join("\n"));
        for (key, value) in reparsed.iter() {
            prop_assert_eq!(tags.get(key), Some(value));
        }
    }

    #[test]
    fn prop_docs_roundtrip_custom_syntax(tags in arb_tags()) {
        let syntax = DirectiveSyntax::new("@gen", "#");
        let reparsed = syntax.parse_lines(&syntax.to_docs(&tags).join("\n"));
        prop_assert_eq!(reparsed, tags);
    }

    #[test]
    fn prop_merge_applies_left_to_right(chain in proptest::collection::vec(arb_tags(), 0..5)) {
        let merged = chain.iter().fold(Tags::new(), |acc, next| acc.merge(next));

        let mut expected: IndexMap<String, String> = IndexMap::new();
        for tags in &chain {
            for (key, value) in tags.iter() {
                expected.insert(key.to_owned(), value.to_owned());
            }
        }

        prop_assert_eq!(merged.len(), expected.len());
        for (key, value) in &expected {
            prop_assert_eq!(merged.get(key), Some(value.as_str()));
        }
    }

    #[test]
    fn prop_unmarked_lines_are_empty(line in "[^@]{0,40}") {
        prop_assert!(parse_comment(&line).is_empty());
    }
}
