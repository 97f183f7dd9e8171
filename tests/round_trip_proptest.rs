//! Property-based round-trip tests
//!
//! Documents are built through the mutation API from generated trees,
//! written in both modes, and parsed back. The re-parsed document must
//! have the same structure.

mod common;

use common::{assert_same_structure, shape};
use minixml::{Container, Document, NodeId, WriteOptions};
use proptest::prelude::*;

/// A generated tree, built into a document with the mutation API
#[derive(Debug, Clone)]
enum Gen {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<Gen>,
    },
    Text(String),
    CData(String),
    Comment(String),
}

fn tag_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_.-]{0,6}".prop_filter("tag word xml is reserved", |t| {
        !t.eq_ignore_ascii_case("xml")
    })
}

fn attributes_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z][a-z0-9]{0,4}", "[a-z0-9é€<>&'\" ]{0,6}"), 0..3)
}

fn leaf_strategy() -> impl Strategy<Value = Gen> {
    prop_oneof![
        // Never whitespace-only, which the parser drops
        "[a-zé中<>&'\" ]{0,6}[a-z&<é]".prop_map(Gen::Text),
        "[a-z \\]>]{0,8}".prop_map(Gen::CData),
        "[a-z ]{0,8}".prop_map(Gen::Comment),
        (tag_strategy(), attributes_strategy()).prop_map(|(tag, attributes)| Gen::Element {
            tag,
            attributes,
            children: Vec::new(),
        }),
    ]
}

fn element_strategy() -> impl Strategy<Value = Gen> {
    leaf_strategy().prop_recursive(4, 48, 5, |inner| {
        (
            tag_strategy(),
            attributes_strategy(),
            prop::collection::vec(inner, 0..5),
        )
            .prop_map(|(tag, attributes, children)| Gen::Element {
                tag,
                attributes,
                children,
            })
    })
}

fn document_strategy() -> impl Strategy<Value = (String, Vec<Gen>, Vec<String>)> {
    (
        tag_strategy(),
        prop::collection::vec(element_strategy(), 0..5),
        prop::collection::vec("[a-z ]{0,8}", 0..3),
    )
}

fn build_node(doc: &mut Document, gen: &Gen) -> NodeId {
    match gen {
        Gen::Element {
            tag,
            attributes,
            children,
        } => {
            let id = doc.new_element(tag).unwrap();
            for (name, value) in attributes {
                doc.element_mut(id).unwrap().set_attribute(name, value).unwrap();
            }
            build_children(doc, id, children);
            id
        }
        Gen::Text(text) => doc.new_text(text),
        Gen::CData(text) => doc.new_cdata(text),
        Gen::Comment(text) => doc.new_comment(text),
    }
}

/// Adjacent text runs would merge on re-parse, so only the first of a
/// run of text nodes is kept
fn build_children(doc: &mut Document, parent: NodeId, children: &[Gen]) {
    let mut last_was_text = false;
    for child in children {
        let is_text = matches!(child, Gen::Text(_) | Gen::CData(_));
        if is_text && last_was_text {
            continue;
        }
        last_was_text = is_text;
        let id = build_node(doc, child);
        doc.append_node(parent, id).unwrap();
    }
}

fn build_document(root_tag: &str, children: &[Gen], comments: &[String]) -> Document {
    let mut doc = Document::new();
    doc.set_root_tag(root_tag).unwrap();
    let root = doc.root_element();
    build_children(&mut doc, root, children);
    for text in comments {
        let comment = doc.new_comment(text);
        let end = doc.node_end(Container::Document, minixml::NodeKinds::ANY);
        doc.insert_node_before(&end, comment).unwrap();
    }
    doc
}

proptest! {
    #[test]
    fn test_compact_round_trip((root, children, comments) in document_strategy()) {
        let doc = build_document(&root, &children, &comments);
        let text = doc.write_to_string(&WriteOptions::compact());
        let parsed = Document::parse(&text);
        prop_assert!(parsed.is_ok(), "failed to parse: {}", text);
        if let Ok(parsed) = parsed {
            prop_assert_eq!(shape(&doc, Container::Document), shape(&parsed, Container::Document));
        }
    }

    #[test]
    fn test_pretty_round_trip((root, children, comments) in document_strategy()) {
        let doc = build_document(&root, &children, &comments);
        let text = doc.write_to_string(&WriteOptions::pretty());
        let parsed = Document::parse(&text);
        prop_assert!(parsed.is_ok(), "failed to parse: {}", text);
        if let Ok(parsed) = parsed {
            prop_assert_eq!(shape(&doc, Container::Document), shape(&parsed, Container::Document));
        }
    }

    #[test]
    fn test_parse_is_idempotent((root, children, comments) in document_strategy()) {
        let doc = build_document(&root, &children, &comments);
        let once = Document::parse(&doc.write_to_string(&WriteOptions::compact())).unwrap();
        let twice = Document::parse(&once.write_to_string(&WriteOptions::compact())).unwrap();
        assert_same_structure(&once, &twice);
    }

    #[test]
    fn test_arbitrary_input_never_panics(input in "[a-zé€ß中\u{feff}<>/!?\\[\\]&;#=\"' -]{0,40}") {
        // Errors are fine; panics are not
        let _ = Document::parse(&input);
    }
}
