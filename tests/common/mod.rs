//! Shared helpers for integration tests

use minixml::{Container, Document, NodeData, NodeKinds};

/// Structural view of a node, independent of handles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<Shape>,
    },
    Text { text: String, cdata: bool },
    Comment(String),
    Unknown(String),
}

pub fn shape(doc: &Document, container: Container) -> Vec<Shape> {
    doc.children(container, NodeKinds::ANY)
        .unwrap()
        .map(|id| match doc.node(id).unwrap().data() {
            NodeData::Element(e) => Shape::Element {
                tag: e.tag().to_string(),
                attributes: e
                    .attributes()
                    .iter()
                    .map(|a| (a.name().to_string(), a.value().to_string()))
                    .collect(),
                children: shape(doc, Container::Element(id)),
            },
            NodeData::Text(t) => Shape::Text {
                text: t.text().to_string(),
                cdata: t.is_cdata(),
            },
            NodeData::Comment(c) => Shape::Comment(c.text().to_string()),
            NodeData::Unknown(u) => Shape::Unknown(u.text().to_string()),
        })
        .collect()
}

/// Declaration and top-level structure must match
pub fn assert_same_structure(a: &Document, b: &Document) {
    assert_eq!(a.declaration(), b.declaration());
    assert_eq!(shape(a, Container::Document), shape(b, Container::Document));
}
