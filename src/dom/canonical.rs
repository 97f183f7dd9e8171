//! Canonical document shape
//!
//! A canonical document has exactly one top-level element and no
//! top-level text. Anything else is wrapped in a synthesized `_Root`
//! element; comments and unknown markup stay at the top level.

use super::builder::{RawDocument, RawNode};

/// Tag of the synthesized wrapper element
pub const ROOT_TAG: &str = "_Root";

/// True if the top level already has the canonical shape
pub fn is_canonical(nodes: &[RawNode]) -> bool {
    let mut elements = 0;
    for node in nodes {
        match node {
            RawNode::Element { .. } => elements += 1,
            RawNode::Text { .. } => return false,
            RawNode::Comment(_) | RawNode::Unknown(_) => {}
        }
    }
    elements == 1
}

/// Bring a raw document into canonical shape. Canonical input is
/// returned unchanged.
pub fn canonicalize(mut raw: RawDocument) -> RawDocument {
    if is_canonical(&raw.nodes) {
        return raw;
    }

    let mut kept = Vec::new();
    let mut moved = Vec::new();
    let mut wrapper_at = None;
    for node in raw.nodes.drain(..) {
        match node {
            RawNode::Element { .. } | RawNode::Text { .. } => {
                wrapper_at.get_or_insert(kept.len());
                moved.push(node);
            }
            RawNode::Comment(_) | RawNode::Unknown(_) => kept.push(node),
        }
    }

    log::trace!(
        target: "minixml.canonical",
        "wrapping {} top-level nodes in <{}>",
        moved.len(),
        ROOT_TAG
    );

    let wrapper = RawNode::Element {
        tag: ROOT_TAG.to_string(),
        attributes: Vec::new(),
        children: moved,
    };
    let at = wrapper_at.unwrap_or(kept.len());
    kept.insert(at, wrapper);
    raw.nodes = kept;
    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::builder::build;

    fn canonical(input: &str) -> RawDocument {
        canonicalize(build(input).unwrap())
    }

    fn tags(nodes: &[RawNode]) -> Vec<String> {
        nodes
            .iter()
            .map(|n| match n {
                RawNode::Element { tag, .. } => tag.clone(),
                RawNode::Text { text, .. } => format!("text:{}", text),
                RawNode::Comment(c) => format!("comment:{}", c),
                RawNode::Unknown(u) => format!("unknown:{}", u),
            })
            .collect()
    }

    #[test]
    fn test_single_root_unchanged() {
        let raw = build("<!--a--><root/><!--b-->").unwrap();
        assert_eq!(canonicalize(raw.clone()), raw);
    }

    #[test]
    fn test_plain_text_wrapped() {
        let raw = canonical("A file consisting of just text like this.");
        match &raw.nodes[..] {
            [RawNode::Element { tag, children, .. }] => {
                assert_eq!(tag, ROOT_TAG);
                assert_eq!(
                    tags(children),
                    ["text:A file consisting of just text like this."]
                );
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        let raw = canonical("");
        assert_eq!(tags(&raw.nodes), [ROOT_TAG]);
    }

    #[test]
    fn test_wrapper_takes_first_moved_position() {
        let raw = canonical("<!--c1--><a/><!--c2--><b/>");
        assert_eq!(tags(&raw.nodes), ["comment:c1", ROOT_TAG, "comment:c2"]);
        match &raw.nodes[1] {
            RawNode::Element { children, .. } => assert_eq!(tags(children), ["a", "b"]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_only_junk_appends_wrapper() {
        let raw = canonical("<!--c--><!DOCTYPE x>");
        assert_eq!(tags(&raw.nodes), ["comment:c", "unknown:!DOCTYPE x", ROOT_TAG]);
    }

    #[test]
    fn test_idempotent() {
        for input in ["text", "<a/><b/>", "<!--c-->x<a/>", "<r><s/></r>", ""] {
            let once = canonical(input);
            let twice = canonicalize(once.clone());
            assert_eq!(once, twice, "input {:?}", input);
        }
    }
}
