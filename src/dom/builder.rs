//! Raw tree builder
//!
//! Matches start and end tokens into an owned tree that may still have
//! several top-level elements or top-level text. The canonicalizer turns
//! that into the single shape the document model stores.

use crate::core::scanner::is_whitespace;
use crate::core::tokenizer::{Token, TokenKind, Tokenizer};
use crate::error::{Error, Result};

use super::node::{Attribute, Declaration};

/// A node of the raw tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawNode {
    Element {
        tag: String,
        attributes: Vec<Attribute>,
        children: Vec<RawNode>,
    },
    Text {
        text: String,
        cdata: bool,
    },
    Comment(String),
    Unknown(String),
}

/// Declaration plus top-level nodes of a parsed input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawDocument {
    pub declaration: Declaration,
    pub nodes: Vec<RawNode>,
}

/// An element whose end tag has not been seen yet
struct OpenElement {
    tag: String,
    attributes: Vec<Attribute>,
    children: Vec<RawNode>,
    position: usize,
}

/// Build a raw tree from input text
pub fn build(input: &str) -> Result<RawDocument> {
    let mut builder = TreeBuilder::default();
    for token in Tokenizer::new(input) {
        builder.push(token?)?;
    }
    builder.finish()
}

#[derive(Default)]
struct TreeBuilder {
    declaration: Declaration,
    top: Vec<RawNode>,
    stack: Vec<OpenElement>,
}

impl TreeBuilder {
    fn children(&mut self) -> &mut Vec<RawNode> {
        match self.stack.last_mut() {
            Some(open) => &mut open.children,
            None => &mut self.top,
        }
    }

    fn push(&mut self, token: Token<'_>) -> Result<()> {
        let position = token.span.0;
        match token.kind {
            TokenKind::Declaration(declaration) => self.declaration = declaration,
            TokenKind::StartTag { name, attributes } => {
                self.stack.push(OpenElement {
                    tag: name.to_string(),
                    attributes: convert_attributes(attributes),
                    children: Vec::new(),
                    position,
                });
            }
            TokenKind::EmptyTag { name, attributes } => {
                self.children().push(RawNode::Element {
                    tag: name.to_string(),
                    attributes: convert_attributes(attributes),
                    children: Vec::new(),
                });
            }
            TokenKind::EndTag { name } => {
                let open = self.stack.pop().ok_or_else(|| {
                    Error::structure(format!("end tag </{}> has no open element", name), position)
                })?;
                if open.tag != name {
                    return Err(Error::structure(
                        format!("expected </{}>, found </{}>", open.tag, name),
                        position,
                    ));
                }
                self.children().push(RawNode::Element {
                    tag: open.tag,
                    attributes: open.attributes,
                    children: open.children,
                });
            }
            TokenKind::Text(text) => {
                if !text.bytes().all(is_whitespace) {
                    push_text(self.children(), &text, false);
                }
            }
            TokenKind::CData(text) => push_text(self.children(), text, true),
            TokenKind::Comment(text) => self.children().push(RawNode::Comment(text.to_string())),
            TokenKind::Unknown(text) => self.children().push(RawNode::Unknown(text.to_string())),
        }
        Ok(())
    }

    fn finish(self) -> Result<RawDocument> {
        if let Some(open) = self.stack.last() {
            return Err(Error::structure(
                format!("element <{}> is never closed", open.tag),
                open.position,
            ));
        }
        Ok(RawDocument {
            declaration: self.declaration,
            nodes: self.top,
        })
    }
}

/// Append text, merging into a preceding run of the same flavour
fn push_text(children: &mut Vec<RawNode>, text: &str, cdata: bool) {
    if let Some(RawNode::Text { text: last, cdata: last_cdata }) = children.last_mut() {
        if *last_cdata == cdata {
            last.push_str(text);
            return;
        }
    }
    children.push(RawNode::Text {
        text: text.to_string(),
        cdata,
    });
}

fn convert_attributes(raw: Vec<crate::core::attributes::RawAttribute<'_>>) -> Vec<Attribute> {
    raw.iter().map(|a| Attribute::new(a.name, &a.value)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawNode {
        RawNode::Text {
            text: s.to_string(),
            cdata: false,
        }
    }

    #[test]
    fn test_nested_elements() {
        let raw = build("<a><b x=\"1\">hi</b><c/></a>").unwrap();
        assert_eq!(raw.nodes.len(), 1);
        match &raw.nodes[0] {
            RawNode::Element { tag, children, .. } => {
                assert_eq!(tag, "a");
                assert_eq!(children.len(), 2);
                match &children[0] {
                    RawNode::Element { attributes, children, .. } => {
                        assert_eq!(attributes[0].value(), "1");
                        assert_eq!(children, &vec![text("hi")]);
                    }
                    other => panic!("unexpected {:?}", other),
                }
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_runs_dropped() {
        let raw = build("<a>\n    <b/>\n</a>\n").unwrap();
        match &raw.nodes[..] {
            [RawNode::Element { children, .. }] => assert_eq!(children.len(), 1),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_cdata_whitespace_kept() {
        let raw = build("<a><![CDATA[  ]]></a>").unwrap();
        match &raw.nodes[0] {
            RawNode::Element { children, .. } => assert_eq!(
                children,
                &vec![RawNode::Text {
                    text: "  ".to_string(),
                    cdata: true
                }]
            ),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_adjacent_cdata_merged() {
        let raw = build("<a><![CDATA[x]]]]><![CDATA[>y]]></a>").unwrap();
        match &raw.nodes[0] {
            RawNode::Element { children, .. } => assert_eq!(
                children,
                &vec![RawNode::Text {
                    text: "x]]>y".to_string(),
                    cdata: true
                }]
            ),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_multiple_top_level_kept() {
        let raw = build("<!--c--><a/>text<b/>").unwrap();
        assert_eq!(raw.nodes.len(), 4);
        assert_eq!(raw.nodes[2], text("text"));
    }

    #[test]
    fn test_declaration_recorded() {
        let raw = build("<?xml version=\"1.0\" encoding=\"ASCII\"?><a/>").unwrap();
        assert_eq!(raw.declaration.encoding, "ASCII");
        assert!(raw.declaration.standalone);
    }

    #[test]
    fn test_mismatched_end_tag() {
        let err = build("<a><b></a>").unwrap_err();
        assert!(matches!(err, Error::Structure { position: 6, .. }));
    }

    #[test]
    fn test_end_tag_without_open_element() {
        assert!(matches!(build("</a>").unwrap_err(), Error::Structure { .. }));
    }

    #[test]
    fn test_unclosed_element() {
        let err = build("<a><b></b>").unwrap_err();
        assert!(matches!(err, Error::Structure { position: 0, .. }));
    }

    #[test]
    fn test_lex_error_propagates() {
        assert!(matches!(build("<a>&oops;</a>").unwrap_err(), Error::Lex { .. }));
    }
}
