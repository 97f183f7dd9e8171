//! Serializer
//!
//! Writes a document back to text in one pass over the tree. Pretty output
//! puts each node on its own line; an element that holds any text is
//! written on a single line so its content survives a re-parse exactly.

use crate::core::entities::encode_into;
use crate::dom::{Container, Document, NodeData, NodeId, NodeKinds};
use crate::error::Result;

/// Output formatting options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// No indentation and no newlines
    pub compact: bool,
    /// Spaces per nesting level in pretty mode
    pub indent: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions::pretty()
    }
}

impl WriteOptions {
    pub const fn pretty() -> Self {
        WriteOptions {
            compact: false,
            indent: 4,
        }
    }

    pub const fn compact() -> Self {
        WriteOptions {
            compact: true,
            indent: 0,
        }
    }

    pub const fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// Serialize a whole document, declaration first
pub fn write_document(doc: &Document, options: &WriteOptions) -> String {
    let mut writer = Writer::new(doc, options);
    writer.write_declaration(options.compact);
    let top: Vec<NodeId> = match doc.children(Container::Document, NodeKinds::ANY) {
        Ok(children) => children.collect(),
        Err(_) => Vec::new(),
    };
    for id in top {
        writer.write_node(id, 0, options.compact);
    }
    log::debug!("serialized document: {} bytes", writer.out.len());
    writer.out
}

/// Serialize one node and its subtree, without declaration
pub fn write_node(doc: &Document, id: NodeId, options: &WriteOptions) -> Result<String> {
    doc.node(id)?;
    let mut writer = Writer::new(doc, options);
    writer.write_node(id, 0, options.compact);
    Ok(writer.out)
}

struct Writer<'a> {
    doc: &'a Document,
    indent: usize,
    out: String,
}

impl<'a> Writer<'a> {
    fn new(doc: &'a Document, options: &WriteOptions) -> Self {
        Writer {
            doc,
            indent: options.indent,
            out: String::with_capacity(1024),
        }
    }

    fn write_declaration(&mut self, compact: bool) {
        let decl = self.doc.declaration();
        self.out.push_str("<?xml version=\"");
        encode_into(&decl.version, &mut self.out);
        self.out.push_str("\" encoding=\"");
        encode_into(&decl.encoding, &mut self.out);
        self.out.push('"');
        if !decl.standalone {
            self.out.push_str(" standalone=\"no\"");
        }
        self.out.push_str("?>");
        self.end_line(compact);
    }

    fn end_line(&mut self, compact: bool) {
        if !compact {
            self.out.push('\n');
        }
    }

    fn start_line(&mut self, depth: usize, compact: bool) {
        if !compact {
            self.out.extend(std::iter::repeat(' ').take(depth * self.indent));
        }
    }

    /// Write a node; `compact` is true for compact output and for the
    /// inside of an element written inline
    fn write_node(&mut self, id: NodeId, depth: usize, compact: bool) {
        let doc = self.doc;
        let Some(node) = doc.get(id) else {
            return;
        };
        self.start_line(depth, compact);
        match &node.data {
            NodeData::Element(element) => {
                self.out.push('<');
                self.out.push_str(element.tag());
                for attr in element.attributes() {
                    self.out.push(' ');
                    self.out.push_str(attr.name());
                    self.out.push_str("=\"");
                    encode_into(attr.value(), &mut self.out);
                    self.out.push('"');
                }

                let children: Vec<NodeId> = match doc.children(Container::Element(id), NodeKinds::ANY) {
                    Ok(children) => children.collect(),
                    Err(_) => Vec::new(),
                };
                if children.is_empty() {
                    self.out.push_str("/>");
                } else {
                    self.out.push('>');
                    let inline = compact
                        || children
                            .iter()
                            .any(|&c| doc.get(c).is_some_and(|n| n.is_text()));
                    self.end_line(inline);
                    for child in children {
                        self.write_node(child, depth + 1, inline);
                    }
                    self.start_line(depth, inline);
                    self.out.push_str("</");
                    self.out.push_str(element.tag());
                    self.out.push('>');
                }
            }
            NodeData::Text(text) if text.is_cdata() => {
                self.out.push_str("<![CDATA[");
                self.out.push_str(&text.text().replace("]]>", "]]]]><![CDATA[>"));
                self.out.push_str("]]>");
            }
            NodeData::Text(text) => encode_into(text.text(), &mut self.out),
            NodeData::Comment(comment) => {
                self.out.push_str("<!--");
                self.out.push_str(comment.text());
                self.out.push_str("-->");
            }
            NodeData::Unknown(unknown) => {
                self.out.push('<');
                self.out.push_str(unknown.text());
                self.out.push('>');
            }
        }
        self.end_line(compact);
    }
}
