//! Node representation
//!
//! Nodes live in the document arena and are addressed by [`NodeId`], an
//! arena index paired with a generation counter so that a handle to a
//! destroyed node is detected rather than silently aliasing a new one.
//! Each handle also records the document that issued it.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::core::scanner::is_valid_name;
use crate::error::{Error, Result};
use crate::value::FromValue;

/// Compact node identifier (issuing document, index into arena, generation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) document: u32,
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}:{}v{}", self.document, self.index, self.generation)
    }
}

/// Type of node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Element node
    Element,
    /// Text content, plain or CDATA
    Text,
    /// Comment
    Comment,
    /// Unrecognized markup, kept verbatim
    Unknown,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Element => "ElementNode",
            NodeKind::Text => "TextNode",
            NodeKind::Comment => "CommentNode",
            NodeKind::Unknown => "UnknownNode",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of node kinds, used to filter iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NodeKinds(u8);

impl NodeKinds {
    pub const NONE: NodeKinds = NodeKinds(0);
    pub const ELEMENT: NodeKinds = NodeKinds(1);
    pub const TEXT: NodeKinds = NodeKinds(1 << 1);
    pub const COMMENT: NodeKinds = NodeKinds(1 << 2);
    pub const UNKNOWN: NodeKinds = NodeKinds(1 << 3);
    /// Elements and text: the nodes that carry content
    pub const MEANINGFUL: NodeKinds = NodeKinds(Self::ELEMENT.0 | Self::TEXT.0);
    /// Comments and unknown markup
    pub const JUNK: NodeKinds = NodeKinds(Self::COMMENT.0 | Self::UNKNOWN.0);
    pub const ANY: NodeKinds = NodeKinds(Self::MEANINGFUL.0 | Self::JUNK.0);

    /// True if every kind in `other` is also in `self`
    #[inline]
    pub fn contains(self, other: NodeKinds) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if nodes of `kind` pass this filter
    #[inline]
    pub fn allows(self, kind: NodeKind) -> bool {
        self.contains(kind.into())
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<NodeKind> for NodeKinds {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Element => NodeKinds::ELEMENT,
            NodeKind::Text => NodeKinds::TEXT,
            NodeKind::Comment => NodeKinds::COMMENT,
            NodeKind::Unknown => NodeKinds::UNKNOWN,
        }
    }
}

impl BitOr for NodeKinds {
    type Output = NodeKinds;

    fn bitor(self, rhs: NodeKinds) -> NodeKinds {
        NodeKinds(self.0 | rhs.0)
    }
}

impl BitOrAssign for NodeKinds {
    fn bitor_assign(&mut self, rhs: NodeKinds) {
        self.0 |= rhs.0;
    }
}

/// The `<?xml ... ?>` header record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub version: String,
    pub encoding: String,
    pub standalone: bool,
}

impl Default for Declaration {
    fn default() -> Self {
        Declaration {
            version: "1.0".to_string(),
            encoding: "UTF-8".to_string(),
            standalone: true,
        }
    }
}

/// Who owns a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// Created or removed, not placed anywhere
    Orphan,
    /// On the document's top-level list
    Document,
    /// A child of the given element
    Element(NodeId),
}

/// A node in the arena
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) owner: Owner,
    pub(crate) prev_sibling: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    pub(crate) data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Node {
            owner: Owner::Orphan,
            prev_sibling: None,
            next_sibling: None,
            data,
        }
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    #[inline]
    pub fn owner(&self) -> Owner {
        self.owner
    }

    #[inline]
    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev_sibling
    }

    #[inline]
    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    #[inline]
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Text for Text nodes, contents for Comment and Unknown, tag for Element
    pub fn text(&self) -> &str {
        match &self.data {
            NodeData::Element(e) => &e.tag,
            NodeData::Text(t) => &t.text,
            NodeData::Comment(c) => &c.text,
            NodeData::Unknown(u) => &u.text,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }
}

/// Per-kind payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Element(Element),
    Text(Text),
    Comment(Comment),
    Unknown(Unknown),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Element(_) => NodeKind::Element,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::Comment(_) => NodeKind::Comment,
            NodeData::Unknown(_) => NodeKind::Unknown,
        }
    }
}

/// Check a tag word supplied through the API
pub(crate) fn validate_tag(tag: &str) -> Result<()> {
    if !is_valid_name(tag) || tag.eq_ignore_ascii_case("xml") {
        return Err(Error::InvalidName(tag.to_string()));
    }
    Ok(())
}

/// Element payload: tag, attributes and child links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<Attribute>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
}

impl Element {
    /// Tag must already be validated
    pub(crate) fn new(tag: String, attributes: Vec<Attribute>) -> Self {
        Element {
            tag,
            attributes,
            first_child: None,
            last_child: None,
        }
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn set_tag(&mut self, tag: &str) -> Result<()> {
        validate_tag(tag)?;
        self.tag = tag.to_string();
        Ok(())
    }

    #[inline]
    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    #[inline]
    pub fn last_child(&self) -> Option<NodeId> {
        self.last_child
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    /// Attributes in declaration order
    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.attributes.iter_mut().find(|a| a.name == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Replace the value of an existing attribute in place, or append a new one
    pub fn set_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        if let Some(attr) = self.attribute_mut(name) {
            attr.value = value.to_string();
            return Ok(());
        }
        if !is_valid_name(name) {
            return Err(Error::InvalidName(name.to_string()));
        }
        self.attributes.push(Attribute::new(name, value));
        Ok(())
    }

    /// Remove an attribute, returning it if it was present
    pub fn remove_attribute(&mut self, name: &str) -> Option<Attribute> {
        let pos = self.attributes.iter().position(|a| a.name == name)?;
        Some(self.attributes.remove(pos))
    }

    pub fn required_attribute(&self, name: &str) -> Result<&Attribute> {
        self.attribute(name).ok_or_else(|| Error::NotFound {
            what: "attribute",
            name: name.to_string(),
        })
    }

    pub fn required_attribute_value(&self, name: &str) -> Result<&str> {
        self.required_attribute(name).map(Attribute::value)
    }

    pub fn required_attribute_value_as<T: FromValue>(&self, name: &str) -> Result<T> {
        self.required_attribute(name)?.value_as()
    }

    pub fn optional_attribute_value<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attribute(name).map_or(default, Attribute::value)
    }

    /// Parsed attribute value, or `default` when the attribute is absent.
    /// A present but unparsable value is still an error.
    pub fn optional_attribute_value_as<T: FromValue>(&self, name: &str, default: T) -> Result<T> {
        match self.attribute(name) {
            Some(attr) => attr.value_as(),
            None => Ok(default),
        }
    }
}

/// Stored attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    value: String,
}

impl Attribute {
    pub(crate) fn new(name: &str, value: &str) -> Self {
        Attribute {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    pub fn value_as<T: FromValue>(&self) -> Result<T> {
        T::from_value(&self.value)
    }
}

/// Text payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub(crate) text: String,
    pub(crate) cdata: bool,
}

impl Text {
    pub(crate) fn new(text: &str, cdata: bool) -> Self {
        Text {
            text: text.to_string(),
            cdata,
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// True if this text is written as a CDATA section
    #[inline]
    pub fn is_cdata(&self) -> bool {
        self.cdata
    }

    pub fn set_cdata(&mut self, cdata: bool) {
        self.cdata = cdata;
    }
}

/// Comment payload, never interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub(crate) text: String,
}

impl Comment {
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

/// Whatever fell between `<` and `>` without matching a known pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unknown {
    pub(crate) text: String,
}

impl Unknown {
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}
