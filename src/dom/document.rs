//! Document - Arena-based tree representation
//!
//! Storage:
//! - Arena of slots, each holding an optional node and a generation
//! - NodeId handles (index + generation) for traversal
//! - Sibling links for children and for the top-level list
//!
//! Every node is either an orphan, on the top-level list, or a child of
//! exactly one element. Freed slots are reused with a bumped generation,
//! so stale handles are reported instead of aliasing new nodes.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use super::builder::{self, RawNode};
use super::canonical::{canonicalize, ROOT_TAG};
use super::cursor::{Container, NodeCursor};
use super::node::{
    validate_tag, Comment, Declaration, Element, Node, NodeData, NodeId, NodeKind, NodeKinds,
    Owner, Text, Unknown,
};
use crate::error::{Error, Result};
use crate::value::{FromValue, ToValue};
use crate::writer::{self, WriteOptions};

/// Source of per-document ids stamped into every handle
static NEXT_DOCUMENT_ID: AtomicU32 = AtomicU32::new(1);

/// One arena entry
#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// A document stored in arena format
///
/// A clone keeps the id of its source, so handles taken before cloning
/// address the corresponding nodes of either copy.
#[derive(Debug, Clone)]
pub struct Document {
    id: u32,
    declaration: Declaration,
    slots: Vec<Slot>,
    /// Indices of empty slots, reused before the arena grows
    free: Vec<u32>,
    first_top: Option<NodeId>,
    last_top: Option<NodeId>,
    root: NodeId,
    pathname: Option<PathBuf>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document: default declaration and an empty `_Root`
    pub fn new() -> Self {
        let id = NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed);
        let mut doc = Document {
            id,
            declaration: Declaration::default(),
            slots: Vec::new(),
            free: Vec::new(),
            first_top: None,
            last_top: None,
            root: NodeId {
                document: id,
                index: 0,
                generation: 0,
            },
            pathname: None,
        };
        doc.root = doc.push_default_root();
        doc
    }

    /// Parse a document from text
    pub fn parse(input: &str) -> Result<Self> {
        let mut doc = Document::new();
        doc.read_from_str(input)?;
        Ok(doc)
    }

    /// Parse a document from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut doc = Document::new();
        doc.read_from_file(path)?;
        Ok(doc)
    }

    /// Replace the whole content with the parsed input. On error the
    /// document is left untouched.
    pub fn read_from_str(&mut self, input: &str) -> Result<()> {
        let raw = canonicalize(builder::build(input)?);

        self.reset();
        self.declaration = raw.declaration;
        let mut root = None;
        for raw_node in raw.nodes {
            let is_element = matches!(raw_node, RawNode::Element { .. });
            let id = self.materialize(raw_node)?;
            self.link(Container::Document, None, id)?;
            if is_element {
                root = Some(id);
            }
        }
        self.root = match root {
            Some(root) => root,
            None => self.push_default_root(),
        };

        log::debug!(
            "loaded document: {} bytes, {} nodes, root <{}>",
            input.len(),
            self.node_count(),
            self.root_tag()
        );
        Ok(())
    }

    /// Replace the whole content with the parsed file
    pub fn read_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.read_from_str(&input)?;
        self.pathname = Some(path.to_path_buf());
        log::debug!("read document from {}", path.display());
        Ok(())
    }

    /// Reset to the default-constructed state. All handles become stale.
    pub fn clear(&mut self) {
        self.reset();
        self.declaration = Declaration::default();
        self.root = self.push_default_root();
        self.pathname = None;
    }

    /// Serialize the whole document
    pub fn write_to_string(&self, options: &WriteOptions) -> String {
        writer::write_document(self, options)
    }

    /// Serialize a single node subtree, without declaration
    pub fn write_node_to_string(&self, id: NodeId, options: &WriteOptions) -> Result<String> {
        writer::write_node(self, id, options)
    }

    /// Serialize to a file, creating or overwriting it
    pub fn write_to_file(&mut self, path: impl AsRef<Path>, options: &WriteOptions) -> Result<()> {
        let path = path.as_ref();
        let output = self.write_to_string(options);
        fs::write(path, &output).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("wrote {} bytes to {}", output.len(), path.display());
        self.pathname = Some(path.to_path_buf());
        Ok(())
    }

    /// Path last read from or written to
    pub fn pathname(&self) -> Option<&Path> {
        self.pathname.as_deref()
    }

    pub fn declaration(&self) -> &Declaration {
        &self.declaration
    }

    pub fn version(&self) -> &str {
        &self.declaration.version
    }

    pub fn encoding(&self) -> &str {
        &self.declaration.encoding
    }

    pub fn is_standalone(&self) -> bool {
        self.declaration.standalone
    }

    pub fn set_version(&mut self, version: &str) {
        self.declaration.version = version.to_string();
    }

    pub fn set_encoding(&mut self, encoding: &str) {
        self.declaration.encoding = encoding.to_string();
    }

    pub fn set_standalone(&mut self, standalone: bool) {
        self.declaration.standalone = standalone;
    }

    /// The single top-level element
    #[inline]
    pub fn root_element(&self) -> NodeId {
        self.root
    }

    pub fn root_tag(&self) -> &str {
        self.element(self.root).map_or(ROOT_TAG, Element::tag)
    }

    pub fn set_root_tag(&mut self, tag: &str) -> Result<()> {
        let root = self.root;
        self.element_mut(root)?.set_tag(tag)
    }

    /// Create an orphan element. Orphans occupy an arena slot until they
    /// are inserted and later deleted, or until [`Document::delete_node`],
    /// [`Document::clear`] or a reload frees them.
    pub fn new_element(&mut self, tag: &str) -> Result<NodeId> {
        validate_tag(tag)?;
        Ok(self.alloc(NodeData::Element(Element::new(tag.to_string(), Vec::new()))))
    }

    /// Element holding a single text child with `value` (none if empty)
    pub fn new_value_element(&mut self, tag: &str, value: &str) -> Result<NodeId> {
        let id = self.new_element(tag)?;
        if !value.is_empty() {
            self.append_text(id, value)?;
        }
        Ok(id)
    }

    pub fn new_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeData::Text(Text::new(text, false)))
    }

    pub fn new_cdata(&mut self, text: &str) -> NodeId {
        self.alloc(NodeData::Text(Text::new(text, true)))
    }

    pub fn new_comment(&mut self, text: &str) -> NodeId {
        self.alloc(NodeData::Comment(Comment {
            text: text.to_string(),
        }))
    }

    pub fn new_unknown(&mut self, text: &str) -> NodeId {
        self.alloc(NodeData::Unknown(Unknown {
            text: text.to_string(),
        }))
    }

    /// True if `id` refers to a live node of this document
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or_else(|| stale_handle(id))
    }

    pub fn kind(&self, id: NodeId) -> Result<NodeKind> {
        Ok(self.node(id)?.kind())
    }

    /// Text payload, Comment/Unknown contents, or Element tag
    pub fn node_text(&self, id: NodeId) -> Result<&str> {
        Ok(self.node(id)?.text())
    }

    pub fn is_orphan(&self, id: NodeId) -> Result<bool> {
        Ok(self.node(id)?.owner == Owner::Orphan)
    }

    pub fn is_top_level(&self, id: NodeId) -> Result<bool> {
        Ok(self.node(id)?.owner == Owner::Document)
    }

    /// Owning element, if the node is an element's child
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        match self.node(id)?.owner {
            Owner::Element(parent) => Ok(Some(parent)),
            Owner::Document | Owner::Orphan => Ok(None),
        }
    }

    /// True if the element has a child of one of the given kinds
    pub fn has_child_node(&self, id: NodeId, kinds: NodeKinds) -> Result<bool> {
        Ok(self
            .children(Container::Element(id), kinds)?
            .next()
            .is_some())
    }

    /// Number of live nodes, orphans included
    pub fn node_count(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    pub fn element(&self, id: NodeId) -> Result<&Element> {
        match &self.node(id)?.data {
            NodeData::Element(e) => Ok(e),
            other => Err(wrong_kind(NodeKind::Element, other.kind())),
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Result<&mut Element> {
        match &mut self.node_mut(id)?.data {
            NodeData::Element(e) => Ok(e),
            other => Err(wrong_kind(NodeKind::Element, other.kind())),
        }
    }

    pub fn text(&self, id: NodeId) -> Result<&Text> {
        match &self.node(id)?.data {
            NodeData::Text(t) => Ok(t),
            other => Err(wrong_kind(NodeKind::Text, other.kind())),
        }
    }

    pub fn text_mut(&mut self, id: NodeId) -> Result<&mut Text> {
        match &mut self.node_mut(id)?.data {
            NodeData::Text(t) => Ok(t),
            other => Err(wrong_kind(NodeKind::Text, other.kind())),
        }
    }

    pub fn comment(&self, id: NodeId) -> Result<&Comment> {
        match &self.node(id)?.data {
            NodeData::Comment(c) => Ok(c),
            other => Err(wrong_kind(NodeKind::Comment, other.kind())),
        }
    }

    pub fn comment_mut(&mut self, id: NodeId) -> Result<&mut Comment> {
        match &mut self.node_mut(id)?.data {
            NodeData::Comment(c) => Ok(c),
            other => Err(wrong_kind(NodeKind::Comment, other.kind())),
        }
    }

    pub fn unknown(&self, id: NodeId) -> Result<&Unknown> {
        match &self.node(id)?.data {
            NodeData::Unknown(u) => Ok(u),
            other => Err(wrong_kind(NodeKind::Unknown, other.kind())),
        }
    }

    pub fn unknown_mut(&mut self, id: NodeId) -> Result<&mut Unknown> {
        match &mut self.node_mut(id)?.data {
            NodeData::Unknown(u) => Ok(u),
            other => Err(wrong_kind(NodeKind::Unknown, other.kind())),
        }
    }

    /// Insert an orphan before the cursor position; at the end sentinel
    /// the node is appended
    pub fn insert_node_before(&mut self, cursor: &NodeCursor, node: NodeId) -> Result<()> {
        self.check_cursor(cursor)?;
        self.insert_at(cursor.container(), cursor.node(), node)
    }

    /// Insert an orphan after the cursor position; at the end sentinel
    /// the node is appended
    pub fn insert_node_after(&mut self, cursor: &NodeCursor, node: NodeId) -> Result<()> {
        self.check_cursor(cursor)?;
        let before = match cursor.node() {
            Some(current) => self.node(current)?.next_sibling,
            None => None,
        };
        self.insert_at(cursor.container(), before, node)
    }

    /// Append an orphan to the end of an element's children
    pub fn append_node(&mut self, parent: NodeId, node: NodeId) -> Result<()> {
        self.insert_at(Container::Element(parent), None, node)
    }

    /// Detach a node from its owner. The node stays alive as an orphan and
    /// keeps its arena slot; use [`Document::delete_node`] to free it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<()> {
        self.node(id)?;
        if id == self.root {
            return Err(Error::Ownership(
                "the root element cannot be removed".to_string(),
            ));
        }
        self.unlink(id)
    }

    /// Destroy a node and everything it owns
    pub fn delete_node(&mut self, id: NodeId) -> Result<()> {
        self.remove_node(id)?;
        self.free_subtree(id);
        Ok(())
    }

    /// Concatenate onto a trailing Text child, else append a new Text child.
    /// Returns the Text node holding the text.
    pub fn append_text(&mut self, element: NodeId, text: &str) -> Result<NodeId> {
        if let Some(last) = self.element(element)?.last_child {
            if let NodeData::Text(t) = &mut self.node_mut(last)?.data {
                t.text.push_str(text);
                return Ok(last);
            }
        }
        let id = self.new_text(text);
        self.link(Container::Element(element), None, id)?;
        Ok(id)
    }

    /// Insert text at the cursor position, merging with an adjacent Text
    /// node where possible. Returns the Text node holding the text.
    pub fn insert_text(&mut self, cursor: &NodeCursor, text: &str) -> Result<NodeId> {
        self.check_cursor(cursor)?;
        let element = match cursor.container() {
            Container::Element(element) => element,
            Container::Document => {
                return Err(Error::Ownership(
                    "text cannot be inserted at the top level".to_string(),
                ))
            }
        };
        let Some(current) = cursor.node() else {
            return self.append_text(element, text);
        };

        let prev = self.node(current)?.prev_sibling;
        if let NodeData::Text(t) = &mut self.node_mut(current)?.data {
            t.text.insert_str(0, text);
            return Ok(current);
        }
        if let Some(prev) = prev {
            if let NodeData::Text(t) = &mut self.node_mut(prev)?.data {
                t.text.push_str(text);
                return Ok(prev);
            }
        }
        let id = self.new_text(text);
        self.link(Container::Element(element), Some(current), id)?;
        Ok(id)
    }

    /// No child elements and at most one Text child
    pub fn is_value_element(&self, id: NodeId) -> Result<bool> {
        let mut texts = 0;
        for child in self.children(Container::Element(id), NodeKinds::MEANINGFUL)? {
            match self.node(child)?.data {
                NodeData::Text(_) => texts += 1,
                _ => return Ok(false),
            }
        }
        Ok(texts <= 1)
    }

    /// Text of a value element, or "" when it has no Text child
    pub fn value(&self, id: NodeId) -> Result<&str> {
        if !self.is_value_element(id)? {
            return Err(self.not_a_value_element(id));
        }
        match self.children(Container::Element(id), NodeKinds::TEXT)?.next() {
            Some(text) => Ok(self.node(text)?.text()),
            None => Ok(""),
        }
    }

    pub fn value_as<T: FromValue>(&self, id: NodeId) -> Result<T> {
        T::from_value(self.value(id)?)
    }

    /// Replace all Text children with a single one holding `value`, placed
    /// where the first Text child was. Comments and unknown markup keep
    /// their positions. An empty value leaves no Text child.
    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<()> {
        if self.has_child_node(id, NodeKinds::ELEMENT)? {
            return Err(self.not_a_value_element(id));
        }

        let texts: Vec<NodeId> = self.children(Container::Element(id), NodeKinds::TEXT)?.collect();
        let anchor = match texts.first() {
            Some(&first) => self.next_non_text_sibling(first)?,
            None => None,
        };
        for text in texts {
            self.delete_node(text)?;
        }
        if !value.is_empty() {
            let text = self.new_text(value);
            self.link(Container::Element(id), anchor, text)?;
        }
        Ok(())
    }

    pub fn set_value_from<T: ToValue + ?Sized>(&mut self, id: NodeId, value: &T) -> Result<()> {
        self.set_value(id, &value.to_value())
    }

    /// First child element with the tag
    pub fn optional_element(&self, parent: NodeId, tag: &str) -> Result<Option<NodeId>> {
        Ok(self.child_elements(parent, tag)?.next())
    }

    pub fn required_element(&self, parent: NodeId, tag: &str) -> Result<NodeId> {
        self.optional_element(parent, tag)?
            .ok_or_else(|| Error::NotFound {
                what: "element",
                name: tag.to_string(),
            })
    }

    pub fn has_element(&self, parent: NodeId, tag: &str) -> Result<bool> {
        Ok(self.optional_element(parent, tag)?.is_some())
    }

    pub fn required_element_value(&self, parent: NodeId, tag: &str) -> Result<&str> {
        let child = self.required_element(parent, tag)?;
        self.value(child)
    }

    pub fn optional_element_value<'a>(
        &'a self,
        parent: NodeId,
        tag: &str,
        default: &'a str,
    ) -> Result<&'a str> {
        match self.optional_element(parent, tag)? {
            Some(child) => self.value(child),
            None => Ok(default),
        }
    }

    pub fn required_element_value_as<T: FromValue>(&self, parent: NodeId, tag: &str) -> Result<T> {
        T::from_value(self.required_element_value(parent, tag)?)
    }

    pub fn optional_element_value_as<T: FromValue>(
        &self,
        parent: NodeId,
        tag: &str,
        default: T,
    ) -> Result<T> {
        match self.optional_element(parent, tag)? {
            Some(child) => self.value_as(child),
            None => Ok(default),
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node> {
        if id.document != self.id {
            return None;
        }
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        if id.document != self.id {
            return Err(stale_handle(id));
        }
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or_else(|| stale_handle(id))
    }

    /// First and last node of a container
    pub(crate) fn bounds(&self, container: Container) -> Result<(Option<NodeId>, Option<NodeId>)> {
        match container {
            Container::Document => Ok((self.first_top, self.last_top)),
            Container::Element(id) => {
                let element = self.element(id)?;
                Ok((element.first_child, element.last_child))
            }
        }
    }

    fn set_first(&mut self, container: Container, first: Option<NodeId>) -> Result<()> {
        match container {
            Container::Document => self.first_top = first,
            Container::Element(id) => self.element_mut(id)?.first_child = first,
        }
        Ok(())
    }

    fn set_last(&mut self, container: Container, last: Option<NodeId>) -> Result<()> {
        match container {
            Container::Document => self.last_top = last,
            Container::Element(id) => self.element_mut(id)?.last_child = last,
        }
        Ok(())
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let node = Some(Node::new(data));
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = node;
            return NodeId {
                document: self.id,
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node,
        });
        NodeId {
            document: self.id,
            index,
            generation: 0,
        }
    }

    fn release(&mut self, index: u32) {
        let slot = &mut self.slots[index as usize];
        if slot.node.take().is_some() {
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index);
        }
    }

    /// Free every slot, bumping generations so old handles go stale
    fn reset(&mut self) {
        for index in 0..self.slots.len() as u32 {
            self.release(index);
        }
        self.first_top = None;
        self.last_top = None;
    }

    fn push_default_root(&mut self) -> NodeId {
        let id = self.alloc(NodeData::Element(Element::new(ROOT_TAG.to_string(), Vec::new())));
        let linked = self.link(Container::Document, None, id);
        debug_assert!(linked.is_ok(), "fresh root failed to link: {:?}", linked);
        id
    }

    /// Allocate a raw node and its subtree
    fn materialize(&mut self, raw: RawNode) -> Result<NodeId> {
        let (data, children) = match raw {
            RawNode::Element {
                tag,
                attributes,
                children,
            } => (NodeData::Element(Element::new(tag, attributes)), children),
            RawNode::Text { text, cdata } => (NodeData::Text(Text { text, cdata }), Vec::new()),
            RawNode::Comment(text) => (NodeData::Comment(Comment { text }), Vec::new()),
            RawNode::Unknown(text) => (NodeData::Unknown(Unknown { text }), Vec::new()),
        };
        let id = self.alloc(data);
        for child in children {
            let child_id = self.materialize(child)?;
            self.link(Container::Element(id), None, child_id)?;
        }
        Ok(id)
    }

    /// Link an orphan into a container before `before` (None = append)
    fn link(&mut self, container: Container, before: Option<NodeId>, id: NodeId) -> Result<()> {
        let prev = match before {
            Some(next) => self.node(next)?.prev_sibling,
            None => self.bounds(container)?.1,
        };

        {
            let node = self.node_mut(id)?;
            node.owner = container.owner();
            node.prev_sibling = prev;
            node.next_sibling = before;
        }
        match prev {
            Some(prev) => self.node_mut(prev)?.next_sibling = Some(id),
            None => self.set_first(container, Some(id))?,
        }
        match before {
            Some(next) => self.node_mut(next)?.prev_sibling = Some(id),
            None => self.set_last(container, Some(id))?,
        }
        Ok(())
    }

    /// Detach a node from its owner's sibling list
    fn unlink(&mut self, id: NodeId) -> Result<()> {
        let (owner, prev, next) = {
            let node = self.node(id)?;
            (node.owner, node.prev_sibling, node.next_sibling)
        };
        let container = match owner {
            Owner::Orphan => return Ok(()),
            Owner::Document => Container::Document,
            Owner::Element(parent) => Container::Element(parent),
        };

        match prev {
            Some(prev) => self.node_mut(prev)?.next_sibling = next,
            None => self.set_first(container, next)?,
        }
        match next {
            Some(next) => self.node_mut(next)?.prev_sibling = prev,
            None => self.set_last(container, prev)?,
        }

        let node = self.node_mut(id)?;
        node.owner = Owner::Orphan;
        node.prev_sibling = None;
        node.next_sibling = None;
        Ok(())
    }

    /// Release a detached node and all of its descendants
    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let mut child = self.get(id).and_then(|n| n.as_element()).and_then(|e| e.first_child);
            while let Some(c) = child {
                stack.push(c);
                child = self.get(c).and_then(|n| n.next_sibling);
            }
            self.release(id.index);
        }
    }

    /// Checked insertion of an orphan into a container
    fn insert_at(&mut self, container: Container, before: Option<NodeId>, id: NodeId) -> Result<()> {
        let node = self.node(id)?;
        if node.owner != Owner::Orphan {
            return Err(Error::Ownership(format!(
                "{} {} is already owned; remove it first",
                node.kind(),
                id
            )));
        }

        match container {
            Container::Document => {
                if !NodeKinds::JUNK.allows(node.kind()) {
                    return Err(Error::Ownership(format!(
                        "a {} cannot be inserted at the top level",
                        node.kind()
                    )));
                }
            }
            Container::Element(parent) => {
                self.element(parent)?;
                // The parent must not be inside the node being inserted
                let mut ancestor = Some(parent);
                while let Some(a) = ancestor {
                    if a == id {
                        return Err(Error::Ownership(
                            "cannot insert a node into its own subtree".to_string(),
                        ));
                    }
                    ancestor = self.parent(a)?;
                }
            }
        }

        self.link(container, before, id)
    }

    /// Validate that the cursor's node still belongs to its container
    pub(crate) fn check_cursor(&self, cursor: &NodeCursor) -> Result<()> {
        if let Container::Element(parent) = cursor.container() {
            self.element(parent)?;
        }
        if let Some(current) = cursor.node() {
            match self.get(current) {
                Some(node) if node.owner == cursor.container().owner() => {}
                _ => return Err(Error::StaleCursor),
            }
        }
        Ok(())
    }

    fn next_non_text_sibling(&self, id: NodeId) -> Result<Option<NodeId>> {
        let mut next = self.node(id)?.next_sibling;
        while let Some(n) = next {
            let node = self.node(n)?;
            if !node.is_text() {
                return Ok(Some(n));
            }
            next = node.next_sibling;
        }
        Ok(None)
    }

    fn not_a_value_element(&self, id: NodeId) -> Error {
        Error::NotAValueElement {
            tag: self.node_text(id).unwrap_or_default().to_string(),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.write_to_string(&WriteOptions::pretty()))
    }
}

fn stale_handle(id: NodeId) -> Error {
    Error::Ownership(format!(
        "{} does not refer to a live node of this document",
        id
    ))
}

fn wrong_kind(expected: NodeKind, actual: NodeKind) -> Error {
    Error::WrongKind { expected, actual }
}
