//! Filtered cursors and borrowing iterators over sibling lists
//!
//! A [`NodeCursor`] is a detached position: it holds handles, not borrows,
//! so the document can be mutated while cursors are alive. Stepping goes
//! through the document, which reports a stale cursor when the cursor's
//! node has left its container.

use super::document::Document;
use super::node::{Node, NodeId, NodeKinds, Owner};
use crate::error::Result;

/// A sibling list: the document's top level or an element's children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Document,
    Element(NodeId),
}

impl Container {
    pub(crate) fn owner(self) -> Owner {
        match self {
            Container::Document => Owner::Document,
            Container::Element(id) => Owner::Element(id),
        }
    }
}

/// A filtered position within a container
///
/// Equality compares only the referenced node, so every end position
/// compares equal to every other.
#[derive(Debug, Clone)]
pub struct NodeCursor {
    container: Container,
    current: Option<NodeId>,
    kinds: NodeKinds,
    /// Exact tag filter for element cursors
    tag: Option<String>,
}

impl PartialEq for NodeCursor {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl Eq for NodeCursor {}

impl NodeCursor {
    fn new(container: Container, kinds: NodeKinds, tag: &str) -> Self {
        NodeCursor {
            container,
            current: None,
            kinds,
            tag: (!tag.is_empty()).then(|| tag.to_string()),
        }
    }

    /// Node under the cursor, None at the end
    #[inline]
    pub fn node(&self) -> Option<NodeId> {
        self.current
    }

    #[inline]
    pub fn container(&self) -> Container {
        self.container
    }

    #[inline]
    pub fn kinds(&self) -> NodeKinds {
        self.kinds
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    fn matches(&self, node: &Node) -> bool {
        if !self.kinds.allows(node.kind()) {
            return false;
        }
        match (&self.tag, node.as_element()) {
            (Some(tag), Some(element)) => element.tag() == tag,
            (Some(_), None) => false,
            (None, _) => true,
        }
    }
}

impl Document {
    /// Cursor at the first node of `kinds` in the container
    pub fn node_begin(&self, container: Container, kinds: NodeKinds) -> Result<NodeCursor> {
        let mut cursor = NodeCursor::new(container, kinds, "");
        cursor.current = self.first_match(&cursor, self.bounds(container)?.0)?;
        Ok(cursor)
    }

    /// End sentinel for a node cursor
    pub fn node_end(&self, container: Container, kinds: NodeKinds) -> NodeCursor {
        NodeCursor::new(container, kinds, "")
    }

    /// Cursor at the first child element with the tag; an empty tag
    /// matches every element
    pub fn element_begin(&self, parent: NodeId, tag: &str) -> Result<NodeCursor> {
        let container = Container::Element(parent);
        let mut cursor = NodeCursor::new(container, NodeKinds::ELEMENT, tag);
        cursor.current = self.first_match(&cursor, self.bounds(container)?.0)?;
        Ok(cursor)
    }

    /// End sentinel for an element cursor
    pub fn element_end(&self, parent: NodeId, tag: &str) -> NodeCursor {
        NodeCursor::new(Container::Element(parent), NodeKinds::ELEMENT, tag)
    }

    /// The cursor's node, after checking it is still in its container
    pub fn current(&self, cursor: &NodeCursor) -> Result<Option<NodeId>> {
        self.check_cursor(cursor)?;
        Ok(cursor.current)
    }

    /// Step to the next matching node. Advancing the end is a no-op.
    pub fn advance(&self, cursor: &mut NodeCursor) -> Result<()> {
        self.check_cursor(cursor)?;
        if let Some(current) = cursor.current {
            let next = self.node(current)?.next_sibling;
            cursor.current = self.first_match(cursor, next)?;
        }
        Ok(())
    }

    /// Step to the previous matching node. From the end this moves to the
    /// last match; from the first match it moves to the end.
    pub fn retreat(&self, cursor: &mut NodeCursor) -> Result<()> {
        self.check_cursor(cursor)?;
        let prev = match cursor.current {
            Some(current) => self.node(current)?.prev_sibling,
            None => self.bounds(cursor.container)?.1,
        };
        cursor.current = self.last_match(cursor, prev)?;
        Ok(())
    }

    fn first_match(&self, cursor: &NodeCursor, mut next: Option<NodeId>) -> Result<Option<NodeId>> {
        while let Some(id) = next {
            let node = self.node(id)?;
            if cursor.matches(node) {
                return Ok(Some(id));
            }
            next = node.next_sibling;
        }
        Ok(None)
    }

    fn last_match(&self, cursor: &NodeCursor, mut prev: Option<NodeId>) -> Result<Option<NodeId>> {
        while let Some(id) = prev {
            let node = self.node(id)?;
            if cursor.matches(node) {
                return Ok(Some(id));
            }
            prev = node.prev_sibling;
        }
        Ok(None)
    }

    /// Iterate over a container's nodes of the given kinds
    pub fn children(&self, container: Container, kinds: NodeKinds) -> Result<Children<'_>> {
        let (front, back) = self.bounds(container)?;
        Ok(Children {
            doc: self,
            front,
            back,
            kinds,
        })
    }

    /// Iterate over an element's child elements with the tag; an empty tag
    /// matches every element
    pub fn child_elements<'a>(&'a self, parent: NodeId, tag: &'a str) -> Result<ChildElements<'a>> {
        Ok(ChildElements {
            inner: self.children(Container::Element(parent), NodeKinds::ELEMENT)?,
            tag,
        })
    }
}

/// Iterator over the nodes of a container
pub struct Children<'a> {
    doc: &'a Document,
    front: Option<NodeId>,
    back: Option<NodeId>,
    kinds: NodeKinds,
}

impl Children<'_> {
    /// Take `id` off one end of the remaining range
    fn consume(&mut self, id: NodeId, forward: bool) -> Option<&Node> {
        let node = self.doc.get(id)?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else if forward {
            self.front = node.next_sibling;
        } else {
            self.back = node.prev_sibling;
        }
        Some(node)
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(id) = self.front {
            let kinds = self.kinds;
            if kinds.allows(self.consume(id, true)?.kind()) {
                return Some(id);
            }
        }
        None
    }
}

impl<'a> DoubleEndedIterator for Children<'a> {
    fn next_back(&mut self) -> Option<NodeId> {
        while let Some(id) = self.back {
            let kinds = self.kinds;
            if kinds.allows(self.consume(id, false)?.kind()) {
                return Some(id);
            }
        }
        None
    }
}

/// Iterator over an element's child elements, filtered by tag
pub struct ChildElements<'a> {
    inner: Children<'a>,
    tag: &'a str,
}

impl ChildElements<'_> {
    fn matches(&self, id: NodeId) -> bool {
        self.tag.is_empty()
            || self
                .inner
                .doc
                .get(id)
                .and_then(Node::as_element)
                .is_some_and(|e| e.tag() == self.tag)
    }
}

impl<'a> Iterator for ChildElements<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(id) = self.inner.next() {
            if self.matches(id) {
                return Some(id);
            }
        }
        None
    }
}

impl<'a> DoubleEndedIterator for ChildElements<'a> {
    fn next_back(&mut self) -> Option<NodeId> {
        while let Some(id) = self.inner.next_back() {
            if self.matches(id) {
                return Some(id);
            }
        }
        None
    }
}
