//! DOM Module - Arena-based Document
//!
//! Implements the in-memory document using:
//! - Arena allocation for nodes
//! - Generational NodeId handles, so stale handles are detected
//! - A raw tree builder and canonicalizer between tokens and the arena
//! - Detached cursors and borrowing iterators for navigation

pub mod builder;
pub mod canonical;
pub mod cursor;
pub mod document;
pub mod node;

pub use canonical::ROOT_TAG;
pub use cursor::{ChildElements, Children, Container, NodeCursor};
pub use document::Document;
pub use node::{
    Attribute, Comment, Declaration, Element, Node, NodeData, NodeId, NodeKind, NodeKinds, Owner,
    Text, Unknown,
};
