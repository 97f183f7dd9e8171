//! minixml - A minimalist in-memory XML document model
//!
//! Pipeline:
//! 1. Tokenizer: text to raw tokens, entities decoded (`core`)
//! 2. Builder: tokens to a raw tree (`dom::builder`)
//! 3. Canonicalizer: exactly one top-level element (`dom::canonical`)
//! 4. Document: arena of nodes with generational handles (`dom`)
//! 5. Writer: pretty or compact text (`writer`)
//!
//! ```
//! use minixml::{Document, WriteOptions};
//!
//! let mut doc = Document::parse("<body><mass>2.5</mass></body>").unwrap();
//! let root = doc.root_element();
//! let mass: f64 = doc.required_element_value_as(root, "mass").unwrap();
//! assert_eq!(mass, 2.5);
//!
//! let inertia = doc.new_value_element("inertia", "1 0 0").unwrap();
//! doc.append_node(root, inertia).unwrap();
//! assert_eq!(
//!     doc.write_to_string(&WriteOptions::compact()),
//!     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
//!      <body><mass>2.5</mass><inertia>1 0 0</inertia></body>"
//! );
//! ```

pub mod core;
pub mod dom;
pub mod error;
pub mod value;
pub mod writer;

pub use dom::{
    Attribute, ChildElements, Children, Comment, Container, Declaration, Document, Element, Node,
    NodeCursor, NodeData, NodeId, NodeKind, NodeKinds, Owner, Text, Unknown, ROOT_TAG,
};
pub use error::{Error, Result};
pub use value::{FromValue, ToValue};
pub use writer::WriteOptions;
