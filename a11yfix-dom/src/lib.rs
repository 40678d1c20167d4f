//! Mutable markup tree used by a11yfix.
//!
//! [`MarkupTree`] is the capability set a remediation pass needs: selector queries, node
//! creation, attribute access, structural edits and serialization. [`Document`] implements it
//! over scraper's html5ever tree; selector matching is scraper's, serialization is html5ever's.

pub mod document;
pub mod error;
pub mod names;
mod serialize;
pub mod tree;

pub use document::{Document, NodeId};
pub use error::SelectorError;
pub use tree::MarkupTree;
