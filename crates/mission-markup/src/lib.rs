//! Structured markup for mission documents.
//!
//! This crate contains pure data structures with no mission logic: an
//! element tree, fragments of sibling elements, escaping, and a document
//! writer. Everything written through it is well-formed XML, whatever text
//! callers put in attribute values or character data.

pub mod element;
pub mod escape;
pub mod writer;

pub use element::{is_valid_name, Attribute, Element, Fragment, Node};
pub use escape::{escape_attr, escape_text};
pub use writer::{Document, WriteOptions, XML_DECLARATION};
