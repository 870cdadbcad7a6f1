//! Document Writer
//!
//! Serializes element trees. Pretty output puts each element on its own line
//! and keeps text-only elements inline (`<MsPerTick>50</MsPerTick>`); compact
//! output adds no whitespace at all.

use serde::{Deserialize, Serialize};

use crate::element::{Element, Node};
use crate::escape::{escape_attr, escape_text};

/// XML declaration written ahead of every document root.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no" ?>"#;

/// Formatting options for written documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Spaces per nesting level in pretty output
    pub indent: usize,
    /// Write everything on one line
    pub compact: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            compact: false,
        }
    }
}

impl WriteOptions {
    /// Pretty output with the given indent width.
    pub fn pretty(indent: usize) -> Self {
        Self {
            indent,
            compact: false,
        }
    }

    /// Single-line output.
    pub fn compact() -> Self {
        Self {
            indent: 0,
            compact: true,
        }
    }
}

/// A complete XML document: declaration plus one root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Wraps a root element.
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// The root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Consumes the document, returning the root element.
    pub fn into_root(self) -> Element {
        self.root
    }

    /// Writes the document with the given options.
    pub fn write(&self, options: &WriteOptions) -> String {
        let mut out = String::with_capacity(1024);
        out.push_str(XML_DECLARATION);
        if !options.compact {
            out.push_str("\n\n");
        }
        write_element(&mut out, &self.root, 0, options);
        if !options.compact {
            out.push('\n');
        }
        out
    }

    /// Writes the document with default (pretty, 4-space) formatting.
    pub fn to_xml_string(&self) -> String {
        self.write(&WriteOptions::default())
    }
}

pub(crate) fn write_element(out: &mut String, element: &Element, depth: usize, options: &WriteOptions) {
    out.push('<');
    out.push_str(element.name());
    for attr in element.attributes() {
        out.push(' ');
        out.push_str(attr.name);
        out.push_str("=\"");
        out.push_str(&escape_attr(&attr.value));
        out.push('"');
    }

    let children = element.children();
    if children.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');

    let text_only = children.iter().all(|c| matches!(c, Node::Text(_)));
    if options.compact || text_only {
        for child in children {
            write_node(out, child, depth + 1, options);
        }
    } else {
        for child in children {
            newline(out, depth + 1, options);
            write_node(out, child, depth + 1, options);
        }
        newline(out, depth, options);
    }

    out.push_str("</");
    out.push_str(element.name());
    out.push('>');
}

fn write_node(out: &mut String, node: &Node, depth: usize, options: &WriteOptions) {
    match node {
        Node::Element(e) => write_element(out, e, depth, options),
        Node::Text(t) => out.push_str(&escape_text(t)),
    }
}

fn newline(out: &mut String, depth: usize, options: &WriteOptions) {
    out.push('\n');
    out.extend(std::iter::repeat(' ').take(depth * options.indent));
}
