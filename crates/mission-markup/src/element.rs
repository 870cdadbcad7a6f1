//! Element Tree
//!
//! Elements, attributes, and fragments. Element and attribute names are
//! `&'static str` so that only names written in source code can appear in a
//! document; values and text are owned strings escaped at write time.
//!
//! # Example
//!
//! ```
//! use mission_markup::Element;
//!
//! let quit = Element::new("ServerQuitFromTimeUp")
//!     .attr("timeLimitMs", 60000)
//!     .attr_opt("description", None::<&str>);
//! assert_eq!(quit.to_string(), r#"<ServerQuitFromTimeUp timeLimitMs="60000"/>"#);
//! ```

use std::fmt;

use crate::writer::{write_element, WriteOptions};

/// A single `name="value"` pair on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, possibly prefixed (e.g. `xsi:schemaLocation`)
    pub name: &'static str,
    /// Unescaped attribute value
    pub value: String,
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Character data (unescaped)
    Text(String),
}

/// An XML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: &'static str,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    pub fn new(name: &'static str) -> Self {
        debug_assert!(is_valid_name(name), "invalid XML name: {:?}", name);
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element holding a single text child, e.g. `<MsPerTick>50</MsPerTick>`.
    pub fn with_text(name: &'static str, text: impl fmt::Display) -> Self {
        Self::new(name).text(text)
    }

    /// Sets an attribute. Setting the same name twice keeps the position of
    /// the first and the value of the second.
    pub fn attr(mut self, name: &'static str, value: impl fmt::Display) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Sets an attribute only when `value` is present.
    pub fn attr_opt<V: fmt::Display>(self, name: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    /// In-place form of [`Element::attr`].
    pub fn set_attr(&mut self, name: &'static str, value: impl fmt::Display) {
        debug_assert!(is_valid_name(name), "invalid XML name: {:?}", name);
        let value = value.to_string();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    /// Appends a child element.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Appends a child element when present.
    pub fn child_opt(self, child: Option<Element>) -> Self {
        match child {
            Some(c) => self.child(c),
            None => self,
        }
    }

    /// Appends every element of a fragment, in order.
    pub fn fragment(mut self, fragment: Fragment) -> Self {
        self.push_fragment(fragment);
        self
    }

    /// In-place form of [`Element::fragment`].
    pub fn push_fragment(&mut self, fragment: Fragment) {
        self.children
            .extend(fragment.into_iter().map(Node::Element));
    }

    /// Appends character data.
    pub fn text(mut self, text: impl fmt::Display) -> Self {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    /// Element name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Looks up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// All children in order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements only, in order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// First direct child element with the given name.
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|e| e.name == name)
    }

    /// Every descendant element (depth-first, document order) with the given name.
    pub fn descendants_named<'a>(&'a self, name: &'a str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect_named(self, name, &mut found);
        found
    }

    /// Concatenated text of the direct text children.
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// True when the element has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

fn collect_named<'a>(element: &'a Element, name: &str, found: &mut Vec<&'a Element>) {
    for child in element.child_elements() {
        if child.name == name {
            found.push(child);
        }
        collect_named(child, name, found);
    }
}

/// Writes the element compactly, with no added whitespace.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_element(&mut out, self, 0, &WriteOptions::compact());
        f.write_str(&out)
    }
}

/// An ordered, possibly empty run of sibling elements.
///
/// This is what a mission component renders to: optional components that are
/// unset produce an empty fragment and vanish from the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment(Vec<Element>);

impl Fragment {
    /// Creates an empty fragment.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// True when the fragment holds no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of top-level elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Appends an element.
    pub fn push(&mut self, element: Element) {
        self.0.push(element);
    }

    /// Appends another fragment, preserving both orders.
    pub fn append(&mut self, mut other: Fragment) {
        self.0.append(&mut other.0);
    }

    /// Top-level elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.0.iter()
    }

    /// Top-level elements as a slice.
    pub fn elements(&self) -> &[Element] {
        &self.0
    }
}

impl From<Element> for Fragment {
    fn from(element: Element) -> Self {
        Self(vec![element])
    }
}

impl From<Option<Element>> for Fragment {
    fn from(element: Option<Element>) -> Self {
        Self(element.into_iter().collect())
    }
}

impl FromIterator<Element> for Fragment {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromIterator<Fragment> for Fragment {
    fn from_iter<I: IntoIterator<Item = Fragment>>(iter: I) -> Self {
        let mut out = Fragment::empty();
        for fragment in iter {
            out.append(fragment);
        }
        out
    }
}

impl IntoIterator for Fragment {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Fragment {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.0 {
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}

/// Checks a name against the ASCII subset of the XML `Name` production,
/// allowing a single namespace prefix.
pub fn is_valid_name(name: &str) -> bool {
    let mut parts = name.split(':');
    let valid_part = |part: &str| {
        let mut chars = part.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    };
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), None, None) => valid_part(local),
        (Some(prefix), Some(local), None) => valid_part(prefix) && valid_part(local),
        _ => false,
    }
}
