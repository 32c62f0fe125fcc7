// crates/rpro-bridge-core/src/core/document.rs
// ============================================================================
// Module: Document Tree
// Description: Ordered element tree and its XML rendering.
// Purpose: Serialize batch documents in the layout the inventory system imports.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Batch documents only use elements with attributes and child elements; no
//! text content. Attributes keep insertion order, and setting an existing
//! attribute replaces its value in place.
//!
//! Rendering writes a single-quoted XML declaration, indents each nesting
//! level by two spaces, closes childless elements as `<NAME attr="v" />`,
//! and ends with a newline.

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Declaration line written before the root element.
const XML_DECLARATION: &str = "<?xml version='1.0' encoding='utf-8'?>";
/// Indentation per nesting level.
const INDENT: &str = "  ";

// ============================================================================
// SECTION: Element
// ============================================================================

/// Document element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Element name.
    name: String,
    /// Attributes in insertion order.
    attributes: Vec<(String, String)>,
    /// Child elements in insertion order.
    children: Vec<Element>,
}

impl Element {
    /// Creates an empty element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute and returns the element.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Sets an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(name, _)| *name == key) {
            slot.1 = value;
        } else {
            self.attributes.push((key, value));
        }
    }

    /// Appends a child and returns a handle to it.
    pub fn push_child(&mut self, child: Self) -> &mut Self {
        let index = self.children.len();
        self.children.push(child);
        &mut self.children[index]
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.iter().find(|(name, _)| name == key).map(|(_, value)| value.as_str())
    }

    /// Returns the attributes in order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Returns the children in order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns the first child with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|child| child.name == name)
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders a document rooted at `root`.
#[must_use]
pub fn render_xml(root: &Element) -> String {
    let mut out = String::new();
    out.push_str(XML_DECLARATION);
    out.push('\n');
    render_element(&mut out, root, 0);
    out
}

/// Renders one element and its subtree at the given depth.
fn render_element(out: &mut String, element: &Element, depth: usize) {
    push_indent(out, depth);
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }
    if element.children.is_empty() {
        out.push_str(" />\n");
        return;
    }
    out.push_str(">\n");
    for child in &element.children {
        render_element(out, child, depth + 1);
    }
    push_indent(out, depth);
    out.push_str("</");
    out.push_str(&element.name);
    out.push_str(">\n");
}

/// Writes the indentation for a depth.
fn push_indent(out: &mut String, depth: usize) {
    for _ in 0 .. depth {
        out.push_str(INDENT);
    }
}

/// Escapes an attribute value.
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#09;"),
            other => escaped.push(other),
        }
    }
    escaped
}
