//! dishgrid-dom — Shared DomNode types for dishgrid renderers
//!
//! Views build a `DomNode` tree; renderers (currently HTML only) walk it.
//! Attributes are kept in a `BTreeMap` so every renderer emits them in a
//! stable order and pre-rendered output is byte-for-byte reproducible.

use std::collections::BTreeMap;

/// A single element in the dishgrid DOM tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DomNode {
    /// HTML tag name (e.g. "div", "img", "a")
    pub tag: String,

    /// Stable identity, rendered as `data-key`
    pub key: Option<String>,

    /// HTML attributes (class, href, style, ...)
    pub attrs: BTreeMap<String, String>,

    /// Text content, written before any children
    pub text: Option<String>,

    pub children: Vec<DomNode>,
}

impl DomNode {
    /// Create an empty element
    pub fn new(tag: &str) -> Self {
        DomNode {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    /// Create a simple text node
    pub fn text(tag: &str, content: &str) -> Self {
        DomNode {
            tag: tag.to_string(),
            text: Some(content.to_string()),
            ..Default::default()
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_child(mut self, child: DomNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = DomNode>,
    {
        self.children.extend(children);
        self
    }

    /// Get a class attribute if present
    pub fn class(&self) -> Option<&str> {
        self.attr("class")
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|s| s.as_str())
    }

    /// Depth-first search for the first node carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Option<&DomNode> {
        if self.class() == Some(class) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_class(class))
    }

    /// Count nodes (self included) whose class equals `class`.
    pub fn count_class(&self, class: &str) -> usize {
        let own = usize::from(self.class() == Some(class));
        own + self.children.iter().map(|c| c.count_class(class)).sum::<usize>()
    }
}
