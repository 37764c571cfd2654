//! A minimal owned XML tree used to assemble the MPD.
//!
//! Nodes are plain values. [`XmlNode::add_child`] moves the child into its
//! parent, so a node is always owned by exactly one tree. A rejected child is
//! dropped together with the returned error.

mod runtime;
mod writer;

use regex::Regex;
use std::sync::LazyLock;

use crate::{MpdError, MpdResult};

pub use runtime::XmlRuntime;

static ELEMENT_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.:\-]*$").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub enum XmlChild {
    Element(XmlNode),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlChild>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set an attribute. An existing attribute keeps its position.
    pub fn set_string_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, old)) => *old = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn set_integer_attribute(&mut self, name: &str, value: u64) {
        self.set_string_attribute(name, value.to_string());
    }

    pub fn set_floating_point_attribute(&mut self, name: &str, value: f64) {
        self.set_string_attribute(name, value.to_string());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(key, _)| key == name)?;
        Some(self.attributes.remove(index).1)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Replace all children with a single text node.
    pub fn set_content(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.children.push(XmlChild::Text(text.into()));
    }

    /// Concatenated text of the direct text children.
    pub fn content(&self) -> Option<String> {
        let mut texts = self
            .children
            .iter()
            .filter_map(|child| match child {
                XmlChild::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .peekable();
        texts.peek()?;
        Some(texts.collect())
    }

    /// Move `child` into this node.
    ///
    /// On failure the child has already been consumed and is dropped.
    pub fn add_child(&mut self, child: XmlNode) -> MpdResult<()> {
        if !ELEMENT_NAME_REGEX.is_match(&child.name) {
            return Err(MpdError::InvalidElementName(child.name));
        }
        self.children.push(XmlChild::Element(child));
        Ok(())
    }

    pub fn add_comment(&mut self, comment: impl Into<String>) {
        self.children.push(XmlChild::Comment(comment.into()));
    }

    pub fn children(&self) -> &[XmlChild] {
        &self.children
    }

    pub fn element_children(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter().filter_map(|child| match child {
            XmlChild::Element(node) => Some(node),
            _ => None,
        })
    }

    pub fn element_children_mut(&mut self) -> impl Iterator<Item = &mut XmlNode> {
        self.children.iter_mut().filter_map(|child| match child {
            XmlChild::Element(node) => Some(node),
            _ => None,
        })
    }

    /// First direct child element called `name`. Does not recurse.
    pub fn first_child(&self, name: &str) -> Option<&XmlNode> {
        self.element_children().find(|node| node.name == name)
    }
}

/// A complete document: an optional leading comment followed by the root element.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    comment: Option<String>,
    root: XmlNode,
}

impl XmlDocument {
    pub fn new(root: XmlNode) -> Self {
        Self {
            comment: None,
            root,
        }
    }

    /// Place a comment before the root element, as its sibling.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn root(&self) -> &XmlNode {
        &self.root
    }

    /// Serialize to indented UTF-8 text.
    pub fn serialize(&self, runtime: &XmlRuntime) -> MpdResult<String> {
        writer::write_document(self, runtime)
    }
}
