//! Tree node types
//!
//! This module defines the two trees the transforms move between:
//! - SourceNode: an element of a namespace-qualified XML document
//! - GroupNode / AttributeEntry: the generic group/attribute tree that a
//!   hierarchical container stores in its metadata space

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An element of a parsed XML document
///
/// Attributes are kept in a sorted map so that equality ignores their
/// document order. Namespace declarations are kept apart from attributes,
/// in declaration order; an empty prefix denotes the default namespace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceNode {
    /// Qualified tag name (e.g. `gmd:MD_Metadata`)
    pub name: String,
    /// Namespace declarations on this element, as (prefix, uri)
    pub namespaces: Vec<(String, String)>,
    /// Attributes other than namespace declarations
    pub attributes: BTreeMap<String, String>,
    /// Element children in document order
    pub children: Vec<SourceNode>,
    /// Trimmed text content, `None` when empty
    pub text: Option<String>,
}

impl SourceNode {
    /// Create a new element with no content
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the text content; whitespace-only text is treated as absent
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add a namespace declaration
    pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.namespaces.push((prefix.into(), uri.into()));
        self
    }

    /// Append a child element
    pub fn with_child(mut self, child: SourceNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set the text content; whitespace-only text is treated as absent
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        let trimmed = text.trim();
        self.text = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    /// Local part of the tag name (after the prefix, if any)
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Check whether the element carries no attributes, declarations,
    /// children or text
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
            && self.namespaces.is_empty()
            && self.children.is_empty()
            && self.text.is_none()
    }

    /// Check whether the element carries attributes or namespace declarations
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty() || !self.namespaces.is_empty()
    }

    /// The single element child, if there is exactly one
    pub fn only_child(&self) -> Option<&SourceNode> {
        match self.children.as_slice() {
            [child] => Some(child),
            _ => None,
        }
    }
}

/// Strip the namespace prefix from a qualified name
pub fn local_name(qname: &str) -> &str {
    match qname.split_once(':') {
        Some((_, local)) => local,
        None => qname,
    }
}

/// Element and attribute names of the generic vocabulary document
pub mod vocab {
    /// Group element
    pub const GROUP: &str = "group";
    /// Attribute element
    pub const ATTRIBUTE: &str = "attribute";
    /// Name attribute, on both elements
    pub const NAME: &str = "name";
    /// Value attribute of an attribute element
    pub const VALUE: &str = "value";
    /// Type tag (attribute) or compound object tag (group)
    pub const TYPE: &str = "type";
    /// Group role attribute
    pub const ROLE: &str = "role";
    /// Role value of nil groups
    pub const ROLE_NIL: &str = "nil";
    /// Role value of record-list wrappers
    pub const ROLE_RECORD: &str = "record";
}

/// Metadata describing why a group exists
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GroupRole {
    /// A compound object element collapsed into its property element;
    /// holds the object's tag
    Object(String),
    /// An element with no attributes, children or text
    Nil,
    /// A wrapper around one sub-record of a record list
    Record,
}

/// A leaf entry holding one scalar name/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttributeEntry {
    /// Entry name, unique among its siblings
    pub name: String,
    /// Scalar value
    pub value: String,
    /// Tag of the scalar wrapper element this value came from
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub type_tag: Option<String>,
}

impl AttributeEntry {
    /// Create a new untyped attribute entry
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            type_tag: None,
        }
    }

    /// Create a new attribute entry carrying a type tag
    pub fn typed(
        name: impl Into<String>,
        value: impl Into<String>,
        type_tag: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            type_tag: Some(type_tag.into()),
        }
    }
}

/// A composite entry with ordered child entries
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupNode {
    /// Group name, unique among its siblings
    pub name: String,
    /// Optional role/type metadata
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub role: Option<GroupRole>,
    /// Child entries in order
    pub entries: Vec<Entry>,
}

impl GroupNode {
    /// Create a new empty group
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
            entries: Vec::new(),
        }
    }

    /// Create a new empty group with a role
    pub fn with_role(name: impl Into<String>, role: GroupRole) -> Self {
        Self {
            name: name.into(),
            role: Some(role),
            entries: Vec::new(),
        }
    }

    /// Append an entry
    pub fn push(&mut self, entry: impl Into<Entry>) {
        self.entries.push(entry.into());
    }

    /// Get a direct child entry by name
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    /// Get a direct child group by name
    pub fn get_group(&self, name: &str) -> Option<&GroupNode> {
        self.get(name).and_then(Entry::as_group)
    }

    /// Get a direct child attribute entry by name
    pub fn get_attribute(&self, name: &str) -> Option<&AttributeEntry> {
        self.get(name).and_then(Entry::as_attribute)
    }

    /// Iterate over direct child groups
    pub fn groups(&self) -> impl Iterator<Item = &GroupNode> {
        self.entries.iter().filter_map(Entry::as_group)
    }

    /// Iterate over direct child attribute entries
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeEntry> {
        self.entries.iter().filter_map(Entry::as_attribute)
    }

    /// Number of direct child entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the group has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether this group is a nil marker
    pub fn is_nil(&self) -> bool {
        matches!(self.role, Some(GroupRole::Nil))
    }

    /// Check whether this group wraps a record-list item
    pub fn is_record(&self) -> bool {
        matches!(self.role, Some(GroupRole::Record))
    }

    /// Tag of the collapsed compound object, if any
    pub fn object_type(&self) -> Option<&str> {
        match &self.role {
            Some(GroupRole::Object(tag)) => Some(tag),
            _ => None,
        }
    }

    /// Serialize the tree as JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> crate::core::error::XmlGroupResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::core::error::XmlGroupError::Serialization(e.to_string()))
    }
}

/// An entry of the generic tree
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum Entry {
    /// A nested group
    Group(GroupNode),
    /// A scalar entry
    Attribute(AttributeEntry),
}

impl Entry {
    /// Name of the entry
    pub fn name(&self) -> &str {
        match self {
            Entry::Group(group) => &group.name,
            Entry::Attribute(attr) => &attr.name,
        }
    }

    /// Check if this is a group
    pub fn is_group(&self) -> bool {
        matches!(self, Entry::Group(_))
    }

    /// Check if this is an attribute entry
    pub fn is_attribute(&self) -> bool {
        matches!(self, Entry::Attribute(_))
    }

    /// Get the group, if this is a group
    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            Entry::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Get the attribute entry, if this is an attribute entry
    pub fn as_attribute(&self) -> Option<&AttributeEntry> {
        match self {
            Entry::Attribute(attr) => Some(attr),
            _ => None,
        }
    }
}

impl From<GroupNode> for Entry {
    fn from(group: GroupNode) -> Self {
        Entry::Group(group)
    }
}

impl From<AttributeEntry> for Entry {
    fn from(attr: AttributeEntry) -> Self {
        Entry::Attribute(attr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_node_text_trimmed() {
        let node = SourceNode::new("gco:CharacterString").with_text("  hello \n");
        assert_eq!(node.text.as_deref(), Some("hello"));

        let blank = SourceNode::new("a").with_text(" \n\t ");
        assert_eq!(blank.text, None);
        assert!(blank.is_empty());
    }

    #[test]
    fn test_source_node_equality_ignores_attribute_order() {
        let a = SourceNode::new("b").with_attribute("x", "1").with_attribute("y", "2");
        let b = SourceNode::new("b").with_attribute("y", "2").with_attribute("x", "1");
        assert_eq!(a, b);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name("gmd:CI_Citation"), "CI_Citation");
        assert_eq!(local_name("title"), "title");
        assert_eq!(SourceNode::new("gco:Real").local_name(), "Real");
    }

    #[test]
    fn test_only_child() {
        let one = SourceNode::new("a").with_child(SourceNode::new("b"));
        assert_eq!(one.only_child().map(|c| c.name.as_str()), Some("b"));

        let two = one.clone().with_child(SourceNode::new("c"));
        assert!(two.only_child().is_none());
    }

    #[test]
    fn test_group_lookup() {
        let mut group = GroupNode::new("a");
        group.push(AttributeEntry::new("@x", "1"));
        group.push(GroupNode::with_role("b", GroupRole::Nil));

        assert_eq!(group.len(), 2);
        assert_eq!(group.get_attribute("@x").map(|a| a.value.as_str()), Some("1"));
        assert!(group.get_group("b").is_some_and(GroupNode::is_nil));
        assert!(group.get_group("@x").is_none());
        assert_eq!(group.groups().count(), 1);
        assert_eq!(group.attributes().count(), 1);
    }

    #[test]
    fn test_object_type() {
        let group = GroupNode::with_role(
            "gmd:contact",
            GroupRole::Object("gmd:CI_ResponsibleParty".to_string()),
        );
        assert_eq!(group.object_type(), Some("gmd:CI_ResponsibleParty"));
        assert!(!group.is_nil());
        assert!(!group.is_record());
    }
}
