//! Reverse transform: generic group tree → structured XML
//!
//! Reconstruction relies only on the naming and marking conventions the
//! forward transform establishes: `@` entries become XML attributes, a
//! `value` entry becomes own text, group roles restore nil elements,
//! collapsed compound objects and record-list wrappers, and disambiguation
//! suffixes are stripped to recover tags.

use crate::core::error::XmlGroupResult;
use crate::core::namespace::{declared_prefix, is_namespace_record_name, names, NamespaceRecorder};
use crate::core::node::{AttributeEntry, Entry, GroupNode, GroupRole, SourceNode};
use crate::transform::namer::strip_suffix;
use crate::transform::options::TransformOptions;

/// Converts generic group trees back into source XML trees
#[derive(Debug, Clone, Default)]
pub struct ReverseTransform {
    options: TransformOptions,
}

impl ReverseTransform {
    /// Create a reverse transform with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reverse transform with custom options
    ///
    /// Only the separator matters in this direction; it must match the one
    /// used to build the tree.
    pub fn with_options(options: TransformOptions) -> XmlGroupResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The options in use
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Rebuild the document described by `root`
    ///
    /// Namespace records are gathered from the whole tree before content is
    /// rebuilt and declared on the root element. Missing or malformed
    /// records are dropped rather than reported.
    pub fn transform(&self, root: &GroupNode) -> SourceNode {
        let mut bindings = NamespaceRecorder::collect(root).into_bindings();
        let declared = bindings.len();

        // The root name is never disambiguated, so it is used unstripped.
        let mut element = self.element(root, root.name.clone());
        bindings.append(&mut element.namespaces);
        element.namespaces = bindings;

        tracing::debug!(root = %element.name, namespaces = declared, "reverse transform complete");
        element
    }

    /// Rebuild the element for a group, using `tag` as its name
    fn element(&self, group: &GroupNode, tag: String) -> SourceNode {
        tracing::trace!(group = %group.name, %tag, "rebuilding");
        match &group.role {
            Some(GroupRole::Nil) => SourceNode::new(tag),
            Some(GroupRole::Object(object_tag)) => {
                let mut object = SourceNode::new(object_tag.as_str());
                self.fill(&mut object, &group.entries);
                SourceNode::new(tag).with_child(object)
            }
            Some(GroupRole::Record) | None => {
                let mut node = SourceNode::new(tag);
                self.fill(&mut node, &group.entries);
                node
            }
        }
    }

    /// Rebuild attributes, text and children of `node` from group entries
    fn fill(&self, node: &mut SourceNode, entries: &[Entry]) {
        for entry in entries {
            match entry {
                Entry::Group(group) if is_namespace_record_name(&group.name) => {}
                Entry::Group(group) if group.is_record() => self.fill(node, &group.entries),
                Entry::Group(group) => {
                    let tag = self.tag(&group.name);
                    let child = self.element(group, tag);
                    node.children.push(child);
                }
                Entry::Attribute(attr) => self.attribute(node, attr),
            }
        }
    }

    fn attribute(&self, node: &mut SourceNode, attr: &AttributeEntry) {
        if let Some(key) = attr.name.strip_prefix(names::ATTRIBUTE_MARKER) {
            match declared_prefix(key) {
                Some(prefix) => node
                    .namespaces
                    .push((prefix.to_string(), attr.value.clone())),
                None => {
                    node.attributes.insert(key.to_string(), attr.value.clone());
                }
            }
            return;
        }

        if attr.name == names::VALUE {
            node.set_text(attr.value.as_str());
            return;
        }

        let tag = self.tag(&attr.name);
        let child = match &attr.type_tag {
            Some(wrapper) => SourceNode::new(tag)
                .with_child(SourceNode::new(wrapper.as_str()).with_text(attr.value.as_str())),
            None => SourceNode::new(tag).with_text(attr.value.as_str()),
        };
        node.children.push(child);
    }

    fn tag(&self, name: &str) -> String {
        strip_suffix(name, self.options.separator).to_string()
    }
}
