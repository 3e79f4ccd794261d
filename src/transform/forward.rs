//! Forward transform: structured XML → generic group tree
//!
//! The document element becomes the top-level group. Each descendant is
//! classified, named against its siblings, and emitted as a group or an
//! attribute entry. Original XML attributes are carried as `@`-prefixed
//! entries, own text as a `value` entry. The root's namespace bindings are
//! appended last as `namespace_<N>` records.

use crate::core::error::XmlGroupResult;
use crate::core::namespace::{declaration_name, names, NamespaceRecorder};
use crate::core::node::{AttributeEntry, Entry, GroupNode, GroupRole, SourceNode};
use crate::transform::classify::{Category, Classifier, Context};
use crate::transform::namer::{with_suffix, SiblingNames, TokenGenerator};
use crate::transform::options::TransformOptions;

/// Converts source XML trees into generic group trees
#[derive(Debug, Clone, Default)]
pub struct ForwardTransform {
    options: TransformOptions,
}

impl ForwardTransform {
    /// Create a forward transform with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a forward transform with custom options
    pub fn with_options(options: TransformOptions) -> XmlGroupResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// The options in use
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Transform a document rooted at `root`
    ///
    /// The input is not modified; the output is built fresh and depends only
    /// on the input and the options.
    pub fn transform(&self, root: &SourceNode) -> GroupNode {
        let mut pass = Pass {
            options: &self.options,
            classifier: Classifier::new(&self.options),
            tokens: TokenGenerator::new(),
        };

        let category = pass.classifier.classify(root, Context::Root);
        let mut group = pass.group(root.name.clone(), root, category, Context::Root);

        let records = NamespaceRecorder::record(root);
        for record in &records {
            group.push(record.to_group());
        }

        tracing::debug!(
            root = %root.name,
            tokens = pass.tokens.issued(),
            namespaces = records.len(),
            "forward transform complete"
        );
        group
    }
}

/// State of one forward invocation
struct Pass<'o> {
    options: &'o TransformOptions,
    classifier: Classifier<'o>,
    tokens: TokenGenerator,
}

impl Pass<'_> {
    /// Emit a non-root element as an entry of its parent
    fn entry(&mut self, node: &SourceNode, siblings: &mut SiblingNames) -> Entry {
        let category = self.classifier.classify(node, Context::Child);
        let name = siblings.assign(&node.name, &mut self.tokens);
        tracing::trace!(element = %node.name, %name, ?category, "classified");

        match category {
            Category::Fundamental { wrapper } => Entry::Attribute(AttributeEntry::typed(
                name,
                wrapper.text.clone().unwrap_or_default(),
                wrapper.name.as_str(),
            )),
            Category::Plain => Entry::Attribute(AttributeEntry::new(
                name,
                node.text.clone().unwrap_or_default(),
            )),
            _ => Entry::Group(self.group(name, node, category, Context::Child)),
        }
    }

    /// Build the group for an element classified as a group category
    fn group(
        &mut self,
        name: String,
        node: &SourceNode,
        category: Category<'_>,
        context: Context,
    ) -> GroupNode {
        match category {
            Category::Nil => {
                let mut group = GroupNode::with_role(name, GroupRole::Nil);
                group.push(AttributeEntry::new(
                    names::NIL_REASON,
                    self.options.nil_reason.as_str(),
                ));
                group
            }
            Category::RecordList => {
                let mut group = GroupNode::new(name);
                let mut siblings = SiblingNames::new(self.options.separator);
                self.attributes(node, context, &mut group, &mut siblings);
                for record in &node.children {
                    let key = with_suffix(
                        names::RECORD,
                        self.options.separator,
                        self.tokens.next_token(),
                    );
                    siblings.reserve(&key);
                    let mut wrapper = GroupNode::with_role(key, GroupRole::Record);
                    let mut inner = SiblingNames::new(self.options.separator);
                    wrapper.push(self.entry(record, &mut inner));
                    group.push(wrapper);
                }
                group
            }
            Category::Object { object } => {
                let mut group = GroupNode::with_role(name, GroupRole::Object(object.name.clone()));
                self.content(object, Context::Child, &mut group);
                group
            }
            // Value categories only reach here at the root, where they are
            // promoted to general groups.
            Category::General | Category::Fundamental { .. } | Category::Plain => {
                let mut group = GroupNode::new(name);
                self.content(node, context, &mut group);
                group
            }
        }
    }

    /// Emit attributes, own text and children of an element into `group`
    fn content(&mut self, node: &SourceNode, context: Context, group: &mut GroupNode) {
        let mut siblings = SiblingNames::new(self.options.separator);
        self.attributes(node, context, group, &mut siblings);

        if let Some(text) = &node.text {
            siblings.reserve(names::VALUE);
            group.push(AttributeEntry::new(names::VALUE, text.as_str()));
        }

        for child in &node.children {
            let entry = self.entry(child, &mut siblings);
            group.push(entry);
        }
    }

    /// Emit `@` entries for namespace declarations (below the root) and
    /// attributes
    fn attributes(
        &mut self,
        node: &SourceNode,
        context: Context,
        group: &mut GroupNode,
        siblings: &mut SiblingNames,
    ) {
        if context == Context::Child {
            for (prefix, uri) in &node.namespaces {
                let name = format!("{}{}", names::ATTRIBUTE_MARKER, declaration_name(prefix));
                siblings.reserve(&name);
                group.push(AttributeEntry::new(name, uri.as_str()));
            }
        }
        for (key, value) in &node.attributes {
            let name = format!("{}{}", names::ATTRIBUTE_MARKER, key);
            siblings.reserve(&name);
            group.push(AttributeEntry::new(name, value.as_str()));
        }
    }
}
