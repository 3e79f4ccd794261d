//! Node classification
//!
//! Every source element becomes exactly one of: a nil group, a fundamental
//! (typed) value, a plain value, a record-list group, a collapsed compound
//! object group, or a general group. The decision is an ordered rule list;
//! the first rule that matches wins and the last rule always matches.

use crate::core::node::{local_name, SourceNode};
use crate::transform::options::TransformOptions;

/// A tag-name pattern in one of the classification tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePattern {
    /// Exact qualified name, e.g. `gco:CharacterString`
    Exact(String),
    /// Exact local name, any prefix, e.g. `CharacterString`
    Local(String),
    /// Local name ending with the given text, e.g. `List`
    LocalSuffix(String),
    /// ISO-style type code: 1-4 uppercase letters, `_`, then an uppercase
    /// letter (e.g. `CI_Citation`, `MD_Metadata`)
    TypeCode,
}

impl NamePattern {
    /// Check whether a qualified tag name matches
    pub fn matches(&self, qname: &str) -> bool {
        match self {
            NamePattern::Exact(name) => qname == name,
            NamePattern::Local(name) => local_name(qname) == name,
            NamePattern::LocalSuffix(suffix) => {
                let local = local_name(qname);
                local.len() > suffix.len() && local.ends_with(suffix.as_str())
            }
            NamePattern::TypeCode => is_type_code(local_name(qname)),
        }
    }
}

fn is_type_code(local: &str) -> bool {
    let Some((code, rest)) = local.split_once('_') else {
        return false;
    };
    (1..=4).contains(&code.len())
        && code.bytes().all(|b| b.is_ascii_uppercase())
        && rest.bytes().next().is_some_and(|b| b.is_ascii_uppercase())
}

/// Check a name against a table
pub fn table_matches(table: &[NamePattern], qname: &str) -> bool {
    table.iter().any(|pattern| pattern.matches(qname))
}

/// Where an element sits in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// The document element; always becomes a group and its namespace
    /// declarations are recorded separately
    Root,
    /// Any other element
    Child,
}

/// Category assigned to one source element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category<'a> {
    /// No attributes, children or text
    Nil,
    /// Property holding a single scalar wrapper element
    Fundamental {
        /// The wrapper; its tag becomes the type tag, its text the value
        wrapper: &'a SourceNode,
    },
    /// Text only
    Plain,
    /// Container of homogeneous repeated sub-records
    RecordList,
    /// Property holding a single compound object element
    Object {
        /// The collapsed object element
        object: &'a SourceNode,
    },
    /// Anything else
    General,
}

impl Category<'_> {
    /// Check whether the category is emitted as an attribute entry
    pub fn is_value(&self) -> bool {
        matches!(self, Category::Fundamental { .. } | Category::Plain)
    }
}

/// Classification rules in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Nil,
    Fundamental,
    Plain,
    RecordList,
    Object,
    General,
}

/// The rule table, evaluated top to bottom
pub const RULES: [Rule; 6] = [
    Rule::Nil,
    Rule::Fundamental,
    Rule::Plain,
    Rule::RecordList,
    Rule::Object,
    Rule::General,
];

/// Assigns a category to each source element
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'o> {
    options: &'o TransformOptions,
}

impl<'o> Classifier<'o> {
    /// Create a classifier over the given tables
    pub fn new(options: &'o TransformOptions) -> Self {
        Self { options }
    }

    /// Classify an element
    pub fn classify<'a>(&self, node: &'a SourceNode, context: Context) -> Category<'a> {
        RULES
            .iter()
            .find_map(|rule| self.apply(*rule, node, context))
            .unwrap_or(Category::General)
    }

    /// Evaluate a single rule
    pub fn apply<'a>(
        &self,
        rule: Rule,
        node: &'a SourceNode,
        context: Context,
    ) -> Option<Category<'a>> {
        let has_attributes = match context {
            Context::Root => !node.attributes.is_empty(),
            Context::Child => node.has_attributes(),
        };
        let has_text = node.text.is_some();

        match rule {
            Rule::Nil => (!has_attributes && !has_text && node.children.is_empty())
                .then_some(Category::Nil),
            Rule::Fundamental => {
                if context == Context::Root || has_attributes || has_text {
                    return None;
                }
                let wrapper = node.only_child()?;
                let scalar = !wrapper.has_attributes()
                    && wrapper.children.is_empty()
                    && wrapper.text.is_some()
                    && table_matches(&self.options.scalar_wrappers, &wrapper.name);
                scalar.then_some(Category::Fundamental { wrapper })
            }
            Rule::Plain => (context == Context::Child
                && has_text
                && !has_attributes
                && node.children.is_empty())
            .then_some(Category::Plain),
            Rule::RecordList => {
                if has_text || !table_matches(&self.options.record_lists, &node.name) {
                    return None;
                }
                let first = node.children.first()?;
                node.children
                    .iter()
                    .all(|child| child.name == first.name)
                    .then_some(Category::RecordList)
            }
            Rule::Object => {
                if has_attributes || has_text {
                    return None;
                }
                let object = node.only_child()?;
                let compound = table_matches(&self.options.compound_objects, &object.name)
                    && !object.is_empty();
                compound.then_some(Category::Object { object })
            }
            Rule::General => Some(Category::General),
        }
    }
}
