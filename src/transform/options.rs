//! Transform configuration
//!
//! Options are shared by both directions: the forward transform consults the
//! classification tables, and both directions must agree on the separator.

use crate::core::error::{XmlGroupError, XmlGroupResult};
use crate::transform::classify::NamePattern;

/// Default separator between a base name and its disambiguation token
///
/// Tags that already contain `_` (ISO type codes such as `gmd:CI_Date`) are
/// truncated at it on the way back. For ISO 19139 documents pass
/// `TransformOptions::default().separator('~')` to both directions.
pub const DEFAULT_SEPARATOR: char = '_';

/// Default value of the `nilReason` entry
pub const DEFAULT_NIL_REASON: &str = "unknown";

/// Local names of primitive scalar wrappers (ISO 19139 `gco` types)
const SCALAR_WRAPPERS: &[&str] = &[
    "CharacterString",
    "Boolean",
    "Integer",
    "Real",
    "Decimal",
    "Date",
    "DateTime",
    "Measure",
    "Distance",
    "Angle",
    "Scale",
    "Length",
    "Record",
    "RecordType",
    "Binary",
    "UnlimitedInteger",
    "MemberName",
    "LocalName",
    "ScopedName",
    "TypeName",
];

/// Options for forward and reverse transforms.
///
/// Use the builder pattern to extend or replace the classification tables.
///
/// # Example
///
/// ```rust
/// use xmlgroup::{NamePattern, TransformOptions};
///
/// let options = TransformOptions::default()
///     .separator('#')
///     .record_list(NamePattern::Exact("swe:DataRecord".to_string()));
/// assert_eq!(options.separator, '#');
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Separator between a base name and its disambiguation token
    pub separator: char,
    /// Tags of elements that only wrap a primitive scalar
    pub scalar_wrappers: Vec<NamePattern>,
    /// Tags of compound object elements collapsed into their property
    pub compound_objects: Vec<NamePattern>,
    /// Tags of record-list containers
    pub record_lists: Vec<NamePattern>,
    /// Value written into the `nilReason` entry of nil groups
    pub nil_reason: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            scalar_wrappers: SCALAR_WRAPPERS
                .iter()
                .map(|name| NamePattern::Local((*name).to_string()))
                .collect(),
            compound_objects: vec![NamePattern::TypeCode],
            record_lists: vec![NamePattern::LocalSuffix("List".to_string())],
            nil_reason: DEFAULT_NIL_REASON.to_string(),
        }
    }
}

impl TransformOptions {
    /// Options with empty classification tables: every element is a nil,
    /// plain or general node
    pub fn empty() -> Self {
        Self {
            scalar_wrappers: Vec::new(),
            compound_objects: Vec::new(),
            record_lists: Vec::new(),
            ..Self::default()
        }
    }

    /// Set the disambiguation separator.
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Add a scalar wrapper pattern.
    pub fn scalar_wrapper(mut self, pattern: NamePattern) -> Self {
        self.scalar_wrappers.push(pattern);
        self
    }

    /// Add a compound object pattern.
    pub fn compound_object(mut self, pattern: NamePattern) -> Self {
        self.compound_objects.push(pattern);
        self
    }

    /// Add a record-list pattern.
    ///
    /// Every child of a matching container is wrapped in its own uniquely
    /// keyed group, whether or not the children would collide by name.
    pub fn record_list(mut self, pattern: NamePattern) -> Self {
        self.record_lists.push(pattern);
        self
    }

    /// Set the value of `nilReason` entries.
    pub fn nil_reason(mut self, reason: impl Into<String>) -> Self {
        self.nil_reason = reason.into();
        self
    }

    /// Check that the options can produce a reversible tree
    ///
    /// The separator must not be able to occur at the start of a name token
    /// or inside the markers the generic vocabulary relies on.
    pub fn validate(&self) -> XmlGroupResult<()> {
        let sep = self.separator;
        if sep.is_alphanumeric()
            || sep.is_whitespace()
            || matches!(sep, ':' | '@' | '/' | '<' | '>' | '&' | '"' | '\'')
        {
            return Err(XmlGroupError::BadParam(format!(
                "Unusable name separator '{}'",
                sep
            )));
        }
        Ok(())
    }
}
