//! # xmlgroup
//!
//! Lossless translation between deeply nested, namespace-qualified XML
//! metadata documents of arbitrary schema and a generic group/attribute tree
//! suitable for the metadata space of a hierarchical data container.
//!
//! ## Overview
//!
//! - [`ForwardTransform`] turns a [`SourceNode`] tree into a [`GroupNode`]
//!   tree: each element becomes a group or an attribute entry, repeated
//!   sibling names are disambiguated, XML attributes are kept as `@` entries
//!   and the root's namespace bindings are stored as `namespace_<N>` records.
//! - [`ReverseTransform`] rebuilds the original tree from those conventions
//!   alone.
//! - [`SourceParser`] / [`SourceSerializer`] and [`GroupParser`] /
//!   [`GroupSerializer`] move both trees in and out of XML text.
//!
//! ## Example
//!
//! ```rust
//! use xmlgroup::{generic_to_xml, xml_to_generic, SourceParser};
//!
//! let xml = r#"<a><b x="1">hi</b><b x="2">bye</b></a>"#;
//! let generic = xml_to_generic(xml)?;
//! assert!(generic.contains(r#"<group name="b_1">"#));
//!
//! let rebuilt = generic_to_xml(&generic)?;
//! let parser = SourceParser::new();
//! assert_eq!(parser.parse(&rebuilt)?, parser.parse(xml)?);
//! # Ok::<(), xmlgroup::XmlGroupError>(())
//! ```

pub mod core;
pub mod transform;

pub use crate::core::{
    AttributeEntry, Entry, GroupNode, GroupRole, NamespaceMap, NamespaceRecord,
    NamespaceRecorder, SourceNode, XmlGroupError, XmlGroupResult,
};
#[cfg(feature = "core")]
pub use crate::core::{GroupParser, GroupSerializer, SourceParser, SourceSerializer};
pub use crate::transform::{ForwardTransform, NamePattern, ReverseTransform, TransformOptions};

/// Translate an XML document into a generic-vocabulary document
///
/// Uses the default `_` separator, which cannot be told apart from an `_`
/// inside a tag. ISO 19139 documents (`gmd:CI_Date`, `gmd:MD_Metadata`)
/// should go through [`xml_to_generic_with`] and [`generic_to_xml_with`]
/// with `TransformOptions::default().separator('~')`.
#[cfg(feature = "core")]
pub fn xml_to_generic(xml: &str) -> XmlGroupResult<String> {
    xml_to_generic_with(xml, TransformOptions::default())
}

/// Translate an XML document into a generic-vocabulary document with options
#[cfg(feature = "core")]
pub fn xml_to_generic_with(xml: &str, options: TransformOptions) -> XmlGroupResult<String> {
    let source = SourceParser::new().parse(xml)?;
    let tree = ForwardTransform::with_options(options)?.transform(&source);
    GroupSerializer::new().serialize(&tree)
}

/// Translate a generic-vocabulary document back into XML
#[cfg(feature = "core")]
pub fn generic_to_xml(generic: &str) -> XmlGroupResult<String> {
    generic_to_xml_with(generic, TransformOptions::default())
}

/// Translate a generic-vocabulary document back into XML with options
#[cfg(feature = "core")]
pub fn generic_to_xml_with(generic: &str, options: TransformOptions) -> XmlGroupResult<String> {
    let tree = GroupParser::new().parse(generic)?;
    let source = ReverseTransform::with_options(options)?.transform(&tree);
    SourceSerializer::new().serialize(&source)
}
