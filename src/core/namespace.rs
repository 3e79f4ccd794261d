//! Namespace bindings and their records in the generic tree
//!
//! The forward direction captures every prefix bound on the document root
//! and stores each binding as an auxiliary `namespace_<N>` group holding a
//! `prefix` and a `uri` entry. The reverse direction gathers those groups
//! from anywhere in the tree and re-declares them on the rebuilt root.

use crate::core::error::{XmlGroupError, XmlGroupResult};
use crate::core::node::{AttributeEntry, Entry, GroupNode, SourceNode};

/// Reserved names of the generic vocabulary
pub mod names {
    /// Marker prefixed to entries holding original XML attributes
    pub const ATTRIBUTE_MARKER: char = '@';
    /// Entry holding a group's own text content
    pub const VALUE: &str = "value";
    /// Entry marking a nil element
    pub const NIL_REASON: &str = "nilReason";
    /// Name prefix of namespace records
    pub const NAMESPACE_RECORD: &str = "namespace_";
    /// Base name of record-list wrappers
    pub const RECORD: &str = "record";
    /// Prefix entry inside a namespace record
    pub const PREFIX: &str = "prefix";
    /// URI entry inside a namespace record
    pub const URI: &str = "uri";
    /// Attribute name (or prefix) of namespace declarations
    pub const XMLNS: &str = "xmlns";
}

/// Well-known namespace URIs
pub mod ns {
    /// XML namespace, implicitly bound to `xml`
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
    /// Prefix implicitly bound to the XML namespace
    pub const XML_PREFIX: &str = "xml";
    /// ISO 19139 metadata namespace
    pub const GMD: &str = "http://www.isotc211.org/2005/gmd";
    /// ISO 19139 common types namespace
    pub const GCO: &str = "http://www.isotc211.org/2005/gco";
}

/// Check whether a name matches the reserved `namespace_<N>` pattern
pub fn is_namespace_record_name(name: &str) -> bool {
    record_position(name).is_some()
}

/// Position index encoded in a `namespace_<N>` name
fn record_position(name: &str) -> Option<usize> {
    let digits = name.strip_prefix(names::NAMESPACE_RECORD)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Render a namespace declaration as an attribute name (`xmlns` or `xmlns:p`)
pub fn declaration_name(prefix: &str) -> String {
    if prefix.is_empty() {
        names::XMLNS.to_string()
    } else {
        format!("{}:{}", names::XMLNS, prefix)
    }
}

/// Parse an attribute name as a namespace declaration, returning its prefix
pub fn declared_prefix(attr_name: &str) -> Option<&str> {
    if attr_name == names::XMLNS {
        return Some("");
    }
    attr_name
        .strip_prefix(names::XMLNS)
        .and_then(|rest| rest.strip_prefix(':'))
}

/// One prefix→URI binding captured at the document root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceRecord {
    /// Namespace prefix (empty for the default namespace)
    pub prefix: String,
    /// Namespace URI
    pub uri: String,
    /// Position among the root's declarations
    pub position: usize,
}

impl NamespaceRecord {
    /// Create a new namespace record
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>, position: usize) -> Self {
        Self {
            prefix: prefix.into(),
            uri: uri.into(),
            position,
        }
    }

    /// Name of the auxiliary group holding this record
    pub fn group_name(&self) -> String {
        format!("{}{}", names::NAMESPACE_RECORD, self.position)
    }

    /// Build the auxiliary group for this record
    pub fn to_group(&self) -> GroupNode {
        let mut group = GroupNode::new(self.group_name());
        group.push(AttributeEntry::new(names::PREFIX, self.prefix.as_str()));
        group.push(AttributeEntry::new(names::URI, self.uri.as_str()));
        group
    }

    /// Read a record back from an auxiliary group
    ///
    /// Returns `None` when the group is not a namespace record or lacks
    /// either of its two entries.
    pub fn from_group(group: &GroupNode) -> Option<Self> {
        let position = record_position(&group.name)?;
        let prefix = group.get_attribute(names::PREFIX)?;
        let uri = group.get_attribute(names::URI)?;
        Some(Self::new(prefix.value.as_str(), uri.value.as_str(), position))
    }
}

/// Ordered map of namespace prefixes to URIs
///
/// Declaration order is kept so that a rebuilt root declares its bindings
/// in the order they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceMap {
    bindings: Vec<(String, String)>,
}

impl NamespaceMap {
    /// Create a new empty namespace map
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a prefix to a URI
    ///
    /// Returns an error if the prefix is already bound to a different URI.
    /// Binding the same pair twice is a no-op.
    pub fn register(&mut self, prefix: &str, uri: &str) -> XmlGroupResult<()> {
        if let Some(existing) = self.get_uri(prefix) {
            if existing != uri {
                return Err(XmlGroupError::BadParam(format!(
                    "Prefix '{}' is already bound to '{}'",
                    prefix, existing
                )));
            }
            return Ok(());
        }
        self.bindings.push((prefix.to_string(), uri.to_string()));
        Ok(())
    }

    /// Get the URI bound to a prefix
    pub fn get_uri(&self, prefix: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// Get the first prefix bound to a URI
    pub fn get_prefix(&self, uri: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(_, u)| u == uri)
            .map(|(prefix, _)| prefix.as_str())
    }

    /// Check if a prefix is bound
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.get_uri(prefix).is_some()
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if there are no bindings
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate over (prefix, uri) pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }

    /// Consume the map, returning (prefix, uri) pairs in declaration order
    pub fn into_bindings(self) -> Vec<(String, String)> {
        self.bindings
    }
}

/// Captures root namespace bindings and finds them again
pub struct NamespaceRecorder;

impl NamespaceRecorder {
    /// Enumerate the bindings declared on the document root, in document order
    pub fn record(root: &SourceNode) -> Vec<NamespaceRecord> {
        root.namespaces
            .iter()
            .enumerate()
            .map(|(position, (prefix, uri))| {
                NamespaceRecord::new(prefix.as_str(), uri.as_str(), position)
            })
            .collect()
    }

    /// Locate every namespace record anywhere in the generic tree
    ///
    /// Records are ordered by position. Malformed records and prefixes bound
    /// twice are skipped: the rebuilt document simply lacks those bindings.
    pub fn collect(root: &GroupNode) -> NamespaceMap {
        let mut records = Vec::new();
        Self::gather(root, &mut records);
        records.sort_by_key(|r| r.position);

        let mut map = NamespaceMap::new();
        for record in records {
            if let Err(e) = map.register(&record.prefix, &record.uri) {
                tracing::warn!(position = record.position, "skipping namespace record: {}", e);
            }
        }
        map
    }

    fn gather(group: &GroupNode, out: &mut Vec<NamespaceRecord>) {
        for entry in &group.entries {
            let Entry::Group(child) = entry else {
                continue;
            };
            if is_namespace_record_name(&child.name) {
                match NamespaceRecord::from_group(child) {
                    Some(record) => out.push(record),
                    None => tracing::warn!(name = %child.name, "incomplete namespace record"),
                }
            } else {
                Self::gather(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_name_pattern() {
        assert!(is_namespace_record_name("namespace_0"));
        assert!(is_namespace_record_name("namespace_12"));
        assert!(!is_namespace_record_name("namespace_"));
        assert!(!is_namespace_record_name("namespace_1_4"));
        assert!(!is_namespace_record_name("namespace_x"));
        assert!(!is_namespace_record_name("namespaces_1"));
    }

    #[test]
    fn test_declared_prefix() {
        assert_eq!(declared_prefix("xmlns"), Some(""));
        assert_eq!(declared_prefix("xmlns:gmd"), Some("gmd"));
        assert_eq!(declared_prefix("xmlnsx"), None);
        assert_eq!(declared_prefix("gmd:xmlns"), None);
        assert_eq!(declaration_name(""), "xmlns");
        assert_eq!(declaration_name("gco"), "xmlns:gco");
    }

    #[test]
    fn test_record_group_round_trip() {
        let record = NamespaceRecord::new("gmd", ns::GMD, 3);
        let group = record.to_group();
        assert_eq!(group.name, "namespace_3");
        assert_eq!(group.get_attribute("prefix").map(|a| a.value.as_str()), Some("gmd"));
        assert_eq!(NamespaceRecord::from_group(&group), Some(record));
    }

    #[test]
    fn test_record_enumerates_root_bindings_in_order() {
        let root = SourceNode::new("gmd:MD_Metadata")
            .with_namespace("gmd", ns::GMD)
            .with_namespace("gco", ns::GCO)
            .with_namespace("", "http://example.com/default");
        let records = NamespaceRecorder::record(&root);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], NamespaceRecord::new("gmd", ns::GMD, 0));
        assert_eq!(records[2].prefix, "");
        assert_eq!(records[2].position, 2);
    }

    #[test]
    fn test_collect_searches_whole_tree() {
        let mut nested = GroupNode::new("b");
        nested.push(NamespaceRecord::new("gco", ns::GCO, 1).to_group());
        let mut root = GroupNode::new("a");
        root.push(nested);
        root.push(NamespaceRecord::new("gmd", ns::GMD, 0).to_group());

        let map = NamespaceRecorder::collect(&root);
        let bindings: Vec<_> = map.iter().collect();
        assert_eq!(bindings, vec![("gmd", ns::GMD), ("gco", ns::GCO)]);
    }

    #[test]
    fn test_collect_skips_incomplete_records() {
        let mut broken = GroupNode::new("namespace_0");
        broken.push(AttributeEntry::new("prefix", "gmd"));
        let mut root = GroupNode::new("a");
        root.push(broken);
        root.push(NamespaceRecord::new("gco", ns::GCO, 1).to_group());

        let map = NamespaceRecorder::collect(&root);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get_uri("gco"), Some(ns::GCO));
        assert!(!map.has_prefix("gmd"));
    }

    #[test]
    fn test_namespace_map_conflicting_prefix() {
        let mut map = NamespaceMap::new();
        assert!(map.register("ex", "http://example.com/ns1").is_ok());
        assert!(map.register("ex", "http://example.com/ns1").is_ok());
        assert!(map.register("ex", "http://example.com/ns2").is_err());
        assert_eq!(map.len(), 1);
        assert_eq!(map.get_prefix("http://example.com/ns1"), Some("ex"));
    }
}
