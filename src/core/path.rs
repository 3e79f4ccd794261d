//! Slash-separated paths into the generic tree
//!
//! A hierarchical container addresses groups by path (`/a/b/c`) and hangs
//! attributes off them. This module parses and builds such paths and lets a
//! caller look up entries or flatten a whole tree for embedding.

use crate::core::error::{XmlGroupError, XmlGroupResult};
use crate::core::node::{Entry, GroupNode};

/// Parse a path expression
///
/// Supports formats like:
/// - `gmd:contact` - a direct child
/// - `/gmd:contact/gmd:role` - nested entries, leading slash optional
/// - `identificationInfo/citation_4/title` - disambiguated names
pub fn parse_path(path: &str) -> XmlGroupResult<PathComponents> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        return Err(XmlGroupError::BadPath("Empty path".to_string()));
    }

    let mut components = Vec::new();
    for part in trimmed.split('/') {
        if part.is_empty() {
            return Err(XmlGroupError::BadPath(format!(
                "Empty component in path: {}",
                path
            )));
        }
        components.push(part.to_string());
    }

    Ok(PathComponents { components })
}

/// Build an absolute path from components
pub fn build_path(components: &PathComponents) -> String {
    let mut result = String::new();
    for name in &components.components {
        result.push('/');
        result.push_str(name);
    }
    result
}

/// Parsed path components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathComponents {
    pub components: Vec<String>,
}

impl PathComponents {
    /// Get the first component
    pub fn first(&self) -> Option<&str> {
        self.components.first().map(String::as_str)
    }

    /// Get the last component
    pub fn last(&self) -> Option<&str> {
        self.components.last().map(String::as_str)
    }
}

impl GroupNode {
    /// Look up an entry by path, relative to this group's children
    pub fn lookup(&self, path: &str) -> XmlGroupResult<Option<&Entry>> {
        let parsed = parse_path(path)?;
        let mut current = self;
        let mut found = None;
        for (i, name) in parsed.components.iter().enumerate() {
            let Some(entry) = current.get(name) else {
                return Ok(None);
            };
            if i + 1 == parsed.components.len() {
                found = Some(entry);
            } else {
                match entry.as_group() {
                    Some(group) => current = group,
                    None => return Ok(None),
                }
            }
        }
        Ok(found)
    }

    /// Flatten the tree into (absolute path, entry) pairs
    ///
    /// Paths are relative to this group, which itself is not listed. Entries
    /// appear depth-first in document order, each group before its children.
    pub fn walk(&self) -> Vec<(String, &Entry)> {
        let mut out = Vec::new();
        walk_into(self, "", &mut out);
        out
    }
}

fn walk_into<'a>(group: &'a GroupNode, prefix: &str, out: &mut Vec<(String, &'a Entry)>) {
    for entry in &group.entries {
        let path = format!("{}/{}", prefix, entry.name());
        if let Entry::Group(child) = entry {
            out.push((path.clone(), entry));
            walk_into(child, &path, out);
        } else {
            out.push((path, entry));
        }
    }
}
