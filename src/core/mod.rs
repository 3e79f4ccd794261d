//! Core module
//!
//! This module contains the two tree models, namespace handling, paths into
//! the generic tree, and the XML parsing and serialization boundaries.

pub mod error;
pub mod namespace;
pub mod node;
#[cfg(feature = "core")]
pub mod parser;
pub mod path;
#[cfg(feature = "core")]
pub mod serializer;

pub use error::{XmlGroupError, XmlGroupResult};
pub use namespace::{NamespaceMap, NamespaceRecord, NamespaceRecorder};
pub use node::{local_name, AttributeEntry, Entry, GroupNode, GroupRole, SourceNode};
#[cfg(feature = "core")]
pub use parser::{GroupParser, SourceParser};
pub use path::{build_path, parse_path, PathComponents};
#[cfg(feature = "core")]
pub use serializer::{GroupSerializer, SourceSerializer};
