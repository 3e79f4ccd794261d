//! XML serializers for both sides of the transform
//!
//! `SourceSerializer` writes a `SourceNode` tree back out as an ordinary XML
//! document. `GroupSerializer` writes a `GroupNode` tree in the generic
//! group/attribute vocabulary.

use crate::core::error::{XmlGroupError, XmlGroupResult};
use crate::core::namespace::declaration_name;
use crate::core::node::{vocab, AttributeEntry, Entry, GroupNode, GroupRole, SourceNode};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

type XmlWriter = Writer<Cursor<Vec<u8>>>;

fn new_writer() -> XmlWriter {
    Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2)
}

fn finish(writer: XmlWriter) -> XmlGroupResult<String> {
    let result = writer.into_inner().into_inner();
    String::from_utf8(result)
        .map_err(|e| XmlGroupError::Serialization(format!("UTF-8 encoding error: {}", e)))
}

/// Serializer for source XML documents
#[derive(Debug, Default)]
pub struct SourceSerializer {
    declaration: bool,
}

impl SourceSerializer {
    /// Create a new serializer that writes an XML declaration
    pub fn new() -> Self {
        Self { declaration: true }
    }

    /// Omit the `<?xml ...?>` declaration
    pub fn without_declaration(mut self) -> Self {
        self.declaration = false;
        self
    }

    /// Serialize a document rooted at `root`
    pub fn serialize(&self, root: &SourceNode) -> XmlGroupResult<String> {
        let mut writer = new_writer();
        if self.declaration {
            writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        self.write_element(&mut writer, root)?;
        finish(writer)
    }

    fn write_element(&self, writer: &mut XmlWriter, node: &SourceNode) -> XmlGroupResult<()> {
        let mut start = BytesStart::new(node.name.as_str());
        for (prefix, uri) in &node.namespaces {
            start.push_attribute((declaration_name(prefix).as_str(), uri.as_str()));
        }
        for (name, value) in &node.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }

        if node.children.is_empty() && node.text.is_none() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if let Some(text) = &node.text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in &node.children {
            self.write_element(writer, child)?;
        }
        writer.write_event(Event::End(BytesEnd::new(node.name.as_str())))?;
        Ok(())
    }
}

/// Serializer for generic group/attribute documents
#[derive(Debug, Default)]
pub struct GroupSerializer;

impl GroupSerializer {
    /// Create a new generic-vocabulary serializer
    pub fn new() -> Self {
        Self
    }

    /// Serialize the tree rooted at `root`
    pub fn serialize(&self, root: &GroupNode) -> XmlGroupResult<String> {
        let mut writer = new_writer();
        self.write_group(&mut writer, root)?;
        finish(writer)
    }

    fn write_group(&self, writer: &mut XmlWriter, group: &GroupNode) -> XmlGroupResult<()> {
        let mut start = BytesStart::new(vocab::GROUP);
        start.push_attribute((vocab::NAME, group.name.as_str()));
        match &group.role {
            Some(GroupRole::Object(tag)) => start.push_attribute((vocab::TYPE, tag.as_str())),
            Some(GroupRole::Nil) => start.push_attribute((vocab::ROLE, vocab::ROLE_NIL)),
            Some(GroupRole::Record) => start.push_attribute((vocab::ROLE, vocab::ROLE_RECORD)),
            None => {}
        }

        if group.entries.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for entry in &group.entries {
            match entry {
                Entry::Group(child) => self.write_group(writer, child)?,
                Entry::Attribute(attr) => self.write_attribute(writer, attr)?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new(vocab::GROUP)))?;
        Ok(())
    }

    fn write_attribute(&self, writer: &mut XmlWriter, attr: &AttributeEntry) -> XmlGroupResult<()> {
        let mut start = BytesStart::new(vocab::ATTRIBUTE);
        start.push_attribute((vocab::NAME, attr.name.as_str()));
        start.push_attribute((vocab::VALUE, attr.value.as_str()));
        if let Some(type_tag) = &attr.type_tag {
            start.push_attribute((vocab::TYPE, type_tag.as_str()));
        }
        writer.write_event(Event::Empty(start))?;
        Ok(())
    }
}
