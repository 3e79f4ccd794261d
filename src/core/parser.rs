//! XML parsers for both sides of the transform
//!
//! `SourceParser` reads an arbitrary namespace-qualified XML document into a
//! `SourceNode` tree. `GroupParser` reads a document written in the generic
//! group/attribute vocabulary into a `GroupNode` tree and rejects anything
//! that does not conform to it.

use crate::core::error::{XmlGroupError, XmlGroupResult};
use crate::core::namespace::declared_prefix;
use crate::core::node::{vocab, AttributeEntry, Entry, GroupNode, GroupRole, SourceNode};
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::Reader;

/// Parser for source XML documents
#[derive(Debug, Default)]
pub struct SourceParser;

impl SourceParser {
    /// Create a new source parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a document into its root element
    ///
    /// Comments, processing instructions, the XML declaration and DOCTYPE
    /// are skipped. CDATA sections count as text. Text is trimmed.
    pub fn parse(&self, xml: &str) -> XmlGroupResult<SourceNode> {
        let mut reader = Reader::from_str(xml);
        // Text is trimmed per element once complete; entity references split
        // text events, so trimming each event would eat inner whitespace.
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut stack: Vec<(SourceNode, String)> = Vec::new();
        let mut root: Option<SourceNode> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let node = Self::element(&reader, &e)?;
                    stack.push((node, String::new()));
                }
                Ok(Event::Empty(e)) => {
                    let node = Self::element(&reader, &e)?;
                    Self::attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::End(_)) => {
                    let Some((mut node, text)) = stack.pop() else {
                        return Err(XmlGroupError::Parse("Unexpected closing tag".to_string()));
                    };
                    node.set_text(text);
                    Self::attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::Text(e)) => {
                    let text = reader.decoder().decode(e.as_ref())?;
                    Self::push_text(&mut stack, &text)?;
                }
                Ok(Event::CData(e)) => {
                    let text = reader.decoder().decode(e.as_ref())?;
                    Self::push_text(&mut stack, &text)?;
                }
                Ok(Event::GeneralRef(e)) => {
                    let text = resolve_reference(&e)?;
                    Self::push_text(&mut stack, &text)?;
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(XmlGroupError::Parse(format!(
                        "XML parsing error at position {}: {}",
                        reader.error_position(),
                        e
                    )));
                }
            }
            buf.clear();
        }

        if let Some((node, _)) = stack.last() {
            return Err(XmlGroupError::Parse(format!(
                "Unclosed element <{}>",
                node.name
            )));
        }
        root.ok_or_else(|| XmlGroupError::Parse("Document has no root element".to_string()))
    }

    fn element<R>(reader: &Reader<R>, e: &BytesStart) -> XmlGroupResult<SourceNode> {
        let name = reader.decoder().decode(e.name().as_ref())?.to_string();
        let mut node = SourceNode::new(name);
        for (key, value) in collect_attributes(reader, e)? {
            match declared_prefix(&key) {
                Some(prefix) => node.namespaces.push((prefix.to_string(), value)),
                None => {
                    node.attributes.insert(key, value);
                }
            }
        }
        Ok(node)
    }

    fn attach(
        stack: &mut [(SourceNode, String)],
        root: &mut Option<SourceNode>,
        node: SourceNode,
    ) -> XmlGroupResult<()> {
        if let Some((parent, _)) = stack.last_mut() {
            parent.children.push(node);
            return Ok(());
        }
        if root.is_some() {
            return Err(XmlGroupError::Parse(format!(
                "Multiple root elements: <{}>",
                node.name
            )));
        }
        *root = Some(node);
        Ok(())
    }

    fn push_text(stack: &mut [(SourceNode, String)], text: &str) -> XmlGroupResult<()> {
        match stack.last_mut() {
            Some((_, buffer)) => {
                buffer.push_str(text);
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(XmlGroupError::Parse(
                "Text content outside the root element".to_string(),
            )),
        }
    }
}

/// Parser for documents in the generic group/attribute vocabulary
#[derive(Debug, Default)]
pub struct GroupParser;

/// Open element while reading a generic document
enum Frame {
    Group(GroupNode),
    Attribute(AttributeEntry),
}

impl GroupParser {
    /// Create a new generic-vocabulary parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a generic document into its root group
    pub fn parse(&self, xml: &str) -> XmlGroupResult<GroupNode> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();
        let mut root: Option<GroupNode> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    if matches!(stack.last(), Some(Frame::Attribute(_))) {
                        return Err(invalid("<attribute> elements must be empty"));
                    }
                    stack.push(Self::frame(&reader, &e)?);
                }
                Ok(Event::Empty(e)) => {
                    if matches!(stack.last(), Some(Frame::Attribute(_))) {
                        return Err(invalid("<attribute> elements must be empty"));
                    }
                    let frame = Self::frame(&reader, &e)?;
                    Self::attach(&mut stack, &mut root, frame)?;
                }
                Ok(Event::End(_)) => {
                    let Some(frame) = stack.pop() else {
                        return Err(invalid("Unexpected closing tag"));
                    };
                    Self::attach(&mut stack, &mut root, frame)?;
                }
                Ok(Event::Text(_)) | Ok(Event::CData(_)) | Ok(Event::GeneralRef(_)) => {
                    return Err(invalid("Text content is not part of the vocabulary"));
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(XmlGroupError::Parse(format!(
                        "XML parsing error at position {}: {}",
                        reader.error_position(),
                        e
                    )));
                }
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(XmlGroupError::Parse("Unclosed element".to_string()));
        }
        root.ok_or_else(|| invalid("Document has no root group"))
    }

    fn frame<R>(reader: &Reader<R>, e: &BytesStart) -> XmlGroupResult<Frame> {
        let tag = reader.decoder().decode(e.name().as_ref())?.to_string();
        let mut name = None;
        let mut value = None;
        let mut type_tag = None;
        let mut role = None;
        for (key, val) in collect_attributes(reader, e)? {
            match key.as_str() {
                vocab::NAME => name = Some(val),
                vocab::VALUE => value = Some(val),
                vocab::TYPE => type_tag = Some(val),
                vocab::ROLE => role = Some(val),
                other => {
                    return Err(invalid(&format!(
                        "Unexpected attribute '{}' on <{}>",
                        other, tag
                    )))
                }
            }
        }
        let name = name.ok_or_else(|| invalid(&format!("<{}> without a name", tag)))?;

        match tag.as_str() {
            vocab::GROUP => {
                if value.is_some() {
                    return Err(invalid(&format!("Group '{}' carries a value", name)));
                }
                let role = match (role.as_deref(), type_tag) {
                    (None, None) => None,
                    (None, Some(object)) => Some(GroupRole::Object(object)),
                    (Some(vocab::ROLE_NIL), None) => Some(GroupRole::Nil),
                    (Some(vocab::ROLE_RECORD), None) => Some(GroupRole::Record),
                    (Some(other), _) => {
                        return Err(invalid(&format!(
                            "Group '{}' has unsupported role '{}'",
                            name, other
                        )))
                    }
                };
                Ok(Frame::Group(GroupNode {
                    name,
                    role,
                    entries: Vec::new(),
                }))
            }
            vocab::ATTRIBUTE => {
                if role.is_some() {
                    return Err(invalid(&format!("Attribute '{}' carries a role", name)));
                }
                let value =
                    value.ok_or_else(|| invalid(&format!("Attribute '{}' without a value", name)))?;
                Ok(Frame::Attribute(AttributeEntry {
                    name,
                    value,
                    type_tag,
                }))
            }
            other => Err(invalid(&format!("Unknown element <{}>", other))),
        }
    }

    fn attach(
        stack: &mut [Frame],
        root: &mut Option<GroupNode>,
        frame: Frame,
    ) -> XmlGroupResult<()> {
        let entry = match frame {
            Frame::Group(group) => Entry::Group(group),
            Frame::Attribute(attr) => Entry::Attribute(attr),
        };
        match stack.last_mut() {
            Some(Frame::Group(parent)) => {
                parent.entries.push(entry);
                Ok(())
            }
            Some(Frame::Attribute(_)) => Err(invalid("<attribute> elements must be empty")),
            None => match (entry, root.is_some()) {
                (Entry::Group(group), false) => {
                    *root = Some(group);
                    Ok(())
                }
                (Entry::Group(_), true) => Err(invalid("Multiple root groups")),
                (Entry::Attribute(_), _) => Err(invalid("Root element must be a <group>")),
            },
        }
    }
}

fn invalid(message: &str) -> XmlGroupError {
    XmlGroupError::InvalidGeneric(message.to_string())
}

/// Collect (name, unescaped value) pairs of an element's attributes
fn collect_attributes<R>(
    reader: &Reader<R>,
    e: &BytesStart,
) -> XmlGroupResult<Vec<(String, String)>> {
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| XmlGroupError::Parse(format!("Bad value for '{}': {}", key, e)))?
            .to_string();
        attrs.push((key, value));
    }
    Ok(attrs)
}

/// Resolve a character or predefined entity reference
fn resolve_reference(e: &BytesRef) -> XmlGroupResult<String> {
    if let Some(ch) = e.resolve_char_ref()? {
        return Ok(ch.to_string());
    }
    let name = e.decode()?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| XmlGroupError::Parse(format!("Unknown entity reference &{};", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_document() {
        let xml = r#"<?xml version="1.0"?>
<!-- header -->
<gmd:MD_Metadata xmlns:gmd="http://www.isotc211.org/2005/gmd" xmlns:gco="http://www.isotc211.org/2005/gco">
  <gmd:fileIdentifier>
    <gco:CharacterString>abc</gco:CharacterString>
  </gmd:fileIdentifier>
  <gmd:language codeList="x" codeListValue="eng"/>
</gmd:MD_Metadata>"#;
        let root = SourceParser::new().parse(xml).unwrap();
        assert_eq!(root.name, "gmd:MD_Metadata");
        assert_eq!(root.namespaces.len(), 2);
        assert_eq!(root.namespaces[0].0, "gmd");
        assert!(root.attributes.is_empty());
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].children[0].text.as_deref(), Some("abc"));
        assert_eq!(
            root.children[1].attributes.get("codeListValue").map(String::as_str),
            Some("eng")
        );
        assert_eq!(root.text, None);
    }

    #[test]
    fn test_parse_entities_and_cdata() {
        let xml = "<a>fish &amp; chips &#65;<![CDATA[ <raw> ]]></a>";
        let root = SourceParser::new().parse(xml).unwrap();
        assert_eq!(root.text.as_deref(), Some("fish & chips A <raw>"));
    }

    #[test]
    fn test_parse_default_namespace() {
        let root = SourceParser::new()
            .parse(r#"<a xmlns="urn:x" b="1"/>"#)
            .unwrap();
        assert_eq!(root.namespaces, vec![(String::new(), "urn:x".to_string())]);
        assert_eq!(root.attributes.len(), 1);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let parser = SourceParser::new();
        assert!(parser.parse("").is_err());
        assert!(parser.parse("not xml").is_err());
        assert!(parser.parse("<a><b></a>").is_err());
        assert!(parser.parse("<a/><b/>").is_err());
        assert!(parser.parse("<a>").is_err());
    }

    #[test]
    fn test_parse_generic_document() {
        let xml = r#"<group name="a">
  <attribute name="@x" value="1"/>
  <group name="gmd:contact" type="gmd:CI_ResponsibleParty">
    <attribute name="gmd:individualName" value="Ann" type="gco:CharacterString"/>
  </group>
  <group name="b" role="nil">
    <attribute name="nilReason" value="unknown"/>
  </group>
  <group name="record_1" role="record"/>
</group>"#;
        let root = GroupParser::new().parse(xml).unwrap();
        assert_eq!(root.name, "a");
        assert_eq!(root.len(), 4);
        let contact = root.get_group("gmd:contact").unwrap();
        assert_eq!(contact.object_type(), Some("gmd:CI_ResponsibleParty"));
        assert_eq!(
            contact.get_attribute("gmd:individualName").and_then(|a| a.type_tag.as_deref()),
            Some("gco:CharacterString")
        );
        assert!(root.get_group("b").unwrap().is_nil());
        assert!(root.get_group("record_1").unwrap().is_record());
    }

    #[test]
    fn test_parse_generic_rejects_nonconforming() {
        let parser = GroupParser::new();
        let cases = [
            r#"<attribute name="a" value="1"/>"#,
            r#"<group/>"#,
            r#"<group name="a"><attribute name="b"/></group>"#,
            r#"<group name="a"><item name="b"/></group>"#,
            r#"<group name="a">text</group>"#,
            r#"<group name="a" role="weird"/>"#,
            r#"<group name="a"><attribute name="b" value="1"><group name="c"/></attribute></group>"#,
        ];
        for case in cases {
            assert!(
                matches!(parser.parse(case), Err(XmlGroupError::InvalidGeneric(_))),
                "accepted: {}",
                case
            );
        }
    }
}
