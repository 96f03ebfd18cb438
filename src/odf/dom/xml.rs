//! Parse serialized parts into the store and serialize subtrees back out.
//!
//! Namespace declarations are kept as ordinary attributes, so a parsed root
//! serializes with the same `xmlns:*` attributes it was read with.

use super::node::{NodeId, NodeKind};
use super::store::NodeStore;
use crate::common::xml::{escape_attribute, escape_text};
use crate::common::{Error, Result};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};

/// Elements whose whitespace-only text is significant.
const TEXT_BEARING: &[&str] = &[
    "text:p",
    "text:h",
    "text:span",
    "text:a",
    "text:sequence",
    "text:index-title-template",
    "dc:title",
    "dc:description",
    "dc:subject",
    "dc:creator",
    "meta:initial-creator",
    "meta:keyword",
];

/// XML declaration written ahead of serialized parts.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Text for a reference between character data.
///
/// Entities other than the predefined five are kept as written.
fn resolve_reference(reference: &BytesRef<'_>) -> Result<String> {
    if let Some(ch) = reference.resolve_char_ref()? {
        return Ok(ch.to_string());
    }
    let name = reference.decode().map_err(quick_xml::Error::from)?;
    Ok(match resolve_predefined_entity(&name) {
        Some(text) => text.to_string(),
        None => {
            log::debug!("keeping unknown entity &{name};");
            format!("&{name};")
        },
    })
}

impl NodeStore {
    /// Parse a serialized part into new, detached nodes and return its root element.
    pub fn parse(&mut self, xml: &str) -> Result<NodeId> {
        let mut reader = Reader::from_reader(xml.as_bytes());
        let mut buf = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    let id = self.parsed_element(e)?;
                    self.attach_parsed(stack.last().copied(), &mut root, id)?;
                    stack.push(id);
                },
                Event::Empty(ref e) => {
                    let id = self.parsed_element(e)?;
                    self.attach_parsed(stack.last().copied(), &mut root, id)?;
                },
                Event::End(_) => {
                    stack.pop();
                },
                Event::Text(ref t) => {
                    if let Some(parent) = stack.last().copied() {
                        let text = t.decode().map_err(quick_xml::Error::from)?;
                        self.push_parsed_text(parent, &text)?;
                    }
                },
                Event::CData(ref t) => {
                    if let Some(parent) = stack.last().copied() {
                        let text = t.decode().map_err(quick_xml::Error::from)?;
                        self.push_parsed_text(parent, &text)?;
                    }
                },
                Event::GeneralRef(ref r) => {
                    if let Some(parent) = stack.last().copied() {
                        let text = resolve_reference(r)?;
                        self.push_parsed_text(parent, &text)?;
                    }
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        root.ok_or_else(|| Error::InvalidFormat("No root element found".to_string()))
    }

    fn parsed_element(&mut self, start: &BytesStart<'_>) -> Result<NodeId> {
        let name = std::str::from_utf8(start.name().as_ref())?.to_string();
        let id = self.create_qualified(&name);
        for attr in start.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?;
            let value = attr.unescape_value()?;
            self.set_attribute(id, key, &value)?;
        }
        Ok(id)
    }

    fn attach_parsed(
        &mut self,
        parent: Option<NodeId>,
        root: &mut Option<NodeId>,
        id: NodeId,
    ) -> Result<()> {
        match parent {
            Some(parent) => self.append_child(parent, id),
            None if root.is_none() => {
                *root = Some(id);
                Ok(())
            },
            None => {
                log::warn!("ignoring additional root element {id}");
                Ok(())
            },
        }
    }

    /// Append text under `parent`, merging with a trailing text child.
    fn push_parsed_text(&mut self, parent: NodeId, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let last = self.children(parent).last().copied();
        if let Some(last) = last
            && let Some(existing) = self.text(last)
        {
            let merged = format!("{existing}{text}");
            return self.set_text(last, &merged);
        }
        let significant = !text.trim().is_empty()
            || TEXT_BEARING.iter().any(|name| self.is_named(parent, name));
        if significant {
            let node = self.create_text(text);
            self.append_child(parent, node)?;
        }
        Ok(())
    }

    /// Serialize the subtree rooted at `id`.
    pub fn to_xml(&self, id: NodeId) -> Result<String> {
        let mut out = String::new();
        self.write_node(id, &mut out)?;
        Ok(out)
    }

    /// Serialize the subtree rooted at `id` as a standalone part.
    pub fn to_xml_document(&self, id: NodeId) -> Result<String> {
        let mut out = String::from(XML_DECLARATION);
        self.write_node(id, &mut out)?;
        Ok(out)
    }

    fn write_node(&self, id: NodeId, out: &mut String) -> Result<()> {
        match self.kind(id).ok_or(Error::UnknownNode(id))? {
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Element(element) => {
                let name = element.name().to_string();
                out.push('<');
                out.push_str(&name);
                for attr in element.attributes() {
                    out.push(' ');
                    out.push_str(&attr.name.to_string());
                    out.push_str("=\"");
                    out.push_str(&escape_attribute(&attr.value));
                    out.push('"');
                }
                let children = self.children(id);
                if children.is_empty() {
                    out.push_str("/>");
                } else {
                    out.push('>');
                    for child in children {
                        self.write_node(*child, out)?;
                    }
                    out.push_str("</");
                    out.push_str(&name);
                    out.push('>');
                }
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builds_tree() {
        let mut store = NodeStore::new();
        let root = store
            .parse(
                r#"<office:text xmlns:text="urn:x">
                    <text:p text:style-name="P1">Hello <text:span>world</text:span></text:p>
                    <text:p/>
                </office:text>"#,
            )
            .unwrap();
        assert!(store.is_named(root, "office:text"));
        assert_eq!(store.attribute(root, "xmlns:text"), Some("urn:x"));
        let paragraphs = store.children(root).to_vec();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(store.attribute(paragraphs[0], "text:style-name"), Some("P1"));
        assert_eq!(store.text_content(paragraphs[0]), "Hello world");
        assert_eq!(store.child_count(paragraphs[1]), 0);
    }

    #[test]
    fn test_entities_are_resolved() {
        let mut store = NodeStore::new();
        let root = store
            .parse(r#"<text:p a="x &amp; &#65;">1 &lt; 2 &amp; 3</text:p>"#)
            .unwrap();
        assert_eq!(store.attribute(root, "a"), Some("x & A"));
        assert_eq!(store.text_content(root), "1 < 2 & 3");
        assert_eq!(store.child_count(root), 1);
    }

    #[test]
    fn test_character_references_in_text() {
        let mut store = NodeStore::new();
        let root = store
            .parse(r#"<text:p a="&#x263A;&quot;">&#65;&#x263A; &apos;x&apos; &nbsp;</text:p>"#)
            .unwrap();
        assert_eq!(store.attribute(root, "a"), Some("\u{263A}\""));
        assert_eq!(store.text_content(root), "A\u{263A} 'x' &nbsp;");
        assert_eq!(store.child_count(root), 1);
        assert!(store.parse("<text:p>&#xZZ;</text:p>").is_err());
    }

    #[test]
    fn test_serialize_escapes_and_self_closes() {
        let mut store = NodeStore::new();
        let p = store.create_element("text", "p");
        store.set_attribute(p, "text:style-name", "a\"b").unwrap();
        let run = store.create_text("x < y");
        store.append_child(p, run).unwrap();
        let empty = store.create_element("text", "s");
        store.append_child(p, empty).unwrap();
        assert_eq!(
            store.to_xml(p).unwrap(),
            r#"<text:p text:style-name="a&quot;b">x &lt; y<text:s/></text:p>"#
        );
    }

    #[test]
    fn test_round_trip_is_stable() {
        let xml = r#"<office:document-content office:version="1.2"><office:body><office:text><text:p>a&amp;b</text:p></office:text></office:body></office:document-content>"#;
        let mut store = NodeStore::new();
        let root = store.parse(xml).unwrap();
        assert_eq!(store.to_xml(root).unwrap(), xml);
    }

    #[test]
    fn test_no_root_is_an_error() {
        let mut store = NodeStore::new();
        assert!(store.parse("   ").is_err());
    }
}
