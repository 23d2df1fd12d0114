//! XML parser that builds `XmlDocument` trees.

use crate::{Error, Result, Span, XmlAttribute, XmlChild, XmlChildren, XmlDocument, XmlElement};
use quick_xml::Reader;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};

/// Parse XML from a string, producing an `XmlDocument` tree.
///
/// Only the five predefined entities and numeric character references are
/// decoded. Entities declared in a DOCTYPE are never expanded and external
/// resources are never fetched.
///
/// # Example
///
/// ```rust
/// use csl_xml::parse;
///
/// let xml = parse("<root><child/></root>").unwrap();
/// assert_eq!(xml.root.name, "root");
/// ```
///
/// # Errors
///
/// Returns an error if the XML is malformed.
pub fn parse(content: &str) -> Result<XmlDocument> {
    XmlParser::new(content).parse()
}

/// Internal parser state.
struct XmlParser<'a> {
    /// The source content being parsed.
    source: &'a str,

    reader: Reader<&'a [u8]>,

    /// Stack of elements being built.
    stack: Vec<BuildNode>,
}

/// A node being constructed during parsing.
struct BuildNode {
    name: String,
    prefix: Option<String>,
    attributes: Vec<XmlAttribute>,

    /// Byte offset where this element started (the `<` character).
    start_offset: usize,

    /// Span of the element name, for error reporting.
    name_span: Span,

    /// Child elements and text accumulated so far.
    children: Vec<XmlChild>,
}

impl<'a> XmlParser<'a> {
    fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        Self {
            source,
            reader,
            stack: Vec::new(),
        }
    }

    fn parse(&mut self) -> Result<XmlDocument> {
        let mut root: Option<XmlElement> = None;

        loop {
            // Capture position before reading the event
            let event_start = self.reader.buffer_position() as usize;

            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    self.handle_start(&e, event_start)?;
                }
                Ok(Event::End(e)) => {
                    let element = self.handle_end(&e)?;
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Empty(e)) => {
                    let element = self.handle_empty(&e, event_start)?;
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Text(e)) => {
                    self.handle_text(&e, event_start)?;
                }
                Ok(Event::CData(e)) => {
                    self.handle_cdata(&e, event_start)?;
                }
                Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlSyntax {
                        message: e.to_string(),
                        position: Some(self.reader.error_position()),
                    });
                }
            }
        }

        if let Some(node) = self.stack.last() {
            return Err(Error::UnexpectedEof {
                expected: format!("closing tag </{}>", node.name),
                span: Some(node.name_span),
            });
        }

        let root = root.ok_or(Error::EmptyDocument)?;
        Ok(XmlDocument::new(root, Span::new(0, self.source.len())))
    }

    /// Push a finished element onto its parent, or make it the root.
    fn attach(&mut self, element: XmlElement, root: &mut Option<XmlElement>) -> Result<()> {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(XmlChild::Element(element)),
            None if root.is_some() => {
                return Err(Error::MultipleRoots {
                    span: Some(element.span),
                });
            }
            None => *root = Some(element),
        }
        Ok(())
    }

    fn handle_start(&mut self, e: &BytesStart<'_>, event_start: usize) -> Result<()> {
        let (name, prefix) = split_name(e.name().as_ref());
        let name_start = event_start + 1; // Skip '<'
        let name_span = Span::new(name_start, name_start + e.name().as_ref().len());
        let attributes = self.parse_attributes(e, event_start)?;

        self.stack.push(BuildNode {
            name,
            prefix,
            attributes,
            start_offset: event_start,
            name_span,
            children: Vec::new(),
        });

        Ok(())
    }

    fn handle_end(&mut self, e: &BytesEnd<'_>) -> Result<XmlElement> {
        let (end_name, _) = split_name(e.name().as_ref());

        let node = self.stack.pop().ok_or_else(|| Error::InvalidStructure {
            message: format!("Unexpected closing tag </{}>", end_name),
            span: None,
        })?;

        if node.name != end_name {
            return Err(Error::MismatchedEndTag {
                expected: node.name,
                found: end_name,
                span: Some(node.name_span),
            });
        }

        let end_offset = self.reader.buffer_position() as usize;

        Ok(XmlElement {
            name: node.name,
            prefix: node.prefix,
            attributes: node.attributes,
            children: finalize_children(node.children),
            span: Span::new(node.start_offset, end_offset),
        })
    }

    fn handle_empty(&mut self, e: &BytesStart<'_>, event_start: usize) -> Result<XmlElement> {
        let (name, prefix) = split_name(e.name().as_ref());
        let attributes = self.parse_attributes(e, event_start)?;
        let end_offset = self.reader.buffer_position() as usize;

        Ok(XmlElement {
            name,
            prefix,
            attributes,
            children: XmlChildren::Empty,
            span: Span::new(event_start, end_offset),
        })
    }

    fn handle_text(&mut self, e: &BytesText<'_>, event_start: usize) -> Result<()> {
        let text = e.unescape().map_err(|err| Error::XmlSyntax {
            message: format!("Invalid text content: {}", err),
            position: Some(event_start as u64),
        })?;

        let span = Span::new(event_start, self.reader.buffer_position() as usize);

        let Some(node) = self.stack.last_mut() else {
            // Only whitespace may appear outside the root element
            if text.trim_start_matches('\u{feff}').trim().is_empty() {
                return Ok(());
            }
            return Err(Error::InvalidStructure {
                message: "Text is not allowed outside the root element".to_string(),
                span: Some(span),
            });
        };

        // Skip whitespace-only text between elements
        if text.trim().is_empty() && !node.children.is_empty() {
            return Ok(());
        }

        node.children.push(XmlChild::Text {
            content: text.into_owned(),
            span,
        });
        Ok(())
    }

    fn handle_cdata(&mut self, e: &BytesCData<'_>, event_start: usize) -> Result<()> {
        let content = String::from_utf8_lossy(e).into_owned();
        let span = Span::new(event_start, self.reader.buffer_position() as usize);

        match self.stack.last_mut() {
            Some(node) => {
                node.children.push(XmlChild::Text { content, span });
                Ok(())
            }
            None => Err(Error::InvalidStructure {
                message: "CDATA is not allowed outside the root element".to_string(),
                span: Some(span),
            }),
        }
    }

    fn parse_attributes(&self, e: &BytesStart<'_>, tag_start: usize) -> Result<Vec<XmlAttribute>> {
        let mut attributes = Vec::new();

        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|err| Error::XmlSyntax {
                message: format!("Attribute error: {}", err),
                position: Some(tag_start as u64),
            })?;
            let (name, prefix) = split_name(attr.key.as_ref());

            let value = attr.unescape_value().map_err(|err| Error::XmlSyntax {
                message: format!("Invalid attribute value: {}", err),
                position: Some(tag_start as u64),
            })?;

            attributes.push(XmlAttribute {
                name,
                prefix,
                value: value.into_owned(),
            });
        }

        Ok(attributes)
    }
}

/// Split a qualified name into its local name and optional prefix.
fn split_name(raw: &[u8]) -> (String, Option<String>) {
    let full_name = String::from_utf8_lossy(raw);

    match full_name.split_once(':') {
        Some((prefix, local)) => (local.to_string(), Some(prefix.to_string())),
        None => (full_name.into_owned(), None),
    }
}

fn finalize_children(mut children: Vec<XmlChild>) -> XmlChildren {
    if children.is_empty() {
        return XmlChildren::Empty;
    }

    if children.len() == 1 && matches!(children[0], XmlChild::Text { .. }) {
        if let Some(XmlChild::Text { content, span }) = children.pop() {
            return XmlChildren::Text { content, span };
        }
    }

    if children.iter().all(|c| matches!(c, XmlChild::Element(_))) {
        let elements = children
            .into_iter()
            .filter_map(|c| match c {
                XmlChild::Element(e) => Some(e),
                XmlChild::Text { .. } => None,
            })
            .collect();
        XmlChildren::Elements(elements)
    } else {
        XmlChildren::Mixed(children)
    }
}
