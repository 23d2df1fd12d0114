//! Core types for span-tracked XML parsing.

/// A half-open byte range into the parsed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A parsed XML document.
///
/// The XML declaration, comments, processing instructions and any DOCTYPE
/// are not retained; only the root element tree is.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    /// The root element of the document.
    pub root: XmlElement,

    /// Span of the entire document.
    pub span: Span,
}

/// An XML element with its attributes and children.
#[derive(Debug, Clone)]
pub struct XmlElement {
    /// The local name of the element (without namespace prefix).
    pub name: String,

    /// Namespace prefix, if any (e.g., "cs" in `<cs:style>`).
    pub prefix: Option<String>,

    /// Attributes of this element.
    pub attributes: Vec<XmlAttribute>,

    /// Child content of this element.
    pub children: XmlChildren,

    /// Span of the entire element, from the start tag to the end tag.
    pub span: Span,
}

/// An XML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// The local name of the attribute (without namespace prefix).
    pub name: String,

    /// Namespace prefix, if any.
    pub prefix: Option<String>,

    /// The attribute value (after unescaping XML entities).
    pub value: String,
}

/// Children of an XML element.
///
/// XML elements can contain:
/// - Only child elements
/// - Only text content
/// - Mixed content (text and elements interleaved)
/// - Nothing (empty element)
#[derive(Debug, Clone)]
pub enum XmlChildren {
    /// Element contains only child elements.
    Elements(Vec<XmlElement>),

    /// Element contains only text content.
    Text {
        /// The text content (after unescaping XML entities).
        content: String,
        span: Span,
    },

    /// Element contains mixed content (text and elements).
    Mixed(Vec<XmlChild>),

    /// Element is empty (no content).
    Empty,
}

/// A single child in mixed content.
#[derive(Debug, Clone)]
pub enum XmlChild {
    /// A child element.
    Element(XmlElement),

    /// Character data, either plain text or a CDATA section.
    Text { content: String, span: Span },
}

impl XmlDocument {
    pub fn new(root: XmlElement, span: Span) -> Self {
        Self { root, span }
    }

    /// All elements with the given local name, in document order.
    ///
    /// The root element itself is included when it matches.
    pub fn elements_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements().filter(move |e| e.name == name)
    }

    /// The first element with the given local name, in document order.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.name == name)
    }

    /// Every element, root first, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        std::iter::once(&self.root).chain(self.root.descendants())
    }
}

impl XmlElement {
    /// Create a new empty element.
    pub fn new(name: impl Into<String>, attributes: Vec<XmlAttribute>, span: Span) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            attributes,
            children: XmlChildren::Empty,
            span,
        }
    }

    /// Create an element with child elements.
    pub fn with_elements(name: impl Into<String>, children: Vec<XmlElement>, span: Span) -> Self {
        Self {
            children: XmlChildren::Elements(children),
            ..Self::new(name, Vec::new(), span)
        }
    }

    /// Create an element with text content.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>, span: Span) -> Self {
        Self {
            children: XmlChildren::Text {
                content: text.into(),
                span,
            },
            ..Self::new(name, Vec::new(), span)
        }
    }

    /// Get an attribute value by name.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Check if this element has child elements.
    pub fn has_elements(&self) -> bool {
        matches!(
            &self.children,
            XmlChildren::Elements(e) if !e.is_empty()
        )
    }

    /// Check if this element has text content.
    pub fn has_text(&self) -> bool {
        matches!(&self.children, XmlChildren::Text { .. })
    }

    /// Check if this element is empty.
    pub fn is_empty(&self) -> bool {
        matches!(&self.children, XmlChildren::Empty)
    }

    /// Get text content, if this element contains only text.
    pub fn text(&self) -> Option<&str> {
        match &self.children {
            XmlChildren::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Character data of the first child node.
    ///
    /// Returns `None` when the element is empty or its first child is an
    /// element rather than text.
    pub fn first_child_text(&self) -> Option<&str> {
        match &self.children {
            XmlChildren::Text { content, .. } => Some(content),
            XmlChildren::Mixed(children) => match children.first() {
                Some(XmlChild::Text { content, .. }) => Some(content),
                _ => None,
            },
            XmlChildren::Elements(_) | XmlChildren::Empty => None,
        }
    }

    /// Get child elements by name.
    pub fn get_children(&self, name: &str) -> Vec<&XmlElement> {
        self.all_children()
            .into_iter()
            .filter(|e| e.name == name)
            .collect()
    }

    /// Get all child elements (ignoring text in mixed content).
    pub fn all_children(&self) -> Vec<&XmlElement> {
        match &self.children {
            XmlChildren::Elements(elements) => elements.iter().collect(),
            XmlChildren::Mixed(children) => children
                .iter()
                .filter_map(|c| match c {
                    XmlChild::Element(e) => Some(e),
                    _ => None,
                })
                .collect(),
            _ => vec![],
        }
    }

    /// All elements below this one in document order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.all_children().into_iter().rev().collect(),
        }
    }

    /// The first descendant with the given local name.
    pub fn find_descendant(&self, name: &str) -> Option<&XmlElement> {
        self.descendants().find(|e| e.name == name)
    }
}

/// Pre-order iterator over the descendants of an element.
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.all_children().into_iter().rev());
        Some(next)
    }
}

impl XmlAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prefix: None,
            value: value.into(),
        }
    }
}
