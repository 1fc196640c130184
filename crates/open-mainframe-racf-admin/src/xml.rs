//! Minimal XML support for the IRRSMO00 wire format.
//!
//! [`XmlWriter`] emits the compact request documents; [`XmlParser`] is an
//! event reader for result documents, and [`XmlElement::parse`] folds its
//! events into a tree. Report lines carried in `<message>` elements are
//! column-aligned, so text content keeps its leading whitespace.

use crate::error::RacfAdminError;

type XmlResult<T> = Result<T, RacfAdminError>;

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Unescape predefined entities and character references.
pub fn unescape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let Some(semi) = tail.find(';') else {
            out.push_str(tail);
            return out;
        };
        match decode_entity(&tail[1..semi]) {
            Some(ch) => {
                out.push(ch);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = entity.strip_prefix("#x") {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

/// Compact XML writer.
#[derive(Debug, Default)]
pub struct XmlWriter {
    output: String,
    stack: Vec<String>,
}

impl XmlWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an element.
    pub fn start(&mut self, name: &str, attributes: &[(&str, &str)]) {
        self.open_tag(name, attributes);
        self.output.push('>');
        self.stack.push(name.to_string());
    }

    /// Write a childless element, `<name ... />` when `text` is empty.
    pub fn leaf(&mut self, name: &str, attributes: &[(&str, &str)], text: &str) {
        self.open_tag(name, attributes);
        if text.is_empty() {
            self.output.push_str(" />");
            return;
        }
        self.output.push('>');
        self.output.push_str(&escape_xml(text));
        self.output.push_str(&format!("</{}>", name));
    }

    /// Close the innermost open element.
    pub fn end(&mut self) {
        if let Some(name) = self.stack.pop() {
            self.output.push_str(&format!("</{}>", name));
        }
    }

    /// Close everything still open and return the document.
    pub fn finish(mut self) -> String {
        while !self.stack.is_empty() {
            self.end();
        }
        self.output
    }

    fn open_tag(&mut self, name: &str, attributes: &[(&str, &str)]) {
        self.output.push('<');
        self.output.push_str(name);
        for (key, value) in attributes {
            self.output
                .push_str(&format!(" {}=\"{}\"", key, escape_xml(value)));
        }
    }
}

/// XML parse events.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlEvent {
    /// Start of an element.
    StartElement {
        /// Qualified element name.
        name: String,
        /// Attributes in document order.
        attributes: Vec<(String, String)>,
    },
    /// End of an element.
    EndElement {
        /// Qualified element name.
        name: String,
    },
    /// Character content, whitespace preserved.
    Content {
        /// Unescaped text.
        text: String,
    },
}

/// Pull parser over a decoded document.
#[derive(Debug)]
pub struct XmlParser {
    input: Vec<char>,
    pos: usize,
    stack: Vec<String>,
    pending_end: Option<String>,
}

impl XmlParser {
    /// Create a new parser.
    pub fn new(xml: &str) -> Self {
        Self {
            input: xml.chars().collect(),
            pos: 0,
            stack: Vec::new(),
            pending_end: None,
        }
    }

    /// Get the next event, or `None` at end of input.
    pub fn next_event(&mut self) -> XmlResult<Option<XmlEvent>> {
        if let Some(name) = self.pending_end.take() {
            return Ok(Some(XmlEvent::EndElement { name }));
        }
        loop {
            if self.pos >= self.input.len() {
                if !self.stack.is_empty() {
                    return Err(self.error("unexpected end of document"));
                }
                return Ok(None);
            }
            if self.current() != '<' {
                return self.parse_content().map(Some);
            }
            if self.starts_with("<?") {
                self.skip_past("?>");
            } else if self.starts_with("<!--") {
                self.skip_past("-->");
            } else if self.starts_with("<![CDATA[") {
                self.pos += 9;
                let text = self.take_until("]]>");
                self.pos += 3;
                return Ok(Some(XmlEvent::Content { text }));
            } else if self.starts_with("<!") {
                self.skip_past(">");
            } else if self.starts_with("</") {
                self.pos += 2;
                return self.parse_end_element().map(Some);
            } else {
                self.advance();
                return self.parse_start_element().map(Some);
            }
        }
    }

    /// Parse all events.
    pub fn parse_all(&mut self) -> XmlResult<Vec<XmlEvent>> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event()? {
            events.push(event);
        }
        Ok(events)
    }

    fn current(&self) -> char {
        self.input.get(self.pos).copied().unwrap_or('\0')
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn error(&self, message: &str) -> RacfAdminError {
        RacfAdminError::Xml {
            position: self.pos,
            message: message.to_string(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() && self.current().is_whitespace() {
            self.advance();
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        let mut i = self.pos;
        for ch in s.chars() {
            if self.input.get(i) != Some(&ch) {
                return false;
            }
            i += 1;
        }
        true
    }

    fn take_until(&mut self, terminator: &str) -> String {
        let mut text = String::new();
        while self.pos < self.input.len() && !self.starts_with(terminator) {
            text.push(self.current());
            self.advance();
        }
        text
    }

    fn skip_past(&mut self, terminator: &str) {
        self.take_until(terminator);
        self.pos += terminator.chars().count();
    }

    fn parse_name(&mut self) -> String {
        let start = self.pos;
        while self.pos < self.input.len() {
            let c = self.current();
            if c.is_alphanumeric() || c == '_' || c == '-' || c == ':' || c == '.' {
                self.advance();
            } else {
                break;
            }
        }
        self.input[start..self.pos].iter().collect()
    }

    fn parse_start_element(&mut self) -> XmlResult<XmlEvent> {
        let name = self.parse_name();
        if name.is_empty() {
            return Err(self.error("expected element name"));
        }
        let mut attributes = Vec::new();

        loop {
            self.skip_whitespace();
            match self.current() {
                '/' => {
                    self.advance();
                    if self.current() != '>' {
                        return Err(self.error("expected '>' after '/'"));
                    }
                    self.advance();
                    self.pending_end = Some(name.clone());
                    return Ok(XmlEvent::StartElement { name, attributes });
                }
                '>' => {
                    self.advance();
                    self.stack.push(name.clone());
                    return Ok(XmlEvent::StartElement { name, attributes });
                }
                '\0' => return Err(self.error("unterminated start tag")),
                _ => {
                    let attr_name = self.parse_name();
                    if attr_name.is_empty() {
                        return Err(self.error("expected attribute name"));
                    }
                    self.skip_whitespace();
                    if self.current() != '=' {
                        return Err(self.error("expected '=' in attribute"));
                    }
                    self.advance();
                    self.skip_whitespace();

                    let quote = self.current();
                    if quote != '"' && quote != '\'' {
                        return Err(self.error("expected quote in attribute value"));
                    }
                    self.advance();
                    let value = self.take_until(&quote.to_string());
                    self.advance();
                    attributes.push((attr_name, unescape_xml(&value)));
                }
            }
        }
    }

    fn parse_end_element(&mut self) -> XmlResult<XmlEvent> {
        let name = self.parse_name();
        self.skip_whitespace();
        if self.current() != '>' {
            return Err(self.error("expected '>' in end element"));
        }
        self.advance();

        if self.stack.last().map(String::as_str) != Some(name.as_str()) {
            return Err(self.error(&format!("mismatched end element: {}", name)));
        }
        self.stack.pop();
        Ok(XmlEvent::EndElement { name })
    }

    fn parse_content(&mut self) -> XmlResult<XmlEvent> {
        let text = self.take_until("<");
        Ok(XmlEvent::Content {
            text: unescape_xml(&text),
        })
    }
}

/// An element tree built from parser events.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    /// Qualified name as written.
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Child elements.
    pub children: Vec<XmlElement>,
    /// Text content. Whitespace-only text between child elements is dropped.
    pub text: String,
}

impl XmlElement {
    /// Parse a complete document into its root element.
    pub fn parse(xml: &str) -> XmlResult<XmlElement> {
        let mut parser = XmlParser::new(xml);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root = None;

        while let Some(event) = parser.next_event()? {
            match event {
                XmlEvent::StartElement { name, attributes } => stack.push(XmlElement {
                    name,
                    attributes,
                    ..XmlElement::default()
                }),
                XmlEvent::Content { text } => {
                    if let Some(open) = stack.last_mut() {
                        open.text.push_str(&text);
                    }
                }
                XmlEvent::EndElement { .. } => {
                    let Some(mut done) = stack.pop() else {
                        return Err(parser.error("unbalanced end element"));
                    };
                    if !done.children.is_empty() && done.text.trim().is_empty() {
                        done.text.clear();
                    }
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(done),
                        None if root.is_none() => root = Some(done),
                        None => return Err(parser.error("multiple root elements")),
                    }
                }
            }
        }
        root.ok_or_else(|| parser.error("document has no root element"))
    }

    /// Name without namespace prefix.
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Attribute value by local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| local_name(k) == name)
            .map(|(_, v)| v.as_str())
    }

    /// First child with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.local_name() == name)
    }

    /// All children with the given local name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.local_name() == name)
    }

    /// Text of the first child with the given local name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }
}

fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}
