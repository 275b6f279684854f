//! Recursive-descent parser for the schema document subset of XML
//!
//! Accepted syntax: an optional XML declaration, comments, one root element,
//! nested elements with single- or double-quoted attributes, character
//! references, and the five predefined entities. Text content is ignored if
//! it is whitespace and rejected otherwise; schema documents never carry
//! text nodes.

use crate::error::{Error, Result};

use super::Element;

/// Parse a complete document and return its root element.
pub fn parse_document(input: &str) -> Result<Element> {
    let mut parser = Parser {
        input: input.as_bytes(),
        pos: 0,
    };

    parser.skip_bom();
    parser.skip_misc()?;
    parser.skip_declaration()?;
    parser.skip_misc()?;

    let root = parser.parse_element()?;

    parser.skip_misc()?;
    if parser.pos != parser.input.len() {
        return Err(parser.fail("content after the root element"));
    }

    Ok(root)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn fail(&self, detail: &str) -> Error {
        Error::Parse(format!("{detail} (at byte {})", self.pos))
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn starts_with(&self, prefix: &[u8]) -> bool {
        self.input[self.pos..].starts_with(prefix)
    }

    fn expect(&mut self, prefix: &[u8]) -> Result<()> {
        if self.starts_with(prefix) {
            self.pos += prefix.len();
            Ok(())
        } else {
            Err(self.fail(&format!(
                "expected '{}'",
                String::from_utf8_lossy(prefix)
            )))
        }
    }

    fn skip_bom(&mut self) {
        if self.starts_with(&[0xEF, 0xBB, 0xBF]) {
            self.pos += 3;
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek() {
            if byte.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Skip whitespace and comments between markup.
    fn skip_misc(&mut self) -> Result<()> {
        loop {
            self.skip_whitespace();
            if self.starts_with(b"<!--") {
                self.skip_comment()?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_comment(&mut self) -> Result<()> {
        self.pos += 4;
        while self.pos < self.input.len() {
            if self.starts_with(b"-->") {
                self.pos += 3;
                return Ok(());
            }
            self.pos += 1;
        }
        Err(self.fail("unterminated comment"))
    }

    fn skip_declaration(&mut self) -> Result<()> {
        if !self.starts_with(b"<?xml") {
            return Ok(());
        }
        while self.pos < self.input.len() {
            if self.starts_with(b"?>") {
                self.pos += 2;
                return Ok(());
            }
            self.pos += 1;
        }
        Err(self.fail("unterminated XML declaration"))
    }

    fn parse_name(&mut self) -> Result<String> {
        let start = self.pos;
        match self.peek() {
            Some(byte) if byte.is_ascii_alphabetic() || byte == b'_' => self.pos += 1,
            _ => return Err(self.fail("expected a name")),
        }
        while let Some(byte) = self.peek() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-' | b'.' | b':') {
                self.pos += 1;
            } else {
                break;
            }
        }
        // Names are restricted to ASCII above, so this cannot fail.
        Ok(String::from_utf8_lossy(&self.input[start..self.pos]).into_owned())
    }

    fn parse_element(&mut self) -> Result<Element> {
        self.expect(b"<")?;
        let name = self.parse_name()?;
        let mut element = Element::new(name);

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'/') => {
                    self.expect(b"/>")?;
                    return Ok(element);
                }
                Some(b'>') => {
                    self.pos += 1;
                    self.parse_content(&mut element)?;
                    return Ok(element);
                }
                Some(_) => {
                    let (key, value) = self.parse_attribute()?;
                    element.set_attribute(key, value);
                }
                None => return Err(self.fail("unexpected end of document in element")),
            }
        }
    }

    fn parse_attribute(&mut self) -> Result<(String, String)> {
        let key = self.parse_name()?;
        self.skip_whitespace();
        self.expect(b"=")?;
        self.skip_whitespace();

        let quote = match self.peek() {
            Some(byte @ (b'"' | b'\'')) => byte,
            _ => return Err(self.fail("expected a quoted attribute value")),
        };
        self.pos += 1;

        let mut value = String::new();
        loop {
            match self.peek() {
                Some(byte) if byte == quote => {
                    self.pos += 1;
                    return Ok((key, value));
                }
                Some(b'<') => return Err(self.fail("'<' in attribute value")),
                Some(b'&') => value.push(self.parse_entity()?),
                Some(byte) if byte < 0x80 => {
                    value.push(byte as char);
                    self.pos += 1;
                }
                Some(_) => {
                    let ch = self.parse_utf8_char()?;
                    value.push(ch);
                }
                None => return Err(self.fail("unterminated attribute value")),
            }
        }
    }

    fn parse_utf8_char(&mut self) -> Result<char> {
        let rest = &self.input[self.pos..];
        let len = rest.len().min(4);
        for width in 2..=len {
            if let Ok(text) = std::str::from_utf8(&rest[..width]) {
                if let Some(ch) = text.chars().next() {
                    self.pos += width;
                    return Ok(ch);
                }
            }
        }
        Err(self.fail("invalid UTF-8 sequence"))
    }

    fn parse_entity(&mut self) -> Result<char> {
        self.pos += 1; // consume '&'
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if byte == b';' {
                let body = &self.input[start..self.pos];
                self.pos += 1;
                return decode_entity(body)
                    .ok_or_else(|| self.fail("unrecognized entity reference"));
            }
            if !byte.is_ascii_alphanumeric() && byte != b'#' && byte != b'x' {
                break;
            }
            self.pos += 1;
        }
        Err(self.fail("unterminated entity reference"))
    }

    fn parse_content(&mut self, element: &mut Element) -> Result<()> {
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'<') => {
                    if self.starts_with(b"</") {
                        self.pos += 2;
                        let end_name = self.parse_name()?;
                        if end_name != element.name {
                            return Err(self.fail(&format!(
                                "mismatched end tag </{end_name}> for <{}>",
                                element.name
                            )));
                        }
                        self.skip_whitespace();
                        self.expect(b">")?;
                        return Ok(());
                    }
                    if self.starts_with(b"<!--") {
                        self.skip_comment()?;
                    } else {
                        let child = self.parse_element()?;
                        element.children.push(child);
                    }
                }
                Some(_) => return Err(self.fail("unexpected text content")),
                None => {
                    return Err(self.fail(&format!(
                        "unexpected end of document inside <{}>",
                        element.name
                    )))
                }
            }
        }
    }
}

fn decode_entity(body: &[u8]) -> Option<char> {
    match body {
        b"amp" => Some('&'),
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"quot" => Some('"'),
        b"apos" => Some('\''),
        _ => {
            let body = std::str::from_utf8(body).ok()?;
            let code = if let Some(hex) = body.strip_prefix("#x") {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse().ok()?
            } else {
                return None;
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_self_closing_root() {
        let root = parse_document("<database name=\"db\"/>").unwrap();
        assert_eq!(root.name, "database");
        assert_eq!(root.attribute("name"), Some("db"));
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_parse_declaration_and_nesting() {
        let doc = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
                   <database name=\"db\">\n\
                     <table name=\"t\" file=\"t.dat\" data_offset=\"0\" row_length=\"8\">\n\
                       <int32 name=\"id\" offset=\"0\"/>\n\
                     </table>\n\
                   </database>\n";
        let root = parse_document(doc).unwrap();
        assert_eq!(root.children.len(), 1);
        let table = &root.children[0];
        assert_eq!(table.name, "table");
        assert_eq!(table.children[0].name, "int32");
        assert_eq!(table.children[0].attribute("offset"), Some("0"));
    }

    #[test]
    fn test_parse_entities_in_attribute() {
        let root = parse_document("<database name=\"a &lt; b &amp; &quot;c&quot; &#65;\"/>").unwrap();
        assert_eq!(root.attribute("name"), Some("a < b & \"c\" A"));
    }

    #[test]
    fn test_parse_single_quoted_attribute() {
        let root = parse_document("<database name='it&apos;s'/>").unwrap();
        assert_eq!(root.attribute("name"), Some("it's"));
    }

    #[test]
    fn test_parse_skips_comments() {
        let doc = "<!-- header --><database name=\"db\">\
                   <!-- inner --><table name=\"t\" file=\"f\" data_offset=\"0\" row_length=\"1\"/>\
                   </database><!-- trailer -->";
        let root = parse_document(doc).unwrap();
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn test_parse_rejects_plain_text() {
        assert!(matches!(
            parse_document("Invalid XML file"),
            Err(crate::Error::Parse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_mismatched_end_tag() {
        assert!(matches!(
            parse_document("<database name=\"db\"><table></database></database>"),
            Err(crate::Error::Parse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_truncated_document() {
        assert!(matches!(
            parse_document("<database name=\"db\">"),
            Err(crate::Error::Parse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_trailing_content() {
        assert!(matches!(
            parse_document("<database name=\"db\"/><database name=\"other\"/>"),
            Err(crate::Error::Parse(_))
        ));
    }

    #[test]
    fn test_parse_non_ascii_attribute_value() {
        let root = parse_document("<database name=\"caf\u{e9}\"/>").unwrap();
        assert_eq!(root.attribute("name"), Some("caf\u{e9}"));
    }
}
