//! Attribute Parsing
//!
//! Parses `name=value` pairs from tag content. Quoted values (single or
//! double quotes) are stripped; unquoted values run to the next whitespace.

use std::borrow::Cow;

use super::entities::decode_text;
use super::scanner::{is_whitespace, Scanner};
use crate::error::{Error, Result};

/// A parsed attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute<'a> {
    /// Attribute name, case-sensitive
    pub name: &'a str,
    /// Attribute value (entities decoded)
    pub value: Cow<'a, str>,
}

/// Parse attributes from raw tag content (after the element name)
///
/// Input should be the content between the element name and '>' with any
/// empty-element '/' already removed. `offset` is the byte position of
/// `input` within the document. When a name repeats, only the last
/// occurrence is kept.
pub fn parse_attributes(input: &str, offset: usize) -> Result<Vec<RawAttribute<'_>>> {
    let mut attrs: Vec<RawAttribute<'_>> = Vec::new();
    let mut scanner = Scanner::new(input);

    loop {
        let before_ws = scanner.position();
        scanner.skip_whitespace();
        if scanner.is_eof() {
            break;
        }
        if !attrs.is_empty() && scanner.position() == before_ws {
            return Err(Error::lex(
                "whitespace required between attributes",
                offset + scanner.position(),
            ));
        }

        let name_pos = scanner.position();
        let name = scanner
            .read_name()
            .ok_or_else(|| Error::lex("invalid attribute name", offset + name_pos))?;

        scanner.skip_whitespace();
        if scanner.peek() != Some(b'=') {
            return Err(Error::lex(
                format!("attribute '{}' has no value", name),
                offset + name_pos,
            ));
        }
        scanner.advance(1);
        scanner.skip_whitespace();

        let value_pos = scanner.position();
        let (raw, raw_start) = match scanner.peek() {
            None => {
                return Err(Error::lex(
                    format!("attribute '{}' has no value", name),
                    offset + value_pos,
                ))
            }
            Some(quote @ (b'"' | b'\'')) => {
                scanner.advance(1);
                let end = scanner.find_byte(quote).ok_or_else(|| {
                    Error::lex(
                        format!("unterminated value for attribute '{}'", name),
                        offset + value_pos,
                    )
                })?;
                let raw = scanner.slice(value_pos + 1, end);
                scanner.set_position(end + 1);
                (raw, value_pos + 1)
            }
            Some(_) => {
                // Unquoted value (lenient): up to the next whitespace
                while let Some(b) = scanner.peek() {
                    if is_whitespace(b) {
                        break;
                    }
                    scanner.advance(1);
                }
                (scanner.slice(value_pos, scanner.position()), value_pos)
            }
        };

        if let Some(lt) = raw.find('<') {
            return Err(Error::lex(
                "'<' not allowed in attribute value",
                offset + raw_start + lt,
            ));
        }

        let value = decode_text(raw, offset + raw_start)?;

        attrs.retain(|a| a.name != name);
        attrs.push(RawAttribute { name, value });
    }

    Ok(attrs)
}
