//! Entity Decoding and Encoding
//!
//! Handles decoding of:
//! - Built-in entities: &lt; &gt; &amp; &quot; &apos;
//! - Numeric character references: &#123; &#x7B;
//!
//! Decoding is strict: any other `&` sequence is a lex error. Encoding
//! only ever produces the five named entities.
//!
//! Uses Cow for zero-copy when no entities are present.

use memchr::memchr;
use std::borrow::Cow;

use crate::error::{Error, Result};

/// Longest entity body we look at before giving up on finding ';'
const MAX_ENTITY_LEN: usize = 32;

/// Decode text content, handling entity references
///
/// `offset` is the byte position of `input` within the whole document
/// and is only used for error reporting.
#[inline]
pub fn decode_text(input: &str, offset: usize) -> Result<Cow<'_, str>> {
    // Fast path: check if there are any entities using SIMD
    if memchr(b'&', input.as_bytes()).is_none() {
        return Ok(Cow::Borrowed(input));
    }
    decode_entities(input, offset).map(Cow::Owned)
}

/// Decode all entity references in the input
fn decode_entities(input: &str, offset: usize) -> Result<String> {
    let bytes = input.as_bytes();
    let mut result = String::with_capacity(input.len());
    let mut pos = 0;

    while let Some(amp) = memchr(b'&', &bytes[pos..]) {
        let amp_pos = pos + amp;
        result.push_str(&input[pos..amp_pos]);

        let window_end = (amp_pos + 1 + MAX_ENTITY_LEN).min(bytes.len());
        let semi = memchr(b';', &bytes[amp_pos + 1..window_end]).ok_or_else(|| {
            Error::lex("malformed entity reference: missing ';'", offset + amp_pos)
        })?;
        let body = &input[amp_pos + 1..amp_pos + 1 + semi];

        let decoded = decode_entity(body).ok_or_else(|| {
            Error::lex(
                format!("malformed entity reference '&{};'", body),
                offset + amp_pos,
            )
        })?;
        result.push(decoded);
        pos = amp_pos + semi + 2;
    }

    result.push_str(&input[pos..]);
    Ok(result)
}

/// Decode a single entity body (without & and ;)
fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => entity.strip_prefix('#').and_then(decode_numeric_entity),
    }
}

/// Decode a numeric character reference body (after '#')
fn decode_numeric_entity(entity: &str) -> Option<char> {
    let codepoint = if let Some(hex) = entity.strip_prefix(['x', 'X']) {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(hex, 16).ok()?
    } else {
        if entity.is_empty() || !entity.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        entity.parse::<u32>().ok()?
    };

    if codepoint == 0 {
        return None;
    }
    char::from_u32(codepoint)
}

/// Check whether a string contains a character that needs escaping
#[inline]
fn needs_escape(input: &str) -> bool {
    input
        .bytes()
        .any(|b| matches!(b, b'<' | b'>' | b'&' | b'"' | b'\''))
}

/// Encode text for output (escape the five reserved characters)
pub fn encode_text(input: &str) -> Cow<'_, str> {
    if !needs_escape(input) {
        return Cow::Borrowed(input);
    }
    let mut result = String::with_capacity(input.len() + 16);
    encode_into(input, &mut result);
    Cow::Owned(result)
}

/// Append the escaped form of `input` to `out`
pub fn encode_into(input: &str, out: &mut String) {
    if !needs_escape(input) {
        out.push_str(input);
        return;
    }
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_entities() {
        let result = decode_text("Hello, World!", 0).unwrap();
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_basic_entities() {
        let result = decode_text("&lt;hello&gt; &amp; &quot;world&quot; &apos;", 0).unwrap();
        assert_eq!(result, "<hello> & \"world\" '");
    }

    #[test]
    fn test_numeric_decimal() {
        assert_eq!(decode_text("&#65;&#66;&#67;", 0).unwrap(), "ABC");
    }

    #[test]
    fn test_numeric_hex() {
        assert_eq!(decode_text("&#x41;&#X42;&#x43;", 0).unwrap(), "ABC");
    }

    #[test]
    fn test_unicode_entity() {
        assert_eq!(decode_text("&#x1F600;", 0).unwrap(), "😀");
    }

    #[test]
    fn test_unknown_entity_is_error() {
        let err = decode_text("a &nbsp; b", 10).unwrap_err();
        assert!(matches!(err, Error::Lex { position: 12, .. }));
    }

    #[test]
    fn test_bare_ampersand_is_error() {
        assert!(decode_text("fish & chips", 0).is_err());
        assert!(decode_text("tail &", 0).is_err());
    }

    #[test]
    fn test_bad_numeric_is_error() {
        assert!(decode_text("&#;", 0).is_err());
        assert!(decode_text("&#x;", 0).is_err());
        assert!(decode_text("&#12a;", 0).is_err());
        assert!(decode_text("&#xD800;", 0).is_err());
        assert!(decode_text("&#0;", 0).is_err());
    }

    #[test]
    fn test_encode_text() {
        let result = encode_text("<hello> & \"world\" 'x'");
        assert_eq!(result, "&lt;hello&gt; &amp; &quot;world&quot; &apos;x&apos;");
        assert!(matches!(encode_text("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_encode_never_numeric() {
        assert_eq!(encode_text("é\u{1F600}"), "é\u{1F600}");
    }
}
