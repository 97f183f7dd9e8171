//! SIMD-accelerated scanning using memchr
//!
//! The scanner walks the UTF-8 bytes of a `&str`. Every delimiter it
//! searches for is ASCII, so positions it stops at are always valid
//! char boundaries and slices can be handed out as `&str`.

use memchr::{memchr, memmem};

/// Scanner for markup delimiter detection
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the current position
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    /// Get the unread remainder of the input
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Get a slice from start to end positions
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    /// Byte at an absolute position
    #[inline]
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        self.bytes().get(pos).copied()
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    /// Peek at byte at offset from current position
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes().get(self.pos + offset).copied()
    }

    /// Advance by n bytes
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Skip whitespace characters (space, tab, newline, carriage return)
    #[inline]
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if !is_whitespace(b) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Find next '<' (tag start)
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        memchr(b'<', &self.bytes()[self.pos..]).map(|i| self.pos + i)
    }

    /// Find next occurrence of a specific byte
    #[inline]
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        memchr(byte, &self.bytes()[self.pos..]).map(|i| self.pos + i)
    }

    /// Find next occurrence of a byte sequence such as `-->` or `]]>`
    #[inline]
    pub fn find_seq(&self, needle: &[u8]) -> Option<usize> {
        memmem::find(&self.bytes()[self.pos..], needle).map(|i| self.pos + i)
    }

    /// Find tag end while handling quotes properly
    /// Returns the position of '>' that is not inside a quoted value.
    /// A quote only opens a value right after '=' and optional whitespace;
    /// elsewhere it is an ordinary character of an unquoted value.
    pub fn find_tag_end_quoted(&self) -> Option<usize> {
        let bytes = self.bytes();
        let mut pos = self.pos;
        let mut quote: Option<u8> = None;
        let mut after_eq = false;

        while pos < bytes.len() {
            let b = bytes[pos];
            match quote {
                Some(q) if b == q => quote = None,
                Some(_) => {}
                None => match b {
                    b'"' | b'\'' if after_eq => {
                        quote = Some(b);
                        after_eq = false;
                    }
                    b'>' => return Some(pos),
                    b'=' => after_eq = true,
                    b if is_whitespace(b) => {}
                    _ => after_eq = false,
                },
            }
            pos += 1;
        }
        None
    }

    /// Find the '>' closing a `<!...>` construct, skipping quoted strings
    /// and bracketed internal subsets such as `<!DOCTYPE a [ <!ENTITY x "y"> ]>`
    pub fn find_bang_end(&self) -> Option<usize> {
        let bytes = self.bytes();
        let mut pos = self.pos;
        let mut quote: Option<u8> = None;
        let mut depth = 0usize;

        while pos < bytes.len() {
            let b = bytes[pos];
            match quote {
                Some(q) if b == q => quote = None,
                Some(_) => {}
                None => match b {
                    b'"' | b'\'' => quote = Some(b),
                    b'[' => depth += 1,
                    b']' => depth = depth.saturating_sub(1),
                    b'>' if depth == 0 => return Some(pos),
                    _ => {}
                },
            }
            pos += 1;
        }
        None
    }

    /// Check if input starts with a byte sequence at current position
    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.bytes()[self.pos..].starts_with(needle)
    }

    /// Read a tag word: starts with a letter or underscore, continues with
    /// letters, digits, '_', '-', '.' or ':'
    pub fn read_name(&mut self) -> Option<&'a str> {
        let start = self.pos;
        let first = self.remaining().chars().next()?;
        if !is_name_start(first) {
            return None;
        }
        self.pos += first.len_utf8();

        while let Some(b) = self.peek() {
            if !is_name_byte(b) {
                break;
            }
            self.pos += 1;
        }

        Some(&self.input[start..self.pos])
    }
}

/// Check if byte is markup whitespace
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Check if a character may start a tag word or attribute name
#[inline]
pub fn is_name_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

/// Check if byte may continue a name; non-ASCII bytes are accepted as
/// part of multi-byte letters
#[inline]
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b':') || b >= 0x80
}

/// Check that a whole string is a usable tag word or attribute name
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_name_start(c) => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}
