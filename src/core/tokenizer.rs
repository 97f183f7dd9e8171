//! Tokenizer - State machine for markup token extraction
//!
//! Implements a pull-parser style tokenizer that extracts raw tokens:
//! - Declaration `<?xml ... ?>` (leading only)
//! - Element start/end/empty tags
//! - Text runs (entities decoded)
//! - CDATA sections (verbatim)
//! - Comments (verbatim)
//! - Unknown markup: anything else between `<` and `>`
//!
//! Only the leniencies listed on each rule are accepted; every other
//! malformed construct is a lex error carrying its byte position.

use std::borrow::Cow;

use super::attributes::{parse_attributes, RawAttribute};
use super::entities::decode_text;
use super::scanner::{is_whitespace, Scanner};
use crate::dom::Declaration;
use crate::error::{Error, Result};

/// UTF-8 encoding of U+FEFF
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Current parsing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Initial state; a byte order mark or declaration may still appear
    Init,
    /// Past the prolog, reading text and markup
    InsideText,
    /// End of input reached
    Done,
}

/// Type of token, with its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// XML declaration: <?xml version="1.0"?>
    Declaration(Declaration),
    /// Element start tag: <element attrs...>
    StartTag {
        name: &'a str,
        attributes: Vec<RawAttribute<'a>>,
    },
    /// Empty element: <element attrs.../>
    EmptyTag {
        name: &'a str,
        attributes: Vec<RawAttribute<'a>>,
    },
    /// Element end tag: </element>
    EndTag { name: &'a str },
    /// Text content, entities decoded
    Text(Cow<'a, str>),
    /// CDATA section content, verbatim
    CData(&'a str),
    /// Comment content between `<!--` and `-->`
    Comment(&'a str),
    /// Everything between `<` and `>` of unrecognized markup
    Unknown(&'a str),
}

/// A lexed token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    /// Raw span in input (start, end)
    pub span: (usize, usize),
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind<'a>, span: (usize, usize)) -> Self {
        Token { kind, span }
    }
}

/// Tokenizer implementing a pull-parser pattern
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    state: ParseState,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer for the given input
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            scanner: Scanner::new(input),
            state: ParseState::Init,
        }
    }

    /// Get the current position in the input
    pub fn position(&self) -> usize {
        self.scanner.position()
    }

    /// Get the next token, or None at end of input
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        let token = match self.state {
            ParseState::Done => return Ok(None),
            ParseState::Init => {
                self.state = ParseState::InsideText;
                self.skip_bom();
                match self.parse_declaration()? {
                    Some(token) => Some(token),
                    None => self.parse_content()?,
                }
            }
            ParseState::InsideText => self.parse_content()?,
        };

        match &token {
            Some(token) => log::trace!(target: "minixml.lexer", "emit token: {:?}", token),
            None => self.state = ParseState::Done,
        }
        Ok(token)
    }

    fn parse_content(&mut self) -> Result<Option<Token<'a>>> {
        match self.scanner.peek() {
            None => Ok(None),
            Some(b'<') => self.parse_markup().map(Some),
            Some(_) => self.parse_text().map(Some),
        }
    }

    /// Skip a UTF-8 byte order mark at the very start of the input
    fn skip_bom(&mut self) {
        if self.scanner.position() == 0 && self.scanner.starts_with(UTF8_BOM) {
            self.scanner.advance(UTF8_BOM.len());
        }
    }

    /// Parse a leading `<?xml ... ?>`, which may only be preceded by whitespace
    fn parse_declaration(&mut self) -> Result<Option<Token<'a>>> {
        let origin = self.scanner.position();
        self.scanner.skip_whitespace();
        if !self.at_declaration() {
            self.scanner.set_position(origin);
            return Ok(None);
        }

        let start = self.scanner.position();
        self.scanner.advance(5); // Skip '<?xml'
        let content_start = self.scanner.position();
        let end = self
            .scanner
            .find_seq(b"?>")
            .ok_or_else(|| Error::lex("unterminated declaration", start))?;
        let content = self.scanner.slice(content_start, end);

        let mut declaration = Declaration::default();
        for attr in parse_attributes(content, content_start)? {
            match attr.name {
                "version" => declaration.version = attr.value.into_owned(),
                "encoding" => declaration.encoding = attr.value.into_owned(),
                "standalone" => {
                    declaration.standalone = match attr.value.as_ref() {
                        "yes" => true,
                        "no" => false,
                        other => {
                            return Err(Error::lex(
                                format!("standalone must be 'yes' or 'no', not '{}'", other),
                                start,
                            ))
                        }
                    }
                }
                other => {
                    return Err(Error::lex(
                        format!("unknown declaration attribute '{}'", other),
                        start,
                    ))
                }
            }
        }

        self.scanner.set_position(end + 2);
        Ok(Some(Token::new(
            TokenKind::Declaration(declaration),
            (start, end + 2),
        )))
    }

    /// Is the scanner at `<?xml` followed by whitespace or '?'
    fn at_declaration(&self) -> bool {
        self.scanner.starts_with(b"<?xml")
            && matches!(self.scanner.peek_at(5), Some(b) if is_whitespace(b) || b == b'?')
    }

    /// Parse markup starting with '<'
    fn parse_markup(&mut self) -> Result<Token<'a>> {
        let start = self.scanner.position();

        let token = if self.scanner.starts_with(b"<!--") {
            self.parse_comment(start)?
        } else if self.scanner.starts_with(b"<![CDATA[") {
            self.parse_cdata(start)?
        } else {
            match self.scanner.peek_at(1) {
                None => return Err(Error::lex("unexpected end of input after '<'", start)),
                Some(b'/') => self.parse_end_tag(start)?,
                Some(b'?') => self.parse_pi(start)?,
                Some(b'!') => self.parse_bang_unknown(start)?,
                Some(b) if b.is_ascii_digit() => {
                    return Err(Error::lex("tag word must not begin with a digit", start))
                }
                Some(_) => {
                    self.scanner.advance(1);
                    let starts_name = self
                        .scanner
                        .remaining()
                        .chars()
                        .next()
                        .is_some_and(super::scanner::is_name_start);
                    if starts_name {
                        self.parse_start_tag(start)?
                    } else {
                        self.scanner.set_position(start);
                        self.parse_other_unknown(start)?
                    }
                }
            }
        };

        Ok(token)
    }

    /// Parse a start tag or empty element tag; scanner is just past '<'
    fn parse_start_tag(&mut self, start: usize) -> Result<Token<'a>> {
        let name_pos = self.scanner.position();
        let name = self
            .scanner
            .read_name()
            .ok_or_else(|| Error::lex("invalid tag word", name_pos))?;
        check_reserved(name, name_pos)?;

        match self.scanner.peek() {
            Some(b) if is_whitespace(b) || b == b'/' || b == b'>' => {}
            None => return Err(Error::lex(format!("unterminated tag <{}>", name), start)),
            Some(_) => {
                return Err(Error::lex(
                    format!("invalid character in tag word '{}'", name),
                    self.scanner.position(),
                ))
            }
        }

        let name_end = self.scanner.position();
        let end = self
            .scanner
            .find_tag_end_quoted()
            .ok_or_else(|| Error::lex(format!("unterminated tag <{}>", name), start))?;

        // Check if it's an empty element tag
        let is_empty = end > name_end && self.scanner.byte_at(end - 1) == Some(b'/');
        let content_end = if is_empty { end - 1 } else { end };
        let attributes = parse_attributes(self.scanner.slice(name_end, content_end), name_end)?;

        self.scanner.set_position(end + 1);
        let kind = if is_empty {
            TokenKind::EmptyTag { name, attributes }
        } else {
            TokenKind::StartTag { name, attributes }
        };
        Ok(Token::new(kind, (start, end + 1)))
    }

    /// Parse an end tag
    fn parse_end_tag(&mut self, start: usize) -> Result<Token<'a>> {
        self.scanner.advance(2); // Skip '</'

        let name_pos = self.scanner.position();
        let name = self
            .scanner
            .read_name()
            .ok_or_else(|| Error::lex("invalid tag word in end tag", name_pos))?;
        check_reserved(name, name_pos)?;

        self.scanner.skip_whitespace();
        match self.scanner.peek() {
            Some(b'>') => {}
            None => return Err(Error::lex(format!("unterminated end tag </{}>", name), start)),
            Some(_) => {
                return Err(Error::lex(
                    format!("end tag </{}> cannot have attributes or other content", name),
                    self.scanner.position(),
                ))
            }
        }

        self.scanner.advance(1);
        Ok(Token::new(
            TokenKind::EndTag { name },
            (start, self.scanner.position()),
        ))
    }

    /// Parse a comment <!--...-->
    fn parse_comment(&mut self, start: usize) -> Result<Token<'a>> {
        self.scanner.advance(4); // Skip '<!--'
        let content_start = self.scanner.position();
        let end = self
            .scanner
            .find_seq(b"-->")
            .ok_or_else(|| Error::lex("unterminated comment", start))?;

        let content = self.scanner.slice(content_start, end);
        self.scanner.set_position(end + 3);
        Ok(Token::new(TokenKind::Comment(content), (start, end + 3)))
    }

    /// Parse a CDATA section <![CDATA[...]]>
    fn parse_cdata(&mut self, start: usize) -> Result<Token<'a>> {
        self.scanner.advance(9); // Skip '<![CDATA['
        let content_start = self.scanner.position();
        let end = self
            .scanner
            .find_seq(b"]]>")
            .ok_or_else(|| Error::lex("unterminated CDATA section", start))?;

        let content = self.scanner.slice(content_start, end);
        self.scanner.set_position(end + 3);
        Ok(Token::new(TokenKind::CData(content), (start, end + 3)))
    }

    /// Parse a processing instruction <?...?>, kept as an Unknown
    fn parse_pi(&mut self, start: usize) -> Result<Token<'a>> {
        if self.at_declaration() {
            return Err(Error::lex(
                "XML declaration is only allowed at the start of the document",
                start,
            ));
        }

        self.scanner.advance(2); // Skip '<?'
        let end = self
            .scanner
            .find_seq(b"?>")
            .ok_or_else(|| Error::lex("unterminated processing instruction", start))?;

        // Contents are everything between '<' and '>', i.e. "?target data?"
        let content = self.scanner.slice(start + 1, end + 1);
        self.scanner.set_position(end + 2);
        Ok(Token::new(TokenKind::Unknown(content), (start, end + 2)))
    }

    /// Parse `<!...>` markup that is neither a comment nor CDATA
    fn parse_bang_unknown(&mut self, start: usize) -> Result<Token<'a>> {
        self.scanner.advance(1); // Skip '<'
        let end = self
            .scanner
            .find_bang_end()
            .ok_or_else(|| Error::lex("unterminated markup declaration", start))?;

        let content = self.scanner.slice(start + 1, end);
        self.scanner.set_position(end + 1);
        Ok(Token::new(TokenKind::Unknown(content), (start, end + 1)))
    }

    /// Parse any other `<x ...>` as Unknown
    fn parse_other_unknown(&mut self, start: usize) -> Result<Token<'a>> {
        self.scanner.advance(1); // Skip '<'
        let end = self
            .scanner
            .find_byte(b'>')
            .ok_or_else(|| Error::lex("unterminated tag", start))?;

        let content = self.scanner.slice(start + 1, end);
        self.scanner.set_position(end + 1);
        Ok(Token::new(TokenKind::Unknown(content), (start, end + 1)))
    }

    /// Parse text content up to the next '<'
    fn parse_text(&mut self) -> Result<Token<'a>> {
        let start = self.scanner.position();

        let end = self
            .scanner
            .find_tag_start()
            .unwrap_or(start + self.scanner.remaining().len());
        let content = self.scanner.slice(start, end);
        let decoded = decode_text(content, start)?;

        self.scanner.set_position(end);
        Ok(Token::new(TokenKind::Text(decoded), (start, end)))
    }
}

/// Iterator adapter for tokenizer; stops after the first error
impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(err) => {
                self.state = ParseState::Done;
                Some(Err(err))
            }
        }
    }
}

/// Tokenize a whole document
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>> {
    Tokenizer::new(input).collect()
}

/// The tag word `xml` (any case) is reserved
fn check_reserved(name: &str, position: usize) -> Result<()> {
    if name.eq_ignore_ascii_case("xml") {
        return Err(Error::lex("tag word 'xml' is reserved", position));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind<'_>> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_element() {
        let tokens = kinds("<root>content</root>");
        assert_eq!(
            tokens,
            vec![
                TokenKind::StartTag { name: "root", attributes: vec![] },
                TokenKind::Text(Cow::Borrowed("content")),
                TokenKind::EndTag { name: "root" },
            ]
        );
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("<a>hi</a>").unwrap();
        assert_eq!(tokens[0].span, (0, 3));
        assert_eq!(tokens[1].span, (3, 5));
        assert_eq!(tokens[2].span, (5, 9));
    }

    #[test]
    fn test_empty_element() {
        assert_eq!(
            kinds("<br/>"),
            vec![TokenKind::EmptyTag { name: "br", attributes: vec![] }]
        );
    }

    #[test]
    fn test_empty_element_with_unquoted_attribute() {
        let tokens = kinds("<pt x=1/>");
        match &tokens[0] {
            TokenKind::EmptyTag { name, attributes } => {
                assert_eq!(*name, "pt");
                assert_eq!(attributes[0].value, "1");
            }
            other => panic!("unexpected token {:?}", other),
        }
    }

    #[test]
    fn test_declaration() {
        let tokens = kinds("  <?xml version=\"1.1\" encoding='ISO-8859-1' standalone=\"no\"?><a/>");
        assert_eq!(
            tokens[0],
            TokenKind::Declaration(Declaration {
                version: "1.1".to_string(),
                encoding: "ISO-8859-1".to_string(),
                standalone: false,
            })
        );
    }

    #[test]
    fn test_late_declaration_is_error() {
        assert!(tokenize("<a/><?xml version=\"1.0\"?>").is_err());
    }

    #[test]
    fn test_bad_standalone_is_error() {
        assert!(tokenize("<?xml version=\"1.0\" standalone=\"maybe\"?>").is_err());
    }

    #[test]
    fn test_processing_instruction_is_unknown() {
        assert_eq!(
            kinds("<?xml-stylesheet href=\"a.css\"?>"),
            vec![TokenKind::Unknown("?xml-stylesheet href=\"a.css\"?")]
        );
    }

    #[test]
    fn test_cdata() {
        assert_eq!(
            kinds("<![CDATA[<script>a && b</script>]]>"),
            vec![TokenKind::CData("<script>a && b</script>")]
        );
    }

    #[test]
    fn test_comment() {
        assert_eq!(kinds("<!-- comment -->"), vec![TokenKind::Comment(" comment ")]);
    }

    #[test]
    fn test_doctype_is_unknown() {
        assert_eq!(
            kinds("<!DOCTYPE note [<!ELEMENT note (#PCDATA)>]><note/>")[0],
            TokenKind::Unknown("!DOCTYPE note [<!ELEMENT note (#PCDATA)>]")
        );
    }

    #[test]
    fn test_other_markup_is_unknown() {
        assert_eq!(kinds("<-- x -->")[0], TokenKind::Unknown("-- x --"));
    }

    #[test]
    fn test_text_entities_decoded() {
        assert_eq!(
            kinds("a &lt; b &#x26; c"),
            vec![TokenKind::Text(Cow::Owned("a < b & c".to_string()))]
        );
    }

    #[test]
    fn test_end_tag_with_whitespace() {
        assert_eq!(kinds("</a  >"), vec![TokenKind::EndTag { name: "a" }]);
    }

    #[test]
    fn test_non_ascii_before_tag_end() {
        match &kinds("<a x=café></a>")[0] {
            TokenKind::StartTag { attributes, .. } => assert_eq!(attributes[0].value, "café"),
            other => panic!("unexpected token {:?}", other),
        }
        match &kinds("<a x=é/>")[0] {
            TokenKind::EmptyTag { attributes, .. } => assert_eq!(attributes[0].value, "é"),
            other => panic!("unexpected token {:?}", other),
        }
        assert!(matches!(tokenize("<a é>"), Err(Error::Lex { .. })));
    }

    #[test]
    fn test_apostrophe_in_unquoted_value() {
        let tokens = kinds("<a note=it's>text</a>");
        match &tokens[0] {
            TokenKind::StartTag { attributes, .. } => {
                assert_eq!(attributes[0].name, "note");
                assert_eq!(attributes[0].value, "it's");
            }
            other => panic!("unexpected token {:?}", other),
        }
        assert_eq!(tokens[1], TokenKind::Text(Cow::Borrowed("text")));
    }

    #[test]
    fn test_leading_bom_skipped() {
        let tokens = tokenize("\u{feff}<?xml version=\"1.0\"?><r/>").unwrap();
        assert!(matches!(tokens[0].kind, TokenKind::Declaration(_)));
        assert_eq!(tokens[0].span.0, 3);
        assert_eq!(
            kinds("\u{feff}<r/>"),
            vec![TokenKind::EmptyTag { name: "r", attributes: vec![] }]
        );
    }

    #[test]
    fn test_lex_errors() {
        for bad in [
            "<a",
            "<a x=\"1\"",
            "<!-- open",
            "<![CDATA[ open",
            "<1abc>",
            "<xml>",
            "</a b>",
            "<a>&bogus;</a>",
            "<",
            "<a\u{0}>",
            "<!DOCTYPE x",
        ] {
            let err = tokenize(bad).unwrap_err();
            assert!(matches!(err, Error::Lex { .. }), "{bad:?} gave {err:?}");
        }
    }
}
