//! Deterministic, single-pass Turtle tokenizer.
//!
//! The lexer is a byte-stream state machine: each call to [`Lexer::next_token`]
//! classifies the current byte via a 256-entry lookup table, then dispatches
//! to one scanning routine. Every token that carries text is interned
//! immediately through the caller-supplied [`Interns`] sink (typically the
//! [`arenac_graph::Graph`] the parser is streaming into), so no intermediate
//! `String` is ever allocated.
//!
//! # Examples
//!
//! ```
//! use arenac_turtle::lexer::Lexer;
//! use arenac_turtle::token::TokenKind;
//! use arenac_mem::StringInterner;
//!
//! let mut interner = StringInterner::new();
//! let mut lexer = Lexer::new(b"<http://ex/a> .", &mut interner);
//! let first = lexer.next_token().unwrap();
//! assert!(matches!(first.kind, TokenKind::Iri(_)));
//! ```

use arenac_mem::Interns;

use crate::error::{LexError, LexResult};
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Byte classification used to dispatch the hot-path switch in
/// [`Lexer::next_token`]. Computed once into a 256-entry table so
/// classification is a single array index rather than a chain of branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteClass {
    Whitespace,
    Newline,
    Hash,
    Lt,
    At,
    Underscore,
    Colon,
    Quote,
    Digit,
    Sign,
    Dot,
    Semicolon,
    Comma,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Caret,
    NameStart,
    Other,
}

const fn classify(byte: u8) -> ByteClass {
    match byte {
        b' ' | b'\t' | b'\r' => ByteClass::Whitespace,
        b'\n' => ByteClass::Newline,
        b'#' => ByteClass::Hash,
        b'<' => ByteClass::Lt,
        b'@' => ByteClass::At,
        b'_' => ByteClass::Underscore,
        b':' => ByteClass::Colon,
        b'"' => ByteClass::Quote,
        b'0'..=b'9' => ByteClass::Digit,
        b'+' | b'-' => ByteClass::Sign,
        b'.' => ByteClass::Dot,
        b';' => ByteClass::Semicolon,
        b',' => ByteClass::Comma,
        b'[' => ByteClass::LBracket,
        b']' => ByteClass::RBracket,
        b'(' => ByteClass::LParen,
        b')' => ByteClass::RParen,
        b'^' => ByteClass::Caret,
        b'a'..=b'z' | b'A'..=b'Z' => ByteClass::NameStart,
        _ => ByteClass::Other,
    }
}

const CLASS_TABLE: [ByteClass; 256] = {
    let mut table = [ByteClass::Other; 256];
    let mut byte = 0usize;
    while byte < 256 {
        table[byte] = classify(byte as u8);
        byte += 1;
    }
    table
};

fn is_name_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' || byte == b'.'
}

/// A single-pass tokenizer over a Turtle-subset byte slice.
pub struct Lexer<'a, I: Interns> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
    interner: &'a mut I,
}

impl<'a, I: Interns> Lexer<'a, I> {
    /// Builds a lexer over `source`, interning through `interner`.
    pub fn new(source: &'a [u8], interner: &'a mut I) -> Self {
        Self { bytes: source, pos: 0, line: 1, col: 1, interner }
    }

    /// Current byte offset, for incremental/resumable parsing.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.pos
    }

    /// Exposes the interning sink so a caller driving this lexer (the
    /// parser) can perform store operations without holding a second
    /// exclusive reference to the same sink.
    pub(crate) fn interner_mut(&mut self) -> &mut I {
        self.interner
    }

    /// Shared-reference counterpart of [`Lexer::interner_mut`].
    pub(crate) fn interner_ref(&self) -> &I {
        self.interner
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        if byte == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(byte)
    }

    fn point(&self) -> Span {
        Span::point(self.pos, self.line, self.col)
    }

    fn span_from(&self, start: (usize, usize, usize)) -> Span {
        Span::new(start.0, self.pos, start.1, start.2, self.line, self.col)
    }

    fn mark(&self) -> (usize, usize, usize) {
        (self.pos, self.line, self.col)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek().map(|b| CLASS_TABLE[b as usize]) {
                Some(ByteClass::Whitespace | ByteClass::Newline) => {
                    self.bump();
                }
                Some(ByteClass::Hash) => {
                    while let Some(byte) = self.peek() {
                        if byte == b'\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    /// Scans and returns the next token, or [`TokenKind::Eof`] at end of
    /// input.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if the current byte cannot begin any token in
    /// the grammar, or a literal is malformed (unterminated string/IRI,
    /// bad escape, bad numeric suffix).
    pub fn next_token(&mut self) -> LexResult<Token> {
        self.skip_trivia();
        let start = self.mark();
        let Some(byte) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, self.point()));
        };

        match CLASS_TABLE[byte as usize] {
            ByteClass::Lt => self.scan_iri(start),
            ByteClass::At => self.scan_at_keyword(start),
            ByteClass::Underscore => self.scan_blank_node(start),
            ByteClass::Quote => self.scan_string(start),
            ByteClass::Digit | ByteClass::Sign => self.scan_number(start),
            ByteClass::Dot => {
                // A lone '.' after digits is handled inside scan_number; here
                // it is always the statement terminator.
                self.bump();
                Ok(Token::new(TokenKind::Dot, self.span_from(start)))
            }
            ByteClass::Semicolon => {
                self.bump();
                Ok(Token::new(TokenKind::Semicolon, self.span_from(start)))
            }
            ByteClass::Comma => {
                self.bump();
                Ok(Token::new(TokenKind::Comma, self.span_from(start)))
            }
            ByteClass::LBracket => {
                self.bump();
                Ok(Token::new(TokenKind::LBracket, self.span_from(start)))
            }
            ByteClass::RBracket => {
                self.bump();
                Ok(Token::new(TokenKind::RBracket, self.span_from(start)))
            }
            ByteClass::LParen => {
                self.bump();
                Ok(Token::new(TokenKind::LParen, self.span_from(start)))
            }
            ByteClass::RParen => {
                self.bump();
                Ok(Token::new(TokenKind::RParen, self.span_from(start)))
            }
            ByteClass::Caret => self.scan_caret(start),
            ByteClass::Colon => self.scan_prefixed_name(start, None),
            ByteClass::NameStart => self.scan_word(start),
            ByteClass::Whitespace | ByteClass::Newline | ByteClass::Hash | ByteClass::Other => {
                let ch = self.bytes[self.pos..].iter().map(|&b| b as char).next().unwrap_or('\u{0}');
                self.bump();
                Err(LexError::UnknownChar { ch, span: self.span_from(start) })
            }
        }
    }

    fn scan_iri(&mut self, start: (usize, usize, usize)) -> LexResult<Token> {
        self.bump(); // '<'
        let content_start = self.pos;
        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    return Err(LexError::UnterminatedIri { start: self.span_from(start) });
                }
                Some(b'>') => break,
                _ => {
                    self.bump();
                }
            }
        }
        let content_end = self.pos;
        self.bump(); // '>'
        let text = std::str::from_utf8(&self.bytes[content_start..content_end])
            .expect("IRI bytes must be valid utf-8 for this grammar subset");
        let iri = self.interner.intern_str(text);
        Ok(Token::new(TokenKind::Iri(iri), self.span_from(start)))
    }

    fn scan_at_keyword(&mut self, start: (usize, usize, usize)) -> LexResult<Token> {
        self.bump(); // '@'
        let word_start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_alphanumeric() || b == b'-') {
            self.bump();
        }
        let word = std::str::from_utf8(&self.bytes[word_start..self.pos]).unwrap_or_default();
        match word {
            "prefix" => Ok(Token::new(TokenKind::PrefixDirective, self.span_from(start))),
            "base" => Ok(Token::new(TokenKind::BaseDirective, self.span_from(start))),
            _ => {
                // Otherwise this must be a language tag; the caller only
                // reaches scan_at_keyword after a raw '@' byte, which the
                // parser expects immediately following a string literal.
                let tag = self.interner.intern_str(word);
                Ok(Token::new(TokenKind::LangTag(tag), self.span_from(start)))
            }
        }
    }

    fn scan_blank_node(&mut self, start: (usize, usize, usize)) -> LexResult<Token> {
        self.bump(); // '_'
        if self.peek() == Some(b':') {
            self.bump();
        }
        let label_start = self.pos;
        while self.peek().is_some_and(is_name_char) {
            self.bump();
        }
        let label = std::str::from_utf8(&self.bytes[label_start..self.pos]).unwrap_or_default();
        let r = self.interner.intern_str(label);
        Ok(Token::new(TokenKind::BlankNode(r), self.span_from(start)))
    }

    fn scan_prefixed_name(&mut self, start: (usize, usize, usize), prefix: Option<&str>) -> LexResult<Token> {
        self.bump(); // ':'
        let local_start = self.pos;
        while self.peek().is_some_and(is_name_char) {
            self.bump();
        }
        let local_text = std::str::from_utf8(&self.bytes[local_start..self.pos]).unwrap_or_default();
        let local = self.interner.intern_str(local_text);
        let prefix = prefix.map(|p| self.interner.intern_str(p));
        Ok(Token::new(TokenKind::PrefixedName { prefix, local }, self.span_from(start)))
    }

    fn scan_word(&mut self, start: (usize, usize, usize)) -> LexResult<Token> {
        let word_start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-') {
            self.bump();
        }
        let word = std::str::from_utf8(&self.bytes[word_start..self.pos]).unwrap_or_default();

        if self.peek() == Some(b':') {
            let owned = word.to_owned();
            return self.scan_prefixed_name(start, Some(&owned));
        }

        match word {
            "a" => Ok(Token::new(TokenKind::A, self.span_from(start))),
            "true" => Ok(Token::new(TokenKind::Boolean(true), self.span_from(start))),
            "false" => Ok(Token::new(TokenKind::Boolean(false), self.span_from(start))),
            _ => {
                // A bareword that is not `a`/`true`/`false` and has no
                // trailing ':' is not a term in this grammar subset.
                let ch = word.chars().next().unwrap_or('\u{0}');
                Err(LexError::UnknownChar { ch, span: self.span_from(start) })
            }
        }
    }

    fn scan_caret(&mut self, start: (usize, usize, usize)) -> LexResult<Token> {
        self.bump(); // first '^'
        if self.peek() == Some(b'^') {
            self.bump();
            Ok(Token::new(TokenKind::DatatypeMarker, self.span_from(start)))
        } else {
            Err(LexError::UnknownChar { ch: '^', span: self.span_from(start) })
        }
    }

    fn scan_string(&mut self, start: (usize, usize, usize)) -> LexResult<Token> {
        self.bump(); // opening '"'
        let mut content = String::new();
        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    return Err(LexError::UnterminatedString { start: self.span_from(start) });
                }
                Some(b'"') => {
                    self.bump();
                    break;
                }
                Some(b'\\') => {
                    let escape_start = self.mark();
                    self.bump();
                    let Some(escaped) = self.bump() else {
                        return Err(LexError::UnterminatedString { start: self.span_from(start) });
                    };
                    let resolved = match escaped {
                        b'n' => '\n',
                        b't' => '\t',
                        b'r' => '\r',
                        b'"' => '"',
                        b'\\' => '\\',
                        b'\'' => '\'',
                        other => {
                            return Err(LexError::InvalidEscape {
                                ch: other as char,
                                span: self.span_from(escape_start),
                            });
                        }
                    };
                    content.push(resolved);
                }
                Some(_) => {
                    // Accumulate a full utf-8 scalar, not just one byte.
                    let remaining = std::str::from_utf8(&self.bytes[self.pos..]).unwrap_or_default();
                    let ch = remaining.chars().next().unwrap_or('\u{0}');
                    for _ in 0..ch.len_utf8() {
                        self.bump();
                    }
                    content.push(ch);
                }
            }
        }
        let r = self.interner.intern_str(&content);
        Ok(Token::new(TokenKind::StringLiteral(r), self.span_from(start)))
    }

    fn scan_number(&mut self, start: (usize, usize, usize)) -> LexResult<Token> {
        if matches!(CLASS_TABLE[self.bytes[self.pos] as usize], ByteClass::Sign) {
            self.bump();
        }
        let digits_start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.bump();
        }
        if self.pos == digits_start && !matches!(self.peek(), Some(b'.')) {
            let text = std::str::from_utf8(&self.bytes[start.0..self.pos]).unwrap_or_default().to_owned();
            return Err(LexError::InvalidNumeric { literal: text, span: self.span_from(start) });
        }

        let mut is_decimal = false;
        if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) {
            is_decimal = true;
            self.bump(); // '.'
            while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                self.bump();
            }
        }

        let mut is_double = false;
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let exponent_checkpoint = self.mark();
            self.bump();
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.bump();
            }
            if self.peek().is_some_and(|b| b.is_ascii_digit()) {
                is_double = true;
                while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                    self.bump();
                }
            } else {
                // Not actually an exponent; rewind so 'e'/'E' is re-lexed
                // as the start of the next token instead of being consumed.
                self.pos = exponent_checkpoint.0;
                self.line = exponent_checkpoint.1;
                self.col = exponent_checkpoint.2;
            }
        }

        let text = std::str::from_utf8(&self.bytes[start.0..self.pos]).unwrap_or_default();
        let r = self.interner.intern_str(text);
        let kind = if is_double {
            TokenKind::Double(r)
        } else if is_decimal {
            TokenKind::Decimal(r)
        } else {
            TokenKind::Integer(r)
        };
        Ok(Token::new(kind, self.span_from(start)))
    }

    /// Lexes the entire remaining input into a vector, stopping at the
    /// first error or at `Eof` (inclusive).
    ///
    /// # Errors
    ///
    /// Propagates the first [`LexError`] encountered.
    pub fn tokenize_all(&mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arenac_mem::StringInterner;

    fn lex_all(source: &str) -> Vec<TokenKind> {
        let mut interner = StringInterner::new();
        let mut lexer = Lexer::new(source.as_bytes(), &mut interner);
        lexer.tokenize_all().unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_iri() {
        let mut interner = StringInterner::new();
        let mut lexer = Lexer::new(b"<http://example.org/a>", &mut interner);
        let token = lexer.next_token().unwrap();
        match token.kind {
            TokenKind::Iri(r) => assert_eq!(interner.resolve(r), "http://example.org/a"),
            other => panic!("expected Iri, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_iri_errors() {
        let mut interner = StringInterner::new();
        let mut lexer = Lexer::new(b"<http://example.org/a", &mut interner);
        assert!(matches!(lexer.next_token(), Err(LexError::UnterminatedIri { .. })));
    }

    #[test]
    fn lexes_prefix_directive_and_prefixed_name() {
        let kinds = lex_all("@prefix ex: <http://ex/> .\nex:a");
        assert!(matches!(kinds[0], TokenKind::PrefixDirective));
        assert!(matches!(kinds[1], TokenKind::PrefixedName { prefix: None, .. }));
    }

    #[test]
    fn lexes_blank_node_label() {
        let kinds = lex_all("_:b1");
        assert!(matches!(kinds[0], TokenKind::BlankNode(_)));
    }

    #[test]
    fn lexes_a_keyword_and_booleans() {
        let kinds = lex_all("a true false");
        assert!(matches!(kinds[0], TokenKind::A));
        assert!(matches!(kinds[1], TokenKind::Boolean(true)));
        assert!(matches!(kinds[2], TokenKind::Boolean(false)));
    }

    #[test]
    fn lexes_integer_decimal_and_double() {
        let kinds = lex_all("42 3.14 1.5e10");
        assert!(matches!(kinds[0], TokenKind::Integer(_)));
        assert!(matches!(kinds[1], TokenKind::Decimal(_)));
        assert!(matches!(kinds[2], TokenKind::Double(_)));
    }

    #[test]
    fn integer_followed_by_dot_does_not_consume_dot() {
        let kinds = lex_all("42 .");
        assert!(matches!(kinds[0], TokenKind::Integer(_)));
        assert!(matches!(kinds[1], TokenKind::Dot));
    }

    #[test]
    fn lexes_string_with_escapes() {
        let mut interner = StringInterner::new();
        let mut lexer = Lexer::new(b"\"hello\\nworld\"", &mut interner);
        let token = lexer.next_token().unwrap();
        match token.kind {
            TokenKind::StringLiteral(r) => assert_eq!(interner.resolve(r), "hello\nworld"),
            other => panic!("expected StringLiteral, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_string_errors() {
        let mut interner = StringInterner::new();
        let mut lexer = Lexer::new(b"\"hello", &mut interner);
        assert!(matches!(lexer.next_token(), Err(LexError::UnterminatedString { .. })));
    }

    #[test]
    fn lexes_datatype_marker_and_langtag() {
        let kinds = lex_all("\"5\"^^<http://www.w3.org/2001/XMLSchema#integer>");
        assert!(matches!(kinds[0], TokenKind::StringLiteral(_)));
        assert!(matches!(kinds[1], TokenKind::DatatypeMarker));
        assert!(matches!(kinds[2], TokenKind::Iri(_)));
    }

    #[test]
    fn skips_comments_and_whitespace() {
        let kinds = lex_all("# a comment\n  <http://ex/a>  # trailing\n.");
        assert!(matches!(kinds[0], TokenKind::Iri(_)));
        assert!(matches!(kinds[1], TokenKind::Dot));
    }

    #[test]
    fn lexes_collection_and_blank_node_property_delimiters() {
        let kinds = lex_all("( [ ] )");
        assert!(matches!(kinds[0], TokenKind::LParen));
        assert!(matches!(kinds[1], TokenKind::LBracket));
        assert!(matches!(kinds[2], TokenKind::RBracket));
        assert!(matches!(kinds[3], TokenKind::RParen));
    }

    #[test]
    fn unknown_character_errors() {
        let mut interner = StringInterner::new();
        let mut lexer = Lexer::new(b"$", &mut interner);
        assert!(matches!(lexer.next_token(), Err(LexError::UnknownChar { ch: '$', .. })));
    }
}
