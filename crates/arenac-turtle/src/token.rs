//! Lexical tokens for the Turtle-subset grammar in the external-interfaces
//! spec.
//!
//! Every token that carries text (IRIs, prefixed names, blank node labels,
//! literals) stores an [`arenac_mem::StringRef`] rather than an owned
//! `String`: the lexer interns as it scans, so a token is never more than a
//! handle plus a [`Span`].
//!
//! # Examples
//!
//! ```
//! use arenac_turtle::token::{Token, TokenKind};
//! use arenac_turtle::span::Span;
//! use arenac_mem::StringInterner;
//!
//! let mut interner = StringInterner::new();
//! let iri = interner.intern("http://example.org/Alice");
//! let token = Token::new(TokenKind::Iri(iri), Span::new(0, 26, 1, 1, 1, 27));
//! assert!(token.is_term());
//! ```

use crate::span::{Span, Spanned};
use arenac_mem::StringRef;
use std::fmt;

/// The kind of a Turtle token.
///
/// Variants map directly onto the closed grammar enumerated in the spec's
/// external-interfaces section: directives, the four term forms, the four
/// literal forms, punctuation, and the `a` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `@prefix`
    PrefixDirective,
    /// `@base`
    BaseDirective,

    /// An absolute IRI written `<...>`. Base/relative resolution is the
    /// parser's job, since only the parser tracks the current base stack.
    Iri(StringRef),
    /// A prefixed name `prefix:local`. `prefix` is `None` for the default
    /// (empty-prefix) form `:local`.
    PrefixedName {
        /// The prefix label, or `None` for `:local`.
        prefix: Option<StringRef>,
        /// The local part after the colon.
        local: StringRef,
    },
    /// A labelled blank node `_:label`.
    BlankNode(StringRef),

    /// A double-quoted string's content, with escapes already resolved and
    /// the surrounding quotes stripped.
    StringLiteral(StringRef),
    /// `@lang` immediately following a [`TokenKind::StringLiteral`].
    LangTag(StringRef),
    /// An integer literal matching `[+-]?[0-9]+`.
    Integer(StringRef),
    /// A decimal literal matching `[+-]?[0-9]+\.[0-9]+`.
    Decimal(StringRef),
    /// A double literal with an exponent.
    Double(StringRef),
    /// `true` or `false`.
    Boolean(bool),

    /// The `a` keyword, aliasing `rdf:type`.
    A,

    /// `^^`, introducing a datatype IRI after a string literal.
    DatatypeMarker,
    /// `.`
    Dot,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `(`
    LParen,
    /// `)`
    RParen,

    /// End of input.
    Eof,
}

impl TokenKind {
    /// True for the four term-introducing kinds (IRI, prefixed name, blank
    /// node, and `a`, which stands in for the `rdf:type` IRI).
    #[must_use]
    pub const fn is_term(&self) -> bool {
        matches!(self, Self::Iri(_) | Self::PrefixedName { .. } | Self::BlankNode(_) | Self::A)
    }

    /// True for the four literal kinds.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::StringLiteral(_) | Self::Integer(_) | Self::Decimal(_) | Self::Double(_) | Self::Boolean(_)
        )
    }

    /// True for `.`, `;`, `,` and the four bracket/paren tokens.
    #[must_use]
    pub const fn is_punctuation(&self) -> bool {
        matches!(
            self,
            Self::Dot
                | Self::Semicolon
                | Self::Comma
                | Self::LBracket
                | Self::RBracket
                | Self::LParen
                | Self::RParen
                | Self::DatatypeMarker
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrefixDirective => write!(f, "@prefix"),
            Self::BaseDirective => write!(f, "@base"),
            Self::Iri(r) => write!(f, "<IRI:{r}>"),
            Self::PrefixedName { local, .. } => write!(f, "prefixed-name:{local}"),
            Self::BlankNode(r) => write!(f, "_:{r}"),
            Self::StringLiteral(r) => write!(f, "string:{r}"),
            Self::LangTag(r) => write!(f, "@{r}"),
            Self::Integer(r) => write!(f, "integer:{r}"),
            Self::Decimal(r) => write!(f, "decimal:{r}"),
            Self::Double(r) => write!(f, "double:{r}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::A => write!(f, "a"),
            Self::DatatypeMarker => write!(f, "^^"),
            Self::Dot => write!(f, "."),
            Self::Semicolon => write!(f, ";"),
            Self::Comma => write!(f, ","),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Eof => write!(f, "<eof>"),
        }
    }
}

/// A lexical token: a [`TokenKind`] plus the [`Span`] it was scanned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Where in the source this token was scanned from.
    pub span: Span,
}

impl Token {
    /// Builds a token from a kind and span.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Convenience delegate to [`TokenKind::is_term`].
    #[must_use]
    pub const fn is_term(&self) -> bool {
        self.kind.is_term()
    }

    /// Convenience delegate to [`TokenKind::is_literal`].
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        self.kind.is_literal()
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}
