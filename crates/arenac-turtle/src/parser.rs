//! Single-pass Turtle parser: tokens stream straight into an
//! [`arenac_graph::Graph`], with no intermediate AST.
//!
//! The parser is a small recursive-descent state machine over
//! [`crate::lexer::Lexer`]'s token stream. It tracks exactly the state the
//! grammar needs between triples: the `@prefix` bindings in scope, the
//! current `@base`, and a counter for synthesizing blank node labels for
//! anonymous nodes (`[...]`) and collections (`(...)`).
//!
//! # Examples
//!
//! ```
//! use arenac_graph::Graph;
//! use arenac_turtle::parser::parse_str;
//!
//! let mut graph = Graph::new();
//! let source = "@prefix ex: <http://example.org/> .\nex:alice a ex:Person .";
//! let inserted = parse_str(source, &mut graph).unwrap();
//! assert_eq!(inserted, 1);
//! ```

use std::collections::HashMap;

use arenac_graph::{Graph, ObjectKind};
use arenac_mem::StringRef;

use crate::config::ParserConfig;
use crate::error::{ParseError, TurtleError, TurtleResult};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const RDF_FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
const RDF_REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
const RDF_NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";

#[derive(Debug, Clone, Copy)]
struct ParsedTerm {
    text: StringRef,
    kind: ObjectKind,
}

/// Parses `source` as Turtle, inserting every triple it describes into
/// `graph`, and returns the number of triples inserted.
///
/// # Errors
///
/// Returns the first [`TurtleError`] encountered; triples parsed before it
/// have already been inserted into `graph`.
pub fn parse_str(source: &str, graph: &mut Graph) -> TurtleResult<usize> {
    let mut parser = Parser::new(source.as_bytes(), graph)?;
    parser.parse_all()
}

/// A single-pass Turtle parser bound to one source buffer and one target
/// graph.
pub struct Parser<'a> {
    lexer: Lexer<'a, Graph>,
    current: Token,
    prefixes: HashMap<String, String>,
    base: Option<String>,
    blank_counter: u64,
    config: ParserConfig,
}

impl<'a> Parser<'a> {
    /// Builds a parser over `source`, streaming into `graph`, with the
    /// default [`ParserConfig`].
    ///
    /// # Errors
    ///
    /// Returns a [`TurtleError`] if the very first token cannot be scanned.
    pub fn new(source: &'a [u8], graph: &'a mut Graph) -> TurtleResult<Self> {
        Self::with_config(source, graph, ParserConfig::default())
    }

    /// Builds a parser over `source`, streaming into `graph`, under `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`TurtleError`] if the very first token cannot be scanned.
    pub fn with_config(source: &'a [u8], graph: &'a mut Graph, config: ParserConfig) -> TurtleResult<Self> {
        let mut lexer = Lexer::new(source, graph);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current, prefixes: HashMap::new(), base: None, blank_counter: 0, config })
    }

    /// The configuration this parser was built with.
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses every statement in the source, returning the number of
    /// triples inserted.
    ///
    /// # Errors
    ///
    /// Returns the first [`TurtleError`] encountered.
    pub fn parse_all(&mut self) -> TurtleResult<usize> {
        let mut count = 0;
        loop {
            match self.current.kind {
                TokenKind::Eof => break,
                TokenKind::PrefixDirective => self.parse_prefix_directive()?,
                TokenKind::BaseDirective => self.parse_base_directive()?,
                _ => count += self.parse_triples()?,
            }
        }
        Ok(count)
    }

    /// Parses every statement, continuing past a statement-level error when
    /// `config().collect_errors` is set, rather than stopping at the first
    /// one. Recovery resynchronizes at the next `.` so one bad statement
    /// does not desync the rest of the document.
    ///
    /// Returns the number of triples inserted and every error encountered
    /// (empty if the document was well-formed, or always of length <= 1
    /// when `collect_errors` is false).
    pub fn parse_all_collecting(&mut self) -> (usize, Vec<TurtleError>) {
        if !self.config.collect_errors {
            return match self.parse_all() {
                Ok(count) => (count, Vec::new()),
                Err(e) => (0, vec![e]),
            };
        }

        let mut count = 0;
        let mut errors = Vec::new();
        loop {
            let result = match self.current.kind {
                TokenKind::Eof => break,
                TokenKind::PrefixDirective => self.parse_prefix_directive(),
                TokenKind::BaseDirective => self.parse_base_directive(),
                _ => self.parse_triples().map(|n| count += n),
            };
            if let Err(e) = result {
                errors.push(e);
                if !self.resync_to_next_statement() {
                    break;
                }
            }
        }
        (count, errors)
    }

    /// Skips tokens until just past the next `.`, or EOF; used to recover
    /// after a statement-level parse error. Returns false once EOF is
    /// reached without finding one.
    fn resync_to_next_statement(&mut self) -> bool {
        loop {
            match self.current.kind {
                TokenKind::Eof => return false,
                TokenKind::Dot => {
                    let _ = self.advance();
                    return true;
                }
                _ => {
                    if self.advance().is_err() {
                        return false;
                    }
                }
            }
        }
    }

    fn graph_mut(&mut self) -> &mut Graph {
        self.lexer.interner_mut()
    }

    fn resolve_text(&self, r: StringRef) -> String {
        self.lexer.interner_ref().resolve(r).to_owned()
    }

    fn advance(&mut self) -> TurtleResult<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn expect_dot(&mut self) -> TurtleResult<()> {
        if matches!(self.current.kind, TokenKind::Dot) {
            self.advance()?;
            Ok(())
        } else {
            Err(ParseError::MissingDot { span: self.current.span }.into())
        }
    }

    fn unexpected(&self, expected: &str) -> TurtleError {
        ParseError::UnexpectedToken {
            expected: expected.to_owned(),
            found: self.current.kind.to_string(),
            span: self.current.span,
        }
        .into()
    }

    fn parse_prefix_directive(&mut self) -> TurtleResult<()> {
        self.advance()?; // '@prefix'
        let label = match self.current.kind {
            TokenKind::PrefixedName { prefix, .. } => match prefix {
                Some(r) => self.resolve_text(r),
                None => String::new(),
            },
            _ => return Err(self.unexpected("prefix label (e.g. 'ex:')")),
        };
        self.advance()?; // the "label:" token
        let namespace = match self.current.kind {
            TokenKind::Iri(r) => self.resolve_text(r),
            _ => return Err(self.unexpected("namespace IRI")),
        };
        self.advance()?; // the namespace IRI
        self.prefixes.insert(label, namespace);
        self.expect_dot()
    }

    fn parse_base_directive(&mut self) -> TurtleResult<()> {
        self.advance()?; // '@base'
        let iri = match self.current.kind {
            TokenKind::Iri(r) => self.resolve_text(r),
            _ => return Err(self.unexpected("base IRI")),
        };
        self.advance()?; // the base IRI
        self.base = Some(iri);
        self.expect_dot()
    }

    fn parse_triples(&mut self) -> TurtleResult<usize> {
        let (subject, mut count) = self.parse_term(false)?;
        if !matches!(self.current.kind, TokenKind::Dot) {
            count += self.parse_predicate_object_list(subject)?;
        }
        self.expect_dot()?;
        Ok(count)
    }

    fn parse_predicate_object_list(&mut self, subject: ParsedTerm) -> TurtleResult<usize> {
        let mut count = 0;
        loop {
            let predicate = self.parse_predicate()?;
            count += self.parse_object_list(subject, predicate)?;
            if matches!(self.current.kind, TokenKind::Semicolon) {
                self.advance()?;
                if matches!(self.current.kind, TokenKind::Dot | TokenKind::RBracket | TokenKind::RParen) {
                    break;
                }
                continue;
            }
            break;
        }
        Ok(count)
    }

    fn parse_object_list(&mut self, subject: ParsedTerm, predicate: StringRef) -> TurtleResult<usize> {
        let mut count = 0;
        loop {
            let (object, inner) = self.parse_term(true)?;
            count += inner;
            self.graph_mut().insert_triple(subject.text, predicate, object.text, object.kind)?;
            count += 1;
            if matches!(self.current.kind, TokenKind::Comma) {
                self.advance()?;
                continue;
            }
            break;
        }
        Ok(count)
    }

    fn parse_predicate(&mut self) -> TurtleResult<StringRef> {
        match self.current.kind {
            TokenKind::A => {
                self.advance()?;
                Ok(self.graph_mut().intern(RDF_TYPE))
            }
            TokenKind::Iri(r) => {
                let text = self.resolve_iri_ref(r);
                self.advance()?;
                Ok(self.graph_mut().intern(&text))
            }
            TokenKind::PrefixedName { prefix, local } => {
                let text = self.resolve_prefixed_name(prefix, local)?;
                self.advance()?;
                Ok(self.graph_mut().intern(&text))
            }
            _ => Err(self.unexpected("predicate (IRI, prefixed name, or 'a')")),
        }
    }

    /// Parses one RDF term. `allow_literal` gates the four literal token
    /// kinds, which are only valid in object position.
    fn parse_term(&mut self, allow_literal: bool) -> TurtleResult<(ParsedTerm, usize)> {
        match self.current.kind {
            TokenKind::Iri(r) => {
                let text = self.resolve_iri_ref(r);
                self.advance()?;
                let full = self.graph_mut().intern(&text);
                Ok((ParsedTerm { text: full, kind: ObjectKind::Iri }, 0))
            }
            TokenKind::PrefixedName { prefix, local } => {
                let text = self.resolve_prefixed_name(prefix, local)?;
                self.advance()?;
                let full = self.graph_mut().intern(&text);
                Ok((ParsedTerm { text: full, kind: ObjectKind::Iri }, 0))
            }
            TokenKind::BlankNode(r) => {
                let label = self.resolve_text(r);
                self.advance()?;
                let full = self.graph_mut().intern(&format!("_:{label}"));
                Ok((ParsedTerm { text: full, kind: ObjectKind::Blank }, 0))
            }
            TokenKind::LBracket => self.parse_blank_node_property_list(),
            TokenKind::LParen => self.parse_collection(),
            TokenKind::StringLiteral(r) if allow_literal => {
                let lexical = self.resolve_text(r);
                self.advance()?;
                if matches!(self.current.kind, TokenKind::LangTag(_)) {
                    self.advance()?;
                } else if matches!(self.current.kind, TokenKind::DatatypeMarker) {
                    self.advance()?;
                    self.parse_datatype_iri()?;
                }
                let full = self.graph_mut().intern(&lexical);
                Ok((ParsedTerm { text: full, kind: ObjectKind::Literal }, 0))
            }
            TokenKind::Integer(r) | TokenKind::Decimal(r) | TokenKind::Double(r) if allow_literal => {
                self.advance()?;
                Ok((ParsedTerm { text: r, kind: ObjectKind::Literal }, 0))
            }
            TokenKind::Boolean(value) if allow_literal => {
                self.advance()?;
                let full = self.graph_mut().intern(if value { "true" } else { "false" });
                Ok((ParsedTerm { text: full, kind: ObjectKind::Literal }, 0))
            }
            _ => Err(self.unexpected(if allow_literal { "term or literal" } else { "term" })),
        }
    }

    fn parse_datatype_iri(&mut self) -> TurtleResult<()> {
        match self.current.kind {
            TokenKind::Iri(_) => {
                self.advance()?;
                Ok(())
            }
            TokenKind::PrefixedName { prefix, local } => {
                self.resolve_prefixed_name(prefix, local)?;
                self.advance()?;
                Ok(())
            }
            _ => Err(self.unexpected("datatype IRI")),
        }
    }

    fn parse_blank_node_property_list(&mut self) -> TurtleResult<(ParsedTerm, usize)> {
        let opened_at = self.current.span;
        self.advance()?; // '['
        let term = self.fresh_blank_term();
        if matches!(self.current.kind, TokenKind::RBracket) {
            self.advance()?;
            return Ok((term, 0));
        }
        let count = self.parse_predicate_object_list(term)?;
        match self.current.kind {
            TokenKind::RBracket => {
                self.advance()?;
                Ok((term, count))
            }
            _ => Err(ParseError::UnclosedDelimiter { delimiter: ']', opened_at }.into()),
        }
    }

    fn parse_collection(&mut self) -> TurtleResult<(ParsedTerm, usize)> {
        let opened_at = self.current.span;
        self.advance()?; // '('
        if matches!(self.current.kind, TokenKind::RParen) {
            self.advance()?;
            return Ok((self.rdf_nil_term(), 0));
        }

        let mut count = 0;
        let mut items = Vec::new();
        loop {
            if matches!(self.current.kind, TokenKind::Eof) {
                return Err(ParseError::UnclosedDelimiter { delimiter: ')', opened_at }.into());
            }
            let (item, inner) = self.parse_term(true)?;
            count += inner;
            items.push(item);
            if matches!(self.current.kind, TokenKind::RParen) {
                break;
            }
        }
        self.advance()?; // ')'

        let rdf_first = self.graph_mut().intern(RDF_FIRST);
        let rdf_rest = self.graph_mut().intern(RDF_REST);
        let nil = self.rdf_nil_term();

        let mut next_cell: Option<ParsedTerm> = None;
        for item in items.into_iter().rev() {
            let cell = self.fresh_blank_term();
            self.graph_mut().insert_triple(cell.text, rdf_first, item.text, item.kind)?;
            count += 1;
            let rest = next_cell.take().unwrap_or(nil);
            self.graph_mut().insert_triple(cell.text, rdf_rest, rest.text, rest.kind)?;
            count += 1;
            next_cell = Some(cell);
        }
        Ok((next_cell.unwrap_or(nil), count))
    }

    fn fresh_blank_term(&mut self) -> ParsedTerm {
        let label = self.blank_counter;
        self.blank_counter += 1;
        let full = self.graph_mut().intern(&format!("_:anon{label}"));
        ParsedTerm { text: full, kind: ObjectKind::Blank }
    }

    fn rdf_nil_term(&mut self) -> ParsedTerm {
        ParsedTerm { text: self.graph_mut().intern(RDF_NIL), kind: ObjectKind::Iri }
    }

    fn resolve_prefixed_name(&mut self, prefix: Option<StringRef>, local: StringRef) -> TurtleResult<String> {
        let label = match prefix {
            Some(r) => self.resolve_text(r),
            None => String::new(),
        };
        let local_text = self.resolve_text(local);
        let span = self.current.span;
        let namespace = self
            .prefixes
            .get(&label)
            .cloned()
            .ok_or(ParseError::UnresolvedPrefix { prefix: label, span })?;
        Ok(format!("{namespace}{local_text}"))
    }

    fn resolve_iri_ref(&self, r: StringRef) -> String {
        let text = self.resolve_text(r);
        if has_scheme(&text) {
            return text;
        }
        match &self.base {
            Some(base) => join_iri(base, &text),
            None => text,
        }
    }
}

fn has_scheme(text: &str) -> bool {
    match text.find(':') {
        Some(idx) if idx > 0 => {
            text[..idx].chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

fn join_iri(base: &str, relative: &str) -> String {
    if relative.is_empty() {
        return base.to_owned();
    }
    if let Some(stripped) = relative.strip_prefix('#') {
        let root = base.split('#').next().unwrap_or(base);
        return format!("{root}#{stripped}");
    }
    let scheme_end = base.find("://").map_or(0, |idx| idx + 3);
    let root = match base[scheme_end..].find('/') {
        Some(idx) => &base[..scheme_end + idx + 1],
        None => base,
    };
    format!("{root}{relative}")
}
