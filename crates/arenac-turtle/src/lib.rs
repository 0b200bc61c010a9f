//! Single-pass Turtle-subset parser streaming triples directly into an
//! [`arenac_graph::Graph`].
//!
//! This crate has no AST: [`lexer::Lexer`] tokenizes, and [`parser::Parser`]
//! drives the lexer and calls `Graph::insert_triple` as each statement
//! completes, so memory use is bounded by the target graph's capacity, not
//! by the size of the source document.
//!
//! # Modules
//!
//! - [`span`] - source location tracking
//! - [`token`] - lexical token types
//! - [`error`] - lex/parse error types
//! - [`keywords`] - the grammar's one bareword keyword and its booleans
//! - [`lexer`] - the tokenizer
//! - [`parser`] - the triple-streaming parser
//! - [`diagnostic`] - source-highlighted error reporting
//! - [`config`] - parser behavior knobs
//!
//! # Examples
//!
//! ```
//! use arenac_graph::Graph;
//! use arenac_turtle::parser::parse_str;
//!
//! let mut graph = Graph::new();
//! let source = "@prefix ex: <http://example.org/> .\nex:alice ex:knows ex:bob .";
//! let inserted = parse_str(source, &mut graph).unwrap();
//! assert_eq!(inserted, 1);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod keywords;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;

pub use config::ParserConfig;
pub use error::{LexError, LexResult, ParseError, ParseResult, TurtleError, TurtleResult};
pub use lexer::Lexer;
pub use parser::{parse_str, Parser};
pub use span::{LineCol, Span, Spanned};
pub use token::{Token, TokenKind};
