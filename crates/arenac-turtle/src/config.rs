//! Parser behavior knobs.

/// Configures how permissive and how thorough a [`crate::parser::Parser`] is.
///
/// `build_ast` and `incremental` describe modes this single-pass,
/// streams-into-the-graph parser does not implement (there is no AST to
/// build, and feeding it one statement at a time is already how
/// [`crate::parser::Parser::parse_all`] works internally); they are kept in
/// the config surface for parity with the other components' configs and
/// reserved for a future incremental-reparse entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Reject constructs the closed grammar subset merely tolerates
    /// elsewhere (currently: unknown prefix, not yet used by the parser).
    pub strict: bool,
    /// Reserved: whether to additionally build an AST rather than stream
    /// straight into the graph.
    pub build_ast: bool,
    /// Reserved: whether the caller drives parsing one statement at a time.
    pub incremental: bool,
    /// Whether `#`-comments are skipped by the lexer (always true today;
    /// the grammar has no mode where comments are significant).
    pub skip_comments: bool,
    /// Whether inter-token whitespace is skipped by the lexer (always true
    /// today, for the same reason as `skip_comments`).
    pub skip_whitespace: bool,
    /// Whether IRIs are validated against RFC 3987 grammar at parse time,
    /// rather than accepted as opaque byte strings.
    pub validate_iris: bool,
    /// When true, [`crate::parser::Parser::parse_all_collecting`] continues
    /// past a statement-level error instead of stopping at the first one.
    pub collect_errors: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strict: false,
            build_ast: false,
            incremental: false,
            skip_comments: true,
            skip_whitespace: true,
            validate_iris: false,
            collect_errors: false,
        }
    }
}
