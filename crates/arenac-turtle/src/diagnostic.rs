//! Diagnostic and error reporting for the Turtle frontend.
//!
//! Rust-compiler-style error reporting with source highlighting, error
//! codes, and suggestions, built on top of [`crate::error::TurtleError`].

use crate::error::{LexError, ParseError, TurtleError};
use crate::span::Span;
use std::fmt;

/// A diagnostic message (error, warning, note, or help).
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Diagnostic level.
    pub level: DiagnosticLevel,
    /// Error code (e.g., "E0001").
    pub code: Option<String>,
    /// Primary message.
    pub message: String,
    /// Source span.
    pub span: Span,
    /// Optional suggestions.
    pub suggestions: Vec<String>,
    /// Related notes.
    pub notes: Vec<DiagnosticNote>,
}

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// Parsing cannot continue.
    Error,
    /// Suspicious input, parsing continues.
    Warning,
    /// Additional information.
    Note,
    /// A suggested fix.
    Help,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Note => write!(f, "note"),
            Self::Help => write!(f, "help"),
        }
    }
}

impl DiagnosticLevel {
    /// Returns the ANSI color code for this level.
    #[must_use]
    pub const fn color_code(&self) -> &'static str {
        match self {
            Self::Error => "\x1b[31m",
            Self::Warning => "\x1b[33m",
            Self::Note => "\x1b[36m",
            Self::Help => "\x1b[32m",
        }
    }

    /// Returns the reset ANSI code.
    #[must_use]
    pub const fn reset_code() -> &'static str {
        "\x1b[0m"
    }

    /// Formats this level with colors if enabled.
    #[must_use]
    pub fn format_colored(&self, use_colors: bool) -> String {
        if use_colors {
            format!("{}{}{}", self.color_code(), self, Self::reset_code())
        } else {
            format!("{self}")
        }
    }
}

/// A note attached to a diagnostic.
#[derive(Debug, Clone)]
pub struct DiagnosticNote {
    /// Note message.
    pub message: String,
    /// Source span.
    pub span: Span,
}

/// Builder for creating diagnostics.
pub struct DiagnosticBuilder {
    diagnostic: Diagnostic,
}

impl DiagnosticBuilder {
    /// Creates a new diagnostic builder.
    #[must_use]
    pub fn new(level: DiagnosticLevel, message: String, span: Span) -> Self {
        Self { diagnostic: Diagnostic { level, code: None, message, span, suggestions: Vec::new(), notes: Vec::new() } }
    }

    /// Adds an error code to the diagnostic.
    #[must_use]
    pub fn code(mut self, code: String) -> Self {
        self.diagnostic.code = Some(code);
        self
    }

    /// Adds a suggestion to the diagnostic.
    #[must_use]
    pub fn suggest(mut self, suggestion: String) -> Self {
        self.diagnostic.suggestions.push(suggestion);
        self
    }

    /// Adds a note to the diagnostic.
    #[must_use]
    pub fn note(mut self, message: String, span: Span) -> Self {
        self.diagnostic.notes.push(DiagnosticNote { message, span });
        self
    }

    /// Builds the diagnostic.
    #[must_use]
    pub fn build(self) -> Diagnostic {
        self.diagnostic
    }
}

/// Formats and prints diagnostics with source highlighting.
pub struct Emitter {
    use_colors: bool,
}

impl Emitter {
    /// Creates a new diagnostic emitter.
    #[must_use]
    pub const fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Emits a diagnostic with source highlighting.
    pub fn emit(&self, diagnostic: &Diagnostic, source: &str) {
        let span = diagnostic.span;
        let level_str = diagnostic.level.format_colored(self.use_colors);
        println!("{}:{}: {}: {}", span.start_line, span.start_col, level_str, diagnostic.message);

        if let Some(code) = &diagnostic.code {
            println!("   [{code}]");
        }

        self.emit_source_highlight(diagnostic.level, span, source);

        for suggestion in &diagnostic.suggestions {
            let help_prefix = DiagnosticLevel::Help.format_colored(self.use_colors);
            println!("   {help_prefix}: {suggestion}");
        }

        for note in &diagnostic.notes {
            let note_prefix = DiagnosticLevel::Note.format_colored(self.use_colors);
            println!("   {} at {}:{}: {}", note_prefix, note.span.start_line, note.span.start_col, note.message);
        }
    }

    fn emit_source_highlight(&self, level: DiagnosticLevel, span: Span, source: &str) {
        let lines: Vec<&str> = source.lines().collect();
        if lines.is_empty() {
            return;
        }

        let start_line = span.start_line.saturating_sub(1).min(lines.len() - 1);
        let end_line = span.end_line.saturating_sub(1).min(lines.len() - 1);

        for line_idx in start_line..=end_line {
            let line_num = line_idx + 1;
            let line: &str = lines[line_idx];
            println!("{line_num:4} | {line}");

            let line_start = if line_idx == start_line { span.start_col } else { 1 };
            let line_end = if line_idx == end_line { span.end_col } else { line.len() + 1 };

            let indent = line_start.saturating_sub(1);
            let width = line_end.saturating_sub(line_start);

            if width > 0 {
                let underline = if self.use_colors {
                    format!("{}{}{}", " ".repeat(indent + 6), level.color_code(), "^".repeat(width) + DiagnosticLevel::reset_code())
                } else {
                    format!("{}{}", " ".repeat(indent + 6), "^".repeat(width))
                };
                println!("     | {underline}");
            }
        }
    }

    /// Emits a [`TurtleError`] as a diagnostic.
    pub fn emit_turtle_error(&self, error: &TurtleError, source: &str) {
        let diagnostic = DiagnosticBuilder::new(DiagnosticLevel::Error, format!("{error}"), error.span()).build();
        self.emit(&diagnostic, source);
    }

    /// Emits a [`LexError`] as a diagnostic.
    pub fn emit_lex_error(&self, error: &LexError, source: &str) {
        let diagnostic = DiagnosticBuilder::new(DiagnosticLevel::Error, format!("{error}"), error.span()).build();
        self.emit(&diagnostic, source);
    }

    /// Emits a [`ParseError`] as a diagnostic.
    pub fn emit_parse_error(&self, error: &ParseError, source: &str) {
        let diagnostic = DiagnosticBuilder::new(DiagnosticLevel::Error, format!("{error}"), error.span()).build();
        self.emit(&diagnostic, source);
    }
}
