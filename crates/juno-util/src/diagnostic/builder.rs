//! Diagnostic builder for fluent diagnostic construction.
//!
//! This module provides the [`DiagnosticBuilder`] type for constructing
//! diagnostics with a fluent API, and [`SourceSnippet`], which renders the
//! two-line source pointer (the offending line followed by a caret row)
//! used by the parser's diagnostics.

use super::{Diagnostic, Level};
use crate::span::{Position, Span};

/// A source code snippet for display in diagnostics.
///
/// Contains one source line together with the highlighted column range.
/// Rendering produces the line followed by a `^` caret row beneath it.
///
/// # Examples
///
/// ```
/// use juno_util::diagnostic::SourceSnippet;
///
/// let snippet = SourceSnippet::new("var x = ;", 0, 8, 9, Some("here"));
/// let rendered = snippet.format();
/// assert!(rendered.contains("var x = ;"));
/// assert!(rendered.contains('^'));
/// ```
#[derive(Clone, Debug)]
pub struct SourceSnippet {
    /// The source line content.
    pub line: String,
    /// Line number (0-indexed; displayed 1-indexed).
    pub line_number: usize,
    /// Column where the highlight starts (0-indexed).
    pub start_column: usize,
    /// Column where the highlight ends (0-indexed, exclusive).
    pub end_column: usize,
    /// Optional label to display after the caret row.
    pub label: Option<String>,
}

impl SourceSnippet {
    /// Create a new source snippet.
    pub fn new(
        line: impl Into<String>,
        line_number: usize,
        start_column: usize,
        end_column: usize,
        label: Option<impl Into<String>>,
    ) -> Self {
        Self {
            line: line.into(),
            line_number,
            start_column,
            end_column,
            label: label.map(Into::into),
        }
    }

    /// Create a snippet highlighting a single column.
    pub fn point(line: impl Into<String>, line_number: usize, column: usize) -> Self {
        Self {
            line: line.into(),
            line_number,
            start_column: column,
            end_column: column,
            label: None,
        }
    }

    /// Create a snippet highlighting `len` columns starting at `pos`.
    ///
    /// The snippet takes its line and column from the position; callers
    /// provide the line text.
    pub fn at(line: impl Into<String>, pos: Position, len: usize) -> Self {
        let column = pos.column as usize;
        Self {
            line: line.into(),
            line_number: pos.line as usize,
            start_column: column,
            end_column: column + len,
            label: None,
        }
    }

    /// Set the label for this snippet.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Format the snippet for display.
    ///
    /// Returns the source line on the first line and a caret row pointing
    /// at the highlighted range on the second:
    ///
    /// ```text
    ///   1 | var x = ;
    ///     |         ^
    /// ```
    pub fn format(&self) -> String {
        let display_line = self.line_number + 1;
        let line_num_width = display_line.to_string().len().max(3);
        let mut result = String::new();

        result.push_str(&format!(
            "{:>width$} | {}\n",
            display_line,
            self.line,
            width = line_num_width
        ));

        result.push_str(&format!("{:>width$} | ", "", width = line_num_width));

        let underline_len = (self.end_column - self.start_column).max(1);
        for _ in 0..self.start_column {
            result.push(' ');
        }
        for _ in 0..underline_len {
            result.push('^');
        }

        if let Some(ref label) = self.label {
            result.push_str(&format!(" {}", label));
        }

        result
    }
}

/// Builder for constructing diagnostics with a fluent API.
///
/// # Examples
///
/// ```
/// use juno_util::diagnostic::DiagnosticBuilder;
/// use juno_util::span::Span;
///
/// let diag = DiagnosticBuilder::error("unexpected token")
///     .span(Span::DUMMY)
///     .help("try removing the extra character")
///     .build();
/// ```
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    span: Span,
    notes: Vec<String>,
    helps: Vec<String>,
    snippets: Vec<SourceSnippet>,
}

impl DiagnosticBuilder {
    /// Create a new diagnostic builder.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            span: Span::DUMMY,
            notes: Vec::new(),
            helps: Vec::new(),
            snippets: Vec::new(),
        }
    }

    /// Create an error builder.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    /// Create a warning builder.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    /// Set the source span.
    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Add a note to the diagnostic.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add a help suggestion to the diagnostic.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.helps.push(help.into());
        self
    }

    /// Add a source code snippet.
    pub fn snippet(mut self, snippet: SourceSnippet) -> Self {
        self.snippets.push(snippet);
        self
    }

    /// Build the diagnostic.
    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            message: self.message,
            span: self.span,
            notes: self.notes,
            helps: self.helps,
            snippets: self.snippets,
        }
    }

    /// Build and emit the diagnostic to the given handler.
    pub fn emit(self, handler: &super::Handler) {
        handler.emit_diagnostic(self.build());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_new() {
        let snippet = SourceSnippet::new("var x = 42", 0, 4, 5, Some("variable"));
        assert_eq!(snippet.line, "var x = 42");
        assert_eq!(snippet.line_number, 0);
        assert_eq!(snippet.start_column, 4);
        assert_eq!(snippet.end_column, 5);
        assert_eq!(snippet.label, Some("variable".to_string()));
    }

    #[test]
    fn test_snippet_point() {
        let snippet = SourceSnippet::point("var x = 42", 0, 4);
        assert_eq!(snippet.start_column, snippet.end_column);
        assert_eq!(snippet.label, None);
    }

    #[test]
    fn test_snippet_at() {
        let pos = Position::new(2, 4, 20);
        let snippet = SourceSnippet::at("var x = 42", pos, 3);
        assert_eq!(snippet.line_number, 2);
        assert_eq!(snippet.start_column, 4);
        assert_eq!(snippet.end_column, 7);
    }

    #[test]
    fn test_snippet_format_two_lines() {
        let snippet = SourceSnippet::new("var x = 42", 0, 4, 5, None::<String>);
        let formatted = snippet.format();
        let lines: Vec<&str> = formatted.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("var x = 42"));
        assert!(lines[1].ends_with('^'));
    }

    #[test]
    fn test_snippet_format_caret_position() {
        let snippet = SourceSnippet::new("abcdef", 0, 2, 4, None::<String>);
        let formatted = snippet.format();
        let caret_line = formatted.lines().nth(1).unwrap();
        // two carets under columns 2 and 3
        assert!(caret_line.ends_with("  ^^"));
    }

    #[test]
    fn test_snippet_format_label() {
        let snippet = SourceSnippet::new("abcdef", 0, 0, 1, Some("here"));
        assert!(snippet.format().ends_with("^ here"));
    }

    #[test]
    fn test_snippet_displays_one_indexed_line() {
        let snippet = SourceSnippet::point("abc", 0, 0);
        assert!(snippet.format().starts_with("  1 |"));
    }

    #[test]
    fn test_builder_fluent() {
        let diag = DiagnosticBuilder::error("unexpected token")
            .span(Span::DUMMY)
            .note("while parsing a statement")
            .help("try checking the syntax")
            .snippet(SourceSnippet::point("var", 0, 0))
            .build();

        assert_eq!(diag.level, Level::Error);
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.helps.len(), 1);
        assert_eq!(diag.snippets.len(), 1);
    }

    #[test]
    fn test_builder_emit() {
        use super::super::Handler;

        let handler = Handler::new();
        DiagnosticBuilder::error("test error")
            .span(Span::DUMMY)
            .emit(&handler);

        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
    }
}
