//! juno-util - Core Utilities and Foundation Types
//!
//! Foundation crate for the Juno front end. Everything here is agnostic of
//! the language being parsed: source positions and spans, the diagnostic
//! infrastructure (handler, builder, caret snippets), and the global string
//! interner used for identifier and literal values.
//!
//! # Modules
//!
//! - [`span`] - [`Position`], [`Span`] and [`SourceText`] for source
//!   location tracking. Lines and columns are 0-indexed; spans are
//!   half-open byte ranges (start inclusive, end exclusive).
//! - [`diagnostic`] - [`Handler`], [`Diagnostic`], [`DiagnosticBuilder`]
//!   and [`SourceSnippet`]. The handler is a side channel: the lexer and
//!   parser report fatal failures through typed errors, and mirror
//!   human-readable diagnostics (source line plus caret row) here.
//! - [`symbol`] - [`Symbol`], a 4-byte handle into a global, thread-safe
//!   string table. Identifier names and string literal values are interned
//!   so that comparison is an integer comparison.

pub mod diagnostic;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level, SourceSnippet};
pub use span::{Position, SourceText, Span};
pub use symbol::Symbol;

// Re-export commonly used hash collections
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
