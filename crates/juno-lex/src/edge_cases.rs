//! Edge case tests for juno-lex.
