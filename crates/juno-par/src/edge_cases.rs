//! End-to-end and edge case tests for juno-par.
