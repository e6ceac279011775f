//! Edge case tests for io-parse
