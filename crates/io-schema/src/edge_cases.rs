//! Edge case tests for io-schema
