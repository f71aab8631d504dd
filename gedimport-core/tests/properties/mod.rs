//! Property-based tests for gedimport core library

mod adapter_tests;
mod family_index_tests;
