//! Integration tests for the import dialog
//!
//! These tests parse real GEDCOM files from a temporary directory and drive
//! the adapter with a scripted dialog.

pub mod adapter_tests;
pub mod settings_tests;
