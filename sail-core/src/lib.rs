//! Core utilities and types for the go-sail project generator.
//!
//! This crate provides the file writing primitives and Go string helpers
//! shared by the configuration, code generation and CLI crates.

mod file;
mod utils;

// File operations
pub use file::{FileRules, GeneratedFile, RenderError, WriteError, WriteResult};
// String utilities
pub use utils::{count_format_verbs, go_quote};
