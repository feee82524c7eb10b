//! Code generation building blocks.
//!
//! - [`CodeBuilder`] - Fluent API for building indented code
//! - [`GoFile`] - Package clause, import block and body composition
//! - [`Indent`] - Indentation configuration

mod code_builder;
mod go_file;
mod indent;

pub use code_builder::CodeBuilder;
pub use go_file::GoFile;
pub use indent::Indent;
