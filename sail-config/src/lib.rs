//! Combination registry for the go-sail project generator.
//!
//! The registry maps framework names to template repositories and
//! `(database, ORM)` pairs to the metadata needed to wire them together in
//! generated Go code. It is loaded once from YAML, validated, and read-only
//! afterwards.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod model;
mod registry;
mod validate;

pub use error::{Error, Result, SourceContext};
pub use model::{CombinationConfig, DatabaseConfig, OrmConfig};
pub use registry::{BUNDLED_CONFIG, Registry, RegistryBuilder};
pub use validate::DSN_PLACEHOLDERS;
