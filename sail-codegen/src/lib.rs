//! Database wiring generation for go-sail projects.
//!
//! Given a [`Registry`](gosail_config::Registry) and a `(database, orm)`
//! pair, this crate resolves a [`Provider`] and renders the two Go files
//! that connect to the database and run migrations.
//!
//! # Module Organization
//!
//! - [`builder`] - Go source building blocks (CodeBuilder, GoFile)
//! - [`files`] - The generated files (database.go, migrations.go)
//! - [`populate()`] - The orchestrator the CLI calls

pub mod builder;
pub mod files;
mod generate;
mod imports;
mod populate;
mod provider;
mod resolve;

pub use generate::{GenerateError, generate_connection_file, generate_migration_file};
pub use imports::ImportCollector;
pub use populate::{
    ErrorKind, INITIALIZERS_DIR, PopulateError, PopulateOutcome, Stage, generate, populate,
};
pub use provider::{CombinationProvider, DB_VARIABLE, PLACEHOLDER_CREDENTIALS, Provider};
pub use resolve::{ResolveError, resolve};
