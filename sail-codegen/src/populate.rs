//! Generation orchestrator.
//!
//! [`populate`] is the single entry point the CLI uses to inject database
//! wiring into a freshly cloned project: resolve a provider, then write the
//! connection file and the migration file, in that order.

use std::{fmt, path::Path};

use gosail_config::Registry;
use gosail_core::{WriteError, WriteResult};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    Provider, ResolveError,
    generate::{GenerateError, generate_connection_file, generate_migration_file},
    resolve,
};

/// Directory, relative to the project root, that receives the generated files.
pub const INITIALIZERS_DIR: &str = "initializers";

/// The stages of a generation run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolve,
    DatabaseFile,
    MigrationFile,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Resolve => "resolve",
            Stage::DatabaseFile => "database file",
            Stage::MigrationFile => "migration file",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a successful [`populate`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopulateOutcome {
    /// No database or no ORM was selected; nothing was written.
    Skipped,
    /// Both files were written, connection file first.
    Generated(Vec<WriteResult>),
}

impl PopulateOutcome {
    pub fn files(&self) -> &[WriteResult] {
        match self {
            PopulateOutcome::Skipped => &[],
            PopulateOutcome::Generated(files) => files,
        }
    }
}

/// Broad class of a [`PopulateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Requested database, ORM or pairing is not registered.
    Configuration,
    /// A file could not be created or written.
    Io,
    /// Registry data could not be rendered into Go source.
    Template,
    /// The caller aborted the run.
    Cancelled,
}

/// Failure of a generation run, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum PopulateError {
    /// Never wrapped; test for it with [`PopulateError::is_cancelled`].
    #[error("operation cancelled")]
    Cancelled,

    #[error("error creating database provider")]
    Provider(#[source] ResolveError),

    #[error("error generating database file")]
    DatabaseFile(#[source] WriteError),

    #[error("error generating migration file")]
    MigrationFile(#[source] WriteError),
}

impl PopulateError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PopulateError::Cancelled)
    }

    /// The stage that failed, if any. Cancellation is not tied to a stage.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PopulateError::Cancelled => None,
            PopulateError::Provider(_) => Some(Stage::Resolve),
            PopulateError::DatabaseFile(_) => Some(Stage::DatabaseFile),
            PopulateError::MigrationFile(_) => Some(Stage::MigrationFile),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PopulateError::Cancelled => ErrorKind::Cancelled,
            PopulateError::Provider(_) => ErrorKind::Configuration,
            PopulateError::DatabaseFile(err) | PopulateError::MigrationFile(err) => match err {
                WriteError::Render { .. } => ErrorKind::Template,
                WriteError::Create { .. } | WriteError::Write { .. } => ErrorKind::Io,
            },
        }
    }

    fn from_generate(stage: Stage, err: GenerateError) -> Self {
        match (stage, err) {
            (_, GenerateError::Cancelled) => PopulateError::Cancelled,
            (Stage::MigrationFile, GenerateError::Write(err)) => PopulateError::MigrationFile(err),
            (_, GenerateError::Write(err)) => PopulateError::DatabaseFile(err),
        }
    }
}

/// Inject the database wiring for `(database, orm)` into `dir`.
///
/// A cancelled `token` fails even when there is nothing to generate. An
/// empty `database` or `orm` skips generation and succeeds. `dir` must
/// already exist. Files written before a failure are left in place; removing
/// the project is up to the caller.
pub fn populate(
    token: &CancellationToken,
    registry: &Registry,
    dir: &Path,
    database: &str,
    orm: &str,
) -> Result<PopulateOutcome, PopulateError> {
    if token.is_cancelled() {
        return Err(PopulateError::Cancelled);
    }
    if database.is_empty() || orm.is_empty() {
        debug!(database, orm, "no database wiring requested");
        return Ok(PopulateOutcome::Skipped);
    }

    let provider = resolve(registry, database, orm).map_err(PopulateError::Provider)?;
    let files = generate(token, dir, &provider)?;

    info!(database, orm, dir = %dir.display(), "generated database wiring");
    Ok(PopulateOutcome::Generated(files))
}

/// Run both generators against `provider`, stopping at the first failure.
pub fn generate(
    token: &CancellationToken,
    dir: &Path,
    provider: &dyn Provider,
) -> Result<Vec<WriteResult>, PopulateError> {
    let stages: [(Stage, GenerateFn); 2] = [
        (Stage::DatabaseFile, generate_connection_file),
        (Stage::MigrationFile, generate_migration_file),
    ];

    let mut files = Vec::with_capacity(stages.len());
    for (stage, run) in stages {
        debug!(%stage, "running stage");
        let file = run(token, dir, provider).map_err(|e| PopulateError::from_generate(stage, e))?;
        files.push(file);
    }
    Ok(files)
}

type GenerateFn = fn(&CancellationToken, &Path, &dyn Provider) -> Result<WriteResult, GenerateError>;
