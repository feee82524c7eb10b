//! The two file generators.

use std::path::Path;

use gosail_core::{GeneratedFile, WriteError, WriteResult};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{
    Provider,
    files::{DatabaseGo, MigrationsGo},
};

/// Failure of a single file generator.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The request was cancelled before any I/O happened.
    #[error("generation cancelled")]
    Cancelled,

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Render the connection file and write it into `dir`.
///
/// Returns [`GenerateError::Cancelled`] without touching the filesystem if
/// `token` is already cancelled. `dir` must exist.
pub fn generate_connection_file(
    token: &CancellationToken,
    dir: &Path,
    provider: &dyn Provider,
) -> Result<WriteResult, GenerateError> {
    write_checked(token, dir, &DatabaseGo::new(provider))
}

/// Render the migration file and write it into `dir`.
///
/// Same cancellation and failure contract as [`generate_connection_file`].
pub fn generate_migration_file(
    token: &CancellationToken,
    dir: &Path,
    provider: &dyn Provider,
) -> Result<WriteResult, GenerateError> {
    write_checked(token, dir, &MigrationsGo::new(provider))
}

fn write_checked(
    token: &CancellationToken,
    dir: &Path,
    file: &impl GeneratedFile,
) -> Result<WriteResult, GenerateError> {
    if token.is_cancelled() {
        return Err(GenerateError::Cancelled);
    }
    let result = file.write(dir)?;
    debug!(path = %result.path.display(), bytes = result.bytes, "wrote file");
    Ok(result)
}
