//! Provider resolution against the combination registry.

use gosail_config::Registry;
use miette::Diagnostic;
use thiserror::Error;
use tracing::debug;

use crate::CombinationProvider;

/// A requested database, ORM or pairing is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ResolveError {
    #[error("database configuration for '{database}' not found")]
    #[diagnostic(code(sail::unknown_database), help("run 'go-sail list' to see supported databases"))]
    DatabaseNotFound { database: String },

    #[error("ORM configuration for '{orm}' not found")]
    #[diagnostic(code(sail::unknown_orm), help("run 'go-sail list' to see supported ORMs"))]
    OrmNotFound { orm: String },

    #[error("combination configuration for database '{database}' and ORM '{orm}' not found")]
    #[diagnostic(
        code(sail::unsupported_combination),
        help("run 'go-sail list' to see which ORMs are supported for each database")
    )]
    CombinationNotFound { database: String, orm: String },

    #[error("migration code for ORM '{orm}' not found")]
    #[diagnostic(code(sail::missing_migration_code))]
    MigrationCodeNotFound { orm: String },
}

/// Resolve a `(database, orm)` pair into a provider.
///
/// Each lookup is checked separately so that the error names exactly what is
/// missing. No side effects.
pub fn resolve(
    registry: &Registry,
    database: &str,
    orm: &str,
) -> Result<CombinationProvider, ResolveError> {
    let db_config = registry
        .database(database)
        .ok_or_else(|| ResolveError::DatabaseNotFound {
            database: database.to_string(),
        })?;

    let orm_config = registry.orm(orm).ok_or_else(|| ResolveError::OrmNotFound {
        orm: orm.to_string(),
    })?;

    let combination = registry.combination(database, orm).ok_or_else(|| {
        ResolveError::CombinationNotFound {
            database: database.to_string(),
            orm: orm.to_string(),
        }
    })?;

    let migration_code =
        registry
            .migration_code(orm)
            .ok_or_else(|| ResolveError::MigrationCodeNotFound {
                orm: orm.to_string(),
            })?;

    debug!(database, orm, "resolved provider");
    Ok(CombinationProvider::new(
        db_config.clone(),
        orm_config.clone(),
        combination.clone(),
        migration_code,
    ))
}
