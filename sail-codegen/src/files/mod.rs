//! Generated Go source files.

mod database_go;
mod migrations_go;

pub use database_go::DatabaseGo;
use gosail_core::RenderError;
pub use migrations_go::MigrationsGo;

/// Package clause of both generated files.
pub const PACKAGE: &str = "initializers";

/// File name of the connection file.
pub const DATABASE_FILE: &str = "database.go";

/// File name of the migration file.
pub const MIGRATIONS_FILE: &str = "migrations.go";

/// Standard-library import used by both files.
const FMT_IMPORT: &str = "\"fmt\"";

/// Reject imports that would render as an empty Go string literal.
fn check_imports(imports: &[String]) -> Result<(), RenderError> {
    if imports.iter().any(|i| i == "\"\"") {
        return Err(RenderError::MissingValue { field: "import" });
    }
    Ok(())
}
