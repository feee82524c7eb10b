//! Database/ORM wiring providers.
//!
//! A [`Provider`] is the capability set the file generators need: imports,
//! connection setup code, migration code and the type of the shared handle.
//! [`CombinationProvider`] implements it from registry data with string
//! templates; other strategies can implement the trait without touching the
//! orchestrator.

use gosail_config::{CombinationConfig, DatabaseConfig, OrmConfig};
use gosail_core::{RenderError, go_quote};

use crate::{ImportCollector, builder::CodeBuilder};

/// Name of the package-level handle variable in generated code.
pub const DB_VARIABLE: &str = "DB";

/// Placeholder credentials passed to the DSN template, in order.
pub const PLACEHOLDER_CREDENTIALS: [&str; 3] = ["your_username", "your_password", "your_database"];

/// Everything the generators need to wire one database/ORM pair.
pub trait Provider {
    /// Quoted import paths, each present once.
    fn imports(&self) -> Vec<String>;

    /// Statements that open the connection and assign the handle.
    fn connection_code(&self) -> Result<String, RenderError>;

    /// Body of the migration routine.
    fn migration_code(&self) -> &str;

    /// Declared type of the handle variable, e.g. `*gorm.DB`.
    fn db_variable(&self) -> String;
}

/// Provider built from one registry combination.
///
/// Owns copies of its inputs; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinationProvider {
    database: DatabaseConfig,
    orm: OrmConfig,
    combination: CombinationConfig,
    migration_code: String,
}

impl CombinationProvider {
    pub fn new(
        database: DatabaseConfig,
        orm: OrmConfig,
        combination: CombinationConfig,
        migration_code: impl Into<String>,
    ) -> Self {
        Self {
            database,
            orm,
            combination,
            migration_code: migration_code.into(),
        }
    }
}

impl Provider for CombinationProvider {
    fn imports(&self) -> Vec<String> {
        let mut imports = ImportCollector::new();
        imports.add(&self.database.driver_pkg);
        imports.add(&self.orm.import_path);
        imports.extend(
            self.combination
                .additional_imports
                .iter()
                .map(String::as_str),
        );
        imports.quoted()
    }

    fn connection_code(&self) -> Result<String, RenderError> {
        let dsn_template = &self.combination.dsn_template;
        let init_func = self.combination.init_func.trim();
        if dsn_template.is_empty() {
            return Err(RenderError::MissingValue {
                field: "dsn_template",
            });
        }
        if init_func.is_empty() {
            return Err(RenderError::MissingValue { field: "init_func" });
        }
        if init_func.contains('\n') {
            return Err(RenderError::InvalidValue {
                field: "init_func",
                reason: "must be a single-line expression".to_string(),
            });
        }

        let credentials = PLACEHOLDER_CREDENTIALS
            .iter()
            .map(|c| go_quote(c))
            .collect::<Vec<_>>()
            .join(", ");

        let code = CodeBuilder::go()
            .line("var err error")
            .line(&format!(
                "dsn := fmt.Sprintf({}, {credentials})",
                go_quote(dsn_template)
            ))
            .line(&format!("{DB_VARIABLE}, err = {init_func}"))
            .block_with_close("if err != nil {", "}", |b| {
                b.line("fmt.Println(\"failed to connect to database:\", err)")
                    .line("return")
            })
            .line("fmt.Println(\"connected to database\")")
            .build();
        Ok(code)
    }

    fn migration_code(&self) -> &str {
        &self.migration_code
    }

    fn db_variable(&self) -> String {
        format!("*{}.DB", self.orm.name)
    }
}
