//! Registry entry types.

use serde::Deserialize;

/// A supported database.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// Symbolic name (defaults to the map key).
    #[serde(default)]
    pub name: String,
    /// Import path of the Go driver package.
    pub driver_pkg: String,
    /// Default server port, shown in listings.
    #[serde(default)]
    pub default_port: Option<u16>,
}

impl DatabaseConfig {
    pub fn new(name: impl Into<String>, driver_pkg: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            driver_pkg: driver_pkg.into(),
            default_port: None,
        }
    }

    pub fn with_default_port(mut self, port: u16) -> Self {
        self.default_port = Some(port);
        self
    }
}

/// A supported ORM.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrmConfig {
    /// Symbolic name, also the Go package name of the client library
    /// (defaults to the map key).
    #[serde(default)]
    pub name: String,
    /// Import path of the client library.
    pub import_path: String,
}

impl OrmConfig {
    pub fn new(name: impl Into<String>, import_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            import_path: import_path.into(),
        }
    }
}

/// How one database and ORM pair is wired together.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CombinationConfig {
    /// printf-style DSN template taking username, password and database name.
    pub dsn_template: String,
    /// Go expression opening the connection; it may refer to `dsn`.
    pub init_func: String,
    /// Imports needed by this pairing beyond the driver and ORM packages.
    #[serde(default)]
    pub additional_imports: Vec<String>,
}

impl CombinationConfig {
    pub fn new(dsn_template: impl Into<String>, init_func: impl Into<String>) -> Self {
        Self {
            dsn_template: dsn_template.into(),
            init_func: init_func.into(),
            additional_imports: Vec::new(),
        }
    }

    pub fn with_imports(mut self, imports: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.additional_imports = imports.into_iter().map(Into::into).collect();
        self
    }
}
