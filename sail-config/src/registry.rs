//! The combination registry.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    CombinationConfig, DatabaseConfig, Error, OrmConfig, Result, SourceContext, validate,
};

/// The configuration shipped with the binary.
pub const BUNDLED_CONFIG: &str = include_str!("../config.yml");

/// Read-only registry of templates, databases, ORMs and the combinations
/// that wire them together.
///
/// Loaded once at startup and never mutated afterwards. Every lookup
/// returns `None` for an absent key, so an entry holding an empty string
/// stays distinguishable from a missing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Registry {
    #[serde(default)]
    repositories: IndexMap<String, String>,
    #[serde(default)]
    databases: IndexMap<String, DatabaseConfig>,
    #[serde(default)]
    orms: IndexMap<String, OrmConfig>,
    #[serde(default)]
    combinations: IndexMap<String, IndexMap<String, CombinationConfig>>,
    #[serde(default)]
    migration_code: IndexMap<String, String>,
}

impl Registry {
    /// Start building a registry in code.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Load and validate a registry from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_yaml_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a registry from YAML (uses "config.yml" as filename).
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::from_yaml_str_with_filename(content, "config.yml")
    }

    /// Parse a registry from YAML with a custom filename for error reporting.
    pub fn from_yaml_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let mut registry: Registry =
            serde_yaml::from_str(content).map_err(|e| ctx.parse_error(e))?;
        registry.fill_names();
        validate::validate(&registry, &ctx)?;
        Ok(registry)
    }

    /// The registry compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_yaml_str_with_filename(BUNDLED_CONFIG, "<bundled config.yml>")
    }

    /// Entries may omit `name`; it defaults to the map key.
    fn fill_names(&mut self) {
        for (key, db) in &mut self.databases {
            if db.name.is_empty() {
                db.name = key.clone();
            }
        }
        for (key, orm) in &mut self.orms {
            if orm.name.is_empty() {
                orm.name = key.clone();
            }
        }
    }

    /// Template repository URL for a framework.
    pub fn repository(&self, framework: &str) -> Option<&str> {
        self.repositories.get(framework).map(String::as_str)
    }

    pub fn database(&self, name: &str) -> Option<&DatabaseConfig> {
        self.databases.get(name)
    }

    pub fn orm(&self, name: &str) -> Option<&OrmConfig> {
        self.orms.get(name)
    }

    pub fn combination(&self, database: &str, orm: &str) -> Option<&CombinationConfig> {
        self.combinations.get(database)?.get(orm)
    }

    /// Migration body for an ORM; `Some("")` is a registered empty body.
    pub fn migration_code(&self, orm: &str) -> Option<&str> {
        self.migration_code.get(orm).map(String::as_str)
    }

    /// Framework names in file order.
    pub fn frameworks(&self) -> impl Iterator<Item = &str> {
        self.repositories.keys().map(String::as_str)
    }

    /// Repositories as `(framework, url)` in file order.
    pub fn repositories(&self) -> impl Iterator<Item = (&str, &str)> {
        self.repositories
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Database entries in file order.
    pub fn databases(&self) -> impl Iterator<Item = (&str, &DatabaseConfig)> {
        self.databases.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// ORM entries in file order.
    pub fn orms(&self) -> impl Iterator<Item = (&str, &OrmConfig)> {
        self.orms.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// All registered combinations as `(database, orm, config)`.
    pub fn combinations(&self) -> impl Iterator<Item = (&str, &str, &CombinationConfig)> {
        self.combinations.iter().flat_map(|(db, orms)| {
            orms.iter()
                .map(move |(orm, combo)| (db.as_str(), orm.as_str(), combo))
        })
    }

    /// ORMs that have a combination registered for `database`.
    pub fn orms_for(&self, database: &str) -> impl Iterator<Item = &str> {
        self.combinations
            .get(database)
            .into_iter()
            .flat_map(|orms| orms.keys().map(String::as_str))
    }
}

/// Builds a [`Registry`] in code, mainly for tests and embedders that do not
/// load YAML.
///
/// The built registry is not validated, so it can describe deliberately
/// broken data.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    pub fn repository(mut self, framework: impl Into<String>, url: impl Into<String>) -> Self {
        self.registry
            .repositories
            .insert(framework.into(), url.into());
        self
    }

    pub fn database(mut self, key: impl Into<String>, config: DatabaseConfig) -> Self {
        self.registry.databases.insert(key.into(), config);
        self
    }

    pub fn orm(mut self, key: impl Into<String>, config: OrmConfig) -> Self {
        self.registry.orms.insert(key.into(), config);
        self
    }

    pub fn combination(
        mut self,
        database: impl Into<String>,
        orm: impl Into<String>,
        config: CombinationConfig,
    ) -> Self {
        self.registry
            .combinations
            .entry(database.into())
            .or_default()
            .insert(orm.into(), config);
        self
    }

    pub fn migration_code(mut self, orm: impl Into<String>, code: impl Into<String>) -> Self {
        self.registry
            .migration_code
            .insert(orm.into(), code.into());
        self
    }

    pub fn build(mut self) -> Registry {
        self.registry.fill_names();
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
repositories:
  fiber: github.com/example/fiber-template
databases:
  postgres:
    driver_pkg: gorm.io/driver/postgres
    default_port: 5432
orms:
  gorm:
    import_path: gorm.io/gorm
combinations:
  postgres:
    gorm:
      dsn_template: "host=localhost user=%s password=%s dbname=%s"
      init_func: "gorm.Open(postgres.Open(dsn), &gorm.Config{})"
migration_code:
  gorm: ""
"#;

    #[test]
    fn test_parse_sample() {
        let registry = Registry::from_yaml_str(SAMPLE).unwrap();

        assert_eq!(
            registry.repository("fiber"),
            Some("github.com/example/fiber-template")
        );
        let db = registry.database("postgres").unwrap();
        assert_eq!(db.driver_pkg, "gorm.io/driver/postgres");
        assert_eq!(db.default_port, Some(5432));
        let combo = registry.combination("postgres", "gorm").unwrap();
        assert!(combo.additional_imports.is_empty());
    }

    #[test]
    fn test_names_default_to_keys() {
        let registry = Registry::from_yaml_str(SAMPLE).unwrap();

        assert_eq!(registry.database("postgres").unwrap().name, "postgres");
        assert_eq!(registry.orm("gorm").unwrap().name, "gorm");
    }

    #[test]
    fn test_lookup_misses_are_none() {
        let registry = Registry::from_yaml_str(SAMPLE).unwrap();

        assert!(registry.database("mysql").is_none());
        assert!(registry.orm("sqlx").is_none());
        assert!(registry.combination("postgres", "sqlx").is_none());
        assert!(registry.combination("mysql", "gorm").is_none());
        assert!(registry.repository("gin").is_none());
    }

    #[test]
    fn test_empty_migration_code_is_distinct_from_missing() {
        let registry = Registry::from_yaml_str(SAMPLE).unwrap();

        assert_eq!(registry.migration_code("gorm"), Some(""));
        assert_eq!(registry.migration_code("sqlx"), None);
    }

    #[test]
    fn test_listing_preserves_file_order() {
        let registry = Registry::builder()
            .repository("gin", "a")
            .repository("echo", "b")
            .repository("fiber", "c")
            .build();

        let frameworks: Vec<_> = registry.frameworks().collect();
        assert_eq!(frameworks, ["gin", "echo", "fiber"]);
    }

    #[test]
    fn test_combinations_iteration() {
        let registry = Registry::builder()
            .combination("postgres", "gorm", CombinationConfig::new("%s%s%s", "x"))
            .combination("postgres", "sqlx", CombinationConfig::new("%s%s%s", "y"))
            .combination("mysql", "gorm", CombinationConfig::new("%s%s%s", "z"))
            .build();

        let pairs: Vec<_> = registry
            .combinations()
            .map(|(db, orm, _)| format!("{db}/{orm}"))
            .collect();
        assert_eq!(pairs, ["postgres/gorm", "postgres/sqlx", "mysql/gorm"]);

        let orms: Vec<_> = registry.orms_for("postgres").collect();
        assert_eq!(orms, ["gorm", "sqlx"]);
        assert_eq!(registry.orms_for("sqlite").count(), 0);
    }

    #[test]
    fn test_bundled_config_is_valid() {
        let registry = Registry::bundled().unwrap();

        assert!(registry.combination("postgres", "gorm").is_some());
        assert!(registry.combination("mysql", "sqlx").is_none());
        assert!(registry.frameworks().count() >= 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Registry::from_file("/definitely/not/here/config.yml").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = Registry::from_yaml_str("databases: [not, a, map]").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }
}
