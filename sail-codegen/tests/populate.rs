//! End-to-end tests for the generation orchestrator against the bundled
//! registry.

use std::{error::Error as _, fs, path::Path};

use gosail_codegen::{
    ErrorKind, PopulateError, PopulateOutcome, Provider, Stage,
    files::{DATABASE_FILE, MIGRATIONS_FILE},
    populate, resolve,
};
use gosail_config::Registry;
use gosail_core::WriteError;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

fn registry() -> Registry {
    Registry::bundled().expect("bundled config should load")
}

fn file_count(dir: &Path) -> usize {
    fs::read_dir(dir).expect("read dir").count()
}

/// Render the whole error chain, the way the CLI reports it.
fn chain(err: &PopulateError) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts.join(": ")
}

#[test]
fn test_empty_database_or_orm_is_noop() {
    let temp = TempDir::new().unwrap();
    let token = CancellationToken::new();
    let registry = registry();

    for (database, orm) in [("", "gorm"), ("postgres", ""), ("", ""), ("", "unknown")] {
        let outcome = populate(&token, &registry, temp.path(), database, orm).unwrap();
        assert_eq!(outcome, PopulateOutcome::Skipped);
    }

    assert_eq!(file_count(temp.path()), 0);
}

#[test]
fn test_cancelled_before_populate_creates_nothing() {
    let temp = TempDir::new().unwrap();
    let token = CancellationToken::new();
    token.cancel();

    let err = populate(&token, &registry(), temp.path(), "postgres", "gorm").unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert!(err.source().is_none());
    assert_eq!(file_count(temp.path()), 0);
}

#[test]
fn test_cancelled_empty_selection_is_not_skipped() {
    let temp = TempDir::new().unwrap();
    let token = CancellationToken::new();
    token.cancel();

    for (database, orm) in [("", "gorm"), ("postgres", ""), ("", "")] {
        let err = populate(&token, &registry(), temp.path(), database, orm).unwrap_err();
        assert!(err.is_cancelled(), "{database:?}/{orm:?}");
    }
    assert_eq!(file_count(temp.path()), 0);
}

#[test]
fn test_unregistered_combination_names_both_keys() {
    let temp = TempDir::new().unwrap();

    let err = populate(
        &CancellationToken::new(),
        &registry(),
        temp.path(),
        "mysql",
        "sqlx",
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(err.stage(), Some(Stage::Resolve));
    let message = chain(&err);
    assert!(message.starts_with("error creating database provider: "));
    assert!(message.contains("mysql"));
    assert!(message.contains("sqlx"));
    assert_eq!(file_count(temp.path()), 0);
}

#[test]
fn test_missing_directory_stops_at_connection_file() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("initializers");

    let err = populate(&CancellationToken::new(), &registry(), &dir, "postgres", "gorm").unwrap_err();

    assert_eq!(err.stage(), Some(Stage::DatabaseFile));
    assert_eq!(err.kind(), ErrorKind::Io);
    match &err {
        PopulateError::DatabaseFile(WriteError::Create { path, .. }) => {
            assert_eq!(path, &dir.join(DATABASE_FILE));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(chain(&err).starts_with("error generating database file: "));
    assert!(!dir.join(MIGRATIONS_FILE).exists());
}

#[cfg(unix)]
#[test]
fn test_read_only_directory_stops_at_connection_file() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("initializers");
    fs::create_dir(&dir).unwrap();
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();

    // Privileged users can write anyway; nothing to observe then.
    if fs::write(dir.join("probe"), "").is_ok() {
        return;
    }

    let err = populate(&CancellationToken::new(), &registry(), &dir, "postgres", "gorm").unwrap_err();
    fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(
        err,
        PopulateError::DatabaseFile(WriteError::Create { .. })
    ));
    assert_eq!(file_count(&dir), 0);
}

#[test]
fn test_postgres_gorm_end_to_end() {
    let temp = TempDir::new().unwrap();
    let registry = registry();

    let provider = resolve(&registry, "postgres", "gorm").unwrap();
    assert_eq!(provider.db_variable(), "*gorm.DB");

    let outcome = populate(
        &CancellationToken::new(),
        &registry,
        temp.path(),
        "postgres",
        "gorm",
    )
    .unwrap();

    let paths: Vec<_> = outcome.files().iter().map(|f| f.path.clone()).collect();
    assert_eq!(
        paths,
        [temp.path().join(DATABASE_FILE), temp.path().join(MIGRATIONS_FILE)]
    );

    let database = fs::read_to_string(temp.path().join(DATABASE_FILE)).unwrap();
    assert!(database.starts_with("package initializers\n"));
    assert!(database.contains("\t\"gorm.io/driver/postgres\"\n"));
    assert!(database.contains("\t\"gorm.io/gorm\"\n"));
    assert!(database.contains("var DB *gorm.DB\n"));
    let dsn = database.find("dsn := fmt.Sprintf(").unwrap();
    let check = database.find("if err != nil {").unwrap();
    assert!(dsn < check);

    let migrations = fs::read_to_string(temp.path().join(MIGRATIONS_FILE)).unwrap();
    assert!(migrations.contains("func DBMigrate() error {\n"));
    assert!(migrations.ends_with("\treturn nil\n}\n"));
}

#[test]
fn test_generation_is_deterministic() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let token = CancellationToken::new();
    let registry = registry();

    for (database, orm, _) in registry.combinations() {
        populate(&token, &registry, first.path(), database, orm).unwrap();
        populate(&token, &registry, second.path(), database, orm).unwrap();

        for file in [DATABASE_FILE, MIGRATIONS_FILE] {
            assert_eq!(
                fs::read(first.path().join(file)).unwrap(),
                fs::read(second.path().join(file)).unwrap(),
                "{database}/{orm} {file}"
            );
        }
    }
}

#[test]
fn test_existing_files_are_truncated() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(DATABASE_FILE);
    fs::write(&path, "x".repeat(10_000)).unwrap();

    populate(
        &CancellationToken::new(),
        &registry(),
        temp.path(),
        "mysql",
        "gorm",
    )
    .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.len() < 10_000);
    assert!(content.starts_with("package initializers\n"));
}
