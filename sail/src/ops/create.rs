//! Create operation - clone a template and wire up the database.

use std::path::{Component, Path, PathBuf};

use gosail_codegen::{INITIALIZERS_DIR, PopulateError, populate};
use gosail_config::Registry;
use thiserror::Error;
use tokio::fs;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{
    clone::{self, CloneError},
    toolchain::{self, ToolchainError},
};
use crate::reports::CreateReport;

/// Options for the create operation.
pub struct CreateOptions<'a> {
    /// Project name, also the directory created under `parent`.
    pub name: &'a str,
    /// Directory the project is created in.
    pub parent: &'a Path,
    pub framework: &'a str,
    /// Empty for no database.
    pub database: &'a str,
    /// Empty for no ORM.
    pub orm: &'a str,
    /// Skip the Go toolchain pass.
    pub skip_tidy: bool,
}

#[derive(Debug, Error)]
pub enum CreateError {
    #[error("operation cancelled")]
    Cancelled,

    #[error("invalid project name '{0}'")]
    InvalidName(String),

    #[error("directory '{}' already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("project template not found")]
    TemplateNotFound { framework: String },

    #[error("error cloning repository")]
    Clone(#[source] CloneError),

    #[error(transparent)]
    Populate(PopulateError),

    #[error("failed to download required libraries")]
    Toolchain(#[source] ToolchainError),
}

impl From<CloneError> for CreateError {
    fn from(err: CloneError) -> Self {
        if err.is_cancelled() {
            CreateError::Cancelled
        } else {
            CreateError::Clone(err)
        }
    }
}

impl From<PopulateError> for CreateError {
    fn from(err: PopulateError) -> Self {
        if err.is_cancelled() {
            CreateError::Cancelled
        } else {
            CreateError::Populate(err)
        }
    }
}

impl From<ToolchainError> for CreateError {
    fn from(err: ToolchainError) -> Self {
        if err.is_cancelled() {
            CreateError::Cancelled
        } else {
            CreateError::Toolchain(err)
        }
    }
}

/// Execute the create operation.
///
/// Once the project directory may exist, any failure or cancellation removes
/// it again before the error is returned.
pub async fn create(
    token: &CancellationToken,
    registry: &Registry,
    opts: CreateOptions<'_>,
) -> Result<CreateReport, CreateError> {
    if token.is_cancelled() {
        return Err(CreateError::Cancelled);
    }
    if !is_single_component(opts.name) {
        return Err(CreateError::InvalidName(opts.name.to_string()));
    }

    let dir = opts.parent.join(opts.name);
    if fs::try_exists(&dir).await.unwrap_or(true) {
        return Err(CreateError::AlreadyExists(dir));
    }

    let url = registry
        .repository(opts.framework)
        .filter(|url| !opts.framework.is_empty() && !url.trim().is_empty())
        .ok_or_else(|| CreateError::TemplateNotFound {
            framework: opts.framework.to_string(),
        })?;

    match build(token, registry, &opts, url, &dir).await {
        Ok(report) => Ok(report),
        Err(err) => {
            discard(&dir).await;
            Err(err)
        }
    }
}

async fn build(
    token: &CancellationToken,
    registry: &Registry,
    opts: &CreateOptions<'_>,
    url: &str,
    dir: &Path,
) -> Result<CreateReport, CreateError> {
    info!(framework = opts.framework, url, "cloning template");
    clone::clone(token, opts.parent, opts.name, url).await?;

    let outcome = populate(
        token,
        registry,
        &dir.join(INITIALIZERS_DIR),
        opts.database,
        opts.orm,
    )?;

    if opts.skip_tidy {
        debug!("skipping go toolchain pass");
    } else {
        toolchain::tidy(token, dir).await?;
    }

    let generated = outcome
        .files()
        .iter()
        .map(|file| {
            file.path
                .strip_prefix(dir)
                .map_or_else(|_| file.path.clone(), Path::to_path_buf)
        })
        .collect();

    Ok(CreateReport {
        name: opts.name.to_string(),
        dir: dir.to_path_buf(),
        framework: opts.framework.to_string(),
        database: opts.database.to_string(),
        orm: opts.orm.to_string(),
        generated,
        tidied: !opts.skip_tidy,
    })
}

/// Remove a partially created project.
async fn discard(dir: &Path) {
    match fs::remove_dir_all(dir).await {
        Ok(()) => debug!(dir = %dir.display(), "removed project directory"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(dir = %dir.display(), error = %e, "failed to remove project directory"),
    }
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use gosail_config::{CombinationConfig, DatabaseConfig, OrmConfig};
    use tempfile::TempDir;

    use super::*;
    use crate::ops::process::ProcessError;

    fn registry() -> Registry {
        Registry::builder()
            .repository("fiber", "github.com/acme/fiber-template")
            .repository("blank", "  ")
            .database("postgres", DatabaseConfig::new("postgres", "gorm.io/driver/postgres"))
            .orm("gorm", OrmConfig::new("gorm", "gorm.io/gorm"))
            .combination(
                "postgres",
                "gorm",
                CombinationConfig::new("%s %s %s", "gorm.Open(postgres.Open(dsn), &gorm.Config{})"),
            )
            .migration_code("gorm", "DB.AutoMigrate()")
            .build()
    }

    fn options<'a>(parent: &'a Path, name: &'a str, framework: &'a str) -> CreateOptions<'a> {
        CreateOptions {
            name,
            parent,
            framework,
            database: "postgres",
            orm: "gorm",
            skip_tidy: true,
        }
    }

    #[tokio::test]
    async fn test_existing_directory_is_kept() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("app")).unwrap();
        std::fs::write(temp.path().join("app/keep.txt"), "mine").unwrap();

        let err = create(
            &CancellationToken::new(),
            &registry(),
            options(temp.path(), "app", "fiber"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CreateError::AlreadyExists(_)));
        assert!(temp.path().join("app/keep.txt").exists());
    }

    #[tokio::test]
    async fn test_unknown_framework() {
        let temp = TempDir::new().unwrap();

        for framework in ["", "rails", "blank"] {
            let err = create(
                &CancellationToken::new(),
                &registry(),
                options(temp.path(), "app", framework),
            )
            .await
            .unwrap_err();

            assert_eq!(err.to_string(), "project template not found");
        }
        assert!(!temp.path().join("app").exists());
    }

    #[tokio::test]
    async fn test_invalid_names() {
        let temp = TempDir::new().unwrap();

        for name in ["", "a/b", "..", "/abs"] {
            let err = create(
                &CancellationToken::new(),
                &registry(),
                options(temp.path(), name, "fiber"),
            )
            .await
            .unwrap_err();

            assert!(matches!(err, CreateError::InvalidName(_)), "{name}");
        }
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let temp = TempDir::new().unwrap();
        let token = CancellationToken::new();
        token.cancel();

        let err = create(&token, &registry(), options(temp.path(), "app", "fiber"))
            .await
            .unwrap_err();

        assert!(matches!(err, CreateError::Cancelled));
        assert!(!temp.path().join("app").exists());
    }

    #[tokio::test]
    async fn test_discard_removes_partial_project() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("app");
        std::fs::create_dir_all(dir.join(INITIALIZERS_DIR)).unwrap();

        discard(&dir).await;
        discard(&dir).await;

        assert!(!dir.exists());
    }

    #[test]
    fn test_cancellation_is_not_wrapped() {
        let err: CreateError = PopulateError::Cancelled.into();
        assert!(matches!(err, CreateError::Cancelled));

        let err: CreateError = ToolchainError::Tidy(ProcessError::Cancelled).into();
        assert!(matches!(err, CreateError::Cancelled));
    }
}
