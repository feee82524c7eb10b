//! Template repository cloning.

use std::{io, path::Path};

use thiserror::Error;
use tokio::fs;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::process::{self, ProcessError};

/// Entries removed from a fresh clone: VCS metadata, GitHub and CI
/// configuration, and the template's own documentation.
pub const TEMPLATE_FILES: &[&str] = &[
    ".git",
    "CODEOWNERS",
    "CONTRIBUTING.md",
    "FUNDING.yml",
    "ISSUE_TEMPLATE",
    "PULL_REQUEST_TEMPLATE",
    "SECURITY.md",
    ".github",
    ".travis.yml",
    "circle.yml",
    "README.md",
    "CHANGELOG.md",
    "LICENSE",
];

#[derive(Debug, Error)]
pub enum CloneError {
    #[error("repository '{url}' was not cloned")]
    Clone {
        url: String,
        #[source]
        source: ProcessError,
    },

    #[error("failed to remove template file '{}'", path.display())]
    Strip {
        path: std::path::PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CloneError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CloneError::Clone { source, .. } if source.is_cancelled())
    }
}

/// Trim the URL and prefix `https://` when it has no scheme.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.contains("://") || url.starts_with("git@") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Shallow-clone `url` into `parent/name` and strip template files.
pub async fn clone(
    token: &CancellationToken,
    parent: &Path,
    name: &str,
    url: &str,
) -> Result<(), CloneError> {
    let url = normalize_url(url);
    process::run(token, parent, "git", &["clone", "--depth", "1", &url, name])
        .await
        .map_err(|source| CloneError::Clone {
            url: url.clone(),
            source,
        })?;

    strip(&parent.join(name)).await
}

/// Remove [`TEMPLATE_FILES`] from `dir`. Absent entries are ignored.
pub async fn strip(dir: &Path) -> Result<(), CloneError> {
    for entry in TEMPLATE_FILES {
        let path = dir.join(entry);
        let metadata = match fs::symlink_metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(source) => return Err(CloneError::Strip { path, source }),
        };

        let removed = if metadata.is_dir() {
            fs::remove_dir_all(&path).await
        } else {
            fs::remove_file(&path).await
        };
        removed.map_err(|source| CloneError::Strip {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "removed template file");
    }
    Ok(())
}
