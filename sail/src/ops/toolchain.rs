//! Go toolchain post-processing of a generated project.
//!
//! Resolves the project's module dependencies and formats its sources:
//! `go mod tidy`, `go get` for every third-party import, `go mod tidy`
//! again, then `goimports -w` on every Go file.

use std::{
    io,
    path::{Path, PathBuf},
};

use indexmap::IndexSet;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use walkdir::WalkDir;

use super::process::{self, ProcessError};

#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("failed to run go mod tidy")]
    Tidy(#[source] ProcessError),

    #[error("failed to read '{}'", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to run go get for import {import}")]
    Get {
        import: String,
        #[source]
        source: ProcessError,
    },

    #[error("goimports failed for file {}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: ProcessError,
    },
}

impl ToolchainError {
    pub fn is_cancelled(&self) -> bool {
        match self {
            ToolchainError::Tidy(source)
            | ToolchainError::Get { source, .. }
            | ToolchainError::Format { source, .. } => source.is_cancelled(),
            ToolchainError::Scan { .. } => false,
        }
    }
}

/// Run the full dependency and formatting pass in `dir`.
pub async fn tidy(token: &CancellationToken, dir: &Path) -> Result<(), ToolchainError> {
    go_mod_tidy(token, dir).await?;

    let files = go_files(dir)?;
    let imports = collect_imports(&files)?;
    info!(count = imports.len(), "fetching third-party imports");
    for import in &imports {
        process::run(token, dir, "go", &["get", import.as_str()])
            .await
            .map_err(|source| ToolchainError::Get {
                import: import.clone(),
                source,
            })?;
    }

    go_mod_tidy(token, dir).await?;

    for path in &files {
        let file = path.to_string_lossy();
        process::run(token, dir, "goimports", &["-w", &*file])
            .await
            .map_err(|source| ToolchainError::Format {
                path: path.clone(),
                source,
            })?;
    }
    Ok(())
}

async fn go_mod_tidy(token: &CancellationToken, dir: &Path) -> Result<(), ToolchainError> {
    process::run(token, dir, "go", &["mod", "tidy"])
        .await
        .map_err(ToolchainError::Tidy)
}

/// Every `.go` file under `dir`, in a stable order.
pub fn go_files(dir: &Path) -> Result<Vec<PathBuf>, ToolchainError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| ToolchainError::Scan {
            path: e.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf),
            source: e.into(),
        })?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "go") {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Third-party import paths across `files`, deduplicated in first-seen order.
pub fn collect_imports(files: &[PathBuf]) -> Result<Vec<String>, ToolchainError> {
    let mut imports = IndexSet::new();
    for path in files {
        let source = std::fs::read_to_string(path).map_err(|source| ToolchainError::Scan {
            path: path.clone(),
            source,
        })?;
        for import in parse_imports(&source) {
            if !is_std(import) {
                imports.insert(import.to_string());
            }
        }
    }
    debug!(?imports, "scanned imports");
    Ok(imports.into_iter().collect())
}

/// Standard-library paths have no dot in their first element.
pub fn is_std(import: &str) -> bool {
    let first = import.split('/').next().unwrap_or(import);
    !first.contains('.')
}

/// Import paths declared in Go source, in order.
///
/// Handles single and grouped declarations with aliases, dot and blank
/// imports. Scanning stops at the first top-level declaration after the
/// imports.
pub fn parse_imports(source: &str) -> Vec<&str> {
    let mut imports = Vec::new();
    let mut in_group = false;

    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        if in_group {
            if line.starts_with(')') {
                in_group = false;
            } else if let Some(path) = quoted(line) {
                imports.push(path);
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("import") {
            let rest = rest.trim_start();
            if let Some(group) = rest.strip_prefix('(') {
                match group.find(')') {
                    Some(end) => imports.extend(quoted(&group[..end])),
                    None => {
                        in_group = true;
                        imports.extend(quoted(group));
                    }
                }
            } else if let Some(path) = quoted(rest) {
                imports.push(path);
            }
            continue;
        }

        if ["func ", "type ", "var ", "const "]
            .iter()
            .any(|kw| line.starts_with(kw))
        {
            break;
        }
    }
    imports
}

/// First string literal on the line, without its quotes.
fn quoted(line: &str) -> Option<&str> {
    let start = line.find(['"', '`'])?;
    let quote = line[start..].chars().next()?;
    let rest = &line[start + 1..];
    let end = rest.find(quote)?;
    Some(&rest[..end])
}
