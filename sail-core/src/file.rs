use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Get the rules for writing this file
    fn rules(&self) -> FileRules;

    /// Render the file content
    fn render(&self) -> Result<String, RenderError>;

    /// Render the file and write it to disk.
    ///
    /// Rendering happens in memory first, so a render failure never
    /// leaves a file behind. An existing file is truncated.
    fn write(&self, base: &Path) -> Result<WriteResult, WriteError> {
        let path = self.path(base);
        let content = self.render().map_err(|source| WriteError::Render {
            path: path.clone(),
            source,
        })?;
        write_file(&path, &content, &self.rules())?;
        Ok(WriteResult {
            path,
            bytes: content.len(),
        })
    }
}

fn write_file(path: &Path, content: &str, rules: &FileRules) -> Result<(), WriteError> {
    if rules.create_dirs {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| WriteError::Create {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    // The handle is dropped (and closed) on every return path below.
    let mut file = fs::File::create(path).map_err(|source| WriteError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(content.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|source| WriteError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Result of a write operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteResult {
    /// Full path of the written file
    pub path: PathBuf,
    /// Number of bytes written
    pub bytes: usize,
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRules {
    /// Create missing parent directories before writing
    pub create_dirs: bool,
}

impl FileRules {
    /// Write into a directory that must already exist.
    pub fn existing_dir() -> Self {
        Self { create_dirs: false }
    }
}

impl Default for FileRules {
    fn default() -> Self {
        Self { create_dirs: true }
    }
}

/// A template could not be rendered from the data it was given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("template value '{field}' is empty")]
    MissingValue { field: &'static str },

    #[error("template value '{field}' is invalid: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Failure while producing a file on disk.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("error rendering '{}'", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("error creating file '{}'", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing file '{}'", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WriteError {
    /// Path of the file that failed.
    pub fn path(&self) -> &Path {
        match self {
            Self::Render { path, .. } | Self::Create { path, .. } | Self::Write { path, .. } => {
                path
            }
        }
    }
}
