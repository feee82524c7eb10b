use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Registry errors are large because they carry the YAML source, so they
/// travel boxed.
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// The YAML text being loaded and the name it is reported under.
///
/// Every diagnostic raised while loading a registry points back into this
/// text, so the loader builds one context and raises errors through it.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// serde_yaml reports a byte index; the label covers one character there.
    pub fn parse_error(&self, source: serde_yaml::Error) -> Box<Error> {
        let span = source
            .location()
            .map(|loc| SourceSpan::from((loc.index(), 1)));
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// `kind` is `database` or `orm`.
    pub fn unknown_reference_error(
        &self,
        kind: &'static str,
        name: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnknownReference {
            src: self.named_source(),
            span,
            kind,
            name: name.into(),
        })
    }

    pub fn dsn_verbs_error(
        &self,
        database: impl Into<String>,
        orm: impl Into<String>,
        found: usize,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::DsnVerbs {
            src: self.named_source(),
            span,
            database: database.into(),
            orm: orm.into(),
            found,
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass --config <path> or create a config.yml in the current directory"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration")]
    #[diagnostic(code(sail::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(sail::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("combination refers to unknown {kind} '{name}'")]
    #[diagnostic(
        code(sail::unknown_reference),
        help("declare '{name}' under the top-level '{kind}s' section or remove the combination")
    )]
    UnknownReference {
        #[source_code]
        src: NamedSource<String>,
        #[label("not declared")]
        span: Option<SourceSpan>,
        kind: &'static str,
        name: String,
    },

    #[error("DSN template for '{database}' + '{orm}' has {found} formatting verbs, expected 3")]
    #[diagnostic(
        code(sail::dsn_template),
        help("the template receives a username, a password and a database name, in that order")
    )]
    DsnVerbs {
        #[source_code]
        src: NamedSource<String>,
        #[label("in this combination")]
        span: Option<SourceSpan>,
        database: String,
        orm: String,
        found: usize,
    },
}
