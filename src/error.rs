//! Error types for catalog lookups, rendering and file assembly.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Kind of catalog entity a lookup failed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Metadata,
    Template,
    Service,
    FileTemplate,
    FunctionalTemplate,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Metadata => "metadata",
            EntityKind::Template => "template",
            EntityKind::Service => "service",
            EntityKind::FileTemplate => "file template",
            EntityKind::FunctionalTemplate => "functional template",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum GenError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: EntityKind, key: String },

    /// Template parse or execution failure, passed through untouched.
    #[error(transparent)]
    Template(#[from] minijinja::Error),

    #[error("failed to render built-in snippet: {0}")]
    Snippet(#[from] askama::Error),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog bundle {}: {message}", path.display())]
    Bundle { path: PathBuf, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenError {
    pub fn not_found(kind: EntityKind, key: impl Into<String>) -> Self {
        GenError::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the error is a catalog miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GenError::NotFound { .. })
    }
}

pub type Result<T, E = GenError> = std::result::Result<T, E>;
