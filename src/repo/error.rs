use std::path::PathBuf;

use thiserror::Error;

use crate::version::error::ParseError;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Version {0} already exists")]
    VersionAlreadyExists(String),

    #[error("Version {0} not found in active versions")]
    VersionNotFound(String),

    #[error("Version {0} already exists in {1}/")]
    AlreadyDeprecated(String, String),

    #[error("Source version {0} not found")]
    SourceNotFound(String),

    #[error("No existing version to copy from")]
    NoSourceVersion,

    #[error("Could not find repository root from {start:?}")]
    RepoRootNotFound { start: PathBuf },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RepoError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| RepoError::Io { path, source }
    }
}
