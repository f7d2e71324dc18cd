use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot stat {path}: {source}")]
    Metadata { path: PathBuf, source: io::Error },

    #[error("cannot copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("{path} is not a JSON array of records: {source}")]
    Collection {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot open log file {path}: {source}")]
    LogFile { path: PathBuf, source: io::Error },

    #[error("logger already installed: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("config already initialized")]
    ConfigInitialized,
}

impl Error {
    pub(crate) fn read(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Read { path, source }
    }

    pub(crate) fn metadata(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Metadata { path, source }
    }
}
