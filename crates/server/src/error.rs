use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A failure that aborts the current request without writing any response.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("storage error on {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("encoding error: {source}")]
    Encoding {
        #[from]
        source: io::Error,
    },

    #[error("build response error: {source}")]
    Response {
        #[from]
        source: http::Error,
    },
}

impl HandlerError {
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage { path: path.into(), source }
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("bind {address} error: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ServerBuildError {
    #[error("router must be set")]
    MissingRouter,
    #[error("address must be set")]
    MissingAddress,
    #[error("default handler must be set")]
    MissingDefaultHandler,
}
