use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single open operation. Neither variant touches the
/// display state; the caller only reports them.
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("Unable to open \"{}\": {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "Unable to load the contents of \"{}\": the file is not encoded with UTF-8",
        path.display()
    )]
    NotUtf8 { path: PathBuf },
}

impl OpenError {
    pub fn path(&self) -> &PathBuf {
        match self {
            OpenError::Read { path, .. } | OpenError::NotUtf8 { path } => path,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("invalid application id: {0:?}")]
    InvalidId(String),
}
