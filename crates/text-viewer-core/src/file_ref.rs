use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// An opaque handle to a filesystem location, produced by a file chooser
/// (or the command line) and consumed by exactly one open operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    path: PathBuf,
}

impl FileRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, rendered lossily. Falls back to the whole
    /// path when there is no final component (e.g. `/`).
    pub fn basename(&self) -> String {
        match self.path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => self.path.display().to_string(),
        }
    }

    /// Queries the human-readable name of the location.
    ///
    /// Fails if the location's metadata cannot be read or if its name is
    /// not valid Unicode and therefore has no faithful display form.
    pub fn query_display_name(&self) -> io::Result<String> {
        fs::metadata(&self.path)?;

        let name = self.path.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "path has no final component")
        })?;

        name.to_str().map(str::to_owned).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, "file name is not valid Unicode")
        })
    }

    /// Display name, or the basename when the query fails. Never an error.
    pub fn resolve_display_name(&self) -> String {
        match self.query_display_name() {
            Ok(name) => name,
            Err(e) => {
                tracing::debug!(
                    path = %self.path.display(),
                    error = %e,
                    "display name unavailable, using basename"
                );
                self.basename()
            }
        }
    }
}
