use std::path::PathBuf;
use thiserror::Error;

/// Structured error types for the splitter.
///
/// # Why structured errors
///
/// Each variant records the path and the operation that failed, so a frontend can
/// show "which file, which step" without parsing strings. Per-file failures are
/// flattened to status text by the engine; these variants are what the library
/// functions themselves return.
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Filesystem error: {operation} failed for {path:?}")]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Image processing error: {operation} failed (file: {path:?})")]
    ImageProcessing {
        path: PathBuf,
        operation: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid path {path:?}: {reason}")]
    InvalidPath { path: PathBuf, reason: String },

    #[error("A split run is already in progress")]
    Busy,

    #[error("Failed to spawn worker thread")]
    WorkerSpawn(#[source] std::io::Error),

    #[error("Worker thread panicked")]
    WorkerPanicked,
}

pub type Result<T> = std::result::Result<T, SplitError>;

impl SplitError {
    /// Renders the error together with its source chain on a single line.
    ///
    /// Status text has no structure, so the underlying codec or I/O message is
    /// appended here instead of being lost behind the `#[source]` link.
    pub fn detail(&self) -> String {
        let mut text = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            text.push_str(": ");
            text.push_str(&err.to_string());
            source = err.source();
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_includes_source_chain() {
        let err = SplitError::FileSystem {
            path: PathBuf::from("/tmp/half"),
            operation: "create output directory".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        let detail = err.detail();
        assert!(detail.contains("create output directory"));
        assert!(detail.ends_with(": denied"));
    }
}
