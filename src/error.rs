//! Error types for the quote engine

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the quote engine
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to render the document
    #[error("Rendering failed: {0}")]
    Render(String),

    /// Failed to produce an export artifact
    #[error("Export failed: {0}")]
    Export(String),

    /// A line-item operation referenced a position that does not exist
    #[error("Line item index {index} out of range (list has {len} items)")]
    ItemIndex { index: usize, len: usize },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Filesystem error while writing an artifact
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Render(err.to_string())
    }
}
