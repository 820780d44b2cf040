use std::path::PathBuf;
use thiserror::Error;

/// Every way an upload can fail. The UI shows these as an error view and
/// returns to the ready state; nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("cannot read lot file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request to server failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("bad status: {0}")]
    BadStatus(String),

    #[error("failed to read server response: {0}")]
    Body(#[source] reqwest::Error),

    #[error("server response is not valid update JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl UploadError {
    /// Short label for the error view heading.
    pub fn kind(&self) -> &'static str {
        match self {
            UploadError::FileAccess { .. } => "File error",
            UploadError::Request(_) => "Connection error",
            UploadError::BadStatus(_) => "Server error",
            UploadError::Body(_) => "Connection error",
            UploadError::Decode(_) => "Response error",
        }
    }
}
