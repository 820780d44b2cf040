// API client module: a small blocking HTTP client that posts the lot file
// to the update service and decodes its summary of what changed.
// Synchronous on purpose: the UI waits on the call, there is nothing else
// for it to do meanwhile.

use crate::config::Config;
use crate::error::UploadError;
use reqwest::blocking::{multipart, Client};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One lot as the server reports it after applying the file. All values
/// are passed through as text; the server owns their meaning.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Update {
    pub lot: String,
    pub part: String,
    pub expiration: String,
    pub on_hand: String,
    pub allocated: String,
}

/// Server reply to an upload. The counters come straight from the server
/// and are not checked against `updates.len()`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct UpdateResponse {
    pub updates: Vec<Update>,
    #[serde(rename = "constraint_errors_count")]
    pub errors_count: i64,
    pub count: i64,
}

/// Holds the reqwest blocking client, the endpoint and the file to send.
#[derive(Clone)]
pub struct UploadClient {
    client: Client,
    target_url: String,
    input_path: PathBuf,
}

impl UploadClient {
    /// Build a client for the configured endpoint. With no timeout set the
    /// request may block until the server answers.
    pub fn new(config: &Config) -> Result<Self, UploadError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(UploadError::Request)?;
        Ok(UploadClient {
            client,
            target_url: config.target_url.clone(),
            input_path: config.input_path.clone(),
        })
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Upload the configured lot file.
    pub fn upload(&self) -> Result<UpdateResponse, UploadError> {
        self.upload_file(&self.input_path)
    }

    /// Post `file_path` as multipart/form-data (single part named `file`)
    /// and decode the JSON summary. Only a 200 is accepted.
    pub fn upload_file(&self, file_path: &Path) -> Result<UpdateResponse, UploadError> {
        // Read the whole file up front so a missing or locked file fails
        // before anything goes over the wire.
        let contents = std::fs::read(file_path).map_err(|source| UploadError::FileAccess {
            path: file_path.to_path_buf(),
            source,
        })?;
        let file_name = file_path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.to_string_lossy().into_owned());
        log::debug!("read {} bytes from {}", contents.len(), file_path.display());

        let part = multipart::Part::bytes(contents)
            .file_name(file_name)
            .mime_str("application/octet-stream")
            .map_err(UploadError::Request)?;
        let form = multipart::Form::new().part("file", part);

        log::info!("uploading {} to {}", file_path.display(), self.target_url);
        // reqwest sets Content-Type with the form's boundary.
        let res = self
            .client
            .post(&self.target_url)
            .multipart(form)
            .send()
            .map_err(UploadError::Request)?;

        let status = res.status();
        if status != StatusCode::OK {
            log::warn!("upload rejected: {}", status);
            return Err(UploadError::BadStatus(status.to_string()));
        }

        let body = res.bytes().map_err(UploadError::Body)?;
        let resp: UpdateResponse = serde_json::from_slice(&body)?;
        log::info!(
            "server reported {} updates, {} constraint errors, {} lots",
            resp.updates.len(),
            resp.errors_count,
            resp.count
        );
        Ok(resp)
    }
}
