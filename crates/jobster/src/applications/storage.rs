//! Blob storage for resume files.
//!
//! `HttpBlobStore` talks to an unsigned upload endpoint in the Cloudinary style: one
//! multipart POST carrying the file, the target folder and an optional upload preset, answered
//! by a JSON body holding either `public_id`/`secure_url` or an `error` object.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::domain::{ResumeAttachment, ResumeUpload};
use crate::config::StorageConfig;

/// Destination for uploaded resume files.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn store(&self, upload: ResumeUpload) -> Result<ResumeAttachment, StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("blob store unreachable: {0}")]
    Transport(String),
    #[error("blob store rejected upload: {0}")]
    Rejected(String),
    #[error("blob store returned no url for the stored object")]
    MissingUrl,
    #[error("blob store client misconfigured: {0}")]
    Client(String),
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: Option<String>,
    secure_url: Option<String>,
    error: Option<UploadErrorBody>,
}

#[derive(Debug, Deserialize)]
struct UploadErrorBody {
    message: String,
}

/// Upload client built once at start-up and handed to the resume resolver.
#[derive(Debug, Clone)]
pub struct HttpBlobStore {
    client: Client,
    upload_url: String,
    upload_preset: Option<String>,
    folder: String,
}

impl HttpBlobStore {
    pub fn new(
        upload_url: impl Into<String>,
        upload_preset: Option<String>,
        folder: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| StorageError::Client(err.to_string()))?;

        Ok(Self {
            client,
            upload_url: upload_url.into(),
            upload_preset,
            folder: folder.into(),
        })
    }

    /// `None` when no upload URL is configured.
    pub fn from_config(config: &StorageConfig) -> Result<Option<Self>, StorageError> {
        match &config.upload_url {
            Some(url) => Self::new(
                url.clone(),
                config.upload_preset.clone(),
                config.folder.clone(),
                config.timeout,
            )
            .map(Some),
            None => Ok(None),
        }
    }

    fn form(&self, upload: ResumeUpload) -> Result<Form, StorageError> {
        let mut part = Part::bytes(upload.bytes).file_name(upload.file_name);
        if let Some(content_type) = upload.content_type {
            part = part
                .mime_str(&content_type)
                .map_err(|err| StorageError::Rejected(format!("invalid content type: {err}")))?;
        }

        let mut form = Form::new()
            .part("file", part)
            .text("folder", self.folder.clone());
        if let Some(preset) = &self.upload_preset {
            form = form.text("upload_preset", preset.clone());
        }
        Ok(form)
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn store(&self, upload: ResumeUpload) -> Result<ResumeAttachment, StorageError> {
        let file_name = upload.file_name.clone();
        let form = self.form(upload)?;

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| StorageError::Transport(err.to_string()))?;

        let status = response.status();
        let body: UploadResponse = match response.json().await {
            Ok(body) => body,
            Err(err) if status.is_success() => {
                return Err(StorageError::Rejected(format!("unreadable response: {err}")));
            }
            Err(_) => {
                return Err(StorageError::Rejected(format!("status {status}")));
            }
        };

        if let Some(error) = body.error {
            warn!(%status, file = %file_name, "resume upload rejected: {}", error.message);
            return Err(StorageError::Rejected(error.message));
        }
        if !status.is_success() {
            return Err(StorageError::Rejected(format!("status {status}")));
        }

        let url = body
            .secure_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(StorageError::MissingUrl)?;
        let object_id = body.public_id.unwrap_or_default();

        debug!(file = %file_name, %object_id, "resume stored");
        Ok(ResumeAttachment { object_id, url })
    }
}
