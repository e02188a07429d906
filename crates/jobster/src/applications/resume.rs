use std::sync::Arc;

use tracing::warn;

use super::domain::{Actor, ResumeAttachment, ResumeUpload};
use super::storage::{BlobStore, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
    #[error("Please upload your resume.")]
    MissingResume,
    #[error("Failed to upload resume.")]
    UploadFailed(#[source] StorageError),
}

/// Picks the resume attached to a new application: a fresh upload wins, otherwise the one
/// stored on the actor's profile.
#[derive(Clone)]
pub struct ResumeResolver {
    store: Arc<dyn BlobStore>,
}

impl ResumeResolver {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(
        &self,
        actor: &Actor,
        upload: Option<ResumeUpload>,
    ) -> Result<ResumeAttachment, ResumeError> {
        match upload {
            Some(upload) => {
                let stored = self.store.store(upload).await.map_err(|err| {
                    warn!(actor = %actor.id, error = %err, "resume upload failed");
                    ResumeError::UploadFailed(err)
                })?;
                if !stored.is_present() {
                    return Err(ResumeError::UploadFailed(StorageError::MissingUrl));
                }
                Ok(stored)
            }
            None => actor
                .resume
                .as_ref()
                .filter(|resume| resume.is_present())
                .cloned()
                .ok_or(ResumeError::MissingResume),
        }
    }
}
