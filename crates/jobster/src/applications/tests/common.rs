use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::applications::domain::{
    Actor, ActorId, ActorRole, ApplicationForm, JobId, JobPosting, ResumeAttachment, ResumeUpload,
};
use crate::applications::service::{ApplicationServices, ApplicationStores, InMemoryStores};
use crate::applications::storage::{BlobStore, StorageError};
use crate::config::ApplicationConfig;

pub(super) const EMPLOYER: &str = "emp-1";
pub(super) const OTHER_EMPLOYER: &str = "emp-2";
pub(super) const SEEKER: &str = "seeker-1";
pub(super) const SEEKER_WITHOUT_RESUME: &str = "seeker-2";
pub(super) const JOB: &str = "job-1";

pub(super) fn profile_resume() -> ResumeAttachment {
    ResumeAttachment {
        object_id: "Job_Seekers_Resume/ada".to_string(),
        url: "https://files.example.com/Job_Seekers_Resume/ada.pdf".to_string(),
    }
}

pub(super) fn employer(id: &str) -> Actor {
    Actor {
        id: ActorId(id.to_string()),
        role: ActorRole::Employer,
        name: "Initech Hiring".to_string(),
        email: "jobs@initech.example".to_string(),
        bio: None,
        profile_photo: None,
        niches: Vec::new(),
        resume: None,
    }
}

pub(super) fn job_seeker(id: &str, resume: Option<ResumeAttachment>) -> Actor {
    Actor {
        id: ActorId(id.to_string()),
        role: ActorRole::JobSeeker,
        name: "Ada Lovelace".to_string(),
        email: format!("{id}@example.com"),
        bio: Some("Analytical engines".to_string()),
        profile_photo: Some("https://files.example.com/photos/ada.png".to_string()),
        niches: vec!["Backend".to_string(), "Compilers".to_string()],
        resume,
    }
}

pub(super) fn job(id: &str, employer: &str) -> JobPosting {
    JobPosting {
        id: JobId(id.to_string()),
        title: "Rust Engineer".to_string(),
        posted_by: ActorId(employer.to_string()),
    }
}

pub(super) fn job_id() -> JobId {
    JobId(JOB.to_string())
}

pub(super) fn form() -> ApplicationForm {
    ApplicationForm {
        name: Some("Ada Lovelace".to_string()),
        email: Some("ada@example.com".to_string()),
        phone: Some("555-0100".to_string()),
        address: Some("12 Marylebone St".to_string()),
        cover_letter: Some("I would like to build your engines.".to_string()),
    }
}

pub(super) fn upload() -> ResumeUpload {
    ResumeUpload {
        file_name: "ada.pdf".to_string(),
        content_type: Some("application/pdf".to_string()),
        bytes: b"%PDF-1.7 resume".to_vec(),
    }
}

pub(super) struct Harness {
    pub(super) stores: InMemoryStores,
    pub(super) services: ApplicationServices,
}

impl Harness {
    pub(super) fn actor(&self, id: &str) -> Actor {
        self.services
            .authenticate(&ActorId(id.to_string()))
            .expect("seeded actor")
    }
}

fn seed(stores: &InMemoryStores) {
    stores.actors.register(employer(EMPLOYER)).expect("seed");
    stores.actors.register(employer(OTHER_EMPLOYER)).expect("seed");
    stores
        .actors
        .register(job_seeker(SEEKER, Some(profile_resume())))
        .expect("seed");
    stores
        .actors
        .register(job_seeker(SEEKER_WITHOUT_RESUME, None))
        .expect("seed");
    stores.jobs.register(job(JOB, EMPLOYER)).expect("seed");
}

pub(super) fn harness() -> Harness {
    harness_with_page_size(1)
}

pub(super) fn harness_with_page_size(page_size: usize) -> Harness {
    let stores = InMemoryStores::default();
    seed(&stores);
    let services = ApplicationServices::new(stores.stores(), ApplicationConfig { page_size });
    Harness { stores, services }
}

/// Harness whose uploads go through `blobs` instead of the in-memory blob store.
pub(super) fn harness_with_blobs(blobs: Arc<dyn BlobStore>) -> Harness {
    let stores = InMemoryStores::default();
    seed(&stores);
    let mut wiring: ApplicationStores = stores.stores();
    wiring.blobs = blobs;
    let services = ApplicationServices::new(wiring, ApplicationConfig::default());
    Harness { stores, services }
}

pub(super) struct RejectingBlobStore;

#[async_trait]
impl BlobStore for RejectingBlobStore {
    async fn store(&self, _upload: ResumeUpload) -> Result<ResumeAttachment, StorageError> {
        Err(StorageError::Rejected("Invalid image file".to_string()))
    }
}

/// Returns an attachment without a URL, as a misbehaving backend would.
pub(super) struct UrlLessBlobStore;

#[async_trait]
impl BlobStore for UrlLessBlobStore {
    async fn store(&self, _upload: ResumeUpload) -> Result<ResumeAttachment, StorageError> {
        Ok(ResumeAttachment {
            object_id: "orphan".to_string(),
            url: String::new(),
        })
    }
}

/// Yields to the scheduler before storing so concurrent submissions interleave.
pub(super) struct YieldingBlobStore;

#[async_trait]
impl BlobStore for YieldingBlobStore {
    async fn store(&self, upload: ResumeUpload) -> Result<ResumeAttachment, StorageError> {
        tokio::task::yield_now().await;
        Ok(ResumeAttachment {
            object_id: format!("yield/{}", upload.file_name),
            url: format!("https://files.example.com/yield/{}", upload.file_name),
        })
    }
}

pub(super) const BOUNDARY: &str = "jobster-boundary";

/// Encode text fields and an optional `resume` file as multipart/form-data.
pub(super) fn multipart_body(fields: &[(&str, &str)], resume: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = resume {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub(super) fn form_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Ada Lovelace"),
        ("email", "ada@example.com"),
        ("phone", "555-0100"),
        ("address", "12 Marylebone St"),
        ("coverLetter", "I would like to build your engines."),
    ]
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn assert_error_response(response: Response, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], Value::Bool(false));
    assert_eq!(payload["statusCode"].as_u64(), Some(u64::from(status.as_u16())));
    payload
}
