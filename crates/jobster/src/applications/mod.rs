//! Application lifecycle: submission, role-scoped access, and dual-sided withdrawal.
//!
//! Submission is the only writer of new records and deletion the only mutator of the
//! `deletedBy` flags; access never writes. The store traits in [`repository`] and
//! [`storage`] are the seams for the identity, job catalog, and blob storage collaborators.

pub mod access;
pub mod deletion;
pub mod domain;
pub mod error;
pub mod guard;
pub mod memory;
pub mod repository;
pub mod resume;
pub mod router;
pub mod service;
pub mod storage;
pub mod submission;

#[cfg(test)]
mod tests;

pub use access::{ApplicantView, ApplicationAccessService, ApplicationSummary, JobApplicationsPage};
pub use deletion::{ApplicationDeletionService, DeletionOutcome, DeletionState};
pub use domain::{
    Actor, ActorId, ActorRole, Application, ApplicationForm, ApplicationId, ContactDetails,
    DeletedBy, EmployerInfo, JobId, JobInfo, JobPosting, JobSeekerInfo, Party, ResumeAttachment,
    ResumeUpload,
};
pub use error::ApplicationError;
pub use guard::DuplicateGuard;
pub use memory::{
    InMemoryActorDirectory, InMemoryApplicationRepository, InMemoryBlobStore, InMemoryJobCatalog,
};
pub use repository::{ActorDirectory, ApplicationRepository, JobCatalog, RepositoryError};
pub use resume::{ResumeError, ResumeResolver};
pub use router::{application_router, ACTOR_HEADER};
pub use service::{ApplicationServices, ApplicationStores, InMemoryStores};
pub use storage::{BlobStore, HttpBlobStore, StorageError};
pub use submission::ApplicationSubmissionService;
