use super::domain::{Actor, ActorId, Application, ApplicationId, DeletedBy, JobId, JobPosting, Party};

/// Storage abstraction so the services can be exercised in isolation.
///
/// Implementations own two guarantees the services rely on: `insert` rejects a second record
/// for the same job and job seeker, and the deletion writes only apply when the stored flags
/// still equal `expected`.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    fn fetch_many(&self, ids: &[ApplicationId]) -> Result<Vec<Application>, RepositoryError>;
    fn find_by_job_and_seeker(
        &self,
        job_id: &JobId,
        job_seeker: &ActorId,
    ) -> Result<Option<Application>, RepositoryError>;
    /// Every stored application where `actor` owns the `party` side, flags notwithstanding.
    fn list_owned_by(
        &self,
        party: Party,
        actor: &ActorId,
    ) -> Result<Vec<Application>, RepositoryError>;
    /// Replace the deletion flags. `Ok(false)` when the stored flags no longer match `expected`.
    fn swap_deleted_by(
        &self,
        id: &ApplicationId,
        expected: DeletedBy,
        next: DeletedBy,
    ) -> Result<bool, RepositoryError>;
    /// Remove the record. `Ok(false)` when the stored flags no longer match `expected`.
    fn purge(&self, id: &ApplicationId, expected: DeletedBy) -> Result<bool, RepositoryError>;
}

/// Read access to the job catalog plus the reverse index of applications per job.
pub trait JobCatalog: Send + Sync {
    fn find(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError>;
    /// `None` when the job is unknown or its application list was never populated.
    fn application_ids(&self, id: &JobId) -> Result<Option<Vec<ApplicationId>>, RepositoryError>;
    fn attach_application(
        &self,
        job_id: &JobId,
        application_id: &ApplicationId,
    ) -> Result<(), RepositoryError>;
    fn detach_application(
        &self,
        job_id: &JobId,
        application_id: &ApplicationId,
    ) -> Result<(), RepositoryError>;
}

/// Lookup of authenticated actors and their stored profiles.
pub trait ActorDirectory: Send + Sync {
    fn find(&self, id: &ActorId) -> Result<Option<Actor>, RepositoryError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
