use std::sync::Arc;

use super::domain::{ActorId, JobId};
use super::repository::{ApplicationRepository, RepositoryError};

/// Advisory check for an existing application on the same job by the same job seeker.
///
/// The repository's insert constraint is what actually keeps the pair unique; this lets the
/// submission fail before paying for a resume upload. A submission that passes the check but
/// loses the insert race has already uploaded its resume; that object is logged, not removed.
#[derive(Clone)]
pub struct DuplicateGuard {
    repository: Arc<dyn ApplicationRepository>,
}

impl DuplicateGuard {
    pub fn new(repository: Arc<dyn ApplicationRepository>) -> Self {
        Self { repository }
    }

    pub fn exists(&self, job_id: &JobId, job_seeker: &ActorId) -> Result<bool, RepositoryError> {
        Ok(self
            .repository
            .find_by_job_and_seeker(job_id, job_seeker)?
            .is_some())
    }
}
