use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{ActorRole, ApplicationId, DeletedBy, Party};
use super::error::ApplicationError;
use super::repository::{ApplicationRepository, JobCatalog};

/// Withdrawal state of an application, derived from its `deletedBy` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionState {
    Active,
    DeletedByEmployerOnly,
    DeletedByJobSeekerOnly,
    Purged,
}

impl DeletionState {
    pub const fn from_flags(flags: DeletedBy) -> Self {
        match (flags.employer, flags.job_seeker) {
            (false, false) => DeletionState::Active,
            (true, false) => DeletionState::DeletedByEmployerOnly,
            (false, true) => DeletionState::DeletedByJobSeekerOnly,
            (true, true) => DeletionState::Purged,
        }
    }

    pub const fn flags(self) -> DeletedBy {
        match self {
            DeletionState::Active => DeletedBy::ACTIVE,
            DeletionState::DeletedByEmployerOnly => DeletedBy {
                employer: true,
                job_seeker: false,
            },
            DeletionState::DeletedByJobSeekerOnly => DeletedBy {
                employer: false,
                job_seeker: true,
            },
            DeletionState::Purged => DeletedBy {
                employer: true,
                job_seeker: true,
            },
        }
    }

    /// Transition table. `None` stands for a role that owns neither side.
    pub const fn next(self, party: Option<Party>) -> Self {
        match (self, party) {
            (DeletionState::Active, Some(Party::Employer)) => DeletionState::DeletedByEmployerOnly,
            (DeletionState::Active, Some(Party::JobSeeker)) => {
                DeletionState::DeletedByJobSeekerOnly
            }
            (DeletionState::DeletedByEmployerOnly, Some(Party::JobSeeker)) => DeletionState::Purged,
            (DeletionState::DeletedByEmployerOnly, Some(Party::Employer)) => {
                DeletionState::DeletedByEmployerOnly
            }
            (DeletionState::DeletedByJobSeekerOnly, Some(Party::Employer)) => DeletionState::Purged,
            (DeletionState::DeletedByJobSeekerOnly, Some(Party::JobSeeker)) => {
                DeletionState::DeletedByJobSeekerOnly
            }
            (DeletionState::Purged, _) => DeletionState::Purged,
            (state, None) => state,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DeletionState::Active => "active",
            DeletionState::DeletedByEmployerOnly => "deleted_by_employer_only",
            DeletionState::DeletedByJobSeekerOnly => "deleted_by_job_seeker_only",
            DeletionState::Purged => "purged",
        }
    }
}

/// Result of a delete request: the state before and after it was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeletionOutcome {
    pub previous: DeletionState,
    pub current: DeletionState,
}

impl DeletionOutcome {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Sole mutator of application deletion state.
#[derive(Clone)]
pub struct ApplicationDeletionService {
    applications: Arc<dyn ApplicationRepository>,
    jobs: Arc<dyn JobCatalog>,
}

impl ApplicationDeletionService {
    pub fn new(applications: Arc<dyn ApplicationRepository>, jobs: Arc<dyn JobCatalog>) -> Self {
        Self { applications, jobs }
    }

    /// Withdraw `role`'s side of the application, purging it once both sides are gone.
    ///
    /// Every write is conditional on the flags read just before it; when another request got
    /// there first the transition is recomputed from a fresh read.
    pub fn delete(
        &self,
        application_id: &ApplicationId,
        role: ActorRole,
    ) -> Result<DeletionOutcome, ApplicationError> {
        let party = role.party();
        if party.is_none() {
            warn!(
                application = %application_id,
                role = role.label(),
                "delete requested by a role that owns no side; leaving application unchanged"
            );
        }

        loop {
            let application = self
                .applications
                .fetch(application_id)?
                .ok_or_else(ApplicationError::application_not_found)?;

            let current = DeletionState::from_flags(application.deleted_by);
            let next = current.next(party);
            let outcome = DeletionOutcome {
                previous: current,
                current: next,
            };

            if next == DeletionState::Purged {
                if !self.applications.purge(application_id, application.deleted_by)? {
                    continue;
                }
                info!(application = %application_id, "application purged by both sides");
                if let Err(err) = self
                    .jobs
                    .detach_application(&application.job_info.job_id, application_id)
                {
                    warn!(
                        application = %application_id,
                        job = %application.job_info.job_id,
                        error = %err,
                        "purged application still linked to job"
                    );
                }
                return Ok(outcome);
            }

            if next == current {
                debug!(
                    application = %application_id,
                    state = current.label(),
                    "delete request left application unchanged"
                );
                return Ok(outcome);
            }

            if self
                .applications
                .swap_deleted_by(application_id, application.deleted_by, next.flags())?
            {
                info!(
                    application = %application_id,
                    state = next.label(),
                    "application withdrawn"
                );
                return Ok(outcome);
            }
        }
    }
}
