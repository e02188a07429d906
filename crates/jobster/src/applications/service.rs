use std::sync::Arc;

use super::access::ApplicationAccessService;
use super::deletion::ApplicationDeletionService;
use super::domain::{Actor, ActorId};
use super::error::ApplicationError;
use super::memory::{
    InMemoryActorDirectory, InMemoryApplicationRepository, InMemoryBlobStore, InMemoryJobCatalog,
};
use super::repository::{ActorDirectory, ApplicationRepository, JobCatalog};
use super::resume::ResumeResolver;
use super::storage::BlobStore;
use super::submission::ApplicationSubmissionService;
use crate::config::ApplicationConfig;

/// External collaborators the application services are built from.
#[derive(Clone)]
pub struct ApplicationStores {
    pub applications: Arc<dyn ApplicationRepository>,
    pub jobs: Arc<dyn JobCatalog>,
    pub actors: Arc<dyn ActorDirectory>,
    pub blobs: Arc<dyn BlobStore>,
}

/// Concrete handles onto the in-memory stores so callers can seed and inspect them.
#[derive(Default, Clone)]
pub struct InMemoryStores {
    pub applications: InMemoryApplicationRepository,
    pub jobs: InMemoryJobCatalog,
    pub actors: InMemoryActorDirectory,
    pub blobs: InMemoryBlobStore,
}

impl InMemoryStores {
    pub fn stores(&self) -> ApplicationStores {
        ApplicationStores {
            applications: Arc::new(self.applications.clone()),
            jobs: Arc::new(self.jobs.clone()),
            actors: Arc::new(self.actors.clone()),
            blobs: Arc::new(self.blobs.clone()),
        }
    }
}

/// Facade bundling submission, access, and deletion for the HTTP layer.
#[derive(Clone)]
pub struct ApplicationServices {
    pub submission: ApplicationSubmissionService,
    pub access: ApplicationAccessService,
    pub deletion: ApplicationDeletionService,
    actors: Arc<dyn ActorDirectory>,
}

impl ApplicationServices {
    pub fn new(stores: ApplicationStores, config: ApplicationConfig) -> Self {
        let ApplicationStores {
            applications,
            jobs,
            actors,
            blobs,
        } = stores;

        let resolver = ResumeResolver::new(blobs);
        let submission =
            ApplicationSubmissionService::new(applications.clone(), jobs.clone(), resolver);
        let access = ApplicationAccessService::new(
            applications.clone(),
            jobs.clone(),
            actors.clone(),
            config.page_size,
        );
        let deletion = ApplicationDeletionService::new(applications, jobs);

        Self {
            submission,
            access,
            deletion,
            actors,
        }
    }

    /// Resolve the caller forwarded by the identity gateway.
    pub fn authenticate(&self, actor_id: &ActorId) -> Result<Actor, ApplicationError> {
        self.actors
            .find(actor_id)?
            .ok_or(ApplicationError::Unauthenticated)
    }
}
