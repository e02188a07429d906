//! Process-local stores used by the demo, local runs without external services, and tests.
//!
//! Each store serializes access behind a single mutex, which is what gives the application
//! repository its unique `(job, job seeker)` insert and its compare-and-set flag updates.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::domain::{
    Actor, ActorId, Application, ApplicationId, DeletedBy, JobId, JobPosting, Party,
    ResumeAttachment, ResumeUpload,
};
use super::repository::{ActorDirectory, ApplicationRepository, JobCatalog, RepositoryError};
use super::storage::{BlobStore, StorageError};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
}

#[derive(Default, Clone)]
pub struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, Application>>>,
}

impl InMemoryApplicationRepository {
    pub fn len(&self) -> usize {
        self.records.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = lock(&self.records)?;
        let duplicate = guard.contains_key(&application.id)
            || guard.values().any(|existing| {
                existing.job_info.job_id == application.job_info.job_id
                    && existing.job_seeker_info.id == application.job_seeker_info.id
            });
        if duplicate {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn fetch_many(&self, ids: &[ApplicationId]) -> Result<Vec<Application>, RepositoryError> {
        let guard = lock(&self.records)?;
        Ok(ids.iter().filter_map(|id| guard.get(id).cloned()).collect())
    }

    fn find_by_job_and_seeker(
        &self,
        job_id: &JobId,
        job_seeker: &ActorId,
    ) -> Result<Option<Application>, RepositoryError> {
        let guard = lock(&self.records)?;
        Ok(guard
            .values()
            .find(|record| {
                &record.job_info.job_id == job_id && &record.job_seeker_info.id == job_seeker
            })
            .cloned())
    }

    fn list_owned_by(
        &self,
        party: Party,
        actor: &ActorId,
    ) -> Result<Vec<Application>, RepositoryError> {
        let guard = lock(&self.records)?;
        Ok(guard
            .values()
            .filter(|record| record.owner(party) == actor)
            .cloned()
            .collect())
    }

    fn swap_deleted_by(
        &self,
        id: &ApplicationId,
        expected: DeletedBy,
        next: DeletedBy,
    ) -> Result<bool, RepositoryError> {
        let mut guard = lock(&self.records)?;
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        if record.deleted_by != expected {
            return Ok(false);
        }
        record.deleted_by = next;
        Ok(true)
    }

    fn purge(&self, id: &ApplicationId, expected: DeletedBy) -> Result<bool, RepositoryError> {
        let mut guard = lock(&self.records)?;
        let record = guard.get(id).ok_or(RepositoryError::NotFound)?;
        if record.deleted_by != expected {
            return Ok(false);
        }
        guard.remove(id);
        Ok(true)
    }
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    posting: JobPosting,
    applications: Option<Vec<ApplicationId>>,
}

#[derive(Default, Clone)]
pub struct InMemoryJobCatalog {
    jobs: Arc<Mutex<HashMap<JobId, CatalogEntry>>>,
}

impl InMemoryJobCatalog {
    /// Register a posting with an empty application list.
    pub fn register(&self, posting: JobPosting) -> Result<(), RepositoryError> {
        self.put(posting, Some(Vec::new()))
    }

    /// Register a posting whose application list has never been populated.
    pub fn register_unindexed(&self, posting: JobPosting) -> Result<(), RepositoryError> {
        self.put(posting, None)
    }

    fn put(
        &self,
        posting: JobPosting,
        applications: Option<Vec<ApplicationId>>,
    ) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.jobs)?;
        guard.insert(
            posting.id.clone(),
            CatalogEntry {
                posting,
                applications,
            },
        );
        Ok(())
    }
}

impl JobCatalog for InMemoryJobCatalog {
    fn find(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        Ok(lock(&self.jobs)?.get(id).map(|entry| entry.posting.clone()))
    }

    fn application_ids(&self, id: &JobId) -> Result<Option<Vec<ApplicationId>>, RepositoryError> {
        Ok(lock(&self.jobs)?
            .get(id)
            .and_then(|entry| entry.applications.clone()))
    }

    fn attach_application(
        &self,
        job_id: &JobId,
        application_id: &ApplicationId,
    ) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.jobs)?;
        let entry = guard.get_mut(job_id).ok_or(RepositoryError::NotFound)?;
        let applications = entry.applications.get_or_insert_with(Vec::new);
        if !applications.contains(application_id) {
            applications.push(application_id.clone());
        }
        Ok(())
    }

    fn detach_application(
        &self,
        job_id: &JobId,
        application_id: &ApplicationId,
    ) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.jobs)?;
        let entry = guard.get_mut(job_id).ok_or(RepositoryError::NotFound)?;
        if let Some(applications) = entry.applications.as_mut() {
            applications.retain(|id| id != application_id);
        }
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct InMemoryActorDirectory {
    actors: Arc<Mutex<HashMap<ActorId, Actor>>>,
}

impl InMemoryActorDirectory {
    pub fn register(&self, actor: Actor) -> Result<(), RepositoryError> {
        lock(&self.actors)?.insert(actor.id.clone(), actor);
        Ok(())
    }
}

impl ActorDirectory for InMemoryActorDirectory {
    fn find(&self, id: &ActorId) -> Result<Option<Actor>, RepositoryError> {
        Ok(lock(&self.actors)?.get(id).cloned())
    }
}

/// Blob store that keeps uploads in memory and hands out `memory://` URLs.
#[derive(Default, Clone)]
pub struct InMemoryBlobStore {
    objects: Arc<Mutex<HashMap<String, ResumeUpload>>>,
}

impl InMemoryBlobStore {
    pub fn object(&self, object_id: &str) -> Option<ResumeUpload> {
        self.objects
            .lock()
            .ok()
            .and_then(|guard| guard.get(object_id).cloned())
    }

    pub fn len(&self) -> usize {
        self.objects.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn store(&self, upload: ResumeUpload) -> Result<ResumeAttachment, StorageError> {
        let object_id = format!("resumes/{}", uuid::Uuid::new_v4());
        let url = format!("memory://{object_id}/{}", upload.file_name);
        self.objects
            .lock()
            .map_err(|_| StorageError::Transport("blob mutex poisoned".to_string()))?
            .insert(object_id.clone(), upload);
        Ok(ResumeAttachment { object_id, url })
    }
}
