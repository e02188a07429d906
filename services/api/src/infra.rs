use jobster::applications::{Actor, ApplicationStores, HttpBlobStore, InMemoryStores, JobPosting};
use jobster::config::StorageConfig;
use jobster::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Actors and job postings preloaded into the in-memory directory and catalog.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SeedData {
    #[serde(default)]
    pub(crate) actors: Vec<Actor>,
    #[serde(default)]
    pub(crate) jobs: Vec<JobPosting>,
}

impl SeedData {
    pub(crate) fn from_path(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub(crate) fn apply(self, stores: &InMemoryStores) -> Result<(), AppError> {
        let (actors, jobs) = (self.actors.len(), self.jobs.len());
        for actor in self.actors {
            stores.actors.register(actor)?;
        }
        for job in self.jobs {
            stores.jobs.register(job)?;
        }
        info!(actors, jobs, "seed data loaded");
        Ok(())
    }
}

/// Wire the in-memory stores, swapping in the HTTP blob store when an upload URL is set.
pub(crate) fn build_stores(
    memory: &InMemoryStores,
    storage: &StorageConfig,
) -> Result<ApplicationStores, AppError> {
    let mut stores = memory.stores();
    match HttpBlobStore::from_config(storage)? {
        Some(blobs) => {
            info!(folder = %storage.folder, "resume uploads go to the configured blob store");
            stores.blobs = Arc::new(blobs);
        }
        None => info!("no blob store configured; resume uploads are kept in memory"),
    }
    Ok(stores)
}
