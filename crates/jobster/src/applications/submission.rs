use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    Actor, Application, ApplicationForm, ApplicationId, DeletedBy, EmployerInfo, JobId, JobInfo,
    JobSeekerInfo, ResumeUpload,
};
use super::error::ApplicationError;
use super::guard::DuplicateGuard;
use super::repository::{ApplicationRepository, JobCatalog};
use super::resume::ResumeResolver;

/// Sole writer of new application records.
#[derive(Clone)]
pub struct ApplicationSubmissionService {
    applications: Arc<dyn ApplicationRepository>,
    jobs: Arc<dyn JobCatalog>,
    guard: DuplicateGuard,
    resolver: ResumeResolver,
}

impl ApplicationSubmissionService {
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        jobs: Arc<dyn JobCatalog>,
        resolver: ResumeResolver,
    ) -> Self {
        let guard = DuplicateGuard::new(applications.clone());
        Self {
            applications,
            jobs,
            guard,
            resolver,
        }
    }

    /// Validate and persist a new application for `actor` against `job_id`.
    ///
    /// Nothing is written until every check and the resume resolution have passed; the insert
    /// is the commit point.
    pub async fn submit(
        &self,
        actor: &Actor,
        job_id: &JobId,
        form: ApplicationForm,
        upload: Option<ResumeUpload>,
    ) -> Result<Application, ApplicationError> {
        let details = form
            .complete()
            .ok_or_else(|| ApplicationError::Validation("All fields are required.".to_string()))?;

        let job = self
            .jobs
            .find(job_id)?
            .ok_or_else(|| ApplicationError::NotFound("Job not found.".to_string()))?;

        if self.guard.exists(job_id, &actor.id)? {
            return Err(ApplicationError::Conflict);
        }

        let uploaded = upload.is_some();
        let resume = self.resolver.resolve(actor, upload).await?;
        let resume_object = resume.object_id.clone();

        let application = Application {
            id: ApplicationId::generate(),
            job_seeker_info: JobSeekerInfo {
                id: actor.id.clone(),
                name: details.name,
                email: details.email,
                phone: details.phone,
                address: details.address,
                cover_letter: details.cover_letter,
                resume,
            },
            employer_info: EmployerInfo { id: job.posted_by },
            job_info: JobInfo {
                job_id: job.id,
                job_title: job.title,
            },
            deleted_by: DeletedBy::ACTIVE,
            applied_on: Utc::now(),
        };

        let stored = match self.applications.insert(application) {
            Ok(stored) => stored,
            Err(err) => {
                if uploaded {
                    warn!(
                        job = %job_id,
                        job_seeker = %actor.id,
                        object = %resume_object,
                        error = %err,
                        "application not stored; uploaded resume left orphaned in blob storage"
                    );
                }
                return Err(err.into());
            }
        };
        info!(
            application = %stored.id,
            job = %stored.job_info.job_id,
            job_seeker = %stored.job_seeker_info.id,
            "application submitted"
        );

        if let Err(err) = self
            .jobs
            .attach_application(&stored.job_info.job_id, &stored.id)
        {
            warn!(
                application = %stored.id,
                job = %stored.job_info.job_id,
                error = %err,
                "application stored but not linked to job"
            );
        }

        Ok(stored)
    }
}
