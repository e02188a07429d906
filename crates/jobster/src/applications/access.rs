use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{Actor, ActorId, Application, ApplicationId, JobId, Party};
use super::error::ApplicationError;
use super::repository::{ActorDirectory, ApplicationRepository, JobCatalog};
use crate::config::DEFAULT_APPLICATION_PAGE_SIZE;

/// Applicant profile fields exposed to employers reviewing a job's applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantView {
    #[serde(rename = "_id")]
    pub id: ActorId,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub profile_photo: Option<String>,
    pub niches: Vec<String>,
}

impl From<Actor> for ApplicantView {
    fn from(actor: Actor) -> Self {
        Self {
            id: actor.id,
            name: actor.name,
            email: actor.email,
            bio: actor.bio,
            profile_photo: actor.profile_photo,
            niches: actor.niches,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    #[serde(rename = "_id")]
    pub id: ApplicationId,
    pub cover_letter: String,
    pub applicant: Option<ApplicantView>,
    pub applied_on: DateTime<Utc>,
}

/// One page of a job's applications, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicationsPage {
    pub applications: Vec<ApplicationSummary>,
    pub total_pages: usize,
}

/// Read-only queries over stored applications.
#[derive(Clone)]
pub struct ApplicationAccessService {
    applications: Arc<dyn ApplicationRepository>,
    jobs: Arc<dyn JobCatalog>,
    actors: Arc<dyn ActorDirectory>,
    page_size: usize,
}

impl ApplicationAccessService {
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        jobs: Arc<dyn JobCatalog>,
        actors: Arc<dyn ActorDirectory>,
        page_size: usize,
    ) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_APPLICATION_PAGE_SIZE
        } else {
            page_size
        };

        Self {
            applications,
            jobs,
            actors,
            page_size,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn list_for_employer(
        &self,
        employer: &ActorId,
    ) -> Result<Vec<Application>, ApplicationError> {
        self.list_visible(Party::Employer, employer)
    }

    pub fn list_for_job_seeker(
        &self,
        job_seeker: &ActorId,
    ) -> Result<Vec<Application>, ApplicationError> {
        self.list_visible(Party::JobSeeker, job_seeker)
    }

    fn list_visible(
        &self,
        party: Party,
        actor: &ActorId,
    ) -> Result<Vec<Application>, ApplicationError> {
        let mut applications: Vec<Application> = self
            .applications
            .list_owned_by(party, actor)?
            .into_iter()
            .filter(|application| application.owner(party) == actor)
            .filter(|application| application.visible_to(party))
            .collect();
        applications.sort_by(|left, right| right.applied_on.cmp(&left.applied_on));
        Ok(applications)
    }

    /// Page `page` (1-based) of the applications linked to `job_id`.
    pub fn list_for_job(
        &self,
        job_id: &JobId,
        page: usize,
    ) -> Result<JobApplicationsPage, ApplicationError> {
        let ids = self
            .jobs
            .application_ids(job_id)?
            .ok_or_else(ApplicationError::application_not_found)?;

        let total_pages = ids.len().div_ceil(self.page_size);
        let offset = page.max(1).saturating_sub(1).saturating_mul(self.page_size);

        let mut applications = self.applications.fetch_many(&ids)?;
        applications.sort_by(|left, right| right.applied_on.cmp(&left.applied_on));

        let applications = applications
            .into_iter()
            .skip(offset)
            .take(self.page_size)
            .map(|application| self.summarize(application))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(JobApplicationsPage {
            applications,
            total_pages,
        })
    }

    fn summarize(&self, application: Application) -> Result<ApplicationSummary, ApplicationError> {
        let applicant = self
            .actors
            .find(&application.job_seeker_info.id)?
            .map(ApplicantView::from);

        Ok(ApplicationSummary {
            id: application.id,
            cover_letter: application.job_seeker_info.cover_letter,
            applicant,
            applied_on: application.applied_on,
        })
    }
}
