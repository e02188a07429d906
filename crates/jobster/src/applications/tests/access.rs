use super::common::*;

use chrono::{Duration, Utc};

use crate::applications::domain::{
    ActorId, ActorRole, Application, ApplicationId, DeletedBy, EmployerInfo, JobId, JobInfo,
    JobSeekerInfo,
};
use crate::applications::repository::{ApplicationRepository, JobCatalog};
use crate::applications::ApplicationError;

/// Store an application directly with a controlled `applied_on` and link it to the job.
fn stored_application(harness: &Harness, seeker: &str, minutes_ago: i64) -> Application {
    let application = Application {
        id: ApplicationId(format!("app-{seeker}")),
        job_seeker_info: JobSeekerInfo {
            id: ActorId(seeker.to_string()),
            name: "Applicant".to_string(),
            email: format!("{seeker}@example.com"),
            phone: "555-0100".to_string(),
            address: "1 Main St".to_string(),
            cover_letter: format!("cover letter from {seeker}"),
            resume: profile_resume(),
        },
        employer_info: EmployerInfo {
            id: ActorId(EMPLOYER.to_string()),
        },
        job_info: JobInfo {
            job_id: job_id(),
            job_title: "Rust Engineer".to_string(),
        },
        deleted_by: DeletedBy::ACTIVE,
        applied_on: Utc::now() - Duration::minutes(minutes_ago),
    };
    let stored = harness
        .stores
        .applications
        .insert(application)
        .expect("insert");
    harness
        .stores
        .jobs
        .attach_application(&job_id(), &stored.id)
        .expect("link");
    stored
}

#[tokio::test]
async fn role_lists_exclude_own_deleted_side() {
    let harness = harness();
    let seeker = harness.actor(SEEKER);
    let employer = ActorId(EMPLOYER.to_string());

    let application = harness
        .services
        .submission
        .submit(&seeker, &job_id(), form(), None)
        .await
        .expect("submission succeeds");

    assert_eq!(
        harness.services.access.list_for_employer(&employer).expect("list").len(),
        1
    );
    assert_eq!(
        harness.services.access.list_for_job_seeker(&seeker.id).expect("list").len(),
        1
    );

    harness
        .services
        .deletion
        .delete(&application.id, ActorRole::Employer)
        .expect("employer delete");

    assert!(harness
        .services
        .access
        .list_for_employer(&employer)
        .expect("list")
        .is_empty());
    let seeker_view = harness
        .services
        .access
        .list_for_job_seeker(&seeker.id)
        .expect("list");
    assert_eq!(seeker_view.len(), 1);
    assert!(seeker_view[0].deleted_by.employer);
}

#[tokio::test]
async fn role_lists_are_scoped_to_owner() {
    let harness = harness();
    stored_application(&harness, SEEKER, 5);

    assert!(harness
        .services
        .access
        .list_for_employer(&ActorId(OTHER_EMPLOYER.to_string()))
        .expect("list")
        .is_empty());
    assert!(harness
        .services
        .access
        .list_for_job_seeker(&ActorId(SEEKER_WITHOUT_RESUME.to_string()))
        .expect("list")
        .is_empty());
}

#[test]
fn job_listing_pages_newest_first() {
    let harness = harness();
    let oldest = stored_application(&harness, "seeker-a", 30);
    let newest = stored_application(&harness, "seeker-b", 1);
    let middle = stored_application(&harness, "seeker-c", 10);

    let access = &harness.services.access;
    let first = access.list_for_job(&job_id(), 1).expect("page 1");
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.applications.len(), 1);
    assert_eq!(first.applications[0].id, newest.id);

    let second = access.list_for_job(&job_id(), 2).expect("page 2");
    assert_eq!(second.applications[0].id, middle.id);
    let third = access.list_for_job(&job_id(), 3).expect("page 3");
    assert_eq!(third.applications[0].id, oldest.id);

    let beyond = access.list_for_job(&job_id(), 4).expect("page 4");
    assert!(beyond.applications.is_empty());
    assert_eq!(beyond.total_pages, 3);
}

#[test]
fn page_zero_is_treated_as_first_page() {
    let harness = harness();
    let newest = stored_application(&harness, "seeker-b", 1);
    stored_application(&harness, "seeker-a", 30);

    let page = harness
        .services
        .access
        .list_for_job(&job_id(), 0)
        .expect("page");
    assert_eq!(page.applications[0].id, newest.id);
}

#[test]
fn total_pages_rounds_up_for_larger_pages() {
    let harness = harness_with_page_size(2);
    for (index, seeker) in ["s-1", "s-2", "s-3", "s-4", "s-5"].iter().enumerate() {
        stored_application(&harness, seeker, index as i64);
    }

    let page = harness
        .services
        .access
        .list_for_job(&job_id(), 3)
        .expect("page");
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.applications.len(), 1);
}

#[test]
fn summaries_project_applicant_profile() {
    let harness = harness();
    stored_application(&harness, SEEKER, 1);

    let page = harness
        .services
        .access
        .list_for_job(&job_id(), 1)
        .expect("page");
    let summary = &page.applications[0];
    assert_eq!(summary.cover_letter, format!("cover letter from {SEEKER}"));
    let applicant = summary.applicant.as_ref().expect("applicant resolved");
    assert_eq!(applicant.id.0, SEEKER);
    assert_eq!(applicant.niches, vec!["Backend".to_string(), "Compilers".to_string()]);

    let json = serde_json::to_value(summary).expect("serializes");
    assert!(json.get("_id").is_some());
    assert!(json.get("coverLetter").is_some());
    assert!(json["applicant"].get("profilePhoto").is_some());
    assert!(json.get("appliedOn").is_some());
}

#[test]
fn unknown_applicant_projects_as_null() {
    let harness = harness();
    stored_application(&harness, "seeker-gone", 1);

    let page = harness
        .services
        .access
        .list_for_job(&job_id(), 1)
        .expect("page");
    assert!(page.applications[0].applicant.is_none());
}

#[test]
fn job_without_applications_is_an_empty_page() {
    let harness = harness();
    let page = harness
        .services
        .access
        .list_for_job(&job_id(), 1)
        .expect("page");
    assert!(page.applications.is_empty());
    assert_eq!(page.total_pages, 0);
}

#[test]
fn unindexed_or_unknown_job_is_not_found() {
    let harness = harness();
    harness
        .stores
        .jobs
        .register_unindexed(job("job-legacy", EMPLOYER))
        .expect("register");

    for job_id in ["job-legacy", "job-missing"] {
        match harness
            .services
            .access
            .list_for_job(&JobId(job_id.to_string()), 1)
        {
            Err(ApplicationError::NotFound(message)) => {
                assert_eq!(message, "Application not found.")
            }
            other => panic!("expected not found for {job_id}, got {other:?}"),
        }
    }
}
