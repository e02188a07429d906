use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{Actor, ActorId, ActorRole, ApplicationForm, ApplicationId, JobId, ResumeUpload};
use super::error::ApplicationError;
use super::service::ApplicationServices;

/// Header carrying the caller id forwarded by the identity gateway.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// Router builder exposing the application lifecycle endpoints.
pub fn application_router(services: Arc<ApplicationServices>) -> Router {
    Router::new()
        .route(
            "/api/v1/application/employer",
            get(employer_applications_handler),
        )
        .route(
            "/api/v1/application/jobseeker",
            get(job_seeker_applications_handler),
        )
        .route("/api/v1/application/list", post(job_applications_handler))
        .route(
            "/api/v1/application/:id",
            post(submit_handler).delete(delete_handler),
        )
        .with_state(services)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobApplicationsRequest {
    pub(crate) job_id: JobId,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageQuery {
    pub(crate) page: Option<usize>,
}

fn caller(services: &ApplicationServices, headers: &HeaderMap) -> Result<Actor, ApplicationError> {
    let actor_id = headers
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ApplicationError::Unauthenticated)?;

    services.authenticate(&ActorId(actor_id.to_string()))
}

fn require_role(actor: &Actor, role: ActorRole) -> Result<(), ApplicationError> {
    if actor.role == role {
        return Ok(());
    }
    Err(ApplicationError::Forbidden(format!(
        "{} is not allowed to access this resource.",
        actor.role.label()
    )))
}

fn invalid_form(err: MultipartError) -> ApplicationError {
    ApplicationError::Validation(format!("Invalid form payload: {err}"))
}

async fn read_submission(
    mut multipart: Multipart,
) -> Result<(ApplicationForm, Option<ResumeUpload>), ApplicationError> {
    let mut form = ApplicationForm::default();
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
        let name = field.name().unwrap_or_default().to_string();
        let slot = match name.as_str() {
            "name" => &mut form.name,
            "email" => &mut form.email,
            "phone" => &mut form.phone,
            "address" => &mut form.address,
            "coverLetter" => &mut form.cover_letter,
            "resume" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(invalid_form)?;
                // Browsers send an empty part when no file was picked.
                if !(file_name.is_empty() && bytes.is_empty()) {
                    upload = Some(ResumeUpload {
                        file_name: if file_name.is_empty() {
                            "resume".to_string()
                        } else {
                            file_name
                        },
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
                continue;
            }
            _ => continue,
        };
        *slot = Some(field.text().await.map_err(invalid_form)?);
    }

    Ok((form, upload))
}

pub(crate) async fn submit_handler(
    State(services): State<Arc<ApplicationServices>>,
    Path(job_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApplicationError> {
    let actor = caller(&services, &headers)?;
    require_role(&actor, ActorRole::JobSeeker)?;

    let multipart = multipart.map_err(|rejection| {
        ApplicationError::Validation(format!("Invalid form payload: {}", rejection.body_text()))
    })?;
    let (form, upload) = read_submission(multipart).await?;

    let application = services
        .submission
        .submit(&actor, &JobId(job_id), form, upload)
        .await?;

    let payload = json!({
        "success": true,
        "message": "Application submitted.",
        "application": application,
    });
    Ok((StatusCode::CREATED, Json(payload)).into_response())
}

pub(crate) async fn employer_applications_handler(
    State(services): State<Arc<ApplicationServices>>,
    headers: HeaderMap,
) -> Result<Response, ApplicationError> {
    let actor = caller(&services, &headers)?;
    require_role(&actor, ActorRole::Employer)?;

    let applications = services.access.list_for_employer(&actor.id)?;
    Ok(Json(json!({ "success": true, "applications": applications })).into_response())
}

pub(crate) async fn job_seeker_applications_handler(
    State(services): State<Arc<ApplicationServices>>,
    headers: HeaderMap,
) -> Result<Response, ApplicationError> {
    let actor = caller(&services, &headers)?;
    require_role(&actor, ActorRole::JobSeeker)?;

    let applications = services.access.list_for_job_seeker(&actor.id)?;
    Ok(Json(json!({ "success": true, "applications": applications })).into_response())
}

pub(crate) async fn job_applications_handler(
    State(services): State<Arc<ApplicationServices>>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
    payload: Result<Json<JobApplicationsRequest>, JsonRejection>,
) -> Result<Response, ApplicationError> {
    let actor = caller(&services, &headers)?;
    require_role(&actor, ActorRole::Employer)?;

    let Json(request) = payload.map_err(|rejection| {
        ApplicationError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;
    let page = services
        .access
        .list_for_job(&request.job_id, query.page.unwrap_or(1))?;

    Ok(Json(json!({
        "success": true,
        "applications": page.applications,
        "totalPages": page.total_pages,
    }))
    .into_response())
}

pub(crate) async fn delete_handler(
    State(services): State<Arc<ApplicationServices>>,
    Path(application_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApplicationError> {
    let actor = caller(&services, &headers)?;

    services
        .deletion
        .delete(&ApplicationId(application_id), actor.role)?;

    Ok(Json(json!({ "success": true, "message": "Application Deleted." })).into_response())
}
