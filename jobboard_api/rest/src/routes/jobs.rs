use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use jobboard_core_jobs_contracts::{JobCreateError, JobsFeatureService};
use jobboard_models::job::NewJobPosting;
use serde::Serialize;
use tracing::debug;

use super::{error, internal_server_error};
use crate::models::job::{ApiJobCreateRequest, ApiJobCreateRequestError, ApiJobPosting};

pub fn router(service: Arc<impl JobsFeatureService>) -> Router<()> {
    Router::new()
        .route("/alljobs", routing::get(list))
        .route("/post-jobs", routing::post(create))
        .with_state(service)
}

async fn list(service: State<Arc<impl JobsFeatureService>>) -> Response {
    match service.list_jobs().await {
        Ok(jobs) => Json(jobs.into_iter().map(ApiJobPosting::from).collect::<Vec<_>>())
            .into_response(),
        Err(err) => internal_server_error(err),
    }
}

#[derive(Serialize)]
struct CreateResponse {
    message: &'static str,
    job: ApiJobPosting,
}

async fn create(
    service: State<Arc<impl JobsFeatureService>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let request = match body {
        Ok(body) => {
            ApiJobCreateRequest::from_body(&headers, &body).map_err(|err| err.to_string())
        }
        Err(rejection) => Err(rejection.body_text()),
    };

    let request = match request {
        Ok(request) => request,
        Err(reason) => {
            debug!(%reason, "rejected job posting body");
            return error(StatusCode::BAD_REQUEST, "Invalid request body");
        }
    };

    let job = match NewJobPosting::try_from(request) {
        Ok(job) => job,
        Err(ApiJobCreateRequestError::MissingFields) => {
            return error(StatusCode::BAD_REQUEST, "Missing required fields")
        }
        Err(ApiJobCreateRequestError::InvalidSalary) => {
            return error(StatusCode::BAD_REQUEST, "Invalid salary")
        }
    };

    match service.create_job(job).await {
        Ok(job) => Json(CreateResponse {
            message: "Job Posted Successfully",
            job: job.into(),
        })
        .into_response(),
        Err(JobCreateError::Other(err)) => internal_server_error(err),
    }
}
