use std::sync::LazyLock;

use anyhow::Context;
use jobboard_models::job::JobPosting;
use jobboard_utils::{jobboard_version, trace_instrument};
use reqwest::Response;
use serde::Deserialize;
use url::Url;

use crate::api::{JobBoardApi, JobBoardApiError, JobSubmission};

pub static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    let homepage = env!("CARGO_PKG_HOMEPAGE");
    let repository = env!("CARGO_PKG_REPOSITORY");
    let version = jobboard_version();

    format!("Job Board Client ({homepage}, {repository}, Version {version})")
});

const _: () = {
    assert!(!env!("CARGO_PKG_HOMEPAGE").is_empty());
    assert!(!env!("CARGO_PKG_REPOSITORY").is_empty());
};

#[derive(Debug, Clone)]
pub struct HttpJobBoardApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpJobBoardApi {
    /// Endpoints are resolved relative to `base_url`; a missing trailing
    /// slash is added.
    pub fn new(mut base_url: Url) -> anyhow::Result<Self> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .user_agent(&*USER_AGENT)
            .build()
            .context("Failed to build http client")?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Invalid endpoint {path:?} for base url {}", self.base_url))
    }
}

impl JobBoardApi for HttpJobBoardApi {
    #[trace_instrument(skip(self))]
    async fn list_jobs(&self) -> Result<Vec<JobPosting>, JobBoardApiError> {
        let response = self
            .client
            .get(self.endpoint("alljobs")?)
            .send()
            .await
            .context("Failed to send request")?;

        check_status(response)
            .await?
            .json::<Vec<JobPosting>>()
            .await
            .context("Failed to decode job list")
            .map_err(Into::into)
    }

    #[trace_instrument(skip(self))]
    async fn post_job(&self, job: JobSubmission) -> Result<JobPosting, JobBoardApiError> {
        let response = self
            .client
            .post(self.endpoint("post-jobs")?)
            .json(&job)
            .send()
            .await
            .context("Failed to send request")?;

        check_status(response)
            .await?
            .json::<CreateResponse>()
            .await
            .map(|response| response.job)
            .context("Failed to decode created job")
            .map_err(Into::into)
    }
}

#[derive(Deserialize)]
struct CreateResponse {
    job: JobPosting,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

async fn check_status(response: Response) -> Result<Response, JobBoardApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.error);

    Err(JobBoardApiError::Status {
        status: status.as_u16(),
        message,
    })
}
