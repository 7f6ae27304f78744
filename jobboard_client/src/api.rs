use std::future::Future;

use jobboard_models::job::JobPosting;
use serde::Serialize;
use thiserror::Error;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait JobBoardApi: Send + Sync + 'static {
    /// Fetches all job postings.
    fn list_jobs(&self) -> impl Future<Output = Result<Vec<JobPosting>, JobBoardApiError>> + Send;

    /// Submits a new job posting and returns the stored record.
    fn post_job(
        &self,
        job: JobSubmission,
    ) -> impl Future<Output = Result<JobPosting, JobBoardApiError>> + Send;
}

/// Body of a create request as entered into the submission form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSubmission {
    pub title: String,
    pub company: String,
    pub location: String,
    /// A string of digits, or `None` if no salary has been entered.
    pub salary: Option<String>,
    pub description: String,
}

#[derive(Debug, Error)]
pub enum JobBoardApiError {
    /// The api responded with a non-success status code. `message` is the
    /// `error` field of the response body, if any.
    #[error("Request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

#[cfg(any(test, feature = "mock"))]
impl MockJobBoardApi {
    pub fn with_list_jobs(mut self, result: Result<Vec<JobPosting>, JobBoardApiError>) -> Self {
        self.expect_list_jobs()
            .once()
            .return_once(|| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_post_job(
        mut self,
        job: JobSubmission,
        result: Result<JobPosting, JobBoardApiError>,
    ) -> Self {
        self.expect_post_job()
            .once()
            .with(mockall::predicate::eq(job))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
