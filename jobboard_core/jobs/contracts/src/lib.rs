use std::future::Future;

use jobboard_models::job::{JobPosting, NewJobPosting};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait JobsFeatureService: Send + Sync + 'static {
    /// Returns all job postings in storage order.
    fn list_jobs(&self) -> impl Future<Output = anyhow::Result<Vec<JobPosting>>> + Send;

    /// Stores a new job posting and returns it including its generated id.
    fn create_job(
        &self,
        job: NewJobPosting,
    ) -> impl Future<Output = Result<JobPosting, JobCreateError>> + Send;
}

#[derive(Debug, Error)]
pub enum JobCreateError {
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockJobsFeatureService {
    pub fn with_list_jobs(mut self, result: anyhow::Result<Vec<JobPosting>>) -> Self {
        self.expect_list_jobs()
            .once()
            .return_once(|| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_create_job(
        mut self,
        job: NewJobPosting,
        result: Result<JobPosting, JobCreateError>,
    ) -> Self {
        self.expect_create_job()
            .once()
            .with(mockall::predicate::eq(job))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
