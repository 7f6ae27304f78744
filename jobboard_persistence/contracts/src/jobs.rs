use std::future::Future;

use jobboard_models::job::{JobPosting, NewJobPosting};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobsRepoError {
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait JobsRepository<Txn: Send + Sync + 'static>: Send + Sync + 'static {
    /// Returns all job postings in insertion order.
    fn list(&self, txn: &mut Txn) -> impl Future<Output = anyhow::Result<Vec<JobPosting>>> + Send;

    /// Inserts a new job posting and returns the stored record including the
    /// id assigned by the database.
    fn create(
        &self,
        txn: &mut Txn,
        job: &NewJobPosting,
    ) -> impl Future<Output = Result<JobPosting, JobsRepoError>> + Send;
}

#[cfg(feature = "mock")]
impl<Txn: Send + Sync + 'static> MockJobsRepository<Txn> {
    pub fn with_list(mut self, result: Vec<JobPosting>) -> Self {
        self.expect_list()
            .once()
            .with(mockall::predicate::always())
            .return_once(|_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_list_error(mut self) -> Self {
        self.expect_list().once().return_once(|_| {
            Box::pin(std::future::ready(Err(anyhow::anyhow!(
                "relation \"jobs\" does not exist"
            ))))
        });
        self
    }

    pub fn with_create(
        mut self,
        job: NewJobPosting,
        result: Result<JobPosting, JobsRepoError>,
    ) -> Self {
        self.expect_create()
            .once()
            .with(mockall::predicate::always(), mockall::predicate::eq(job))
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }
}
