use anyhow::Context;
use jobboard_core_jobs_contracts::{JobCreateError, JobsFeatureService};
use jobboard_models::job::{JobPosting, NewJobPosting};
use jobboard_persistence_contracts::{
    jobs::{JobsRepoError, JobsRepository},
    Database, Transaction,
};
use jobboard_utils::trace_instrument;
use tracing::info;


#[derive(Debug, Clone, Default)]
pub struct JobsFeatureServiceImpl<Db, JobsRepo> {
    db: Db,
    jobs_repo: JobsRepo,
}

impl<Db, JobsRepo> JobsFeatureServiceImpl<Db, JobsRepo> {
    pub fn new(db: Db, jobs_repo: JobsRepo) -> Self {
        Self { db, jobs_repo }
    }
}

impl<Db, JobsRepo> JobsFeatureService for JobsFeatureServiceImpl<Db, JobsRepo>
where
    Db: Database,
    JobsRepo: JobsRepository<Db::Transaction>,
{
    #[trace_instrument(skip(self))]
    async fn list_jobs(&self) -> anyhow::Result<Vec<JobPosting>> {
        let mut txn = self.db.begin_transaction().await?;

        self.jobs_repo
            .list(&mut txn)
            .await
            .context("Failed to get jobs from database")
    }

    #[trace_instrument(skip(self))]
    async fn create_job(&self, job: NewJobPosting) -> Result<JobPosting, JobCreateError> {
        let mut txn = self.db.begin_transaction().await?;

        let job = self
            .jobs_repo
            .create(&mut txn, &job)
            .await
            .map_err(|err| match err {
                JobsRepoError::Other(err) => err.context("Failed to create job in database"),
            })?;

        txn.commit().await?;

        info!(job_id = %job.id, title = %job.title, "job posted");

        Ok(job)
    }
}
