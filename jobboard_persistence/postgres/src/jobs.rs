use bb8_postgres::tokio_postgres::{self, Row};
use jobboard_models::job::{JobPosting, JobSalary, NewJobPosting};
use jobboard_persistence_contracts::jobs::{JobsRepoError, JobsRepository};
use jobboard_utils::trace_instrument;

use crate::{arg_indices, columns, ColumnCounter, PostgresTransaction};

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresJobsRepository;

columns!(jobs as "j": "id", "title", "company", "location", "salary", "description");
columns!(job_fields as "j": "title", "company", "location", "salary", "description");

impl JobsRepository<PostgresTransaction> for PostgresJobsRepository {
    #[trace_instrument(skip(self, txn))]
    async fn list(&self, txn: &mut PostgresTransaction) -> anyhow::Result<Vec<JobPosting>> {
        txn.txn()?
            .query(&format!("select {JOBS_COLS} from jobs j order by j.id"), &[])
            .await
            .map_err(Into::into)
            .and_then(|rows| {
                rows.into_iter()
                    .map(|row| decode_job(&row, &mut Default::default()))
                    .collect()
            })
    }

    #[trace_instrument(skip(self, txn))]
    async fn create(
        &self,
        txn: &mut PostgresTransaction,
        job: &NewJobPosting,
    ) -> Result<JobPosting, JobsRepoError> {
        let salary = job.salary.map(JobSalary::into_inner);

        let row = txn
            .txn()?
            .query_one(
                &format!(
                    "insert into jobs as j ({JOB_FIELDS_COL_NAMES}) values ({}) returning \
                     {JOBS_COLS}",
                    arg_indices(1..=JOB_FIELDS_CNT)
                ),
                &[
                    &job.title.as_str(),
                    &job.company.as_str(),
                    &job.location.as_str(),
                    &salary,
                    &job.description.as_str(),
                ],
            )
            .await
            .map_err(map_jobs_repo_error)?;

        decode_job(&row, &mut Default::default()).map_err(Into::into)
    }
}

fn decode_job(row: &Row, cnt: &mut ColumnCounter) -> anyhow::Result<JobPosting> {
    Ok(JobPosting {
        id: row.get::<_, i32>(cnt.idx()).into(),
        title: row.get::<_, String>(cnt.idx()).try_into()?,
        company: row.get::<_, String>(cnt.idx()).try_into()?,
        location: row.get::<_, String>(cnt.idx()).try_into()?,
        salary: row
            .get::<_, Option<i32>>(cnt.idx())
            .map(JobSalary::try_new)
            .transpose()?,
        description: row.get::<_, String>(cnt.idx()).try_into()?,
    })
}

fn map_jobs_repo_error(err: tokio_postgres::Error) -> JobsRepoError {
    JobsRepoError::Other(err.into())
}
