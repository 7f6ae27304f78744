use std::sync::LazyLock;

use jobboard_models::job::{JobPosting, JobSalary, NewJobPosting};
use jobboard_persistence_contracts::jobs::JobsRepository;

pub static BACKEND_DEV: LazyLock<JobPosting> = LazyLock::new(|| JobPosting {
    id: 1.into(),
    title: "Backend Dev".try_into().unwrap(),
    company: "Acme".try_into().unwrap(),
    location: "NYC".try_into().unwrap(),
    salary: Some(JobSalary::try_new(75000).unwrap()),
    description: "Design and operate the services behind our job board.".try_into().unwrap(),
});

pub static DESIGNER: LazyLock<JobPosting> = LazyLock::new(|| JobPosting {
    id: 2.into(),
    title: "Designer".try_into().unwrap(),
    company: "Globex".try_into().unwrap(),
    location: "LA".try_into().unwrap(),
    salary: None,
    description: "Shape the look and feel of our products.".try_into().unwrap(),
});

pub static DATA_ENGINEER: LazyLock<JobPosting> = LazyLock::new(|| JobPosting {
    id: 3.into(),
    title: "Data Engineer".try_into().unwrap(),
    company: "Initech".try_into().unwrap(),
    location: "Remote (Atlanta)".try_into().unwrap(),
    salary: Some(JobSalary::try_new(1_250_000).unwrap()),
    description: "Own the pipelines that move millions of events per day from our \
                  producers into the warehouse, keep them observable, fast and cheap, \
                  and mentor the analysts that depend on them."
        .try_into()
        .unwrap(),
});

/// All demo job postings in insertion order.
pub static ALL_JOBS: LazyLock<[&JobPosting; 3]> =
    LazyLock::new(|| [&BACKEND_DEV, &DESIGNER, &DATA_ENGINEER]);

/// Strips the id of a demo job posting.
pub fn new_job(job: &JobPosting) -> NewJobPosting {
    NewJobPosting {
        title: job.title.clone(),
        company: job.company.clone(),
        location: job.location.clone(),
        salary: job.salary,
        description: job.description.clone(),
    }
}

/// Inserts all demo job postings and returns the stored records.
pub async fn create<Txn: Send + Sync + 'static>(
    txn: &mut Txn,
    repo: impl JobsRepository<Txn>,
) -> anyhow::Result<Vec<JobPosting>> {
    let mut out = Vec::with_capacity(ALL_JOBS.len());
    for &job in &*ALL_JOBS {
        out.push(repo.create(txn, &new_job(job)).await?);
    }
    Ok(out)
}
