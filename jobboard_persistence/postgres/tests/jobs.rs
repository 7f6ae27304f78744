use common::{setup, setup_clean};
use jobboard_demo::{new_job, ALL_JOBS, BACKEND_DEV, DESIGNER};
use jobboard_models::job::{JobPosting, JobSalary, NewJobPosting};
use jobboard_persistence_contracts::{jobs::JobsRepository, Database, Transaction};
use jobboard_persistence_postgres::jobs::PostgresJobsRepository;
use pretty_assertions::assert_eq;

mod common;

const REPO: PostgresJobsRepository = PostgresJobsRepository;

#[tokio::test]
async fn list_empty() {
    let db = setup_clean().await;
    let mut txn = db.begin_transaction().await.unwrap();

    let result = REPO.list(&mut txn).await.unwrap();

    assert_eq!(result, Vec::<JobPosting>::new());
}

#[tokio::test]
async fn list() {
    let db = setup().await;
    let mut txn = db.begin_transaction().await.unwrap();

    let result = REPO.list(&mut txn).await.unwrap();

    assert_eq!(
        result,
        ALL_JOBS.iter().map(|&job| job.clone()).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn create() {
    let db = setup().await;

    let new = NewJobPosting {
        title: "Engineer".try_into().unwrap(),
        company: "Acme".try_into().unwrap(),
        location: "Remote".try_into().unwrap(),
        salary: Some(JobSalary::try_new(90000).unwrap()),
        description: "Build things".try_into().unwrap(),
    };

    let mut txn = db.begin_transaction().await.unwrap();
    let created = REPO.create(&mut txn, &new).await.unwrap();
    txn.commit().await.unwrap();

    assert_eq!(created, new.clone().with_id(4.into()));

    let mut txn = db.begin_transaction().await.unwrap();
    let result = REPO.list(&mut txn).await.unwrap();
    assert_eq!(result.last(), Some(&created));
    assert_eq!(result.len(), ALL_JOBS.len() + 1);
}

#[tokio::test]
async fn create_without_salary() {
    let db = setup_clean().await;

    let mut txn = db.begin_transaction().await.unwrap();
    let created = REPO.create(&mut txn, &new_job(&DESIGNER)).await.unwrap();
    txn.commit().await.unwrap();

    assert_eq!(created.salary, None);

    let mut txn = db.begin_transaction().await.unwrap();
    let result = REPO.list(&mut txn).await.unwrap();
    assert_eq!(result, [created]);
}

#[tokio::test]
async fn rollback_discards_insert() {
    let db = setup_clean().await;

    let mut txn = db.begin_transaction().await.unwrap();
    REPO.create(&mut txn, &new_job(&BACKEND_DEV)).await.unwrap();
    txn.rollback().await.unwrap();

    let mut txn = db.begin_transaction().await.unwrap();
    let result = REPO.list(&mut txn).await.unwrap();
    assert_eq!(result, Vec::<JobPosting>::new());
}

#[tokio::test]
async fn ping() {
    let db = setup_clean().await;
    db.ping().await.unwrap();
}
