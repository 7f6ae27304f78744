use std::ops::Deref;

use jobboard_config::DatabaseTlsMode;
use jobboard_persistence_contracts::{Database, Transaction};
use jobboard_persistence_postgres::{
    jobs::PostgresJobsRepository, PostgresDatabase, PostgresDatabaseConfig, PostgresTlsMode,
};
use tokio::sync::{Mutex, MutexGuard};

/// Every test recreates the same table, so tests holding a [`Db`] run one at
/// a time.
static LOCK: Mutex<()> = Mutex::const_new(());

pub struct Db {
    db: PostgresDatabase,
    _guard: MutexGuard<'static, ()>,
}

impl Deref for Db {
    type Target = PostgresDatabase;

    fn deref(&self) -> &Self::Target {
        &self.db
    }
}

const JOBS_TABLE: &str = "
    drop table if exists jobs;
    create table jobs (
        id serial primary key,
        title text not null,
        company text not null,
        location text not null,
        salary integer,
        description text not null
    );
";

pub async fn setup() -> Db {
    let db = setup_clean().await;

    let mut txn = db.begin_transaction().await.unwrap();
    jobboard_demo::create(&mut txn, PostgresJobsRepository)
        .await
        .unwrap();
    txn.commit().await.unwrap();

    db
}

pub async fn setup_clean() -> Db {
    let guard = LOCK.lock().await;
    let config = jobboard_config::load().unwrap();

    let db = PostgresDatabase::connect(&PostgresDatabaseConfig {
        url: config.database.url,
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        acquire_timeout: config.database.acquire_timeout.into(),
        idle_timeout: config.database.idle_timeout.map(Into::into),
        max_lifetime: config.database.max_lifetime.map(Into::into),
        tls_mode: match config.database.tls.mode {
            DatabaseTlsMode::Disable => PostgresTlsMode::Disable,
            DatabaseTlsMode::Prefer => PostgresTlsMode::Prefer,
            DatabaseTlsMode::Require => PostgresTlsMode::Require,
        },
        tls_accept_invalid_certs: config.database.tls.accept_invalid_certs,
    })
    .await
    .unwrap();

    db.execute(JOBS_TABLE).await.unwrap();

    Db { db, _guard: guard }
}
