use std::{fmt::Write, time::Duration};

use anyhow::{anyhow, Context};
use bb8::{Pool, PooledConnection};
use bb8_postgres::{tokio_postgres, PostgresConnectionManager};
use jobboard_persistence_contracts::{Database, Transaction};
use jobboard_utils::trace_instrument;
use ouroboros::self_referencing;
use tokio_postgres_rustls::MakeRustlsConnect;
use tracing::trace;

pub use crate::tls::PostgresTlsMode;

pub mod jobs;
mod tls;

type PgConnectionManager = PostgresConnectionManager<MakeRustlsConnect>;
type PgPooledConnection = PooledConnection<'static, PgConnectionManager>;
type PgTransaction<'a> = tokio_postgres::Transaction<'a>;

#[derive(Debug, Clone)]
pub struct PostgresDatabase {
    pool: Pool<PgConnectionManager>,
}

#[derive(Debug)]
pub struct PostgresDatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
    /// Overrides any `sslmode` given in the url.
    pub tls_mode: PostgresTlsMode,
    pub tls_accept_invalid_certs: bool,
}

impl PostgresDatabaseConfig {
    fn connection_config(&self) -> anyhow::Result<tokio_postgres::Config> {
        let mut config = self
            .url
            .parse::<tokio_postgres::Config>()
            .context("Invalid database url")?;
        config.ssl_mode(self.tls_mode.into());
        Ok(config)
    }
}

impl PostgresDatabase {
    pub async fn connect(config: &PostgresDatabaseConfig) -> anyhow::Result<Self> {
        let manager = PostgresConnectionManager::new(
            config.connection_config()?,
            tls::connector(config.tls_accept_invalid_certs)?,
        );
        let pool = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(config.min_connections)
            .connection_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .build(manager)
            .await
            .context("Failed to build connection pool")?;

        Ok(Self { pool })
    }

    /// Runs one or more raw sql statements outside of a transaction.
    ///
    /// The `jobs` table is provisioned externally, this is only meant for
    /// administrative statements and test setup.
    pub async fn execute(&self, query: &str) -> anyhow::Result<()> {
        let conn = self
            .pool
            .get()
            .await
            .context("Failed to acquire database connection")?;
        conn.batch_execute(query)
            .await
            .context("Failed to execute query")?;
        Ok(())
    }
}

impl Database for PostgresDatabase {
    type Transaction = PostgresTransaction;

    async fn begin_transaction(&self) -> anyhow::Result<Self::Transaction> {
        trace!("begin transaction");

        let conn = self
            .pool
            .get_owned()
            .await
            .context("Failed to acquire database connection")?;

        PostgresTransactionAsyncSendTryBuilder {
            conn,
            txn_builder: |conn| Box::pin(async move { conn.transaction().await.map(Some) }),
        }
        .try_build()
        .await
        .context("Failed to begin transaction")
    }

    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        let conn = self
            .pool
            .get()
            .await
            .context("Failed to acquire database connection")?;

        conn.query_one("select 1", &[])
            .await
            .map_err(Into::into)
            .map(|row| row.get(0))
            .and_then(|res: i32| {
                (res == 1)
                    .then_some(())
                    .ok_or_else(|| anyhow!("Expected a result of 1, got {res} instead"))
            })
            .context("Failed to ping database")
    }
}

#[self_referencing]
pub struct PostgresTransaction {
    conn: PgPooledConnection,
    #[borrows(mut conn)]
    #[covariant]
    txn: Option<PgTransaction<'this>>,
}

impl PostgresTransaction {
    fn txn(&self) -> anyhow::Result<&PgTransaction<'_>> {
        self.borrow_txn()
            .as_ref()
            .ok_or_else(|| anyhow!("Transaction has already been finished"))
    }
}

impl Transaction for PostgresTransaction {
    async fn commit(mut self) -> anyhow::Result<()> {
        trace!("commit transaction");

        self.with_txn_mut(|txn| txn.take())
            .ok_or_else(|| anyhow!("Transaction has already been finished"))?
            .commit()
            .await
            .context("Failed to commit transaction")
    }

    async fn rollback(mut self) -> anyhow::Result<()> {
        trace!("rollback transaction");

        self.with_txn_mut(|txn| txn.take())
            .ok_or_else(|| anyhow!("Transaction has already been finished"))?
            .rollback()
            .await
            .context("Failed to rollback transaction")
    }
}

macro_rules! columns {
    ($vis:vis $ident:ident as $alias:literal: $fst:literal $(, $col:literal)* $(,)?) => {
        ::paste::paste! {
            #[allow(unused, reason = "not every table needs all constants")]
            $vis const [< $ident:snake:upper _CNT >]: usize = [ $fst $(, $col)* ].len();
            #[allow(unused, reason = "not every table needs all constants")]
            $vis const [< $ident:snake:upper _COLS >]: &str = ::core::concat!( '"', $alias, "\".\"", $fst, '"' $(, ", \"" , $alias, "\".\"", $col, '"' )* );
            #[allow(unused, reason = "not every table needs all constants")]
            $vis const [< $ident:snake:upper _COL_NAMES >]: &str = ::core::concat!( '"', $fst, '"' $(, ", \"", $col, '"' )* );
        }
    };
}
use columns;

fn arg_indices(indices: impl IntoIterator<Item = usize>) -> String {
    let mut out = String::new();
    for (i, x) in indices.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(&mut out, "${x}");
    }
    out
}

#[derive(Debug, Default)]
struct ColumnCounter(usize);
impl ColumnCounter {
    fn idx(&mut self) -> usize {
        let idx = self.0;
        self.0 += 1;
        idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    columns!(things as "t": "id", "name");

    #[test]
    fn column_constants() {
        assert_eq!(THINGS_CNT, 2);
        assert_eq!(THINGS_COLS, r#""t"."id", "t"."name""#);
        assert_eq!(THINGS_COL_NAMES, r#""id", "name""#);
    }

    #[test]
    fn arg_indices_list() {
        assert_eq!(arg_indices(1..=3), "$1, $2, $3");
        assert_eq!(arg_indices(4..=4), "$4");
        assert_eq!(arg_indices(1..1), "");
    }

    fn db_config(url: &str, tls_mode: PostgresTlsMode) -> PostgresDatabaseConfig {
        PostgresDatabaseConfig {
            url: url.into(),
            max_connections: 1,
            min_connections: 0,
            acquire_timeout: Duration::from_secs(1),
            idle_timeout: None,
            max_lifetime: None,
            tls_mode,
            tls_accept_invalid_certs: false,
        }
    }

    #[test]
    fn tls_mode_overrides_url() {
        use tokio_postgres::config::SslMode;

        let url = "postgres://jobboard@db.example.com/jobboard?sslmode=require";
        let config = db_config(url, PostgresTlsMode::Disable)
            .connection_config()
            .unwrap();
        assert_eq!(config.get_ssl_mode(), SslMode::Disable);

        let url = "postgres://jobboard@db.example.com/jobboard";
        let config = db_config(url, PostgresTlsMode::Require)
            .connection_config()
            .unwrap();
        assert_eq!(config.get_ssl_mode(), SslMode::Require);
    }

    #[test]
    fn invalid_url() {
        let err = db_config("postgres://[", PostgresTlsMode::Disable)
            .connection_config()
            .unwrap_err();
        assert!(err.to_string().contains("Invalid database url"));
    }

    #[test]
    fn column_counter() {
        let mut cnt = ColumnCounter::default();
        assert_eq!(cnt.idx(), 0);
        assert_eq!(cnt.idx(), 1);
        assert_eq!(cnt.idx(), 2);
    }
}
