use jobboard_config::{DatabaseConfig, DatabaseTlsMode};
use jobboard_persistence_postgres::{PostgresDatabase, PostgresDatabaseConfig, PostgresTlsMode};

pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<PostgresDatabase> {
    PostgresDatabase::connect(&PostgresDatabaseConfig {
        url: config.url.clone(),
        max_connections: config.max_connections,
        min_connections: config.min_connections,
        acquire_timeout: config.acquire_timeout.into(),
        idle_timeout: config.idle_timeout.map(Into::into),
        max_lifetime: config.max_lifetime.map(Into::into),
        tls_mode: tls_mode(config.tls.mode),
        tls_accept_invalid_certs: config.tls.accept_invalid_certs,
    })
    .await
}

fn tls_mode(mode: DatabaseTlsMode) -> PostgresTlsMode {
    match mode {
        DatabaseTlsMode::Disable => PostgresTlsMode::Disable,
        DatabaseTlsMode::Prefer => PostgresTlsMode::Prefer,
        DatabaseTlsMode::Require => PostgresTlsMode::Require,
    }
}
