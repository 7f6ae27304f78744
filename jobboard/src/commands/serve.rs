use anyhow::Context;
use jobboard_config::Config;
use jobboard_persistence_contracts::Database;
use tracing::{error, info};

use crate::{
    database,
    environment::{JobsFeature, JobsRepo, RestServer},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to database");
    let database = database::connect(&config.database).await?;
    database.ping().await.context("Failed to ping database")?;

    let jobs = JobsFeature::new(database, JobsRepo::default());
    let server = RestServer::new(jobs, &config.http.allowed_origin)?;

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server
        .serve(config.http.host, config.http.port, shutdown_signal())
        .await?;

    info!("Http server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(err) => {
            error!("Failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    }
}
