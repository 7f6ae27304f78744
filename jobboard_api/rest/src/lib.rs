use std::{future::Future, net::IpAddr};

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use jobboard_core_jobs_contracts::JobsFeatureService;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Jobs> {
    jobs: Jobs,
    allowed_origin: HeaderValue,
}

impl<Jobs> RestServer<Jobs>
where
    Jobs: JobsFeatureService,
{
    /// `allowed_origin` is the only origin browsers may call the api from.
    pub fn new(jobs: Jobs, allowed_origin: &str) -> anyhow::Result<Self> {
        let allowed_origin = HeaderValue::from_str(allowed_origin)
            .with_context(|| format!("Invalid allowed origin: {allowed_origin:?}"))?;

        Ok(Self {
            jobs,
            allowed_origin,
        })
    }

    /// Serves the api until `shutdown` resolves, then waits for in-flight
    /// requests to finish.
    pub async fn serve(
        self,
        host: IpAddr,
        port: u16,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;

        info!("listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(Into::into)
    }

    pub fn router(self) -> Router<()> {
        let cors = CorsLayer::new()
            .allow_origin(self.allowed_origin)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]);

        let router = Router::new().merge(routes::jobs::router(self.jobs.into()));
        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);

        router.layer(cors)
    }
}
