use jobboard_core_jobs_impl::JobsFeatureServiceImpl;
use jobboard_persistence_postgres::{jobs::PostgresJobsRepository, PostgresDatabase};

// Persistence
pub type Database = PostgresDatabase;
pub type JobsRepo = PostgresJobsRepository;

// Core
pub type JobsFeature = JobsFeatureServiceImpl<Database, JobsRepo>;

// API
pub type RestServer = jobboard_api_rest::RestServer<JobsFeature>;

// Client
pub type JobBoardApi = jobboard_client::http::HttpJobBoardApi;
pub type Time = jobboard_shared_impl::time::TimeServiceImpl;
