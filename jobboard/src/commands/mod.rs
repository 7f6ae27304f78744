pub mod jobs;
pub mod serve;
