use serde::Serialize;

pub mod job;

#[derive(Serialize)]
pub struct ApiError {
    pub error: &'static str,
}
