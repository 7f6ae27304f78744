use axum::http::{header, HeaderMap};
use jobboard_models::job::{
    JobCompany, JobDescription, JobId, JobLocation, JobPosting, JobSalary, JobTitle,
    NewJobPosting,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiJobPosting {
    pub id: JobId,
    pub title: JobTitle,
    pub company: JobCompany,
    pub location: JobLocation,
    pub salary: Option<JobSalary>,
    pub description: JobDescription,
}

impl From<JobPosting> for ApiJobPosting {
    fn from(job: JobPosting) -> Self {
        let JobPosting {
            id,
            title,
            company,
            location,
            salary,
            description,
        } = job;

        Self {
            id,
            title,
            company,
            location,
            salary,
            description,
        }
    }
}

/// Body of a create request before validation. Fields are kept as raw json
/// values so that a missing field and a field of the wrong type are both
/// reported as missing rather than as an unreadable body.
#[derive(Debug, Default, Deserialize)]
pub struct ApiJobCreateRequest {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub company: Option<Value>,
    #[serde(default)]
    pub location: Option<Value>,
    #[serde(default)]
    pub salary: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
}

impl ApiJobCreateRequest {
    /// Reads a create request from a raw body.
    ///
    /// A body that is not declared as json, is blank, or holds something other
    /// than an object carries no fields. Only json that cannot be parsed at all
    /// is an error.
    pub fn from_body(headers: &HeaderMap, body: &[u8]) -> serde_json::Result<Self> {
        if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice(body)? {
            value @ Value::Object(_) => serde_json::from_value(value),
            _ => Ok(Self::default()),
        }
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().to_ascii_lowercase())
        .is_some_and(|mime| mime == "application/json" || mime.ends_with("+json"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiJobCreateRequestError {
    MissingFields,
    InvalidSalary,
}

impl TryFrom<ApiJobCreateRequest> for NewJobPosting {
    type Error = ApiJobCreateRequestError;

    fn try_from(request: ApiJobCreateRequest) -> Result<Self, Self::Error> {
        let ApiJobCreateRequest {
            title,
            company,
            location,
            salary,
            description,
        } = request;

        let (Some(title), Some(company), Some(location), Some(description)) = (
            text(title, JobTitle::try_new),
            text(company, JobCompany::try_new),
            text(location, JobLocation::try_new),
            text(description, JobDescription::try_new),
        ) else {
            return Err(ApiJobCreateRequestError::MissingFields);
        };

        Ok(Self {
            title,
            company,
            location,
            salary: parse_salary(salary)?,
            description,
        })
    }
}

fn text<T, E>(value: Option<Value>, new: impl FnOnce(String) -> Result<T, E>) -> Option<T> {
    match value {
        Some(Value::String(s)) => new(s).ok(),
        _ => None,
    }
}

/// Absent, `null` and `""` mean "no salary". Otherwise the value must be a
/// non-negative integer, either as a json number or as a string of digits.
fn parse_salary(salary: Option<Value>) -> Result<Option<JobSalary>, ApiJobCreateRequestError> {
    let salary = match salary {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.is_empty() => return Ok(None),
        Some(Value::String(s)) => JobSalary::from_digits(&s),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| i32::try_from(n).ok())
            .and_then(|n| JobSalary::try_new(n).ok()),
        Some(_) => None,
    };

    salary
        .map(Some)
        .ok_or(ApiJobCreateRequestError::InvalidSalary)
}
