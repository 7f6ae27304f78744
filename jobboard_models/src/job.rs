use nutype::nutype;
use serde::{Deserialize, Serialize};

use crate::macros::{id, nutype_string};

id!(JobId);

nutype_string!(JobTitle(validate(not_empty)));
nutype_string!(JobCompany(validate(not_empty)));
nutype_string!(JobLocation(validate(not_empty)));
nutype_string!(JobDescription(validate(not_empty)));

/// Yearly salary of a job posting. Never negative.
#[nutype(
    validate(greater_or_equal = 0),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Deref,
        TryFrom,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct JobSalary(i32);

impl JobSalary {
    /// Parses a salary from a string consisting only of ascii digits.
    ///
    /// Returns `None` for empty strings, strings containing anything other
    /// than `0-9` (including signs and whitespace) and values that do not fit
    /// into the salary column.
    pub fn from_digits(input: &str) -> Option<Self> {
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        input.parse::<i32>().ok().and_then(|x| Self::try_new(x).ok())
    }
}

/// A job posting as persisted by the job store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub title: JobTitle,
    pub company: JobCompany,
    pub location: JobLocation,
    pub salary: Option<JobSalary>,
    pub description: JobDescription,
}

/// A job posting that has not been stored yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJobPosting {
    pub title: JobTitle,
    pub company: JobCompany,
    pub location: JobLocation,
    pub salary: Option<JobSalary>,
    pub description: JobDescription,
}

impl NewJobPosting {
    pub fn with_id(self, id: JobId) -> JobPosting {
        let Self {
            title,
            company,
            location,
            salary,
            description,
        } = self;

        JobPosting {
            id,
            title,
            company,
            location,
            salary,
            description,
        }
    }
}
