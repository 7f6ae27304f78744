use std::fmt;

use jobboard_models::job::JobPosting;
use tracing::{debug, error};

use crate::{
    api::{JobBoardApi, JobBoardApiError},
    format::{description_preview, salary_line},
};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch jobs";

/// State of the job listing. Jobs are fetched once on [`JobsPage::mount`] and
/// then only filtered in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobsPage {
    jobs: Vec<JobPosting>,
    search_term: String,
    location_filter: String,
    loading: bool,
    error: Option<String>,
    mounted: bool,
}

impl Default for JobsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl JobsPage {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            search_term: String::new(),
            location_filter: String::new(),
            loading: true,
            error: None,
            mounted: false,
        }
    }

    /// Fetches the job list. Only the first call issues a request.
    pub async fn mount(&mut self, api: &impl JobBoardApi) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        match api.list_jobs().await {
            Ok(jobs) => self.on_jobs_loaded(jobs),
            Err(err) => self.on_fetch_failed(&err),
        }
    }

    pub fn on_jobs_loaded(&mut self, jobs: Vec<JobPosting>) {
        debug!(count = jobs.len(), "loaded jobs");
        self.jobs = jobs;
        self.loading = false;
    }

    pub fn on_fetch_failed(&mut self, err: &JobBoardApiError) {
        error!("failed to fetch jobs: {err:#}");
        self.error = Some(match err {
            JobBoardApiError::Status { .. } => FETCH_FAILED_MESSAGE.into(),
            JobBoardApiError::Transport(err) => err.to_string(),
        });
        self.loading = false;
    }

    pub fn on_search_change(&mut self, search_term: impl Into<String>) {
        self.search_term = search_term.into();
    }

    pub fn on_location_change(&mut self, location_filter: impl Into<String>) {
        self.location_filter = location_filter.into();
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn location_filter(&self) -> &str {
        &self.location_filter
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The jobs matching the current search term and location filter, in
    /// their original order.
    pub fn filtered_jobs(&self) -> Vec<&JobPosting> {
        let filter = JobFilter::new(&self.search_term, &self.location_filter);
        self.jobs.iter().filter(|job| filter.matches(job)).collect()
    }

    pub fn render(&self) -> JobsView {
        if self.loading {
            return JobsView::Loading;
        }

        if let Some(error) = &self.error {
            return JobsView::Error(error.clone());
        }

        let cards = self
            .filtered_jobs()
            .into_iter()
            .map(JobCard::from)
            .collect::<Vec<_>>();

        if cards.is_empty() {
            JobsView::NoResults
        } else {
            JobsView::Cards(cards)
        }
    }
}

/// Case insensitive substring filter. The search term is matched against
/// title, company and description; the location filter only against the
/// location. Empty terms match everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFilter {
    search_term: String,
    location_filter: String,
}

impl JobFilter {
    pub fn new(search_term: &str, location_filter: &str) -> Self {
        Self {
            search_term: search_term.to_lowercase(),
            location_filter: location_filter.to_lowercase(),
        }
    }

    pub fn matches(&self, job: &JobPosting) -> bool {
        let matches_search = [
            job.title.as_str(),
            job.company.as_str(),
            job.description.as_str(),
        ]
        .into_iter()
        .any(|field| field.to_lowercase().contains(&self.search_term));

        let matches_location = job.location.to_lowercase().contains(&self.location_filter);

        matches_search && matches_location
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobsView {
    Loading,
    Error(String),
    NoResults,
    Cards(Vec<JobCard>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCard {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Omitted for jobs without a salary.
    pub salary: Option<String>,
    pub description: String,
    pub actions: [&'static str; 2],
}

impl JobCard {
    pub const ACTIONS: [&'static str; 2] = ["Apply Now", "Save"];
}

impl From<&JobPosting> for JobCard {
    fn from(job: &JobPosting) -> Self {
        Self {
            title: job.title.to_string(),
            company: job.company.to_string(),
            location: job.location.to_string(),
            salary: job.salary.map(|salary| salary_line(*salary)),
            description: description_preview(&job.description).into_owned(),
            actions: Self::ACTIONS,
        }
    }
}

impl fmt::Display for JobsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => writeln!(f, "Loading jobs..."),
            Self::Error(error) => writeln!(f, "Error: {error}"),
            Self::NoResults => writeln!(f, "No jobs found matching your criteria"),
            Self::Cards(cards) => cards.iter().try_for_each(|card| write!(f, "{card}")),
        }
    }
}

impl fmt::Display for JobCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} | {}", self.title, self.company)?;
        write!(f, "  {}", self.location)?;
        if let Some(salary) = &self.salary {
            write!(f, "  {salary}")?;
        }
        writeln!(f)?;
        writeln!(f, "  {}", self.description)?;
        writeln!(f, "  [{}]", self.actions.join("] ["))
    }
}
