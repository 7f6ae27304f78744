use chrono::{DateTime, Utc};
use jobboard_models::job::JobPosting;
use tracing::{error, info};

use crate::{
    api::{JobBoardApi, JobBoardApiError, JobSubmission},
    toast::{expiry, ToastKind, ToastQueue},
};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";
pub const POSTED_MESSAGE: &str = "Job posted successfully!";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit job posting";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Company,
    Location,
    Salary,
    Description,
}

/// State of the job submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostJobForm {
    title: String,
    company: String,
    location: String,
    salary: String,
    description: String,
    error: Option<String>,
    success_until: Option<DateTime<Utc>>,
}

impl PostJobForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates a field and clears the current error.
    ///
    /// The salary only accepts an empty string or a string of ascii digits.
    /// Any other salary edit is rejected, leaving the previous value in
    /// place, and `false` is returned.
    pub fn on_change(&mut self, field: FormField, value: impl Into<String>) -> bool {
        let value = value.into();

        if field == FormField::Salary && !value.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }

        *self.field_mut(field) = value;
        self.error = None;
        true
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Company => &self.company,
            FormField::Location => &self.location,
            FormField::Salary => &self.salary,
            FormField::Description => &self.description,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Company => &mut self.company,
            FormField::Location => &mut self.location,
            FormField::Salary => &mut self.salary,
            FormField::Description => &mut self.description,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a job has been posted recently.
    pub fn success(&self) -> bool {
        self.success_until.is_some()
    }

    /// Clears the success flag once it has outlived the toast ttl.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if self.success_until.is_some_and(|until| until <= now) {
            self.success_until = None;
        }
    }

    /// Validates the form and submits it. On success the form is cleared and
    /// the created job is returned. Every outcome is reported to `toasts`.
    pub async fn submit(
        &mut self,
        api: &impl JobBoardApi,
        toasts: &mut ToastQueue,
        now: DateTime<Utc>,
    ) -> Option<JobPosting> {
        let required = [&self.title, &self.company, &self.location, &self.description];
        if required.iter().any(|value| value.is_empty()) {
            self.error = Some(REQUIRED_FIELDS_MESSAGE.into());
            toasts.push(ToastKind::Error, REQUIRED_FIELDS_MESSAGE, now);
            return None;
        }

        let submission = JobSubmission {
            title: self.title.clone(),
            company: self.company.clone(),
            location: self.location.clone(),
            salary: (!self.salary.is_empty()).then(|| self.salary.clone()),
            description: self.description.clone(),
        };

        match api.post_job(submission).await {
            Ok(job) => {
                info!(job_id = %job.id, "job posted");
                *self = Self {
                    success_until: Some(expiry(now, toasts.ttl())),
                    ..Self::default()
                };
                toasts.push(ToastKind::Success, POSTED_MESSAGE, now);
                Some(job)
            }
            Err(err) => {
                error!("failed to submit job posting: {err:#}");
                let message = match err {
                    JobBoardApiError::Status {
                        message: Some(message),
                        ..
                    } => message,
                    _ => SUBMIT_FAILED_MESSAGE.into(),
                };
                toasts.push(ToastKind::Error, message.clone(), now);
                self.error = Some(message);
                self.success_until = None;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use jobboard_models::job::{JobSalary, NewJobPosting};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::api::MockJobBoardApi;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn filled() -> PostJobForm {
        let mut form = PostJobForm::new();
        form.on_change(FormField::Title, "Engineer");
        form.on_change(FormField::Company, "Acme");
        form.on_change(FormField::Location, "Remote");
        form.on_change(FormField::Salary, "90000");
        form.on_change(FormField::Description, "Build things");
        form
    }

    fn submission() -> JobSubmission {
        JobSubmission {
            title: "Engineer".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            salary: Some("90000".into()),
            description: "Build things".into(),
        }
    }

    fn created() -> JobPosting {
        NewJobPosting {
            title: "Engineer".try_into().unwrap(),
            company: "Acme".try_into().unwrap(),
            location: "Remote".try_into().unwrap(),
            salary: Some(JobSalary::try_new(90000).unwrap()),
            description: "Build things".try_into().unwrap(),
        }
        .with_id(4.into())
    }

    #[test]
    fn salary_accepts_only_digits() {
        let mut form = PostJobForm::new();

        assert!(form.on_change(FormField::Salary, "75000"));
        assert!(!form.on_change(FormField::Salary, "75k"));
        assert!(!form.on_change(FormField::Salary, "-1"));
        assert!(!form.on_change(FormField::Salary, "7 5"));
        assert_eq!(form.value(FormField::Salary), "75000");

        assert!(form.on_change(FormField::Salary, ""));
        assert_eq!(form.value(FormField::Salary), "");
    }

    #[test]
    fn other_fields_are_stored_untrimmed() {
        let mut form = PostJobForm::new();

        assert!(form.on_change(FormField::Title, "  Engineer  "));
        assert_eq!(form.value(FormField::Title), "  Engineer  ");
    }

    #[tokio::test]
    async fn submit_missing_fields() {
        // Arrange
        let api = MockJobBoardApi::new();
        let mut toasts = ToastQueue::default();
        let mut form = filled();
        form.on_change(FormField::Company, "");

        // Act
        let result = form.submit(&api, &mut toasts, now()).await;

        // Assert
        assert_eq!(result, None);
        assert_eq!(form.error(), Some(REQUIRED_FIELDS_MESSAGE));
        assert_eq!(form.value(FormField::Title), "Engineer");
        assert_eq!(toasts.active().len(), 1);
        assert_eq!(toasts.active()[0].kind, ToastKind::Error);
        assert_eq!(toasts.active()[0].message, REQUIRED_FIELDS_MESSAGE);
    }

    #[tokio::test]
    async fn edit_clears_error() {
        // Arrange
        let api = MockJobBoardApi::new();
        let mut toasts = ToastQueue::default();
        let mut form = PostJobForm::new();
        form.submit(&api, &mut toasts, now()).await;

        // Act
        form.on_change(FormField::Title, "E");

        // Assert
        assert_eq!(form.error(), None);
    }

    #[tokio::test]
    async fn submit_ok() {
        // Arrange
        let api = MockJobBoardApi::new().with_post_job(submission(), Ok(created()));
        let mut toasts = ToastQueue::default();
        let mut form = filled();

        // Act
        let result = form.submit(&api, &mut toasts, now()).await;

        // Assert
        assert_eq!(result, Some(created()));
        assert_eq!(form.error(), None);
        assert!(form.success());
        for field in [
            FormField::Title,
            FormField::Company,
            FormField::Location,
            FormField::Salary,
            FormField::Description,
        ] {
            assert_eq!(form.value(field), "");
        }
        assert_eq!(toasts.active()[0].kind, ToastKind::Success);
        assert_eq!(toasts.active()[0].message, POSTED_MESSAGE);

        form.tick(now() + TimeDelta::milliseconds(2999));
        assert!(form.success());
        form.tick(now() + TimeDelta::milliseconds(3000));
        assert!(!form.success());

        toasts.prune(now() + TimeDelta::milliseconds(3000));
        assert!(toasts.active().is_empty());
    }

    #[tokio::test]
    async fn submit_without_salary() {
        // Arrange
        let expected = JobSubmission {
            salary: None,
            ..submission()
        };
        let api = MockJobBoardApi::new().with_post_job(expected, Ok(created()));
        let mut toasts = ToastQueue::default();
        let mut form = filled();
        form.on_change(FormField::Salary, "");

        // Act
        let result = form.submit(&api, &mut toasts, now()).await;

        // Assert
        assert!(result.is_some());
    }

    #[tokio::test]
    async fn submit_rejected_by_api() {
        // Arrange
        let api = MockJobBoardApi::new().with_post_job(
            submission(),
            Err(JobBoardApiError::Status {
                status: 400,
                message: Some("Invalid salary".into()),
            }),
        );
        let mut toasts = ToastQueue::default();
        let mut form = filled();

        // Act
        let result = form.submit(&api, &mut toasts, now()).await;

        // Assert
        assert_eq!(result, None);
        assert_eq!(form.error(), Some("Invalid salary"));
        assert!(!form.success());
        assert_eq!(form.value(FormField::Salary), "90000");
        assert_eq!(toasts.active()[0].message, "Invalid salary");
    }

    #[tokio::test]
    async fn submit_transport_error() {
        // Arrange
        let api = MockJobBoardApi::new().with_post_job(
            submission(),
            Err(JobBoardApiError::Transport(anyhow::anyhow!(
                "connection refused"
            ))),
        );
        let mut toasts = ToastQueue::default();
        let mut form = filled();

        // Act
        let result = form.submit(&api, &mut toasts, now()).await;

        // Assert
        assert_eq!(result, None);
        assert_eq!(form.error(), Some(SUBMIT_FAILED_MESSAGE));
        assert_eq!(toasts.active()[0].kind, ToastKind::Error);
        assert_eq!(form.value(FormField::Title), "Engineer");
    }
}
