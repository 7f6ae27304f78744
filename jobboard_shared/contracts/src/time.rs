use chrono::{DateTime, Utc};

/// Source of the current time for anything that stamps or expires state, such
/// as toasts and the success flag of the job form.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TimeService: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

#[cfg(feature = "mock")]
impl MockTimeService {
    pub fn with_now(mut self, time: DateTime<Utc>) -> Self {
        self.expect_now().once().return_const(time);
        self
    }

    /// Expects one call to [`TimeService::now`] per item, returning them in
    /// order.
    pub fn with_now_sequence(mut self, times: impl IntoIterator<Item = DateTime<Utc>>) -> Self {
        let mut seq = mockall::Sequence::new();
        for time in times {
            self.expect_now()
                .once()
                .in_sequence(&mut seq)
                .return_const(time);
        }
        self
    }
}
