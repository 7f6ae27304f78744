use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Transient notifications. Every toast expires a fixed time after it has
/// been pushed and is dropped by the next [`ToastQueue::prune`].
#[derive(Debug, Clone)]
pub struct ToastQueue {
    ttl: TimeDelta,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub const DEFAULT_TTL: Duration = Duration::from_millis(3000);

    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            toasts: Vec::new(),
        }
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, now: DateTime<Utc>) {
        self.toasts.push(Toast {
            kind,
            message: message.into(),
            created_at: now,
            expires_at: expiry(now, self.ttl),
        });
    }

    /// Removes all expired toasts and returns them.
    pub fn prune(&mut self, now: DateTime<Utc>) -> Vec<Toast> {
        let (expired, active) = std::mem::take(&mut self.toasts)
            .into_iter()
            .partition(|toast| toast.expires_at <= now);
        self.toasts = active;
        expired
    }

    /// The toasts that have not been pruned yet, oldest first.
    pub fn active(&self) -> &[Toast] {
        &self.toasts
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

pub(crate) fn expiry(now: DateTime<Utc>, ttl: TimeDelta) -> DateTime<Utc> {
    now.checked_add_signed(ttl)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
