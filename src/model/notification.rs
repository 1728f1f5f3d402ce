use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);
const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
    pub expires_at: Instant,
}

/// Transient toasts, oldest dropped first.
#[derive(Debug, Default)]
pub struct Notifications {
    queue: VecDeque<Notification>,
}

impl Notifications {
    pub fn info(&mut self, text: impl Into<String>) {
        self.push(NotificationKind::Info, text.into(), Instant::now());
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(NotificationKind::Warning, text.into(), Instant::now());
    }

    pub fn push(&mut self, kind: NotificationKind, text: String, now: Instant) {
        self.queue.push_back(Notification {
            kind,
            text,
            expires_at: now + NOTIFICATION_TTL,
        });
        while self.queue.len() > MAX_VISIBLE {
            self.queue.pop_front();
        }
    }

    pub fn expire(&mut self, now: Instant) {
        self.queue.retain(|n| n.expires_at > now);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&Notification> {
        self.queue.back()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
