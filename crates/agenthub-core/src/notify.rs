//! Toast-style notifications with a fixed time-to-live.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Info => write!(f, "info"),
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    items: Vec<Notification>,
    next_id: u64,
    ttl: Duration,
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            ttl,
        }
    }

    /// Queue a notification. Anything past its TTL is dropped first, so the
    /// queue stays bounded even when nobody reads it.
    pub fn push(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Notification {
        self.expire(now);
        let notification = Notification {
            id: self.next_id,
            kind,
            message: message.into(),
            created_at: now,
        };
        self.next_id += 1;
        self.items.push(notification.clone());
        notification
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Drop everything older than the TTL. Returns how many were removed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> usize {
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::MAX);
        let before = self.items.len();
        self.items.retain(|n| now - n.created_at < ttl);
        before - self.items.len()
    }

    /// Oldest first.
    pub fn active(&self) -> &[Notification] {
        &self.items
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut center = NotificationCenter::default();
        let now = Utc::now();
        let a = center.push(NotificationKind::Info, "hello", now);
        let b = center.push(NotificationKind::Error, "oops", now);
        assert_ne!(a.id, b.id);
        assert!(center.dismiss(a.id));
        assert!(!center.dismiss(a.id));
        assert_eq!(center.active(), &[b]);
    }

    #[test]
    fn test_expire_after_ttl() {
        let mut center = NotificationCenter::new(Duration::from_secs(5));
        let start = Utc::now();
        center.push(NotificationKind::Success, "saved", start);
        center.push(
            NotificationKind::Info,
            "later",
            start + chrono::Duration::seconds(3),
        );

        assert_eq!(center.expire(start + chrono::Duration::seconds(4)), 0);
        assert_eq!(center.expire(start + chrono::Duration::seconds(5)), 1);
        assert_eq!(center.active()[0].message, "later");
        assert_eq!(center.expire(start + chrono::Duration::seconds(9)), 1);
        assert!(center.active().is_empty());
    }

    #[test]
    fn test_push_drops_expired_without_reader() {
        let mut center = NotificationCenter::new(Duration::ZERO);
        let start = Utc::now();
        for i in 0..1000 {
            center.push(
                NotificationKind::Error,
                "again",
                start + chrono::Duration::milliseconds(i),
            );
        }
        assert_eq!(center.active().len(), 1);

        let mut center = NotificationCenter::new(Duration::from_secs(5));
        center.push(NotificationKind::Info, "old", start);
        center.push(NotificationKind::Info, "new", start + chrono::Duration::seconds(6));
        assert_eq!(center.active().len(), 1);
        assert_eq!(center.active()[0].message, "new");
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_value(NotificationKind::Success).unwrap();
        assert_eq!(json, serde_json::json!("success"));
    }
}
