//! Events broadcast from the marketplace to TUI and Web frontends.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::community::Discussion;
use crate::notify::Notification;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReceived {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionLiked {
    pub id: u64,
    pub likes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRefreshed {
    pub total: usize,
    pub source: String,
}

/// Events broadcast by the marketplace to all subscribers (TUI, WebSocket clients).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum HubEvent {
    /// A toast to show (and auto-dismiss)
    #[serde(rename = "notification")]
    Notification(Notification),

    /// A contribution passed validation and went to the moderation inbox
    #[serde(rename = "submission")]
    SubmissionReceived(SubmissionReceived),

    #[serde(rename = "discussion")]
    DiscussionCreated(Discussion),

    #[serde(rename = "like")]
    DiscussionLiked(DiscussionLiked),

    /// A new catalog replaced the previous one
    #[serde(rename = "catalog")]
    CatalogRefreshed(CatalogRefreshed),
}

impl HubEvent {
    /// Serialize to the JSON format the frontend expects:
    /// `{"event": "...", "data": {...}}`
    pub fn to_ws_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
