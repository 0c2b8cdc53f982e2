//! Shared state behind every frontend.
//!
//! Owns the current catalog (swapped whole on refresh, never edited), the
//! community board, the notification queue and the submission intake.
//! Frontends hold it as `Arc<RwLock<Marketplace>>` and subscribe to
//! `HubEvent`s for live updates.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use crate::catalog::Catalog;
use crate::community::{Discussion, DiscussionBoard, NewDiscussion};
use crate::config::Config;
use crate::events::*;
use crate::notify::{Notification, NotificationCenter, NotificationKind};
use crate::query::QuerySpec;
use crate::source::CatalogSource;
use crate::submission::{JsonlInbox, Submission, SubmissionError, SubmissionForm, SubmissionIntake};
use crate::types::CatalogEntry;

pub const FETCH_FAILED: &str = "Failed to fetch agents";
pub const MISSING_FIELDS: &str = "Please fill in all required fields.";
pub const SUBMIT_OK: &str =
    "Your AI agent has been submitted successfully! Our team will review it shortly.";
pub const SUBMIT_FAILED: &str = "Failed to submit agent. Please try again.";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("submission rejected with {} problem(s)", .0.len())]
    Invalid(Vec<SubmissionError>),

    #[error("intake failed: {0}")]
    Intake(#[source] anyhow::Error),
}

impl SubmitError {
    /// The one-line message shown to the submitter.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Invalid(errors) => {
                let missing = errors
                    .iter()
                    .any(|e| matches!(e, SubmissionError::MissingRequiredField(_)));
                match errors.first() {
                    Some(first) if !missing => first.to_string(),
                    _ => MISSING_FIELDS.to_string(),
                }
            }
            SubmitError::Intake(_) => SUBMIT_FAILED.to_string(),
        }
    }
}

pub struct Marketplace {
    catalog: Arc<Catalog>,
    source: CatalogSource,
    board: DiscussionBoard,
    notifications: NotificationCenter,
    intake: Box<dyn SubmissionIntake>,
    config: Config,
    pub last_error: Option<String>,

    event_tx: broadcast::Sender<HubEvent>,
}

impl Marketplace {
    /// Start from the bundled catalog; call `refresh` to load the configured source.
    pub fn new(config: Config, intake: Box<dyn SubmissionIntake>) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        let catalog = Catalog::embedded().unwrap_or_else(|e| {
            error!("Embedded catalog unusable: {:#}", e);
            Catalog::default()
        });

        Self {
            catalog: Arc::new(catalog),
            source: config.catalog_source(),
            board: DiscussionBoard::seeded(Utc::now()),
            notifications: NotificationCenter::new(config.notification_ttl()),
            intake,
            config,
            last_error: None,
            event_tx,
        }
    }

    /// Build with the JSONL inbox and load the configured catalog source.
    pub async fn from_config(config: Config) -> Self {
        let inbox = JsonlInbox::new(config.submissions_file());
        let mut marketplace = Self::new(config, Box::new(inbox));
        if !matches!(marketplace.source, CatalogSource::Embedded) {
            marketplace.refresh().await;
        }
        marketplace
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HubEvent> {
        self.event_tx.subscribe()
    }

    fn broadcast(&self, event: HubEvent) {
        let _ = self.event_tx.send(event);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Snapshot of the current catalog; stays valid across refreshes.
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn search(&self, spec: &QuerySpec) -> Vec<&CatalogEntry> {
        self.catalog.query(spec)
    }

    // ── Catalog refresh ──

    pub async fn refresh(&mut self) -> bool {
        let loaded = self.source.load().await;
        self.apply_refresh(loaded)
    }

    /// Install a freshly loaded catalog, or keep the current one on failure.
    pub fn apply_refresh(&mut self, loaded: anyhow::Result<Catalog>) -> bool {
        match loaded {
            Ok(catalog) => {
                info!(
                    "Catalog refreshed from {} ({} entries)",
                    self.source.describe(),
                    catalog.len()
                );
                self.catalog = Arc::new(catalog);
                self.last_error = None;
                self.broadcast(HubEvent::CatalogRefreshed(CatalogRefreshed {
                    total: self.catalog.len(),
                    source: self.source.describe(),
                }));
                true
            }
            Err(e) => {
                warn!(
                    "Error fetching agents from {}: {:#}; keeping {} cached entries",
                    self.source.describe(),
                    e,
                    self.catalog.len()
                );
                self.last_error = Some(FETCH_FAILED.to_string());
                self.notify(NotificationKind::Error, FETCH_FAILED);
                false
            }
        }
    }

    // ── Submissions ──

    pub fn submit(&mut self, form: &SubmissionForm) -> Result<Submission, SubmitError> {
        let submission = match Submission::from_form(form, &self.config.field_limits()) {
            Ok(s) => s,
            Err(errors) => {
                let err = SubmitError::Invalid(errors);
                self.notify(NotificationKind::Error, err.user_message());
                return Err(err);
            }
        };

        if let Err(e) = self.intake.hand_off(&submission) {
            error!("Submission error: {:#}", e);
            let err = SubmitError::Intake(e);
            self.notify(NotificationKind::Error, err.user_message());
            return Err(err);
        }

        self.notify(NotificationKind::Success, SUBMIT_OK);
        self.broadcast(HubEvent::SubmissionReceived(SubmissionReceived {
            id: submission.id,
            name: submission.name.clone(),
        }));
        Ok(submission)
    }

    // ── Community ──

    pub fn discussions(&self) -> &[Discussion] {
        self.board.list()
    }

    pub fn like_discussion(&mut self, id: u64) -> Option<u32> {
        let likes = self.board.like(id)?;
        self.broadcast(HubEvent::DiscussionLiked(DiscussionLiked { id, likes }));
        Some(likes)
    }

    pub fn create_discussion(&mut self, new: NewDiscussion) -> Option<Discussion> {
        let discussion = self.board.create(new, Utc::now())?;
        info!("New discussion #{}: {}", discussion.id, discussion.title);
        self.broadcast(HubEvent::DiscussionCreated(discussion.clone()));
        Some(discussion)
    }

    // ── Notifications ──

    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) -> Notification {
        let notification = self.notifications.push(kind, message, Utc::now());
        self.broadcast(HubEvent::Notification(notification.clone()));
        notification
    }

    pub fn dismiss_notification(&mut self, id: u64) -> bool {
        self.notifications.dismiss(id)
    }

    /// Expire stale notifications and return the ones still showing.
    pub fn active_notifications(&mut self) -> &[Notification] {
        self.notifications.expire(Utc::now());
        self.notifications.active()
    }
}
