//! agenthub-core: catalog, query engine and community state, no UI.
//!
//! Frontends (TUI, Web) hold a `Marketplace` and subscribe to its
//! `HubEvent`s via tokio::broadcast.

pub mod catalog;
pub mod community;
pub mod config;
pub mod events;
pub mod marketplace;
pub mod notify;
pub mod query;
pub mod source;
pub mod submission;
pub mod types;
