//! Catalog sources: bundled data, a local file, or a remote agents table.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::catalog::Catalog;
use crate::types::{Author, CatalogEntry, Difficulty};

#[derive(Debug, Clone)]
pub enum CatalogSource {
    Embedded,
    File(PathBuf),
    Remote(RemoteCatalog),
}

impl CatalogSource {
    pub async fn load(&self) -> Result<Catalog> {
        match self {
            CatalogSource::Embedded => Catalog::embedded(),
            CatalogSource::File(path) => Catalog::from_path(path),
            CatalogSource::Remote(remote) => remote.fetch().await,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            CatalogSource::Embedded => "embedded catalog".to_string(),
            CatalogSource::File(path) => path.display().to_string(),
            CatalogSource::Remote(remote) => remote.base_url.clone(),
        }
    }
}

/// REST client for an `agents` table (PostgREST conventions).
#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    pub base_url: String,
    api_key: String,
    timeout: Duration,
}

impl RemoteCatalog {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            timeout: Duration::from_secs(15),
        }
    }

    /// Upper bound for the whole request, connect through body.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn agents_url(&self) -> String {
        format!(
            "{}/rest/v1/agents?select=*&order=downloads.desc",
            self.base_url.trim_end_matches('/')
        )
    }

    pub async fn fetch(&self) -> Result<Catalog> {
        let client = reqwest::Client::builder()
            .user_agent("AgentHub/0.1")
            .timeout(self.timeout)
            .build()?;
        let rows: Vec<AgentRow> = client
            .get(self.agents_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("Agents request failed")?
            .error_for_status()?
            .json()
            .await
            .context("Failed to decode agents response")?;

        info!("Fetched {} agents from {}", rows.len(), self.base_url);
        let entries = rows
            .into_iter()
            .map(CatalogEntry::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Catalog::new(entries)?)
    }
}

/// Flat row shape of the remote `agents` table.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub documentation: String,
    pub github_url: String,
    #[serde(default)]
    pub demo_url: Option<String>,
    pub rating: f64,
    pub reviews: u32,
    pub downloads: u64,
    #[serde(default)]
    pub image_url: String,
    pub author_name: String,
    #[serde(default)]
    pub author_github: String,
    #[serde(default)]
    pub author_avatar: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// `YYYY-MM-DD` or a full timestamp
    pub last_updated: String,
    pub difficulty: String,
    #[serde(default)]
    pub integrations: Vec<String>,
    pub node_count: u32,
    pub source: String,
}

impl TryFrom<AgentRow> for CatalogEntry {
    type Error = anyhow::Error;

    fn try_from(row: AgentRow) -> Result<Self> {
        let difficulty = Difficulty::parse(&row.difficulty).with_context(|| {
            format!("agent '{}' has unknown difficulty '{}'", row.id, row.difficulty)
        })?;
        let date_part = row.last_updated.get(..10).unwrap_or(row.last_updated.as_str());
        let last_updated = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").with_context(|| {
            format!("agent '{}' has bad last_updated '{}'", row.id, row.last_updated)
        })?;

        Ok(CatalogEntry {
            id: row.id,
            name: row.name,
            description: row.description,
            category: row.category,
            capabilities: row.capabilities,
            requirements: row.requirements,
            documentation: row.documentation,
            github_url: row.github_url,
            demo_url: row.demo_url.filter(|u| !u.is_empty()),
            rating: row.rating,
            reviews: row.reviews,
            downloads: row.downloads,
            image: row.image_url,
            author: Author {
                name: row.author_name,
                github_profile: row.author_github,
                avatar: row.author_avatar,
            },
            tags: row.tags,
            last_updated,
            difficulty,
            integrations: row.integrations,
            node_count: row.node_count,
            source: row.source,
        })
    }
}
