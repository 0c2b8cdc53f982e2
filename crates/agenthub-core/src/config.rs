//! Configuration: YAML config + env var overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::source::{CatalogSource, RemoteCatalog};
use crate::submission::FieldLimits;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog file (YAML or JSON) replacing the bundled catalog
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Base URL of a remote agents table (takes precedence over catalog_path)
    #[serde(default)]
    pub remote_url: Option<String>,

    /// API key for the remote table
    #[serde(default)]
    pub remote_key: Option<String>,

    /// Give up on the remote table after this many seconds
    #[serde(default = "default_remote_timeout")]
    pub remote_timeout_seconds: u64,

    /// JSONL inbox that validated submissions are appended to
    #[serde(default = "default_submissions_path")]
    pub submissions_path: String,

    /// Quiet period before a typed search is applied (TUI)
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// How long a notification stays visible
    #[serde(default = "default_notification_ttl")]
    pub notification_ttl_seconds: u64,

    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,

    #[serde(default = "default_max_description_length")]
    pub max_description_length: usize,

    /// Rows shown on the top contributors board
    #[serde(default = "default_top_contributors")]
    pub top_contributors: usize,

    /// Entries on the featured list
    #[serde(default = "default_featured_count")]
    pub featured_count: usize,

    /// HTTP port for agenthub-web
    #[serde(default = "default_port")]
    pub port: u16,

    /// Prebuilt front-end bundle served by agenthub-web, if present
    #[serde(default)]
    pub static_dir: Option<String>,

    /// Resolved project root (set at load time, not serialized from YAML)
    #[serde(skip)]
    pub project_root: PathBuf,
}

fn default_submissions_path() -> String {
    "submissions.jsonl".into()
}
fn default_remote_timeout() -> u64 {
    15
}
fn default_search_debounce_ms() -> u64 {
    300
}
fn default_notification_ttl() -> u64 {
    5
}
fn default_max_name_length() -> usize {
    100
}
fn default_max_description_length() -> usize {
    500
}
fn default_top_contributors() -> usize {
    10
}
fn default_featured_count() -> usize {
    3
}
fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load config from a YAML file with env var overrides.
    pub fn load(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        let mut config: Config =
            serde_yaml::from_str(&content).context("Failed to parse config.yaml")?;

        config.project_root = config_path
            .parent()
            .unwrap_or(Path::new("."))
            .to_path_buf()
            .canonicalize()
            .unwrap_or_else(|_| {
                config_path
                    .parent()
                    .unwrap_or(Path::new("."))
                    .to_path_buf()
            });

        config.apply_env()?;
        Ok(config)
    }

    /// Load `project_root/config.yaml`, falling back to defaults (plus env
    /// overrides) when the file does not exist.
    pub fn load_from_dir(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join("config.yaml");
        if config_path.is_file() {
            return Self::load(&config_path);
        }
        let mut config = Config {
            project_root: project_root.to_path_buf(),
            ..Config::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("AGENTHUB_CATALOG") {
            self.catalog_path = Some(path);
        }
        if let Ok(url) = std::env::var("AGENTHUB_REMOTE_URL") {
            self.remote_url = Some(url);
        }
        if let Ok(key) = std::env::var("AGENTHUB_REMOTE_KEY") {
            self.remote_key = Some(key);
        }
        if let Ok(path) = std::env::var("AGENTHUB_SUBMISSIONS") {
            self.submissions_path = path;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            self.port = port;
        }

        if self.remote_url.is_some() && self.remote_key.is_none() {
            anyhow::bail!(
                "remote_url requires remote_key in config.yaml or AGENTHUB_REMOTE_KEY env var"
            );
        }
        Ok(())
    }

    /// Resolve a possibly-relative path against the project root.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.project_root.join(p)
        }
    }

    /// Where catalog data comes from: remote table > catalog file > bundled data.
    pub fn catalog_source(&self) -> CatalogSource {
        match (&self.remote_url, &self.remote_key) {
            (Some(url), Some(key)) => {
                CatalogSource::Remote(
                    RemoteCatalog::new(url.clone(), key.clone())
                        .with_timeout(Duration::from_secs(self.remote_timeout_seconds)),
                )
            }
            _ => match &self.catalog_path {
                Some(path) => CatalogSource::File(self.resolve_path(path)),
                None => CatalogSource::Embedded,
            },
        }
    }

    pub fn submissions_file(&self) -> PathBuf {
        self.resolve_path(&self.submissions_path)
    }

    pub fn field_limits(&self) -> FieldLimits {
        FieldLimits {
            max_name_length: self.max_name_length,
            max_description_length: self.max_description_length,
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            remote_url: None,
            remote_key: None,
            remote_timeout_seconds: default_remote_timeout(),
            submissions_path: default_submissions_path(),
            search_debounce_ms: default_search_debounce_ms(),
            notification_ttl_seconds: default_notification_ttl(),
            max_name_length: default_max_name_length(),
            max_description_length: default_max_description_length(),
            top_contributors: default_top_contributors(),
            featured_count: default_featured_count(),
            port: default_port(),
            static_dir: None,
            project_root: PathBuf::new(),
        }
    }
}
