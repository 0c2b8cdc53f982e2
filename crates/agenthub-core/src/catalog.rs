//! The resident catalog: a validated, read-only list of entries plus the
//! aggregate views the marketplace and community pages show.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::query::{self, QuerySpec};
use crate::types::*;

/// Bundled catalog, loaded when no other source is configured.
const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.yaml");

/// Sources that get their own bucket in `source_stats`.
const NAMED_SOURCES: &[&str] = &[
    "n8n-workflows",
    "huggingface/smolagents",
    "awesome-ai-agents",
    "chatbot-frameworks",
];

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("duplicate catalog id: {0}")]
    DuplicateId(String),

    #[error("rating {rating} for '{id}' is outside 0.0-5.0")]
    RatingOutOfRange { id: String, rating: f64 },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog, enforcing unique ids and the rating range.
    pub fn new(entries: Vec<CatalogEntry>) -> std::result::Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
            if !(0.0..=5.0).contains(&entry.rating) {
                return Err(CatalogError::RatingOutOfRange {
                    id: entry.id.clone(),
                    rating: entry.rating,
                });
            }
        }
        Ok(Self { entries })
    }

    /// The catalog bundled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_yaml(EMBEDDED_CATALOG).context("Failed to parse embedded catalog")
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_yaml::from_str(content)?;
        Ok(Self::new(entries)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(content)?;
        Ok(Self::new(entries)?)
    }

    /// Load a catalog file. `.json` is parsed as JSON, anything else as YAML.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        let catalog = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
        .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;
        info!("Loaded {} catalog entries from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn query(&self, spec: &QuerySpec) -> Vec<&CatalogEntry> {
        query::query(&self.entries, spec)
    }

    pub fn stats(&self) -> CatalogStats {
        let integrations: HashSet<&str> = self
            .entries
            .iter()
            .flat_map(|e| e.integrations.iter().map(String::as_str))
            .collect();

        let rating_sum: f64 = self.entries.iter().map(|e| e.rating).sum();
        let average_rating = if self.entries.is_empty() {
            0.0
        } else {
            round1(rating_sum / self.entries.len() as f64)
        };

        CatalogStats {
            total_workflows: self.entries.len(),
            total_integrations: integrations.len(),
            total_nodes: self.entries.iter().map(|e| e.node_count as u64).sum(),
            total_downloads: self.entries.iter().map(|e| e.downloads).sum(),
            total_reviews: self.entries.iter().map(|e| e.reviews as u64).sum(),
            average_rating,
        }
    }

    /// Fixed category table with live counts, in display order.
    pub fn categories(&self) -> Vec<CategoryCount> {
        CATEGORIES
            .iter()
            .map(|(id, name)| CategoryCount {
                id: id.to_string(),
                name: name.to_string(),
                count: self.entries.iter().filter(|e| e.category == *id).count(),
            })
            .collect()
    }

    pub fn difficulty_counts(&self) -> Vec<(Difficulty, usize)> {
        Difficulty::ALL
            .into_iter()
            .map(|d| (d, self.entries.iter().filter(|e| e.difficulty == d).count()))
            .collect()
    }

    /// Per-source counts; "github-repositories" covers every `owner/repo` source.
    pub fn source_stats(&self) -> BTreeMap<String, usize> {
        let mut stats: BTreeMap<String, usize> = NAMED_SOURCES
            .iter()
            .map(|s| {
                let count = self.entries.iter().filter(|e| e.source == *s).count();
                (s.to_string(), count)
            })
            .collect();
        let repos = self.entries.iter().filter(|e| e.source.contains('/')).count();
        stats.insert("github-repositories".to_string(), repos);
        stats
    }

    /// The first `count` entries in catalog order, shown as featured picks.
    pub fn featured(&self, count: usize) -> &[CatalogEntry] {
        &self.entries[..count.min(self.entries.len())]
    }

    /// Authors ranked by total downloads across their entries.
    pub fn top_contributors(&self, limit: usize) -> Vec<Contributor> {
        let mut order: Vec<&str> = Vec::new();
        let mut by_author: HashMap<&str, Vec<&CatalogEntry>> = HashMap::new();
        for entry in &self.entries {
            let key = entry.author.name.as_str();
            if !by_author.contains_key(key) {
                order.push(key);
            }
            by_author.entry(key).or_default().push(entry);
        }

        let mut contributors: Vec<Contributor> = order
            .into_iter()
            .map(|name| {
                let entries = &by_author[name];
                let first = entries[0];
                let rating_sum: f64 = entries.iter().map(|e| e.rating).sum();
                Contributor {
                    name: name.to_string(),
                    github_url: first.author.github_profile.clone(),
                    avatar_url: first.author.avatar.clone(),
                    agent_count: entries.len(),
                    total_downloads: entries.iter().map(|e| e.downloads).sum(),
                    average_rating: round1(rating_sum / entries.len() as f64),
                }
            })
            .collect();

        contributors.sort_by(|a, b| b.total_downloads.cmp(&a.total_downloads));
        contributors.truncate(limit);
        contributors
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.len(), 15);
        assert!(catalog.get("langchain-agents").is_some());
        assert_eq!(
            catalog.get("rasa-chatbot-framework").unwrap().difficulty,
            Difficulty::Intermediate
        );
    }

    #[test]
    fn test_featured_takes_leading_entries() {
        let catalog = Catalog::embedded().unwrap();
        let ids: Vec<&str> = catalog.featured(3).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            ["advanced-email-automation", "smolagents-framework", "peak-ai-agent-stack"]
        );
        assert_eq!(catalog.featured(100).len(), 15);
        assert!(catalog.featured(0).is_empty());
        assert!(Catalog::default().featured(3).is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let catalog = Catalog::embedded().unwrap();
        let mut entries = catalog.entries().to_vec();
        entries.push(entries[0].clone());
        let id = entries[0].id.clone();
        assert_eq!(Catalog::new(entries), Err(CatalogError::DuplicateId(id)));
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let catalog = Catalog::embedded().unwrap();
        let mut entries = catalog.entries().to_vec();
        entries[2].rating = 5.5;
        assert!(matches!(
            Catalog::new(entries),
            Err(CatalogError::RatingOutOfRange { .. })
        ));
    }

    #[test]
    fn test_stats() {
        let catalog = Catalog::embedded().unwrap();
        let stats = catalog.stats();
        assert_eq!(stats.total_workflows, 15);
        assert_eq!(
            stats.total_downloads,
            catalog.entries().iter().map(|e| e.downloads).sum::<u64>()
        );
        assert_eq!(stats.average_rating, 4.7);
        assert_eq!(Catalog::default().stats().average_rating, 0.0);
    }

    #[test]
    fn test_categories_cover_every_entry() {
        let catalog = Catalog::embedded().unwrap();
        let categories = catalog.categories();
        assert_eq!(categories[0].id, "automation");
        assert_eq!(categories[0].count, 2);
        let total: usize = categories.iter().map(|c| c.count).sum();
        assert_eq!(total, catalog.len());
    }

    #[test]
    fn test_source_stats() {
        let catalog = Catalog::embedded().unwrap();
        let stats = catalog.source_stats();
        assert_eq!(stats["n8n-workflows"], 2);
        assert_eq!(stats["awesome-ai-agents"], 7);
        assert_eq!(stats["chatbot-frameworks"], 2);
        // smolagents, peak-ai, voltagent, onio
        assert_eq!(stats["github-repositories"], 4);
    }

    #[test]
    fn test_top_contributors_groups_by_author() {
        let catalog = Catalog::embedded().unwrap();
        let top = catalog.top_contributors(10);
        assert_eq!(top[0].name, "Microsoft");
        assert_eq!(top[0].agent_count, 3);
        assert_eq!(top[0].total_downloads, 3456 + 8765 + 5432);
        assert!(top
            .windows(2)
            .all(|w| w[0].total_downloads >= w[1].total_downloads));
        assert_eq!(catalog.top_contributors(3).len(), 3);
    }

    #[test]
    fn test_from_path_json_and_yaml() {
        let catalog = Catalog::embedded().unwrap();
        let slice = &catalog.entries()[..2];

        let mut json = Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, "{}", serde_json::to_string(slice).unwrap()).unwrap();
        assert_eq!(Catalog::from_path(json.path()).unwrap().len(), 2);

        let mut yaml = Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(yaml, "{}", serde_yaml::to_string(slice).unwrap()).unwrap();
        assert_eq!(Catalog::from_path(yaml.path()).unwrap().entries(), slice);
    }

    #[test]
    fn test_from_path_missing_file_fails() {
        assert!(Catalog::from_path(Path::new("/nonexistent/catalog.yaml")).is_err());
    }
}
