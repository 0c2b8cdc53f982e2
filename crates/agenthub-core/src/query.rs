//! Catalog query engine: search, filter and sort over the resident catalog.
//!
//! `query` is a pure function of `(source, spec)`. Text search is an OR across
//! name, description, tags and integrations; the category and difficulty
//! filters are AND'd on top of it. Nothing here can fail: empty or unknown
//! inputs mean "no filter" / "default order".

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::CatalogEntry;

/// Result ordering. Always descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    #[default]
    Downloads,
    Rating,
    Recent,
    NodeCount,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Downloads,
        SortKey::Rating,
        SortKey::Recent,
        SortKey::NodeCount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Downloads => "downloads",
            SortKey::Rating => "rating",
            SortKey::Recent => "recent",
            SortKey::NodeCount => "nodes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Downloads => "Most Downloads",
            SortKey::Rating => "Highest Rated",
            SortKey::Recent => "Recently Updated",
            SortKey::NodeCount => "Most Complex",
        }
    }

    /// Lenient parse; anything unrecognised (including "popular") sorts by downloads.
    pub fn parse(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "rating" => SortKey::Rating,
            "recent" => SortKey::Recent,
            "nodes" | "node_count" | "nodecount" => SortKey::NodeCount,
            _ => SortKey::Downloads,
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn compare(&self, a: &CatalogEntry, b: &CatalogEntry) -> Ordering {
        match self {
            SortKey::Downloads => b.downloads.cmp(&a.downloads),
            SortKey::Rating => b.rating.total_cmp(&a.rating),
            SortKey::Recent => b.last_updated.cmp(&a.last_updated),
            SortKey::NodeCount => b.node_count.cmp(&a.node_count),
        }
    }
}

impl From<String> for SortKey {
    fn from(s: String) -> Self {
        SortKey::parse(&s)
    }
}

impl From<SortKey> for String {
    fn from(k: SortKey) -> Self {
        k.as_str().to_string()
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One invocation's worth of search/filter/sort settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySpec {
    pub search: String,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub sort: SortKey,
}

impl QuerySpec {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort = key;
        self
    }

    fn active_category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    fn active_difficulty(&self) -> Option<&str> {
        self.difficulty.as_deref().filter(|d| !d.is_empty())
    }
}

/// Case-insensitive substring match over name, description, any tag or any integration.
pub fn matches_search(entry: &CatalogEntry, needle_lower: &str) -> bool {
    entry.name.to_lowercase().contains(needle_lower)
        || entry.description.to_lowercase().contains(needle_lower)
        || entry
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle_lower))
        || entry
            .integrations
            .iter()
            .any(|integration| integration.to_lowercase().contains(needle_lower))
}

/// Run a query. Borrows the source; the returned list is new on every call.
pub fn query<'a>(source: &'a [CatalogEntry], spec: &QuerySpec) -> Vec<&'a CatalogEntry> {
    let needle = if spec.search.trim().is_empty() {
        None
    } else {
        Some(spec.search.to_lowercase())
    };
    let category = spec.active_category();
    let difficulty = spec.active_difficulty();

    let mut results: Vec<&CatalogEntry> = source
        .iter()
        .filter(|entry| needle.as_deref().map_or(true, |n| matches_search(entry, n)))
        .filter(|entry| category.map_or(true, |c| entry.category == c))
        .filter(|entry| difficulty.map_or(true, |d| entry.difficulty.as_str() == d))
        .collect();

    // sort_by is stable: ties keep source order
    results.sort_by(|a, b| spec.sort.compare(a, b));
    results
}
