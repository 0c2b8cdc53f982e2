//! Core types: CatalogEntry, Author, Difficulty, category table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Difficulty ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    /// The exact label used for filtering and serialization.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }

    /// Exact-match parse. `"beginner"` is not a difficulty.
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == label)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Catalog entry ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    pub github_profile: String,
    #[serde(default)]
    pub avatar: String,
}

/// One external project listed in the marketplace. Never mutated once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    pub rating: f64,
    pub reviews: u32,
    pub downloads: u64,
    #[serde(default)]
    pub image: String,
    pub author: Author,
    #[serde(default)]
    pub tags: Vec<String>,
    pub last_updated: NaiveDate,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub integrations: Vec<String>,
    pub node_count: u32,
    pub source: String,
}

// ── Categories ──

/// Marketplace categories in display order: (id, display name).
pub const CATEGORIES: &[(&str, &str)] = &[
    ("automation", "Automation"),
    ("ai-framework", "AI Frameworks"),
    ("chatbot-framework", "Chatbot Frameworks"),
    ("multi-agent", "Multi-Agent Systems"),
    ("autonomous-agents", "Autonomous Agents"),
    ("ai-infrastructure", "AI Infrastructure"),
    ("conversational-ai", "Conversational AI"),
    ("nlp-framework", "NLP Frameworks"),
];

pub fn category_name(id: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(c, _)| *c == id)
        .map(|(_, name)| *name)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub id: String,
    pub name: String,
    pub count: usize,
}

// ── Aggregates ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_workflows: usize,
    pub total_integrations: usize,
    pub total_nodes: u64,
    pub total_downloads: u64,
    pub total_reviews: u64,
    /// Mean rating rounded to one decimal place.
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    pub github_url: String,
    pub avatar_url: String,
    pub agent_count: usize,
    pub total_downloads: u64,
    pub average_rating: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse_is_exact() {
        assert_eq!(Difficulty::parse("Advanced"), Some(Difficulty::Advanced));
        assert_eq!(Difficulty::parse("advanced"), None);
        assert_eq!(Difficulty::parse(""), None);
    }

    #[test]
    fn test_category_name_lookup() {
        assert_eq!(category_name("multi-agent"), Some("Multi-Agent Systems"));
        assert_eq!(category_name("Multi-Agent"), None);
    }
}
