//! Contribution intake: form validation, sanitising, and hand-off to the
//! moderation inbox. Accepted submissions never enter the live catalog.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use url::Url;
use uuid::Uuid;

use crate::types::Difficulty;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SubmissionError {
    #[error("{0} is required")]
    MissingRequiredField(String),

    #[error("Please provide a valid {0}")]
    InvalidUrl(String),

    #[error("Please provide a valid GitHub repository URL")]
    InvalidGithubUrl,

    #[error("{field} must be less than {max} characters")]
    FieldTooLong { field: String, max: usize },

    #[error("Unknown difficulty level: {0}")]
    UnknownDifficulty(String),
}

/// Raw form payload. List fields are comma-separated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionForm {
    pub name: String,
    pub description: String,
    pub category: String,
    pub capabilities: String,
    pub requirements: String,
    pub documentation: String,
    pub github_url: String,
    pub demo_url: String,
    pub integrations: String,
    pub difficulty: String,
    pub tags: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLimits {
    pub max_name_length: usize,
    pub max_description_length: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            max_name_length: 100,
            max_description_length: 500,
        }
    }
}

pub fn is_valid_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok()
}

/// `github.com` host with at least an owner and a repo path segment.
pub fn is_valid_github_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => url.host_str() == Some("github.com") && url.path().split('/').count() >= 3,
        Err(_) => false,
    }
}

/// Trim and strip angle brackets.
pub fn sanitize_input(input: &str) -> String {
    input.trim().replace(['<', '>'], "")
}

pub fn parse_comma_separated_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Check a form. Every problem is reported; an empty error list means valid.
pub fn validate(form: &SubmissionForm, limits: &FieldLimits) -> Result<(), Vec<SubmissionError>> {
    let mut errors = Vec::new();

    let required = [
        ("name", &form.name),
        ("description", &form.description),
        ("category", &form.category),
        ("github_url", &form.github_url),
        ("difficulty", &form.difficulty),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(SubmissionError::MissingRequiredField(field.to_string()));
        }
    }

    if !form.github_url.is_empty() && !is_valid_github_url(&form.github_url) {
        errors.push(SubmissionError::InvalidGithubUrl);
    }
    if !form.demo_url.is_empty() && !is_valid_url(&form.demo_url) {
        errors.push(SubmissionError::InvalidUrl("demo_url".to_string()));
    }

    if form.name.chars().count() > limits.max_name_length {
        errors.push(SubmissionError::FieldTooLong {
            field: "name".to_string(),
            max: limits.max_name_length,
        });
    }
    if form.description.chars().count() > limits.max_description_length {
        errors.push(SubmissionError::FieldTooLong {
            field: "description".to_string(),
            max: limits.max_description_length,
        });
    }

    let difficulty = form.difficulty.trim();
    if !difficulty.is_empty() && Difficulty::parse(difficulty).is_none() {
        errors.push(SubmissionError::UnknownDifficulty(difficulty.to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A validated, sanitised submission awaiting moderation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub name: String,
    pub description: String,
    pub category: String,
    pub capabilities: Vec<String>,
    pub requirements: String,
    pub documentation: String,
    pub github_url: String,
    pub demo_url: Option<String>,
    pub integrations: Vec<String>,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
}

impl Submission {
    pub fn from_form(
        form: &SubmissionForm,
        limits: &FieldLimits,
    ) -> Result<Self, Vec<SubmissionError>> {
        validate(form, limits)?;

        let difficulty = Difficulty::parse(form.difficulty.trim()).ok_or_else(|| {
            vec![SubmissionError::UnknownDifficulty(form.difficulty.clone())]
        })?;
        let demo_url = sanitize_input(&form.demo_url);

        Ok(Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            name: sanitize_input(&form.name),
            description: sanitize_input(&form.description),
            category: sanitize_input(&form.category),
            capabilities: parse_comma_separated_list(&sanitize_input(&form.capabilities)),
            requirements: sanitize_input(&form.requirements),
            // markdown may legitimately contain angle brackets
            documentation: form.documentation.trim().to_string(),
            github_url: form.github_url.trim().to_string(),
            demo_url: (!demo_url.is_empty()).then_some(demo_url),
            integrations: parse_comma_separated_list(&sanitize_input(&form.integrations)),
            difficulty,
            tags: parse_comma_separated_list(&sanitize_input(&form.tags)),
        })
    }
}

/// Downstream moderation process that receives accepted submissions.
pub trait SubmissionIntake: Send + Sync {
    fn hand_off(&self, submission: &Submission) -> Result<()>;
}

/// Appends one JSON line per submission.
pub struct JsonlInbox {
    path: PathBuf,
}

impl JsonlInbox {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back every submission in the inbox (for moderation tooling).
    pub fn read_all(&self) -> Result<Vec<Submission>> {
        if !self.path.is_file() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_str::<Submission>(line).map_err(anyhow::Error::from))
            .collect()
    }
}

impl SubmissionIntake for JsonlInbox {
    fn hand_off(&self, submission: &Submission) -> Result<()> {
        use std::io::Write;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(submission)?;
        writeln!(file, "{}", line)?;
        info!("Queued submission {} ({}) for review", submission.id, submission.name);
        Ok(())
    }
}

/// Keeps submissions in memory.
#[derive(Default)]
pub struct MemoryInbox {
    submissions: Mutex<Vec<Submission>>,
}

impl MemoryInbox {
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

impl SubmissionIntake for MemoryInbox {
    fn hand_off(&self, submission: &Submission) -> Result<()> {
        self.submissions
            .lock()
            .map_err(|_| anyhow::anyhow!("inbox lock poisoned"))?
            .push(submission.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn complete_form() -> SubmissionForm {
        SubmissionForm {
            name: "Inbox Zero Agent".into(),
            description: "Triages email.".into(),
            category: "automation".into(),
            github_url: "https://github.com/user/repo".into(),
            difficulty: "Beginner".into(),
            ..SubmissionForm::default()
        }
    }

    #[test]
    fn test_complete_form_is_valid() {
        assert_eq!(validate(&complete_form(), &FieldLimits::default()), Ok(()));
    }

    #[test]
    fn test_missing_name_is_single_error() {
        let form = SubmissionForm {
            name: String::new(),
            ..complete_form()
        };
        assert_eq!(
            validate(&form, &FieldLimits::default()),
            Err(vec![SubmissionError::MissingRequiredField("name".into())])
        );
    }

    #[test]
    fn test_non_github_url_rejected() {
        let form = SubmissionForm {
            github_url: "https://example.com/x".into(),
            ..complete_form()
        };
        assert_eq!(
            validate(&form, &FieldLimits::default()),
            Err(vec![SubmissionError::InvalidGithubUrl])
        );
    }

    #[test]
    fn test_missing_github_url_only_reports_missing() {
        let form = SubmissionForm {
            github_url: String::new(),
            ..complete_form()
        };
        assert_eq!(
            validate(&form, &FieldLimits::default()),
            Err(vec![SubmissionError::MissingRequiredField("github_url".into())])
        );
    }

    #[test]
    fn test_github_url_needs_owner_and_repo() {
        assert!(is_valid_github_url("https://github.com/user/repo"));
        assert!(!is_valid_github_url("https://github.com/user"));
        assert!(!is_valid_github_url("https://github.com"));
        assert!(!is_valid_github_url("https://gist.github.com/user/abc"));
        assert!(!is_valid_github_url("github.com/user/repo"));
    }

    #[test]
    fn test_bad_demo_url_and_long_fields() {
        let form = SubmissionForm {
            name: "n".repeat(101),
            description: "d".repeat(501),
            demo_url: "not a url".into(),
            ..complete_form()
        };
        let errors = validate(&form, &FieldLimits::default()).unwrap_err();
        assert_eq!(
            errors,
            vec![
                SubmissionError::InvalidUrl("demo_url".into()),
                SubmissionError::FieldTooLong { field: "name".into(), max: 100 },
                SubmissionError::FieldTooLong { field: "description".into(), max: 500 },
            ]
        );
    }

    #[test]
    fn test_unknown_difficulty() {
        let form = SubmissionForm {
            difficulty: "Expert".into(),
            ..complete_form()
        };
        assert_eq!(
            validate(&form, &FieldLimits::default()),
            Err(vec![SubmissionError::UnknownDifficulty("Expert".into())])
        );
    }

    #[test]
    fn test_sanitize_and_lists() {
        assert_eq!(sanitize_input("  <b>bold</b> "), "bbold/b");
        assert_eq!(
            parse_comma_separated_list(" slack, ,teams ,"),
            vec!["slack".to_string(), "teams".to_string()]
        );
    }

    #[test]
    fn test_from_form_sanitises() {
        let form = SubmissionForm {
            name: "  <Agent>  ".into(),
            tags: "email, ai".into(),
            demo_url: "https://demo.example.com".into(),
            ..complete_form()
        };
        let submission = Submission::from_form(&form, &FieldLimits::default()).unwrap();
        assert_eq!(submission.name, "Agent");
        assert_eq!(submission.tags, vec!["email", "ai"]);
        assert_eq!(submission.difficulty, Difficulty::Beginner);
        assert_eq!(submission.demo_url.as_deref(), Some("https://demo.example.com"));
    }

    #[test]
    fn test_jsonl_inbox_appends() {
        let dir = TempDir::new().unwrap();
        let inbox = JsonlInbox::new(dir.path().join("inbox/submissions.jsonl"));
        let first = Submission::from_form(&complete_form(), &FieldLimits::default()).unwrap();
        let second = Submission::from_form(&complete_form(), &FieldLimits::default()).unwrap();
        inbox.hand_off(&first).unwrap();
        inbox.hand_off(&second).unwrap();

        let stored = inbox.read_all().unwrap();
        assert_eq!(stored, vec![first, second]);
    }

    #[test]
    fn test_memory_inbox() {
        let inbox = MemoryInbox::default();
        let submission = Submission::from_form(&complete_form(), &FieldLimits::default()).unwrap();
        inbox.hand_off(&submission).unwrap();
        assert_eq!(inbox.submissions().len(), 1);
    }
}
