//! Community discussions: seeded board, likes and new threads.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discussion {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub avatar: String,
    pub content: String,
    pub likes: u32,
    pub replies: u32,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewDiscussion {
    pub title: String,
    pub author: String,
    pub avatar: String,
    pub content: String,
    pub category: String,
}

/// (title, author, avatar, content, likes, replies, category, hours old)
const SEED: &[(&str, &str, &str, &str, u32, u32, &str, i64)] = &[
    (
        "Best practices for AI agent optimization",
        "AgentMaster",
        "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?auto=format&fit=crop&w=50&h=50",
        "I've been working with AI agents for over a year now and wanted to share some optimization techniques that have significantly improved agent performance...",
        45,
        12,
        "Tips & Tricks",
        2,
    ),
    (
        "How to handle large datasets in AI agent processing",
        "DataEngineer",
        "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?auto=format&fit=crop&w=50&h=50",
        "Working with large datasets can be challenging in AI agents. Here are some strategies I've found effective for processing millions of records efficiently...",
        67,
        23,
        "Data Processing",
        4,
    ),
    (
        "New integration ideas for the community",
        "IntegrationExpert",
        "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?auto=format&fit=crop&w=50&h=50",
        "I've been thinking about some new integrations that would be valuable for the community. What platforms would you like to see integrated next?",
        34,
        18,
        "Feature Requests",
        6,
    ),
];

#[derive(Debug, Clone, Default)]
pub struct DiscussionBoard {
    discussions: Vec<Discussion>,
    next_id: u64,
}

impl DiscussionBoard {
    /// The starter threads, aged relative to `now`.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let discussions: Vec<Discussion> = SEED
            .iter()
            .enumerate()
            .map(
                |(i, (title, author, avatar, content, likes, replies, category, hours))| {
                    Discussion {
                        id: i as u64 + 1,
                        title: title.to_string(),
                        author: author.to_string(),
                        avatar: avatar.to_string(),
                        content: content.to_string(),
                        likes: *likes,
                        replies: *replies,
                        category: category.to_string(),
                        created_at: now - Duration::hours(*hours),
                    }
                },
            )
            .collect();
        let next_id = discussions.len() as u64 + 1;
        Self {
            discussions,
            next_id,
        }
    }

    /// Newest first.
    pub fn list(&self) -> &[Discussion] {
        &self.discussions
    }

    pub fn get(&self, id: u64) -> Option<&Discussion> {
        self.discussions.iter().find(|d| d.id == id)
    }

    /// Add one like; returns the new count. Saturates at `u32::MAX`.
    pub fn like(&mut self, id: u64) -> Option<u32> {
        let discussion = self.discussions.iter_mut().find(|d| d.id == id)?;
        discussion.likes = discussion.likes.saturating_add(1);
        Some(discussion.likes)
    }

    /// Start a thread. Title and content must be non-blank.
    pub fn create(&mut self, new: NewDiscussion, now: DateTime<Utc>) -> Option<Discussion> {
        if new.title.trim().is_empty() || new.content.trim().is_empty() {
            return None;
        }
        let author = if new.author.trim().is_empty() {
            "Anonymous".to_string()
        } else {
            new.author.trim().to_string()
        };
        let discussion = Discussion {
            id: self.next_id.max(1),
            title: new.title.trim().to_string(),
            author,
            avatar: new.avatar,
            content: new.content.trim().to_string(),
            likes: 0,
            replies: 0,
            category: new.category,
            created_at: now,
        };
        self.next_id = discussion.id + 1;
        self.discussions.insert(0, discussion.clone());
        Some(discussion)
    }
}

/// Relative age: "just now", "5 minutes ago", "1 hour ago", "3 days ago".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - then;
    let (n, unit) = if elapsed.num_days() >= 1 {
        (elapsed.num_days(), "day")
    } else if elapsed.num_hours() >= 1 {
        (elapsed.num_hours(), "hour")
    } else if elapsed.num_minutes() >= 1 {
        (elapsed.num_minutes(), "minute")
    } else {
        return "just now".to_string();
    };
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_board() {
        let now = Utc::now();
        let board = DiscussionBoard::seeded(now);
        assert_eq!(board.list().len(), 3);
        assert_eq!(time_ago(board.list()[0].created_at, now), "2 hours ago");
        assert_eq!(time_ago(board.list()[2].created_at, now), "6 hours ago");
    }

    #[test]
    fn test_like_increments() {
        let mut board = DiscussionBoard::seeded(Utc::now());
        assert_eq!(board.like(2), Some(68));
        assert_eq!(board.get(2).unwrap().likes, 68);
        assert_eq!(board.like(99), None);
    }

    #[test]
    fn test_like_saturates_at_max() {
        let mut board = DiscussionBoard::seeded(Utc::now());
        board.discussions[0].likes = u32::MAX - 1;
        assert_eq!(board.like(1), Some(u32::MAX));
        assert_eq!(board.like(1), Some(u32::MAX));
        assert_eq!(board.get(1).unwrap().likes, u32::MAX);
    }

    #[test]
    fn test_create_inserts_at_front() {
        let now = Utc::now();
        let mut board = DiscussionBoard::seeded(now);
        let created = board
            .create(
                NewDiscussion {
                    title: "Sharing my RAG pipeline".into(),
                    content: "Here is how I wired it up.".into(),
                    category: "Showcase".into(),
                    ..NewDiscussion::default()
                },
                now,
            )
            .unwrap();
        assert_eq!(created.id, 4);
        assert_eq!(created.author, "Anonymous");
        assert_eq!(created.likes, 0);
        assert_eq!(board.list()[0].id, 4);
        assert_eq!(time_ago(created.created_at, now), "just now");
    }

    #[test]
    fn test_create_rejects_blank() {
        let mut board = DiscussionBoard::default();
        assert!(board.create(NewDiscussion::default(), Utc::now()).is_none());
        let created = board
            .create(
                NewDiscussion {
                    title: "t".into(),
                    content: "c".into(),
                    ..NewDiscussion::default()
                },
                Utc::now(),
            )
            .unwrap();
        assert_eq!(created.id, 1);
    }

    #[test]
    fn test_time_ago_units() {
        let now = Utc::now();
        assert_eq!(time_ago(now - Duration::seconds(30), now), "just now");
        assert_eq!(time_ago(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(time_ago(now - Duration::minutes(45), now), "45 minutes ago");
        assert_eq!(time_ago(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(time_ago(now - Duration::days(3), now), "3 days ago");
    }
}
