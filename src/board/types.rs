//! Record and payload types for the board.
//!
//! [`Idea`] and [`Comment`] mirror rows of the `ideas` and `comments` tables.
//! [`NewIdea`], [`IdeaUpdate`] and [`NewComment`] are the request payloads;
//! unknown fields (such as a client-supplied `id`) are ignored on deserialize.

use serde::{Deserialize, Serialize};

/// A row of the `ideas` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    /// Auto-assigned primary key.
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Denormalized like counter. Seeded by the client at creation, then moved
    /// by one on every like toggle.
    pub likes: i64,
}

/// An idea as returned by the listing, with its comment count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdeaSummary {
    #[serde(flatten)]
    pub idea: Idea,
    pub comments_count: i64,
}

/// Payload for creating an idea. `likes` defaults to 0.
#[derive(Debug, Clone, Deserialize)]
pub struct NewIdea {
    pub title: String,
    pub description: String,
    pub category: String,
    pub likes: Option<i64>,
}

/// Payload for replacing an idea's fields. Every field is required.
#[derive(Debug, Clone, Deserialize)]
pub struct IdeaUpdate {
    pub title: String,
    pub description: String,
    pub category: String,
    pub likes: i64,
}

/// A comment as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub idea_id: i64,
    pub text: String,
}

/// Payload for posting a comment.
pub type NewComment = Comment;

/// Outcome of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeToggle {
    /// `true` if the like was added, `false` if it was removed.
    pub liked: bool,
}
