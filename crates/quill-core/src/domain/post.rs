use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog entry owned by its author.
///
/// `is_published`, `pub_date` and the owning category's published flag form
/// the publish gate evaluated in [`crate::visibility`]. The author is never
/// subject to the gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub title: String,
    pub body: String,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post. Defaults to published with `pub_date = now`.
    pub fn new(author_id: Uuid, title: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            category_id: None,
            location_id: None,
            title,
            body,
            pub_date: now,
            is_published: true,
            created_at: now,
        }
    }
}

/// A post as it appears in a feed: the entity plus the listing annotations
/// every entry point carries (comment count, author/category display data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDigest {
    pub post: Post,
    pub author_username: String,
    pub category_title: Option<String>,
    pub category_slug: Option<String>,
    pub comment_count: u64,
}
