//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// A user's public profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request to edit one's own profile. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Request to create a post.
///
/// `pub_date` defaults to now; a future date schedules the post (hidden
/// from the public until the date passes, always visible to the author).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
    pub pub_date: Option<DateTime<Utc>>,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub is_published: Option<bool>,
}

/// Request to edit a post. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub pub_date: Option<DateTime<Utc>>,
    pub category_id: Option<Option<Uuid>>,
    pub location_id: Option<Option<Uuid>>,
    pub is_published: Option<bool>,
}

/// A post as returned by feeds and the detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_username: Option<String>,
    pub category_title: Option<String>,
    pub category_slug: Option<String>,
    pub location_id: Option<Uuid>,
    pub title: String,
    pub body: String,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub comment_count: Option<u64>,
}

/// A category header, returned alongside its feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub slug: String,
}

/// Request to add or edit a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

/// A comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub author_username: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// One page of an ordered listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

/// The post detail view: the post plus its comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

/// A category feed: the category header plus one page of its posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFeedResponse {
    pub category: CategoryResponse,
    pub posts: PageResponse<PostResponse>,
}

/// A profile feed: the profile plus one page of the user's posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileFeedResponse {
    pub profile: ProfileResponse,
    pub posts: PageResponse<PostResponse>,
}
