use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Comment, Location, Post, PostDigest, User};
use crate::error::RepoError;
use crate::pagination::{Page, PageRequest};

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;
}

/// Location repository.
#[async_trait]
pub trait LocationRepository: BaseRepository<Location, Uuid> {}

/// Post repository.
///
/// The feed queries apply the publish gate as query filters rather than
/// per-record checks, annotate each post with its comment count, and order
/// by `pub_date` descending. That ordering and annotation are invariant
/// across every listing entry point.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Publicly visible posts at `now`, newest first.
    async fn list_public(
        &self,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<PostDigest>, RepoError>;

    /// Publicly visible posts in one category, newest first.
    async fn list_by_category(
        &self,
        category_id: Uuid,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<PostDigest>, RepoError>;

    /// One author's posts, newest first. With `include_hidden` the publish
    /// gate is skipped entirely (the owner viewing their own profile).
    async fn list_by_author(
        &self,
        author_id: Uuid,
        include_hidden: bool,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<PostDigest>, RepoError>;

    /// A post together with its owning category, for per-entity gate checks.
    async fn find_with_category(
        &self,
        id: Uuid,
    ) -> Result<Option<(Post, Option<Category>)>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// All comments on a post with their authors' usernames, oldest first.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<(Comment, String)>, RepoError>;
}
