//! In-memory repositories - used as fallback when no database is
//! configured, and as the backend for handler tests.
//!
//! Note: data is lost on process restart. The feed queries apply the same
//! publish gate, comment-count annotation, and `pub_date` descending
//! ordering as the Postgres repositories.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Category, Comment, Location, Post, PostDigest, User};
use quill_core::error::RepoError;
use quill_core::pagination::{Page, PageRequest};
use quill_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, LocationRepository, PostRepository,
    UserRepository,
};
use quill_core::visibility;

/// Shared in-memory tables behind async locks.
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    categories: RwLock<HashMap<Uuid, Category>>,
    locations: RwLock<HashMap<Uuid, Location>>,
    posts: RwLock<HashMap<Uuid, Post>>,
    comments: RwLock<HashMap<Uuid, Comment>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Build feed digests for the posts accepted by `filter`, annotated
    /// and ordered the way every listing entry point requires.
    async fn digest_page(
        &self,
        page: PageRequest,
        filter: impl Fn(&Post, Option<&Category>) -> bool,
    ) -> Page<PostDigest> {
        let posts = self.posts.read().await;
        let users = self.users.read().await;
        let categories = self.categories.read().await;
        let comments = self.comments.read().await;

        let mut digests: Vec<PostDigest> = posts
            .values()
            .filter(|post| {
                let category = post.category_id.and_then(|id| categories.get(&id));
                filter(post, category)
            })
            .map(|post| {
                let category = post.category_id.and_then(|id| categories.get(&id));
                let author_username = users
                    .get(&post.author_id)
                    .map(|u| u.username.clone())
                    .unwrap_or_default();
                let comment_count =
                    comments.values().filter(|c| c.post_id == post.id).count() as u64;
                PostDigest {
                    post: post.clone(),
                    author_username,
                    category_title: category.map(|c| c.title.clone()),
                    category_slug: category.map(|c| c.slug.clone()),
                    comment_count,
                }
            })
            .collect();

        digests.sort_by(|a, b| b.post.pub_date.cmp(&a.post.pub_date));

        Page::from_vec(digests, page)
    }
}

macro_rules! impl_base_repository {
    ($entity:ty, $table:ident) => {
        #[async_trait]
        impl BaseRepository<$entity, Uuid> for InMemoryStore {
            async fn find_by_id(&self, id: Uuid) -> Result<Option<$entity>, RepoError> {
                Ok(self.$table.read().await.get(&id).cloned())
            }

            async fn save(&self, entity: $entity) -> Result<$entity, RepoError> {
                self.$table.write().await.insert(entity.id, entity.clone());
                Ok(entity)
            }

            async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
                self.$table
                    .write()
                    .await
                    .remove(&id)
                    .map(|_| ())
                    .ok_or(RepoError::NotFound)
            }
        }
    };
}

impl_base_repository!(User, users);
impl_base_repository!(Category, categories);
impl_base_repository!(Location, locations);
impl_base_repository!(Comment, comments);

// Post gets a hand-written impl: deleting a post removes its comments,
// mirroring the FK cascade of the Postgres schema.
#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        self.posts.write().await.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.posts
            .write()
            .await
            .remove(&id)
            .ok_or(RepoError::NotFound)?;
        self.comments.write().await.retain(|_, c| c.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        Ok(self
            .categories
            .read()
            .await
            .values()
            .find(|c| c.slug == slug)
            .cloned())
    }
}

impl LocationRepository for InMemoryStore {}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn list_public(
        &self,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<PostDigest>, RepoError> {
        Ok(self
            .digest_page(page, |post, category| {
                visibility::post_is_public(post, category, now)
            })
            .await)
    }

    async fn list_by_category(
        &self,
        category_id: Uuid,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<PostDigest>, RepoError> {
        Ok(self
            .digest_page(page, |post, category| {
                post.category_id == Some(category_id)
                    && visibility::post_is_public(post, category, now)
            })
            .await)
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        include_hidden: bool,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<PostDigest>, RepoError> {
        Ok(self
            .digest_page(page, |post, category| {
                post.author_id == author_id
                    && (include_hidden || visibility::post_is_public(post, category, now))
            })
            .await)
    }

    async fn find_with_category(
        &self,
        id: Uuid,
    ) -> Result<Option<(Post, Option<Category>)>, RepoError> {
        let posts = self.posts.read().await;
        let Some(post) = posts.get(&id) else {
            return Ok(None);
        };
        let categories = self.categories.read().await;
        let category = post.category_id.and_then(|id| categories.get(&id).cloned());
        Ok(Some((post.clone(), category)))
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<(Comment, String)>, RepoError> {
        let comments = self.comments.read().await;
        let users = self.users.read().await;

        let mut list: Vec<(Comment, String)> = comments
            .values()
            .filter(|c| c.post_id == post_id)
            .map(|c| {
                let username = users
                    .get(&c.author_id)
                    .map(|u| u.username.clone())
                    .unwrap_or_default();
                (c.clone(), username)
            })
            .collect();

        list.sort_by(|a, b| a.0.created_at.cmp(&b.0.created_at));
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    async fn seed_user(store: &InMemoryStore, username: &str) -> User {
        let user = User::new(
            username.to_owned(),
            format!("{username}@example.com"),
            "hash".to_owned(),
        );
        BaseRepository::<User, Uuid>::save(store, user.clone())
            .await
            .unwrap();
        user
    }

    #[tokio::test]
    async fn feeds_order_by_pub_date_descending() {
        let store = InMemoryStore::new();
        let author = seed_user(&store, "alice").await;
        let now = Utc::now();

        for days_ago in [3, 1, 2] {
            let mut post = Post::new(author.id, format!("post-{days_ago}"), "body".to_owned());
            post.pub_date = now - TimeDelta::days(days_ago);
            BaseRepository::<Post, Uuid>::save(&*store, post)
                .await
                .unwrap();
        }

        let page = store.list_public(now, PageRequest::new(1)).await.unwrap();

        let titles: Vec<_> = page.items.iter().map(|d| d.post.title.as_str()).collect();
        assert_eq!(titles, vec!["post-1", "post-2", "post-3"]);
    }

    #[tokio::test]
    async fn feeds_annotate_comment_count() {
        let store = InMemoryStore::new();
        let author = seed_user(&store, "alice").await;
        let reader = seed_user(&store, "bob").await;
        let now = Utc::now();

        let mut post = Post::new(author.id, "commented".to_owned(), "body".to_owned());
        post.pub_date = now - TimeDelta::hours(1);
        BaseRepository::<Post, Uuid>::save(&*store, post.clone())
            .await
            .unwrap();

        for text in ["first", "second"] {
            let comment = Comment::new(post.id, reader.id, text.to_owned());
            BaseRepository::<Comment, Uuid>::save(&*store, comment)
                .await
                .unwrap();
        }

        let page = store.list_public(now, PageRequest::new(1)).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].comment_count, 2);
        assert_eq!(page.items[0].author_username, "alice");
    }

    #[tokio::test]
    async fn owner_profile_includes_hidden_posts_public_view_excludes_them() {
        let store = InMemoryStore::new();
        let author = seed_user(&store, "alice").await;
        let now = Utc::now();

        let mut draft = Post::new(author.id, "draft".to_owned(), "body".to_owned());
        draft.is_published = false;
        draft.pub_date = now - TimeDelta::hours(1);
        BaseRepository::<Post, Uuid>::save(&*store, draft)
            .await
            .unwrap();

        let owner_view = store
            .list_by_author(author.id, true, now, PageRequest::new(1))
            .await
            .unwrap();
        let public_view = store
            .list_by_author(author.id, false, now, PageRequest::new(1))
            .await
            .unwrap();

        assert_eq!(owner_view.total_items, 1);
        assert_eq!(public_view.total_items, 0);
    }

    #[tokio::test]
    async fn unpublished_category_hides_posts_from_public_feed() {
        let store = InMemoryStore::new();
        let author = seed_user(&store, "alice").await;
        let now = Utc::now();

        let mut category = Category::new(
            "Hidden".to_owned(),
            "not yet".to_owned(),
            "hidden".to_owned(),
        );
        category.is_published = false;
        BaseRepository::<Category, Uuid>::save(&*store, category.clone())
            .await
            .unwrap();

        let mut post = Post::new(author.id, "filed".to_owned(), "body".to_owned());
        post.category_id = Some(category.id);
        post.pub_date = now - TimeDelta::hours(1);
        BaseRepository::<Post, Uuid>::save(&*store, post)
            .await
            .unwrap();

        let page = store.list_public(now, PageRequest::new(1)).await.unwrap();

        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn deleting_post_removes_its_comments() {
        let store = InMemoryStore::new();
        let author = seed_user(&store, "alice").await;

        let post = Post::new(author.id, "doomed".to_owned(), "body".to_owned());
        BaseRepository::<Post, Uuid>::save(&*store, post.clone())
            .await
            .unwrap();
        let comment = Comment::new(post.id, author.id, "gone too".to_owned());
        BaseRepository::<Comment, Uuid>::save(&*store, comment.clone())
            .await
            .unwrap();

        BaseRepository::<Post, Uuid>::delete(&*store, post.id)
            .await
            .unwrap();

        let orphan = BaseRepository::<Comment, Uuid>::find_by_id(&*store, comment.id)
            .await
            .unwrap();
        assert!(orphan.is_none());
    }
}
