//! PostgreSQL repository implementations.
//!
//! The post feed queries push the publish gate into SQL: the same
//! three-condition predicate the pure policy functions evaluate per entity
//! is applied here as query filters, with the comment count annotated via
//! a grouped left join and `pub_date DESC` ordering on every feed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use quill_core::domain::{Category, Comment, Post, PostDigest, User};
use quill_core::error::RepoError;
use quill_core::pagination::{Page, PageRequest};
use quill_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, UserRepository,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::location::Entity as LocationEntity;
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL location repository.
pub type PostgresLocationRepository = PostgresBaseRepository<LocationEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

impl LocationRepository for PostgresLocationRepository {}

/// One feed row: post columns plus the listing annotations.
#[derive(Debug, FromQueryResult)]
struct PostDigestRow {
    id: Uuid,
    author_id: Uuid,
    category_id: Option<Uuid>,
    location_id: Option<Uuid>,
    title: String,
    body: String,
    pub_date: sea_orm::prelude::DateTimeWithTimeZone,
    is_published: bool,
    created_at: sea_orm::prelude::DateTimeWithTimeZone,
    author_username: String,
    category_title: Option<String>,
    category_slug: Option<String>,
    comment_count: i64,
}

impl From<PostDigestRow> for PostDigest {
    fn from(row: PostDigestRow) -> Self {
        Self {
            post: Post {
                id: row.id,
                author_id: row.author_id,
                category_id: row.category_id,
                location_id: row.location_id,
                title: row.title,
                body: row.body,
                pub_date: row.pub_date.into(),
                is_published: row.is_published,
                created_at: row.created_at.into(),
            },
            author_username: row.author_username,
            category_title: row.category_title,
            category_slug: row.category_slug,
            comment_count: row.comment_count.max(0) as u64,
        }
    }
}

/// The publish gate as a SQL condition. Requires the category join.
fn public_condition(now: DateTime<Utc>) -> Condition {
    Condition::all()
        .add(post::Column::IsPublished.eq(true))
        .add(post::Column::PubDate.lte(now))
        .add(
            Condition::any()
                .add(post::Column::CategoryId.is_null())
                .add(category::Column::IsPublished.eq(true)),
        )
}

/// Base feed select: annotations, joins, and the invariant ordering.
fn digest_select() -> Select<PostEntity> {
    PostEntity::find()
        .column_as(user::Column::Username, "author_username")
        .column_as(category::Column::Title, "category_title")
        .column_as(category::Column::Slug, "category_slug")
        .column_as(comment::Column::Id.count(), "comment_count")
        .join(JoinType::LeftJoin, post::Relation::Author.def())
        .join(JoinType::LeftJoin, post::Relation::Category.def())
        .join_rev(JoinType::LeftJoin, comment::Relation::Post.def())
        .group_by(post::Column::Id)
        .group_by(user::Column::Id)
        .group_by(category::Column::Id)
        .order_by_desc(post::Column::PubDate)
}

impl PostgresPostRepository {
    /// Count matching posts, then fetch the clamped page of digest rows.
    async fn fetch_page(
        &self,
        condition: Condition,
        page: PageRequest,
    ) -> Result<Page<PostDigest>, RepoError> {
        let total = PostEntity::find()
            .join(JoinType::LeftJoin, post::Relation::Category.def())
            .filter(condition.clone())
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let rows = digest_select()
            .filter(condition)
            .offset(page.offset(total))
            .limit(page.size)
            .into_model::<PostDigestRow>()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            page,
            total,
        ))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_public(
        &self,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<PostDigest>, RepoError> {
        self.fetch_page(public_condition(now), page).await
    }

    async fn list_by_category(
        &self,
        category_id: Uuid,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<PostDigest>, RepoError> {
        let condition = public_condition(now).add(post::Column::CategoryId.eq(category_id));
        self.fetch_page(condition, page).await
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        include_hidden: bool,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<PostDigest>, RepoError> {
        let condition = if include_hidden {
            Condition::all().add(post::Column::AuthorId.eq(author_id))
        } else {
            public_condition(now).add(post::Column::AuthorId.eq(author_id))
        };
        self.fetch_page(condition, page).await
    }

    async fn find_with_category(
        &self,
        id: Uuid,
    ) -> Result<Option<(Post, Option<Category>)>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .find_also_related(CategoryEntity)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(|(post, category)| (post.into(), category.map(Into::into))))
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<(Comment, String)>, RepoError> {
        let rows = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .find_also_related(UserEntity)
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(c, author)| {
                let username = author.map(|u| u.username).unwrap_or_default();
                (c.into(), username)
            })
            .collect())
    }
}
