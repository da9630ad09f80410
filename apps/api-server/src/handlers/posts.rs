//! Post handlers: the public feed, the detail view, and owner CRUD.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use quill_core::domain::{Category, Post};
use quill_core::ports::{BaseRepository, CommentRepository, PostRepository};
use quill_core::visibility;
use quill_shared::dto::{CreatePostRequest, PostDetailResponse, PostResponse, UpdatePostRequest};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::routes;
use crate::state::AppState;

use super::{PageQuery, comment_response, feed_response};

fn not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

fn post_response(
    post: Post,
    author_username: Option<String>,
    category: Option<&Category>,
    comment_count: Option<u64>,
) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        author_username,
        category_title: category.map(|c| c.title.clone()),
        category_slug: category.map(|c| c.slug.clone()),
        location_id: post.location_id,
        title: post.title,
        body: post.body,
        pub_date: post.pub_date,
        is_published: post.is_published,
        created_at: post.created_at,
        comment_count,
    }
}

/// Resolve and validate an optional category reference.
async fn resolve_category(
    state: &AppState,
    category_id: Option<Uuid>,
) -> AppResult<Option<Category>> {
    let Some(id) = category_id else {
        return Ok(None);
    };
    state
        .categories
        .find_by_id(id)
        .await?
        .map(Some)
        .ok_or_else(|| AppError::BadRequest("Unknown category".to_string()))
}

async fn validate_location(state: &AppState, location_id: Option<Uuid>) -> AppResult<()> {
    if let Some(id) = location_id {
        if state.locations.find_by_id(id).await?.is_none() {
            return Err(AppError::BadRequest("Unknown location".to_string()));
        }
    }
    Ok(())
}

/// GET /api/posts - the public feed.
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state
        .posts
        .list_public(Utc::now(), query.request())
        .await?;

    Ok(HttpResponse::Ok().json(feed_response(page)))
}

/// GET /api/posts/{post_id} - detail view with comments.
///
/// The author sees their post in any state; everyone else is subject to
/// the publish gate, with a failed gate indistinguishable from a missing
/// post.
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let (post, category) = state
        .posts
        .find_with_category(post_id)
        .await?
        .ok_or_else(not_found)?;

    if !visibility::can_view_post(identity.viewer(), &post, category.as_ref(), Utc::now()) {
        return Err(not_found());
    }

    let author_username = state
        .users
        .find_by_id(post.author_id)
        .await?
        .map(|u| u.username);

    let comments = state.comments.list_for_post(post_id).await?;
    let comment_count = comments.len() as u64;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: post_response(post, author_username, category.as_ref(), Some(comment_count)),
        comments: comments
            .into_iter()
            .map(|(c, username)| comment_response(c, Some(username)))
            .collect(),
    }))
}

/// POST /api/posts - create a post owned by the caller.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title must not be empty".to_string()));
    }
    if req.body.trim().is_empty() {
        return Err(AppError::BadRequest("Body must not be empty".to_string()));
    }

    let category = resolve_category(&state, req.category_id).await?;
    validate_location(&state, req.location_id).await?;

    let mut post = Post::new(identity.user_id, req.title, req.body);
    post.category_id = req.category_id;
    post.location_id = req.location_id;
    if let Some(pub_date) = req.pub_date {
        post.pub_date = pub_date;
    }
    if let Some(is_published) = req.is_published {
        post.is_published = is_published;
    }

    let saved = state.posts.save(post).await?;

    tracing::info!(post_id = %saved.id, author = %identity.username, "Post created");

    Ok(HttpResponse::Created().json(post_response(
        saved,
        Some(identity.username),
        category.as_ref(),
        Some(0),
    )))
}

/// PATCH /api/posts/{post_id} - owner edits.
///
/// A non-owner is not rejected: the request degrades to a redirect to the
/// post's read view, with stored fields untouched.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let mut post = state.posts.find_by_id(post_id).await?.ok_or_else(not_found)?;

    if !visibility::can_modify_post(identity.viewer(), &post) {
        return Ok(routes::see_other(routes::post_detail(post_id)));
    }

    let req = body.into_inner();

    if let Some(title) = req.title {
        if title.trim().is_empty() {
            return Err(AppError::BadRequest("Title must not be empty".to_string()));
        }
        post.title = title;
    }
    if let Some(text) = req.body {
        if text.trim().is_empty() {
            return Err(AppError::BadRequest("Body must not be empty".to_string()));
        }
        post.body = text;
    }
    if let Some(pub_date) = req.pub_date {
        post.pub_date = pub_date;
    }
    if let Some(category_id) = req.category_id {
        resolve_category(&state, category_id).await?;
        post.category_id = category_id;
    }
    if let Some(location_id) = req.location_id {
        validate_location(&state, location_id).await?;
        post.location_id = location_id;
    }
    if let Some(is_published) = req.is_published {
        post.is_published = is_published;
    }

    let saved = state.posts.save(post).await?;

    let category = resolve_category(&state, saved.category_id).await?;
    let comments = state.comments.list_for_post(post_id).await?;

    Ok(HttpResponse::Ok().json(post_response(
        saved,
        Some(identity.username),
        category.as_ref(),
        Some(comments.len() as u64),
    )))
}

/// DELETE /api/posts/{post_id} - owner deletes; comments go with the post.
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let post = state.posts.find_by_id(post_id).await?.ok_or_else(not_found)?;

    if !visibility::can_modify_post(identity.viewer(), &post) {
        return Ok(routes::see_other(routes::post_detail(post_id)));
    }

    state.posts.delete(post_id).await?;

    tracing::info!(post_id = %post_id, author = %identity.username, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
