//! Comment handlers.
//!
//! Anyone who can view a post may comment on it (authenticated); editing
//! and deleting are the comment author's alone, with non-authors redirected
//! to the post's read view.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use quill_core::domain::Comment;
use quill_core::ports::{BaseRepository, PostRepository};
use quill_core::visibility;
use quill_shared::dto::CommentRequest;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::routes;
use crate::state::AppState;

use super::comment_response;

fn not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

/// Look up a comment, scoped to the post in the path.
async fn find_scoped_comment(
    state: &AppState,
    post_id: Uuid,
    comment_id: Uuid,
) -> AppResult<Comment> {
    state
        .comments
        .find_by_id(comment_id)
        .await?
        .filter(|c| c.post_id == post_id)
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
}

/// POST /api/posts/{post_id}/comments - add a comment to a visible post.
///
/// Anonymous requests never get here: the `Identity` extractor answers
/// with an authentication challenge before a record could be created.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
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

    let req = body.into_inner();
    if req.body.trim().is_empty() {
        return Err(AppError::BadRequest("Comment must not be empty".to_string()));
    }

    let comment = Comment::new(post_id, identity.user_id, req.body);
    let saved = state.comments.save(comment).await?;

    Ok(HttpResponse::Created().json(comment_response(saved, Some(identity.username))))
}

/// PATCH /api/posts/{post_id}/comments/{comment_id} - author edits.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    let mut comment = find_scoped_comment(&state, post_id, comment_id).await?;

    if !visibility::can_modify_comment(identity.viewer(), &comment) {
        return Ok(routes::see_other(routes::post_detail(post_id)));
    }

    let req = body.into_inner();
    if req.body.trim().is_empty() {
        return Err(AppError::BadRequest("Comment must not be empty".to_string()));
    }

    comment.body = req.body;
    let saved = state.comments.save(comment).await?;

    Ok(HttpResponse::Ok().json(comment_response(saved, Some(identity.username))))
}

/// DELETE /api/posts/{post_id}/comments/{comment_id} - author deletes.
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    let comment = find_scoped_comment(&state, post_id, comment_id).await?;

    if !visibility::can_modify_comment(identity.viewer(), &comment) {
        return Ok(routes::see_other(routes::post_detail(post_id)));
    }

    state.comments.delete(comment.id).await?;

    Ok(HttpResponse::NoContent().finish())
}
