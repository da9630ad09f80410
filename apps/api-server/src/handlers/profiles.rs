//! Profile handlers: a user's feed and self-service profile edits.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use quill_core::ports::{BaseRepository, PostRepository, UserRepository};
use quill_shared::dto::{ProfileFeedResponse, UpdateProfileRequest};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::routes;
use crate::state::AppState;

use super::{PageQuery, feed_response, profile_response};

/// GET /api/profiles/{username} - a user and their posts.
///
/// The profile owner sees all of their posts, drafts and scheduled ones
/// included; every other viewer gets only the publicly visible ones.
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();

    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let include_hidden = identity.viewer().is(user.id);

    let page = state
        .posts
        .list_by_author(user.id, include_hidden, Utc::now(), query.request())
        .await?;

    Ok(HttpResponse::Ok().json(ProfileFeedResponse {
        profile: profile_response(&user),
        posts: feed_response(page),
    }))
}

/// PATCH /api/profiles/{username} - owner edits their profile.
///
/// A non-owner is redirected to the profile's read view instead of
/// receiving an error.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();

    let mut user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if identity.user_id != user.id {
        return Ok(routes::see_other(routes::profile(&username)));
    }

    let req = body.into_inner();

    if let Some(email) = req.email {
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::BadRequest("Invalid email address".to_string()));
        }
        user.email = email;
    }
    if let Some(display_name) = req.display_name {
        user.display_name = if display_name.is_empty() {
            None
        } else {
            Some(display_name)
        };
    }
    user.updated_at = Utc::now();

    let saved = state.users.save(user).await?;

    Ok(HttpResponse::Ok().json(profile_response(&saved)))
}
