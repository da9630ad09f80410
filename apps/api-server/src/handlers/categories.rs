//! Category feed handler.

use actix_web::{HttpResponse, web};
use chrono::Utc;

use quill_core::ports::{CategoryRepository, PostRepository};
use quill_shared::dto::{CategoryFeedResponse, CategoryResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::{PageQuery, feed_response};

/// GET /api/categories/{slug} - a published category and its visible posts.
///
/// An unpublished category is reported as missing, same as an unknown slug.
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let category = state
        .categories
        .find_by_slug(&slug)
        .await?
        .filter(|c| c.is_published)
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    let page = state
        .posts
        .list_by_category(category.id, Utc::now(), query.request())
        .await?;

    Ok(HttpResponse::Ok().json(CategoryFeedResponse {
        category: CategoryResponse {
            id: category.id,
            title: category.title,
            description: category.description,
            slug: category.slug,
        },
        posts: feed_response(page),
    }))
}
