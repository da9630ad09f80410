//! HTTP handlers and route configuration.

mod auth;
mod categories;
mod comments;
mod health;
mod posts;
mod profiles;

#[cfg(test)]
mod tests;

use actix_web::web;
use serde::Deserialize;

use quill_core::domain::{Comment, PostDigest, User};
use quill_core::pagination::{Page, PageRequest};
use quill_shared::dto::{CommentResponse, PageResponse, PostResponse, ProfileResponse};

use crate::routes;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/",
        web::get().to(|| async { routes::see_other(routes::index()) }),
    );
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::index))
                    .route("", web::post().to(posts::create))
                    .route("/{post_id}", web::get().to(posts::detail))
                    .route("/{post_id}", web::patch().to(posts::update))
                    .route("/{post_id}", web::delete().to(posts::remove))
                    .route("/{post_id}/comments", web::post().to(comments::create))
                    .route(
                        "/{post_id}/comments/{comment_id}",
                        web::patch().to(comments::update),
                    )
                    .route(
                        "/{post_id}/comments/{comment_id}",
                        web::delete().to(comments::remove),
                    ),
            )
            .service(web::scope("/categories").route("/{slug}", web::get().to(categories::detail)))
            .service(
                web::scope("/profiles")
                    .route("/{username}", web::get().to(profiles::detail))
                    .route("/{username}", web::patch().to(profiles::update)),
            ),
    );
}

/// Page number query parameter (`?page=N`).
#[derive(Debug, Deserialize)]
pub(crate) struct PageQuery {
    page: Option<u64>,
}

impl PageQuery {
    pub(crate) fn request(&self) -> PageRequest {
        PageRequest::new(self.page.unwrap_or(1))
    }
}

pub(crate) fn digest_response(digest: PostDigest) -> PostResponse {
    PostResponse {
        id: digest.post.id,
        author_id: digest.post.author_id,
        author_username: Some(digest.author_username),
        category_title: digest.category_title,
        category_slug: digest.category_slug,
        location_id: digest.post.location_id,
        title: digest.post.title,
        body: digest.post.body,
        pub_date: digest.post.pub_date,
        is_published: digest.post.is_published,
        created_at: digest.post.created_at,
        comment_count: Some(digest.comment_count),
    }
}

pub(crate) fn feed_response(page: Page<PostDigest>) -> PageResponse<PostResponse> {
    let has_next = page.has_next();
    let has_previous = page.has_previous();
    let page = page.map(digest_response);
    PageResponse {
        items: page.items,
        page: page.number,
        page_size: page.size,
        total_items: page.total_items,
        total_pages: page.total_pages,
        has_next,
        has_previous,
    }
}

pub(crate) fn comment_response(comment: Comment, author_username: Option<String>) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        author_id: comment.author_id,
        author_username,
        body: comment.body,
        created_at: comment.created_at,
    }
}

pub(crate) fn profile_response(user: &User) -> ProfileResponse {
    ProfileResponse {
        id: user.id,
        username: user.username.clone(),
        display_name: user.display_name.clone(),
        created_at: user.created_at,
    }
}
