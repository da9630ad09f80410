//! Logical route targets.
//!
//! Unauthorized modification attempts answer with a redirect to the
//! entity's canonical read view instead of an error response, so the
//! redirect targets live in one table rather than as ad-hoc strings.

use actix_web::{HttpResponse, http::header};
use uuid::Uuid;

pub fn index() -> String {
    "/api/posts".to_owned()
}

pub fn post_detail(post_id: Uuid) -> String {
    format!("/api/posts/{post_id}")
}

pub fn profile(username: &str) -> String {
    format!("/api/profiles/{username}")
}

/// 303 See Other to a logical target.
pub fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
