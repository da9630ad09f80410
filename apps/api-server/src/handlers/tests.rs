//! Handler scenario tests against the in-memory backend.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::{TimeDelta, Utc};

use quill_core::domain::{Post, User};
use quill_core::ports::{BaseRepository, CommentRepository, PasswordService, TokenService};
use quill_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use quill_shared::dto::{PageResponse, PostDetailResponse, PostResponse, ProfileFeedResponse};

use crate::handlers::configure_routes;
use crate::state::AppState;

macro_rules! spawn_app {
    ($state:expr, $tokens:expr) => {{
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .app_data(web::Data::new($tokens.clone()))
                .app_data(web::Data::new(passwords))
                .configure(configure_routes),
        )
        .await
    }};
}

fn token_service() -> Arc<dyn TokenService> {
    Arc::new(JwtTokenService::new(JwtConfig {
        secret: "test-secret-key".to_string(),
        expiration_hours: 1,
        issuer: "test-issuer".to_string(),
    }))
}

async fn seed_user(state: &AppState, username: &str) -> User {
    let user = User::new(
        username.to_owned(),
        format!("{username}@example.com"),
        "hash".to_owned(),
    );
    state.users.save(user).await.unwrap()
}

async fn seed_post(state: &AppState, author: &User, published: bool) -> Post {
    let mut post = Post::new(author.id, "Hello".to_owned(), "World".to_owned());
    post.is_published = published;
    post.pub_date = Utc::now() - TimeDelta::hours(1);
    state.posts.save(post).await.unwrap()
}

fn bearer(tokens: &Arc<dyn TokenService>, user: &User) -> (header::HeaderName, String) {
    let token = tokens.generate_token(user.id, &user.username).unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

#[actix_web::test]
async fn owner_profile_includes_draft_anonymous_view_excludes_it() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let app = spawn_app!(state, tokens);

    let alice = seed_user(&state, "alice").await;
    seed_post(&state, &alice, false).await;

    let req = test::TestRequest::get()
        .uri("/api/profiles/alice")
        .insert_header(bearer(&tokens, &alice))
        .to_request();
    let body: ProfileFeedResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.posts.total_items, 1);

    let req = test::TestRequest::get()
        .uri("/api/profiles/alice")
        .to_request();
    let body: ProfileFeedResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.posts.total_items, 0);
}

#[actix_web::test]
async fn non_owner_edit_redirects_and_post_is_unchanged() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let app = spawn_app!(state, tokens);

    let alice = seed_user(&state, "alice").await;
    let bob = seed_user(&state, "bob").await;
    let post = seed_post(&state, &alice, true).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/posts/{}", post.id))
        .insert_header(bearer(&tokens, &bob))
        .set_json(serde_json::json!({ "title": "Hijacked" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap(),
        format!("/api/posts/{}", post.id)
    );

    let stored = state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Hello");
}

#[actix_web::test]
async fn anonymous_comment_is_challenged_and_not_created() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let app = spawn_app!(state, tokens);

    let alice = seed_user(&state, "alice").await;
    let post = seed_post(&state, &alice, true).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{}/comments", post.id))
        .set_json(serde_json::json!({ "body": "first!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));

    let comments = state.comments.list_for_post(post.id).await.unwrap();
    assert!(comments.is_empty());
}

#[actix_web::test]
async fn draft_detail_is_not_found_for_public_but_visible_to_owner() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let app = spawn_app!(state, tokens);

    let alice = seed_user(&state, "alice").await;
    let post = seed_post(&state, &alice, false).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", post.id))
        .insert_header(bearer(&tokens, &alice))
        .to_request();
    let body: PostDetailResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.post.id, post.id);
}

#[actix_web::test]
async fn feed_clamps_out_of_range_page() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let app = spawn_app!(state, tokens);

    let alice = seed_user(&state, "alice").await;
    seed_post(&state, &alice, true).await;

    let req = test::TestRequest::get()
        .uri("/api/posts?page=99")
        .to_request();
    let body: PageResponse<PostResponse> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.page, 1);
    assert_eq!(body.items.len(), 1);
}

#[actix_web::test]
async fn register_then_login_roundtrip() {
    let state = AppState::in_memory();
    let tokens = token_service();
    let app = spawn_app!(state, tokens);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(serde_json::json!({
            "username": "carol",
            "email": "carol@example.com",
            "password": "long-enough-secret"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({
            "username": "carol",
            "password": "long-enough-secret"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
