mod auth;
mod comments;
mod groups;
mod posts;
mod users;


use std::sync::Arc;

use axum::extract::FromRef;
use axum::routing::{get, post};
use axum::Router;

use crate::auth::jwt::JwtKeys;
use crate::services::BlogServices;

pub const API_ROOT: &str = "/api/v1";

#[derive(Clone)]
pub struct AppState<S> {
    pub svc: S,
    pub jwt: Arc<JwtKeys>,
}

impl<S> AppState<S> {
    pub fn new(svc: S, jwt: Arc<JwtKeys>) -> Self {
        Self { svc, jwt }
    }
}

impl<S> FromRef<AppState<S>> for Arc<JwtKeys> {
    fn from_ref(state: &AppState<S>) -> Self {
        state.jwt.clone()
    }
}

pub fn router<S: BlogServices>() -> Router<AppState<S>> {
    Router::new()
        .route(
            "/posts/",
            get(posts::list_posts::<S>).post(posts::create_post::<S>),
        )
        .route(
            "/posts/:post_id/",
            get(posts::retrieve_post::<S>)
                .put(posts::update_post::<S>)
                .patch(posts::partial_update_post::<S>)
                .delete(posts::delete_post::<S>),
        )
        .route(
            "/posts/:post_id/comments/",
            get(comments::list_comments::<S>).post(comments::create_comment::<S>),
        )
        .route(
            "/posts/:post_id/comments/:comment_id/",
            get(comments::retrieve_comment::<S>)
                .put(comments::update_comment::<S>)
                .patch(comments::partial_update_comment::<S>)
                .delete(comments::delete_comment::<S>),
        )
        .route("/groups/", get(groups::list_groups::<S>))
        .route("/groups/:group_id/", get(groups::retrieve_group::<S>))
        .route("/users/", post(users::create_user::<S>))
        .route("/jwt/create/", post(auth::create_token::<S>))
}

/// The API mounted under [`API_ROOT`], without transport middleware.
pub fn app<S: BlogServices>(state: AppState<S>) -> Router {
    Router::new().nest(API_ROOT, router()).with_state(state)
}
