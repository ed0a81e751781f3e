use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::helpers::{OrNotFound, ValidJson};
use crate::models::comment::{Comment, CreateComment, PatchComment};
use crate::models::post::Post;
use crate::permissions::{ensure_author, Action};
use crate::services::{CommentService, PostService};

use super::AppState;

async fn parent_post<S: PostService>(svc: &S, post_id: i32) -> Result<Post, AppError> {
    svc.get_post(post_id).await?.or_not_found()
}

async fn find_comment<S: PostService + CommentService>(
    svc: &S,
    post_id: i32,
    comment_id: i32,
) -> Result<Comment, AppError> {
    parent_post(svc, post_id).await?;
    svc.get_comment(post_id, comment_id).await?.or_not_found()
}

#[tracing::instrument(skip(state))]
pub(super) async fn list_comments<S: PostService + CommentService>(
    State(state): State<AppState<S>>,
    Path(post_id): Path<i32>,
) -> Result<Response, AppError> {
    parent_post(&state.svc, post_id).await?;
    let comments = state.svc.list_comments(post_id).await?;
    Ok(Json(comments).into_response())
}

#[tracing::instrument(skip(state))]
pub(super) async fn retrieve_comment<S: PostService + CommentService>(
    State(state): State<AppState<S>>,
    Path((post_id, comment_id)): Path<(i32, i32)>,
) -> Result<Response, AppError> {
    let comment = find_comment(&state.svc, post_id, comment_id).await?;
    Ok(Json(comment).into_response())
}

#[tracing::instrument(skip(state, user, body), fields(user = user.id))]
pub(super) async fn create_comment<S: PostService + CommentService>(
    State(state): State<AppState<S>>,
    user: AuthUser,
    Path(post_id): Path<i32>,
    ValidJson(body): ValidJson<CreateComment>,
) -> Result<Response, AppError> {
    parent_post(&state.svc, post_id).await?;

    let comment = state
        .svc
        .create_comment(user.id, post_id, &body.text)
        .await?;
    info!(comment = comment.id, "comment created");
    Ok((StatusCode::CREATED, Json(comment)).into_response())
}

#[tracing::instrument(skip(state, user, body), fields(user = user.id))]
pub(super) async fn update_comment<S: PostService + CommentService>(
    State(state): State<AppState<S>>,
    user: AuthUser,
    Path((post_id, comment_id)): Path<(i32, i32)>,
    ValidJson(body): ValidJson<CreateComment>,
) -> Result<Response, AppError> {
    let comment = find_comment(&state.svc, post_id, comment_id).await?;
    ensure_author(&user, &comment, Action::Change)?;

    let comment = state.svc.update_comment(comment_id, &body.text).await?;
    Ok(Json(comment).into_response())
}

#[tracing::instrument(skip(state, user, body), fields(user = user.id))]
pub(super) async fn partial_update_comment<S: PostService + CommentService>(
    State(state): State<AppState<S>>,
    user: AuthUser,
    Path((post_id, comment_id)): Path<(i32, i32)>,
    ValidJson(body): ValidJson<PatchComment>,
) -> Result<Response, AppError> {
    let comment = find_comment(&state.svc, post_id, comment_id).await?;
    ensure_author(&user, &comment, Action::Change)?;

    let comment = match body.text {
        Some(text) => state.svc.update_comment(comment_id, &text).await?,
        None => comment,
    };
    Ok(Json(comment).into_response())
}

#[tracing::instrument(skip(state, user), fields(user = user.id))]
pub(super) async fn delete_comment<S: PostService + CommentService>(
    State(state): State<AppState<S>>,
    user: AuthUser,
    Path((post_id, comment_id)): Path<(i32, i32)>,
) -> Result<StatusCode, AppError> {
    let comment = find_comment(&state.svc, post_id, comment_id).await?;
    ensure_author(&user, &comment, Action::Delete)?;

    state.svc.delete_comment(comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
