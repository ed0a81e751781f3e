use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::WithRejection;
use tracing::info;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::helpers::{OrNotFound, ValidJson};
use crate::models::post::{CreatePost, PatchPost, UpdatePost};
use crate::models::{PageParams, Paginated};
use crate::permissions::{ensure_author, Action};
use crate::services::{GroupService, PostService};

use super::{AppState, API_ROOT};

const MAX_PAGE_SIZE: i64 = 100;

/// A referenced group has to exist, reported against the `group` field.
async fn check_group<S: GroupService>(svc: &S, group_id: Option<i32>) -> Result<(), AppError> {
    let Some(group_id) = group_id else {
        return Ok(());
    };
    if svc.get_group(group_id).await?.is_none() {
        return Err(AppError::field(
            "group",
            format!("Invalid pk \"{group_id}\" - object does not exist."),
        ));
    }
    Ok(())
}

#[tracing::instrument(skip_all)]
pub(super) async fn list_posts<S: PostService>(
    State(state): State<AppState<S>>,
    WithRejection(Query(page), _): WithRejection<Query<PageParams>, AppError>,
) -> Result<Response, AppError> {
    match page.limit.filter(|l| *l > 0).map(|l| l.min(MAX_PAGE_SIZE)) {
        Some(limit) => {
            let offset = page.offset.unwrap_or(0).max(0);
            let count = state.svc.count_posts().await?;
            let results = state.svc.list_posts(offset, Some(limit)).await?;
            let path = format!("{API_ROOT}/posts/");
            Ok(Json(Paginated::new(&path, count, limit, offset, results)).into_response())
        }
        None => Ok(Json(state.svc.list_posts(0, None).await?).into_response()),
    }
}

#[tracing::instrument(skip(state))]
pub(super) async fn retrieve_post<S: PostService>(
    State(state): State<AppState<S>>,
    Path(post_id): Path<i32>,
) -> Result<Response, AppError> {
    let post = state.svc.get_post(post_id).await?.or_not_found()?;
    Ok(Json(post).into_response())
}

#[tracing::instrument(skip(state, user, body), fields(user = user.id))]
pub(super) async fn create_post<S: PostService + GroupService>(
    State(state): State<AppState<S>>,
    user: AuthUser,
    ValidJson(body): ValidJson<CreatePost>,
) -> Result<Response, AppError> {
    check_group(&state.svc, body.group).await?;

    let post = state.svc.create_post(user.id, &body.text, body.group).await?;
    info!(post = post.id, author = %user.username, "post created");
    Ok((StatusCode::CREATED, Json(post)).into_response())
}

#[tracing::instrument(skip(state, user, body), fields(user = user.id))]
pub(super) async fn update_post<S: PostService + GroupService>(
    State(state): State<AppState<S>>,
    user: AuthUser,
    Path(post_id): Path<i32>,
    ValidJson(body): ValidJson<UpdatePost>,
) -> Result<Response, AppError> {
    let post = state.svc.get_post(post_id).await?.or_not_found()?;
    ensure_author(&user, &post, Action::Change)?;
    check_group(&state.svc, body.group.flatten()).await?;

    let post = state.svc.update_post(post_id, body.into()).await?;
    Ok(Json(post).into_response())
}

#[tracing::instrument(skip(state, user, body), fields(user = user.id))]
pub(super) async fn partial_update_post<S: PostService + GroupService>(
    State(state): State<AppState<S>>,
    user: AuthUser,
    Path(post_id): Path<i32>,
    ValidJson(body): ValidJson<PatchPost>,
) -> Result<Response, AppError> {
    let post = state.svc.get_post(post_id).await?.or_not_found()?;
    ensure_author(&user, &post, Action::Change)?;
    check_group(&state.svc, body.group.flatten()).await?;

    let post = state.svc.update_post(post_id, body.into()).await?;
    Ok(Json(post).into_response())
}

#[tracing::instrument(skip(state, user), fields(user = user.id))]
pub(super) async fn delete_post<S: PostService>(
    State(state): State<AppState<S>>,
    user: AuthUser,
    Path(post_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let post = state.svc.get_post(post_id).await?.or_not_found()?;
    ensure_author(&user, &post, Action::Delete)?;

    state.svc.delete_post(post_id).await?;
    info!("post and its comments deleted");
    Ok(StatusCode::NO_CONTENT)
}
