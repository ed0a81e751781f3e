use axum::extract::{Path, State};
use axum::Json;

use crate::error::AppError;
use crate::helpers::OrNotFound;
use crate::models::group::Group;
use crate::services::GroupService;

use super::AppState;

pub(super) async fn list_groups<S: GroupService>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Group>>, AppError> {
    Ok(Json(state.svc.list_groups().await?))
}

pub(super) async fn retrieve_group<S: GroupService>(
    State(state): State<AppState<S>>,
    Path(group_id): Path<i32>,
) -> Result<Json<Group>, AppError> {
    let group = state.svc.get_group(group_id).await?.or_not_found()?;
    Ok(Json(group))
}
