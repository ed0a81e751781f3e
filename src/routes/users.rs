use anyhow::Context;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::auth::password::hash_password;
use crate::error::AppError;
use crate::helpers::ValidJson;
use crate::models::user::{CreateUser, User};
use crate::services::{StoreError, UserService};

use super::AppState;

#[tracing::instrument(skip_all, fields(username = %payload.username))]
pub(super) async fn create_user<S: UserService>(
    State(state): State<AppState<S>>,
    ValidJson(payload): ValidJson<CreateUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let password = payload.password;
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("password hashing task panicked")??;

    let user = match state.svc.create_user(&payload.username, &hash).await {
        Ok(user) => user,
        Err(StoreError::Conflict(_)) => {
            return Err(AppError::field(
                "username",
                "A user with that username already exists.",
            ))
        }
        Err(e) => return Err(e.into()),
    };

    info!(user = user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}
