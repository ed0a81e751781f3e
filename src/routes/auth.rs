use anyhow::Context;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::debug;

use crate::auth::password::verify_password;
use crate::error::AppError;
use crate::helpers::ValidJson;
use crate::models::user::Credentials;
use crate::services::UserService;

use super::AppState;

const BAD_CREDENTIALS: &str = "No active account found with the given credentials";

#[derive(Serialize)]
pub(super) struct AccessToken {
    access: String,
}

#[tracing::instrument(skip_all, fields(username = %creds.username))]
pub(super) async fn create_token<S: UserService>(
    State(state): State<AppState<S>>,
    ValidJson(creds): ValidJson<Credentials>,
) -> Result<Json<AccessToken>, AppError> {
    let Some(user) = state.svc.find_user_by_username(&creds.username).await? else {
        debug!("unknown username");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS));
    };

    let password = creds.password;
    let hash = user.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .context("password verification task panicked")??;
    if !valid {
        debug!("wrong password");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS));
    }

    let access = state.jwt.issue(user.id, &user.username)?;
    Ok(Json(AccessToken { access }))
}
