pub mod jwt;
pub mod password;

use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::RequestPartsExt;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use tracing::debug;

use crate::error::AppError;
use jwt::JwtKeys;

/// The requester, authenticated by a `Bearer` access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    Arc<JwtKeys>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                AppError::Unauthorized("Authentication credentials were not provided.")
            })?;

        let keys = Arc::<JwtKeys>::from_ref(state);
        let claims = keys.verify(bearer.token()).map_err(|e| {
            debug!(%e, "rejected bearer token");
            AppError::Unauthorized("Given token not valid for any token type")
        })?;

        Ok(Self {
            id: claims.user_id,
            username: claims.username,
        })
    }
}
