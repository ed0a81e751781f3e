use axum::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::models::user::*;
use crate::schema;

use super::{DbServices, Result, Svc};

#[async_trait]
pub trait UserService: Svc {
    /// Fails with `StoreError::Conflict` when the username is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;
}

#[async_trait]
impl UserService for DbServices {
    async fn create_user(&self, name: &str, hash: &str) -> Result<User> {
        use schema::users::dsl::*;

        let mut conn = self.db.get().await?;

        let user = diesel::insert_into(users)
            .values(NewUser {
                username: name,
                password_hash: hash,
            })
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await?;

        Ok(user)
    }

    async fn find_user_by_username(&self, name: &str) -> Result<Option<User>> {
        use schema::users::dsl::*;

        let mut conn = self.db.get().await?;
        let user = users
            .filter(username.eq(name))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(user)
    }
}
