use axum::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::models::group::Group;
use crate::schema;

use super::{DbServices, Result, Svc};

#[async_trait]
pub trait GroupService: Svc {
    async fn list_groups(&self) -> Result<Vec<Group>>;
    async fn get_group(&self, group_id: i32) -> Result<Option<Group>>;
}

#[async_trait]
impl GroupService for DbServices {
    async fn list_groups(&self) -> Result<Vec<Group>> {
        use schema::groups::dsl::*;

        let mut conn = self.db.get().await?;
        let gs = groups
            .order(id.asc())
            .select(Group::as_select())
            .load(&mut conn)
            .await?;
        Ok(gs)
    }

    async fn get_group(&self, group_id: i32) -> Result<Option<Group>> {
        use schema::groups::dsl::*;

        let mut conn = self.db.get().await?;
        let g = groups
            .find(group_id)
            .select(Group::as_select())
            .first(&mut conn)
            .await
            .optional()?;
        Ok(g)
    }
}
