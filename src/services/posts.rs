use axum::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::models::post::*;
use crate::schema::{comments, posts, users};

use super::{DbServices, Result, StoreError, Svc};

#[async_trait]
pub trait PostService: Svc {
    async fn count_posts(&self) -> Result<i64>;
    /// Posts in id order. `limit: None` returns everything after `offset`.
    async fn list_posts(&self, offset: i64, limit: Option<i64>) -> Result<Vec<Post>>;
    async fn get_post(&self, post_id: i32) -> Result<Option<Post>>;
    async fn create_post(&self, author_id: i32, text: &str, group_id: Option<i32>) -> Result<Post>;
    async fn update_post(&self, post_id: i32, changes: PostChanges) -> Result<Post>;
    /// Deletes the post together with all of its comments.
    async fn delete_post(&self, post_id: i32) -> Result<()>;
}

#[async_trait]
impl PostService for DbServices {
    async fn count_posts(&self) -> Result<i64> {
        let mut conn = self.db.get().await?;
        let n = posts::table.count().get_result(&mut conn).await?;
        Ok(n)
    }

    async fn list_posts(&self, offset: i64, limit: Option<i64>) -> Result<Vec<Post>> {
        let mut conn = self.db.get().await?;

        let mut query = posts::table
            .inner_join(users::table)
            .select((PostRow::as_select(), users::username))
            .order(posts::id.asc())
            .offset(offset)
            .into_boxed();
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let rows: Vec<(PostRow, String)> = query.load(&mut conn).await?;
        Ok(rows
            .into_iter()
            .map(|(row, author)| Post::from_row(row, author))
            .collect())
    }

    async fn get_post(&self, post_id: i32) -> Result<Option<Post>> {
        let mut conn = self.db.get().await?;
        let row = posts::table
            .inner_join(users::table)
            .filter(posts::id.eq(post_id))
            .select((PostRow::as_select(), users::username))
            .first::<(PostRow, String)>(&mut conn)
            .await
            .optional()?;
        Ok(row.map(|(row, author)| Post::from_row(row, author)))
    }

    async fn create_post(&self, author_id: i32, text: &str, group_id: Option<i32>) -> Result<Post> {
        let mut conn = self.db.get().await?;

        let row = diesel::insert_into(posts::table)
            .values(NewPost {
                text,
                author_id,
                group_id,
            })
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await?;
        let author = Self::author_name(&mut conn, author_id).await?;

        Ok(Post::from_row(row, author))
    }

    async fn update_post(&self, post_id: i32, changes: PostChanges) -> Result<Post> {
        if changes.is_empty() {
            return self.get_post(post_id).await?.ok_or(StoreError::NotFound);
        }

        let mut conn = self.db.get().await?;
        let row = diesel::update(posts::table.find(post_id))
            .set(&changes)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await?;
        let author = Self::author_name(&mut conn, row.author_id).await?;

        Ok(Post::from_row(row, author))
    }

    async fn delete_post(&self, post_id: i32) -> Result<()> {
        let mut conn = self.db.get().await?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::delete(comments::table.filter(comments::post_id.eq(post_id)))
                    .execute(conn)
                    .await?;
                let deleted = diesel::delete(posts::table.find(post_id))
                    .execute(conn)
                    .await?;
                if deleted == 0 {
                    return Err(diesel::result::Error::NotFound);
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await?;

        Ok(())
    }
}
