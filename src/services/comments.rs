use axum::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::models::comment::*;
use crate::schema::{comments, users};

use super::{DbServices, Result, StoreError, Svc};

#[async_trait]
pub trait CommentService: Svc {
    /// Comments of one post in id order. Does not check that the post exists.
    async fn list_comments(&self, post_id: i32) -> Result<Vec<Comment>>;
    /// `None` when the comment is missing or belongs to another post.
    async fn get_comment(&self, post_id: i32, comment_id: i32) -> Result<Option<Comment>>;
    /// Fails with `StoreError::NotFound` when the post does not exist.
    async fn create_comment(&self, author_id: i32, post_id: i32, text: &str) -> Result<Comment>;
    async fn update_comment(&self, comment_id: i32, text: &str) -> Result<Comment>;
    async fn delete_comment(&self, comment_id: i32) -> Result<()>;
}

#[async_trait]
impl CommentService for DbServices {
    async fn list_comments(&self, post_id: i32) -> Result<Vec<Comment>> {
        let mut conn = self.db.get().await?;
        let rows: Vec<(CommentRow, String)> = comments::table
            .inner_join(users::table)
            .filter(comments::post_id.eq(post_id))
            .order(comments::id.asc())
            .select((CommentRow::as_select(), users::username))
            .load(&mut conn)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(row, author)| Comment::from_row(row, author))
            .collect())
    }

    async fn get_comment(&self, post_id: i32, comment_id: i32) -> Result<Option<Comment>> {
        let mut conn = self.db.get().await?;
        let row = comments::table
            .inner_join(users::table)
            .filter(comments::id.eq(comment_id))
            .filter(comments::post_id.eq(post_id))
            .select((CommentRow::as_select(), users::username))
            .first::<(CommentRow, String)>(&mut conn)
            .await
            .optional()?;
        Ok(row.map(|(row, author)| Comment::from_row(row, author)))
    }

    async fn create_comment(&self, author_id: i32, post_id: i32, text: &str) -> Result<Comment> {
        let mut conn = self.db.get().await?;

        let row = diesel::insert_into(comments::table)
            .values(NewComment {
                author_id,
                post_id,
                text,
            })
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await?;
        let author = Self::author_name(&mut conn, author_id).await?;

        Ok(Comment::from_row(row, author))
    }

    async fn update_comment(&self, comment_id: i32, text: &str) -> Result<Comment> {
        let mut conn = self.db.get().await?;

        let row = diesel::update(comments::table.find(comment_id))
            .set(comments::text.eq(text))
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await?;
        let author = Self::author_name(&mut conn, row.author_id).await?;

        Ok(Comment::from_row(row, author))
    }

    async fn delete_comment(&self, comment_id: i32) -> Result<()> {
        let mut conn = self.db.get().await?;
        let deleted = diesel::delete(comments::table.find(comment_id))
            .execute(&mut conn)
            .await?;
        if deleted == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
