use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of comment create, `PUT` and `PATCH`. `author` and `post` keys are ignored.
#[derive(Deserialize, Validate, Debug)]
pub struct CreateComment {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub text: String,
}

#[derive(Deserialize, Validate, Debug, Default)]
pub struct PatchComment {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub text: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewComment<'a> {
    pub author_id: i32,
    pub post_id: i32,
    pub text: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    pub id: i32,
    pub author_id: i32,
    pub post_id: i32,
    pub text: String,
    pub created: DateTime<Utc>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: i32,
    pub author: String,
    #[serde(skip)]
    pub author_id: i32,
    pub post: i32,
    pub text: String,
    pub created: DateTime<Utc>,
}

impl Comment {
    pub fn from_row(row: CommentRow, author: String) -> Self {
        Self {
            id: row.id,
            author,
            author_id: row.author_id,
            post: row.post_id,
            text: row.text,
            created: row.created,
        }
    }
}
