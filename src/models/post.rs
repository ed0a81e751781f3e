use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::helpers::double_option;

/// Body of `POST /posts/`. Any `author` key is ignored.
#[derive(Deserialize, Validate, Debug)]
pub struct CreatePost {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub text: String,
    #[serde(default)]
    pub group: Option<i32>,
}

/// Body of `PUT /posts/{id}/`. An absent `group` keeps the current one, `null` clears it.
#[derive(Deserialize, Validate, Debug)]
pub struct UpdatePost {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub text: String,
    #[serde(default, deserialize_with = "double_option")]
    pub group: Option<Option<i32>>,
}

/// Body of `PATCH /posts/{id}/`. `"group": null` detaches the post from its group.
#[derive(Deserialize, Validate, Debug, Default)]
pub struct PatchPost {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub group: Option<Option<i32>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPost<'a> {
    pub text: &'a str,
    pub author_id: i32,
    pub group_id: Option<i32>,
}

#[derive(AsChangeset, Debug, Default, Clone)]
#[diesel(table_name = crate::schema::posts)]
pub struct PostChanges {
    pub text: Option<String>,
    pub group_id: Option<Option<i32>>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.group_id.is_none()
    }
}

impl From<UpdatePost> for PostChanges {
    fn from(p: UpdatePost) -> Self {
        Self {
            text: Some(p.text),
            group_id: p.group,
        }
    }
}

impl From<PatchPost> for PostChanges {
    fn from(p: PatchPost) -> Self {
        Self {
            text: p.text,
            group_id: p.group,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostRow {
    pub id: i32,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: i32,
    pub group_id: Option<i32>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i32,
    pub text: String,
    pub author: String,
    #[serde(skip)]
    pub author_id: i32,
    pub group: Option<i32>,
    pub pub_date: DateTime<Utc>,
}

impl Post {
    pub fn from_row(row: PostRow, author: String) -> Self {
        Self {
            id: row.id,
            text: row.text,
            author,
            author_id: row.author_id,
            group: row.group_id,
            pub_date: row.pub_date,
        }
    }
}
