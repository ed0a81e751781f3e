//! In-process backend used by the router tests.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use anyhow::anyhow;
use axum::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::models::comment::{Comment, CommentRow};
use crate::models::group::Group;
use crate::models::post::{Post, PostChanges, PostRow};
use crate::models::user::User;

use super::{
    CommentService, GroupService, PostService, Result, StoreError, Svc, UserService,
};

#[derive(Default)]
struct Tables {
    users: DashMap<i32, User>,
    usernames: DashMap<String, i32>,
    groups: DashMap<i32, Group>,
    posts: DashMap<i32, PostRow>,
    comments: DashMap<i32, CommentRow>,
    user_seq: AtomicI32,
    group_seq: AtomicI32,
    post_seq: AtomicI32,
    comment_seq: AtomicI32,
}

#[derive(Clone, Default)]
pub struct MemoryServices {
    inner: Arc<Tables>,
}

impl Svc for MemoryServices {}

fn next_id(seq: &AtomicI32) -> i32 {
    seq.fetch_add(1, Ordering::Relaxed) + 1
}

impl MemoryServices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups are not writable through the API, so tests seed them here.
    pub fn insert_group(&self, title: &str, slug: &str, description: &str) -> Group {
        let group = Group {
            id: next_id(&self.inner.group_seq),
            title: title.to_owned(),
            slug: slug.to_owned(),
            description: description.to_owned(),
        };
        self.inner.groups.insert(group.id, group.clone());
        group
    }

    fn username(&self, user_id: i32) -> Result<String> {
        self.inner
            .users
            .get(&user_id)
            .map(|u| u.username.clone())
            .ok_or_else(|| StoreError::Internal(anyhow!("no user with id {user_id}")))
    }

    fn post(&self, row: PostRow) -> Result<Post> {
        let author = self.username(row.author_id)?;
        Ok(Post::from_row(row, author))
    }

    fn comment(&self, row: CommentRow) -> Result<Comment> {
        let author = self.username(row.author_id)?;
        Ok(Comment::from_row(row, author))
    }
}

#[async_trait]
impl UserService for MemoryServices {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        match self.inner.usernames.entry(username.to_owned()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(format!(
                "username {username:?} is taken"
            ))),
            Entry::Vacant(slot) => {
                let user = User {
                    id: next_id(&self.inner.user_seq),
                    username: username.to_owned(),
                    password_hash: password_hash.to_owned(),
                };
                slot.insert(user.id);
                self.inner.users.insert(user.id, user.clone());
                Ok(user)
            }
        }
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let id = self.inner.usernames.get(username).map(|id| *id);
        Ok(id.and_then(|id| self.inner.users.get(&id).map(|u| u.clone())))
    }
}

#[async_trait]
impl GroupService for MemoryServices {
    async fn list_groups(&self) -> Result<Vec<Group>> {
        let mut groups: Vec<Group> = self.inner.groups.iter().map(|g| g.clone()).collect();
        groups.sort_by_key(|g| g.id);
        Ok(groups)
    }

    async fn get_group(&self, group_id: i32) -> Result<Option<Group>> {
        Ok(self.inner.groups.get(&group_id).map(|g| g.clone()))
    }
}

#[async_trait]
impl PostService for MemoryServices {
    async fn count_posts(&self) -> Result<i64> {
        Ok(self.inner.posts.len() as i64)
    }

    async fn list_posts(&self, offset: i64, limit: Option<i64>) -> Result<Vec<Post>> {
        let mut rows: Vec<PostRow> = self.inner.posts.iter().map(|p| p.clone()).collect();
        rows.sort_by_key(|p| p.id);

        let take = limit.map_or(usize::MAX, |l| l.max(0) as usize);
        rows.into_iter()
            .skip(offset.max(0) as usize)
            .take(take)
            .map(|row| self.post(row))
            .collect()
    }

    async fn get_post(&self, post_id: i32) -> Result<Option<Post>> {
        let row = self.inner.posts.get(&post_id).map(|p| p.clone());
        row.map(|row| self.post(row)).transpose()
    }

    async fn create_post(&self, author_id: i32, text: &str, group_id: Option<i32>) -> Result<Post> {
        let row = PostRow {
            id: next_id(&self.inner.post_seq),
            text: text.to_owned(),
            pub_date: Utc::now(),
            author_id,
            group_id,
        };
        self.inner.posts.insert(row.id, row.clone());
        self.post(row)
    }

    async fn update_post(&self, post_id: i32, changes: PostChanges) -> Result<Post> {
        let row = {
            let mut row = self
                .inner
                .posts
                .get_mut(&post_id)
                .ok_or(StoreError::NotFound)?;
            if let Some(text) = changes.text {
                row.text = text;
            }
            if let Some(group_id) = changes.group_id {
                row.group_id = group_id;
            }
            row.clone()
        };
        self.post(row)
    }

    async fn delete_post(&self, post_id: i32) -> Result<()> {
        self.inner.comments.retain(|_, c| c.post_id != post_id);
        self.inner
            .posts
            .remove(&post_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl CommentService for MemoryServices {
    async fn list_comments(&self, post_id: i32) -> Result<Vec<Comment>> {
        let mut rows: Vec<CommentRow> = self
            .inner
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .map(|c| c.clone())
            .collect();
        rows.sort_by_key(|c| c.id);
        rows.into_iter().map(|row| self.comment(row)).collect()
    }

    async fn get_comment(&self, post_id: i32, comment_id: i32) -> Result<Option<Comment>> {
        let row = self
            .inner
            .comments
            .get(&comment_id)
            .filter(|c| c.post_id == post_id)
            .map(|c| c.clone());
        row.map(|row| self.comment(row)).transpose()
    }

    async fn create_comment(&self, author_id: i32, post_id: i32, text: &str) -> Result<Comment> {
        if !self.inner.posts.contains_key(&post_id) {
            return Err(StoreError::NotFound);
        }
        let row = CommentRow {
            id: next_id(&self.inner.comment_seq),
            author_id,
            post_id,
            text: text.to_owned(),
            created: Utc::now(),
        };
        self.inner.comments.insert(row.id, row.clone());
        self.comment(row)
    }

    async fn update_comment(&self, comment_id: i32, text: &str) -> Result<Comment> {
        let row = {
            let mut row = self
                .inner
                .comments
                .get_mut(&comment_id)
                .ok_or(StoreError::NotFound)?;
            row.text = text.to_owned();
            row.clone()
        };
        self.comment(row)
    }

    async fn delete_comment(&self, comment_id: i32) -> Result<()> {
        self.inner
            .comments
            .remove(&comment_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
