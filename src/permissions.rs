use tracing::warn;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::comment::Comment;
use crate::models::post::Post;

/// Content owned by the user who created it.
pub trait Authored {
    const KIND: &'static str;

    fn author_id(&self) -> i32;
}

impl Authored for Post {
    const KIND: &'static str = "post";

    fn author_id(&self) -> i32 {
        self.author_id
    }
}

impl Authored for Comment {
    const KIND: &'static str = "comment";

    fn author_id(&self) -> i32 {
        self.author_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Change,
    Delete,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Action::Change => "Changing",
            Action::Delete => "Deleting",
        }
    }
}

/// Only the author may change or delete an entity. Call before mutating.
pub fn ensure_author<T: Authored>(
    requester: &AuthUser,
    entity: &T,
    action: Action,
) -> Result<(), AppError> {
    if requester.id == entity.author_id() {
        return Ok(());
    }

    warn!(
        requester = requester.id,
        author = entity.author_id(),
        kind = T::KIND,
        ?action,
        "ownership check failed"
    );
    Err(AppError::Forbidden(format!(
        "{} another user's {} is forbidden!",
        action.verb(),
        T::KIND
    )))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn post_by(author_id: i32) -> Post {
        Post {
            id: 1,
            text: "hello".into(),
            author: "author".into(),
            author_id,
            group: None,
            pub_date: Utc::now(),
        }
    }

    fn requester(id: i32) -> AuthUser {
        AuthUser {
            id,
            username: format!("user{id}"),
        }
    }

    #[test]
    fn author_passes() {
        assert!(ensure_author(&requester(3), &post_by(3), Action::Change).is_ok());
        assert!(ensure_author(&requester(3), &post_by(3), Action::Delete).is_ok());
    }

    #[test]
    fn stranger_is_forbidden_with_kind_and_action() {
        let err = ensure_author(&requester(4), &post_by(3), Action::Delete).unwrap_err();
        match err {
            AppError::Forbidden(msg) => assert_eq!(msg, "Deleting another user's post is forbidden!"),
            other => panic!("unexpected error: {other:?}"),
        }

        let comment = Comment {
            id: 1,
            author: "author".into(),
            author_id: 3,
            post: 1,
            text: "hi".into(),
            created: Utc::now(),
        };
        let err = ensure_author(&requester(4), &comment, Action::Change).unwrap_err();
        assert_eq!(err.to_string(), "Changing another user's comment is forbidden!");
    }
}
