pub mod comments;
pub mod groups;
#[cfg(test)]
pub mod memory;
pub mod migrations;
pub mod posts;
pub mod users;

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::pooled_connection::deadpool::{self, PoolError};
use diesel_async::{AsyncPgConnection, RunQueryDsl};

pub use comments::CommentService;
pub use groups::GroupService;
pub use posts::PostService;
pub use users::UserService;

pub type Pool = deadpool::Pool<AsyncPgConnection>;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Marker for a service handle that can live in router state.
pub trait Svc: Clone + Send + Sync + 'static {}

/// Everything the HTTP layer needs from a backend.
pub trait BlogServices: PostService + CommentService + GroupService + UserService {}

impl<T> BlogServices for T where T: PostService + CommentService + GroupService + UserService {}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound,
            // the referenced row went away between lookup and insert
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                Self::NotFound
            }
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::Conflict(info.message().to_owned())
            }
            other => Self::Internal(other.into()),
        }
    }
}

impl From<PoolError> for StoreError {
    fn from(err: PoolError) -> Self {
        Self::Internal(err.into())
    }
}

/// Postgres-backed services sharing one connection pool.
#[derive(Clone)]
pub struct DbServices {
    db: Pool,
}

impl Svc for DbServices {}

impl DbServices {
    pub fn new(db: Pool) -> Self {
        Self { db }
    }

    async fn author_name(conn: &mut AsyncPgConnection, author_id: i32) -> Result<String> {
        use crate::schema::users;

        let name = users::table
            .find(author_id)
            .select(users::username)
            .first(conn)
            .await?;
        Ok(name)
    }
}


#[cfg(test)]
mod tests {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    use super::StoreError;

    fn db_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(message.to_owned()))
    }

    #[test]
    fn missing_row_maps_to_not_found() {
        assert!(matches!(
            StoreError::from(DieselError::NotFound),
            StoreError::NotFound
        ));
    }

    #[test]
    fn dangling_reference_maps_to_not_found() {
        let err = db_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "insert or update on table \"comments\" violates foreign key constraint",
        );
        assert!(matches!(StoreError::from(err), StoreError::NotFound));
    }

    #[test]
    fn duplicate_key_maps_to_conflict_with_message() {
        let err = db_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"users_username_key\"",
        );
        match StoreError::from(err) {
            StoreError::Conflict(msg) => assert!(msg.contains("users_username_key")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn other_failures_are_internal() {
        assert!(matches!(
            StoreError::from(DieselError::RollbackTransaction),
            StoreError::Internal(_)
        ));
        assert!(matches!(
            StoreError::from(db_error(DatabaseErrorKind::SerializationFailure, "retry")),
            StoreError::Internal(_)
        ));
    }
}
