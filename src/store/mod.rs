// SPDX-License-Identifier: MPL-2.0

mod comments;
mod db;
mod follow_requests;
mod likes;
mod photos;
pub mod query;
mod records;
mod schema;
mod users;

pub use comments::CommentStore;
pub use db::Store;
pub use follow_requests::FollowRequestStore;
pub use likes::LikeStore;
pub use photos::PhotoStore;
pub use records::{Record, Table};
pub use users::UserStore;

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("not found")]
    NotFound,
    #[error("database path error: {0}")]
    Path(String),
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// A rejected write, naming the offending field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} {kind}")]
pub struct ValidationError {
    pub field: &'static str,
    pub kind: ValidationKind,
}

impl ValidationError {
    pub fn new(field: &'static str, kind: ValidationKind) -> Self {
        Self { field, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationKind {
    /// Required text was empty or whitespace
    Blank,
    /// Another row already holds this value
    Taken,
    /// The referenced row does not exist
    Missing,
    Invalid(String),
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationKind::Blank => f.write_str("can't be blank"),
            ValidationKind::Taken => f.write_str("has already been taken"),
            ValidationKind::Missing => f.write_str("must exist"),
            ValidationKind::Invalid(reason) => f.write_str(reason),
        }
    }
}

/// Map a single-row lookup miss to `NotFound`
pub(crate) fn not_found(e: rusqlite::Error) -> StoreError {
    match e {
        rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
        other => StoreError::Database(other),
    }
}

/// Map a UNIQUE constraint violation to a validation error on `field`
pub(crate) fn unique_violation(e: rusqlite::Error, field: &'static str) -> StoreError {
    if let rusqlite::Error::SqliteFailure(err, _) = &e
        && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    {
        return ValidationError::new(field, ValidationKind::Taken).into();
    }
    StoreError::Database(e)
}
