// SPDX-License-Identifier: MPL-2.0

use crate::model::{Comment, FollowRequest, FollowStatus, Like, Photo, User};
use rusqlite::Row;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use std::fmt;

/// The five entity tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Photos,
    Likes,
    Comments,
    FollowRequests,
}

impl Table {
    pub const fn name(self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Photos => "photos",
            Table::Likes => "likes",
            Table::Comments => "comments",
            Table::FollowRequests => "follow_requests",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A row type stored in one of the entity tables
pub trait Record: Sized {
    const TABLE: Table;
    /// Column list matching the field order read by `from_row`
    const COLUMNS: &'static str;

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    fn id(&self) -> i64;
}

impl Record for User {
    const TABLE: Table = Table::Users;
    const COLUMNS: &'static str =
        "id, username, private, comments_count, likes_count, created_at, updated_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            private: row.get(2)?,
            comments_count: row.get(3)?,
            likes_count: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Photo {
    const TABLE: Table = Table::Photos;
    const COLUMNS: &'static str = "id, owner_id, caption, image, created_at, updated_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Photo {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            caption: row.get(2)?,
            image: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Like {
    const TABLE: Table = Table::Likes;
    const COLUMNS: &'static str = "id, fan_id, photo_id, created_at, updated_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Like {
            id: row.get(0)?,
            fan_id: row.get(1)?,
            photo_id: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Comment {
    const TABLE: Table = Table::Comments;
    const COLUMNS: &'static str = "id, author_id, photo_id, body, created_at, updated_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Comment {
            id: row.get(0)?,
            author_id: row.get(1)?,
            photo_id: row.get(2)?,
            body: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for FollowRequest {
    const TABLE: Table = Table::FollowRequests;
    const COLUMNS: &'static str = "id, sender_id, recipient_id, status, created_at, updated_at";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(FollowRequest {
            id: row.get(0)?,
            sender_id: row.get(1)?,
            recipient_id: row.get(2)?,
            status: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    fn id(&self) -> i64 {
        self.id
    }
}

impl ToSql for FollowStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for FollowStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
