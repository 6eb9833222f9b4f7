// SPDX-License-Identifier: MPL-2.0

use crate::model::{Comment, CommentId, PhotoId, UserId};
use crate::store::query;
use crate::store::{Store, StoreError, Table, ValidationError, ValidationKind};
use rusqlite::params;

/// Write and lookup operations for comments
pub struct CommentStore<'a> {
    db: &'a Store,
}

impl<'a> CommentStore<'a> {
    pub fn new(db: &'a Store) -> Self {
        Self { db }
    }

    /// Add a comment and bump the author's `comments_count`
    pub fn create(
        &self,
        author_id: UserId,
        photo_id: PhotoId,
        body: &str,
    ) -> Result<Comment, StoreError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(ValidationError::new("body", ValidationKind::Blank).into());
        }

        let mut conn = self.db.conn();
        let tx = conn.transaction()?;

        if !query::exists(&tx, Table::Users, author_id)? {
            return Err(ValidationError::new("author", ValidationKind::Missing).into());
        }
        if !query::exists(&tx, Table::Photos, photo_id)? {
            return Err(ValidationError::new("photo", ValidationKind::Missing).into());
        }

        let now = Store::now();
        tx.execute(
            r#"
            INSERT INTO comments (author_id, photo_id, body, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
            params![author_id, photo_id, body, now],
        )?;
        let id = tx.last_insert_rowid();

        tx.execute(
            "UPDATE users SET comments_count = comments_count + 1, updated_at = ?1 WHERE id = ?2",
            params![now, author_id],
        )?;

        let comment = query::get(&tx, id)?;
        tx.commit()?;

        tracing::info!(id, author_id, photo_id, "created comment");
        Ok(comment)
    }

    /// Remove a comment and decrement the author's `comments_count`
    pub fn delete(&self, id: CommentId) -> Result<Comment, StoreError> {
        let mut conn = self.db.conn();
        let tx = conn.transaction()?;

        let comment: Comment = query::get(&tx, id)?;
        tx.execute("DELETE FROM comments WHERE id = ?", [id])?;
        tx.execute(
            "UPDATE users SET comments_count = MAX(comments_count - 1, 0), updated_at = ?1 WHERE id = ?2",
            params![Store::now(), comment.author_id],
        )?;

        tx.commit()?;

        tracing::info!(id, author_id = comment.author_id, "deleted comment");
        Ok(comment)
    }

    pub fn get(&self, id: CommentId) -> Result<Comment, StoreError> {
        query::get(&self.db.conn(), id)
    }
}
