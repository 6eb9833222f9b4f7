// SPDX-License-Identifier: MPL-2.0

use crate::model::{Like, LikeId, PhotoId, UserId};
use crate::store::query;
use crate::store::{Store, StoreError, Table, ValidationError, ValidationKind, unique_violation};
use rusqlite::params;

/// Write and lookup operations for likes
pub struct LikeStore<'a> {
    db: &'a Store,
}

impl<'a> LikeStore<'a> {
    pub fn new(db: &'a Store) -> Self {
        Self { db }
    }

    /// Record `fan_id` liking `photo_id` and bump the fan's `likes_count`.
    /// A second like of the same photo by the same fan fails on the
    /// `UNIQUE(fan_id, photo_id)` constraint.
    pub fn create(&self, fan_id: UserId, photo_id: PhotoId) -> Result<Like, StoreError> {
        let mut conn = self.db.conn();
        let tx = conn.transaction()?;

        if !query::exists(&tx, Table::Users, fan_id)? {
            return Err(ValidationError::new("fan", ValidationKind::Missing).into());
        }
        if !query::exists(&tx, Table::Photos, photo_id)? {
            return Err(ValidationError::new("photo", ValidationKind::Missing).into());
        }

        let now = Store::now();
        tx.execute(
            r#"
            INSERT INTO likes (fan_id, photo_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            "#,
            params![fan_id, photo_id, now],
        )
        .map_err(|e| unique_violation(e, "photo_id"))
        .inspect_err(|e| tracing::warn!(fan_id, photo_id, "rejected like: {}", e))?;
        let id = tx.last_insert_rowid();

        tx.execute(
            "UPDATE users SET likes_count = likes_count + 1, updated_at = ?1 WHERE id = ?2",
            params![now, fan_id],
        )?;

        let like = query::get(&tx, id)?;
        tx.commit()?;

        tracing::info!(id, fan_id, photo_id, "created like");
        Ok(like)
    }

    /// Remove a like and decrement the fan's `likes_count`
    pub fn delete(&self, id: LikeId) -> Result<Like, StoreError> {
        let mut conn = self.db.conn();
        let tx = conn.transaction()?;

        let like: Like = query::get(&tx, id)?;
        tx.execute("DELETE FROM likes WHERE id = ?", [id])?;
        tx.execute(
            "UPDATE users SET likes_count = MAX(likes_count - 1, 0), updated_at = ?1 WHERE id = ?2",
            params![Store::now(), like.fan_id],
        )?;

        tx.commit()?;

        tracing::info!(id, fan_id = like.fan_id, "deleted like");
        Ok(like)
    }

    pub fn get(&self, id: LikeId) -> Result<Like, StoreError> {
        query::get(&self.db.conn(), id)
    }

    /// The like joining `fan_id` and `photo_id`, if any
    pub fn find(&self, fan_id: UserId, photo_id: PhotoId) -> Result<Option<Like>, StoreError> {
        let rows: Vec<Like> = query::find_by_equality(
            &self.db.conn(),
            &[("fan_id", &fan_id), ("photo_id", &photo_id)],
        )?;
        Ok(rows.into_iter().next())
    }
}
