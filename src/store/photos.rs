// SPDX-License-Identifier: MPL-2.0

use crate::model::{Photo, PhotoId, UserId};
use crate::store::query;
use crate::store::{Store, StoreError, Table, ValidationError, ValidationKind};
use rusqlite::params;

/// Write and lookup operations for photos
pub struct PhotoStore<'a> {
    db: &'a Store,
}

impl<'a> PhotoStore<'a> {
    pub fn new(db: &'a Store) -> Self {
        Self { db }
    }

    /// Store a photo owned by `owner_id`
    pub fn create(
        &self,
        owner_id: UserId,
        caption: Option<&str>,
        image: &str,
    ) -> Result<Photo, StoreError> {
        let conn = self.db.conn();

        if !query::exists(&conn, Table::Users, owner_id)? {
            return Err(ValidationError::new("owner", ValidationKind::Missing).into());
        }
        if image.trim().is_empty() {
            return Err(ValidationError::new("image", ValidationKind::Blank).into());
        }

        conn.execute(
            r#"
            INSERT INTO photos (owner_id, caption, image, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
            params![owner_id, caption, image.trim(), Store::now()],
        )?;

        let id = conn.last_insert_rowid();
        tracing::info!(id, owner_id, "created photo");

        query::get(&conn, id)
    }

    pub fn get(&self, id: PhotoId) -> Result<Photo, StoreError> {
        query::get(&self.db.conn(), id)
    }

    pub fn list(&self) -> Result<Vec<Photo>, StoreError> {
        query::find_by_equality(&self.db.conn(), &[])
    }
}
