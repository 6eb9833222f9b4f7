// SPDX-License-Identifier: MPL-2.0

use crate::model::{FollowRequest, FollowRequestId, FollowStatus, UserId};
use crate::store::query;
use crate::store::{Store, StoreError, Table, ValidationError, ValidationKind};
use rusqlite::params;

/// Write and lookup operations for follow requests
pub struct FollowRequestStore<'a> {
    db: &'a Store,
}

impl<'a> FollowRequestStore<'a> {
    pub fn new(db: &'a Store) -> Self {
        Self { db }
    }

    /// Send a follow request from `sender_id` to `recipient_id`
    pub fn create(
        &self,
        sender_id: UserId,
        recipient_id: UserId,
        status: FollowStatus,
    ) -> Result<FollowRequest, StoreError> {
        if sender_id == recipient_id {
            return Err(ValidationError::new(
                "recipient",
                ValidationKind::Invalid("can't be the sender".to_string()),
            )
            .into());
        }

        let conn = self.db.conn();

        if !query::exists(&conn, Table::Users, sender_id)? {
            return Err(ValidationError::new("sender", ValidationKind::Missing).into());
        }
        if !query::exists(&conn, Table::Users, recipient_id)? {
            return Err(ValidationError::new("recipient", ValidationKind::Missing).into());
        }

        conn.execute(
            r#"
            INSERT INTO follow_requests (sender_id, recipient_id, status, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
            params![sender_id, recipient_id, status, Store::now()],
        )?;

        let id = conn.last_insert_rowid();
        tracing::info!(id, sender_id, recipient_id, %status, "created follow request");

        query::get(&conn, id)
    }

    pub fn set_status(
        &self,
        id: FollowRequestId,
        status: FollowStatus,
    ) -> Result<FollowRequest, StoreError> {
        let conn = self.db.conn();

        let changed = conn.execute(
            "UPDATE follow_requests SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status, Store::now(), id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound);
        }

        tracing::info!(id, %status, "updated follow request");
        query::get(&conn, id)
    }

    pub fn accept(&self, id: FollowRequestId) -> Result<FollowRequest, StoreError> {
        self.set_status(id, FollowStatus::Accepted)
    }

    pub fn reject(&self, id: FollowRequestId) -> Result<FollowRequest, StoreError> {
        self.set_status(id, FollowStatus::Rejected)
    }

    pub fn get(&self, id: FollowRequestId) -> Result<FollowRequest, StoreError> {
        query::get(&self.db.conn(), id)
    }
}
