// SPDX-License-Identifier: MPL-2.0

use crate::model::{User, UserId};
use crate::store::query;
use crate::store::{Store, StoreError, ValidationError, ValidationKind, unique_violation};
use rusqlite::params;

/// Write and lookup operations for users
pub struct UserStore<'a> {
    db: &'a Store,
}

impl<'a> UserStore<'a> {
    pub fn new(db: &'a Store) -> Self {
        Self { db }
    }

    /// Register a user. Usernames are required and unique ignoring ASCII case.
    pub fn create(&self, username: &str, private: bool) -> Result<User, StoreError> {
        let username = username.trim();
        if username.is_empty() {
            tracing::warn!("rejected user with blank username");
            return Err(ValidationError::new("username", ValidationKind::Blank).into());
        }

        let conn = self.db.conn();
        let now = Store::now();

        conn.execute(
            r#"
            INSERT INTO users (username, private, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            "#,
            params![username, private, now],
        )
        .map_err(|e| unique_violation(e, "username"))
        .inspect_err(|e| tracing::warn!(username, "rejected user: {}", e))?;

        let id = conn.last_insert_rowid();
        tracing::info!(id, username, "created user");

        query::get(&conn, id)
    }

    pub fn get(&self, id: UserId) -> Result<User, StoreError> {
        query::get(&self.db.conn(), id)
    }

    /// Case-insensitive lookup
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let conn = self.db.conn();
        let rows: Vec<User> = query::find_by_equality(&conn, &[("username", &username.trim())])?;
        Ok(rows.into_iter().next())
    }

    /// Like `find_by_username` but reports a miss as `NotFound`
    pub fn get_by_username(&self, username: &str) -> Result<User, StoreError> {
        self.find_by_username(username)?.ok_or(StoreError::NotFound)
    }

    pub fn list(&self) -> Result<Vec<User>, StoreError> {
        query::find_by_equality(&self.db.conn(), &[])
    }

    pub fn set_private(&self, id: UserId, private: bool) -> Result<User, StoreError> {
        let conn = self.db.conn();

        let changed = conn.execute(
            "UPDATE users SET private = ?1, updated_at = ?2 WHERE id = ?3",
            params![private, Store::now(), id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound);
        }

        query::get(&conn, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_trims_and_defaults_counters() {
        let store = Store::open_in_memory().unwrap();
        let user = UserStore::new(&store).create("  alice ", true).unwrap();

        assert_eq!(user.username, "alice");
        assert!(user.private);
        assert_eq!(user.likes_count, 0);
        assert_eq!(user.comments_count, 0);
    }

    #[test]
    fn test_blank_username_is_rejected() {
        let store = Store::open_in_memory().unwrap();
        let err = UserStore::new(&store).create("   ", false).unwrap_err();

        match err {
            StoreError::Validation(v) => {
                assert_eq!(v, ValidationError::new("username", ValidationKind::Blank));
                assert_eq!(v.to_string(), "username can't be blank");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_username_uniqueness_ignores_case() {
        let store = Store::open_in_memory().unwrap();
        let users = UserStore::new(&store);
        users.create("Alice", false).unwrap();

        let err = users.create("aLICE", false).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError {
                field: "username",
                kind: ValidationKind::Taken
            })
        ));
        assert_eq!(users.list().unwrap().len(), 1);
    }

    #[test]
    fn test_find_by_username_is_case_insensitive() {
        let store = Store::open_in_memory().unwrap();
        let users = UserStore::new(&store);
        let created = users.create("Alice", false).unwrap();

        assert_eq!(users.find_by_username("ALICE").unwrap(), Some(created.clone()));
        assert_eq!(users.get_by_username("alice").unwrap(), created);
        assert!(users.find_by_username("bob").unwrap().is_none());
        assert!(matches!(
            users.get_by_username("bob"),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn test_set_private_updates_flag() {
        let store = Store::open_in_memory().unwrap();
        let users = UserStore::new(&store);
        let user = users.create("alice", false).unwrap();

        let updated = users.set_private(user.id, true).unwrap();
        assert!(updated.private);
        assert!(matches!(users.set_private(999, true), Err(StoreError::NotFound)));
    }
}
