// SPDX-License-Identifier: MPL-2.0

//! Generic resolvers over the association table.
//!
//! None of these report a missing owner: an id with no rows behind it
//! resolves to an empty collection.

use crate::relations::registry::{BelongsTo, Composed, HasMany, Secondary, Through};
use crate::store::query::{self, Filter};
use crate::store::{Record, StoreError};
use rusqlite::Connection;
use std::collections::BTreeSet;

fn filters<'a>(assoc: &'a HasMany, owner_id: &'a i64) -> Vec<Filter<'a>> {
    let foreign: Filter<'a> = (assoc.foreign_key, owner_id);
    let mut filters = vec![foreign];
    if let Some(scope) = &assoc.scope {
        let scoped: Filter<'a> = (scope.column, &scope.value);
        filters.push(scoped);
    }
    filters
}

/// Direct or scoped association
pub fn has_many<R: Record>(
    conn: &Connection,
    assoc: &HasMany,
    owner_id: i64,
) -> Result<Vec<R>, StoreError> {
    debug_assert_eq!(R::TABLE, assoc.target, "{} loads {}", assoc.name, assoc.target);

    let rows: Vec<R> = query::find_by_equality(conn, &filters(assoc, &owner_id))?;
    tracing::debug!(association = assoc.name, owner_id, rows = rows.len(), "resolved");
    Ok(rows)
}

/// The row a foreign key points at, `None` when it is gone
pub fn belongs_to<R: Record>(
    conn: &Connection,
    assoc: &BelongsTo,
    foreign_id: i64,
) -> Result<Option<R>, StoreError> {
    debug_assert_eq!(R::TABLE, assoc.target, "{} loads {}", assoc.name, assoc.target);

    query::find(conn, foreign_id)
}

/// Keys taken from every row of the through collection, repeats included
fn through_keys(conn: &Connection, assoc: &Through, owner_id: i64) -> Result<Vec<i64>, StoreError> {
    query::pluck(
        conn,
        assoc.via.target,
        assoc.source_key,
        &filters(&assoc.via, &owner_id),
    )
}

/// Two-hop association
pub fn through<R: Record>(
    conn: &Connection,
    assoc: &Through,
    owner_id: i64,
) -> Result<Vec<R>, StoreError> {
    debug_assert_eq!(R::TABLE, assoc.target, "{} loads {}", assoc.name, assoc.target);

    let keys = through_keys(conn, assoc, owner_id)?;
    let mut rows: Vec<R> = query::find_by_membership(conn, "id", &keys)?;
    if assoc.distinct {
        rows = query::distinct(rows);
    }

    tracing::debug!(
        association = assoc.name,
        owner_id,
        keys = keys.len(),
        rows = rows.len(),
        "resolved"
    );
    Ok(rows)
}

/// Ids of the rows `through` would return
fn through_ids(conn: &Connection, assoc: &Through, owner_id: i64) -> Result<Vec<i64>, StoreError> {
    let keys = through_keys(conn, assoc, owner_id)?;
    query::ids_by_membership(conn, assoc.target, "id", &keys)
}

fn secondary_ids(
    conn: &Connection,
    source: &Secondary,
    owner_id: i64,
) -> Result<Vec<i64>, StoreError> {
    match source {
        Secondary::HasMany(assoc) => {
            query::pluck(conn, assoc.target, "id", &filters(assoc, &owner_id))
        }
        Secondary::Through(assoc) => through_ids(conn, assoc, owner_id),
    }
}

/// Three-hop association. The per-hop ids are unioned as a set, so a row
/// reachable through several intermediates is returned once.
pub fn composed<R: Record>(
    conn: &Connection,
    assoc: &Composed,
    owner_id: i64,
) -> Result<Vec<R>, StoreError> {
    debug_assert_eq!(
        R::TABLE,
        assoc.source.target(),
        "{} loads {}",
        assoc.name,
        assoc.source.target()
    );

    let intermediates = through_ids(conn, &assoc.through, owner_id)?;

    let mut union = BTreeSet::new();
    for intermediate in &intermediates {
        union.extend(secondary_ids(conn, &assoc.source, *intermediate)?);
    }

    let ids: Vec<i64> = union.into_iter().collect();
    let rows: Vec<R> = query::find_by_membership(conn, "id", &ids)?;

    tracing::debug!(
        association = assoc.name,
        owner_id,
        intermediates = intermediates.len(),
        rows = rows.len(),
        "resolved"
    );
    Ok(rows)
}
