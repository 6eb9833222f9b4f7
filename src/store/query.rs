// SPDX-License-Identifier: MPL-2.0

//! Base filter and join primitives.
//!
//! Every derived association is composed from these. Column names are always
//! `'static` identifiers from the association table, never caller input, so
//! they are spliced into the SQL text directly while values are bound.

use crate::store::records::{Record, Table};
use crate::store::{StoreError, not_found};
use rusqlite::types::ToSql;
use rusqlite::{Connection, params_from_iter};
use std::collections::{BTreeSet, HashSet};

/// One `column = value` condition
pub type Filter<'a> = (&'static str, &'a dyn ToSql);

fn where_clause(filters: &[Filter<'_>]) -> String {
    if filters.is_empty() {
        return String::new();
    }
    let conditions: Vec<String> = filters
        .iter()
        .enumerate()
        .map(|(i, (column, _))| format!("{} = ?{}", column, i + 1))
        .collect();
    format!("WHERE {}", conditions.join(" AND "))
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

/// Rows of `R`'s table matching every filter, in storage order
pub fn find_by_equality<R: Record>(
    conn: &Connection,
    filters: &[Filter<'_>],
) -> Result<Vec<R>, StoreError> {
    let sql = format!(
        "SELECT {} FROM {} {} ORDER BY id ASC",
        R::COLUMNS,
        R::TABLE,
        where_clause(filters)
    );
    let values: Vec<&dyn ToSql> = filters.iter().map(|(_, v)| *v).collect();

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(&values[..])?;
    let mut found = Vec::new();

    while let Some(row) = rows.next()? {
        found.push(R::from_row(row)?);
    }

    Ok(found)
}

/// Bound values per `IN (...)` statement, well under SQLite's variable limit
pub const MEMBERSHIP_CHUNK: usize = 500;

/// Sorted, repeat-free copy of `values`, split into statement-sized chunks
fn membership_chunks(values: &[i64]) -> Vec<Vec<i64>> {
    let unique: BTreeSet<i64> = values.iter().copied().collect();
    let unique: Vec<i64> = unique.into_iter().collect();
    unique
        .chunks(MEMBERSHIP_CHUNK)
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Rows of `R`'s table whose `column` is one of `values`, in storage order.
/// Repeated values do not repeat rows; an empty set never touches the store.
pub fn find_by_membership<R: Record>(
    conn: &Connection,
    column: &'static str,
    values: &[i64],
) -> Result<Vec<R>, StoreError> {
    let mut found = Vec::new();

    for chunk in membership_chunks(values) {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} IN ({}) ORDER BY id ASC",
            R::COLUMNS,
            R::TABLE,
            column,
            placeholders(chunk.len())
        );

        let mut stmt = conn.prepare_cached(&sql)?;
        let mut rows = stmt.query(params_from_iter(chunk.iter()))?;

        while let Some(row) = rows.next()? {
            found.push(R::from_row(row)?);
        }
    }

    // Each row matches exactly one chunk, so only the order needs merging
    found.sort_by_key(|row| row.id());
    Ok(found)
}

/// Project `key_column` out of the matching rows of `table`
pub fn pluck(
    conn: &Connection,
    table: Table,
    key_column: &'static str,
    filters: &[Filter<'_>],
) -> Result<Vec<i64>, StoreError> {
    let sql = format!(
        "SELECT {} FROM {} {} ORDER BY id ASC",
        key_column,
        table,
        where_clause(filters)
    );
    let values: Vec<&dyn ToSql> = filters.iter().map(|(_, v)| *v).collect();

    let mut stmt = conn.prepare(&sql)?;
    let keys = stmt
        .query_map(&values[..], |row| row.get(0))?
        .collect::<Result<Vec<i64>, _>>()?;

    Ok(keys)
}

/// Ids of the rows of `table` whose `column` is one of `values`
pub fn ids_by_membership(
    conn: &Connection,
    table: Table,
    column: &'static str,
    values: &[i64],
) -> Result<Vec<i64>, StoreError> {
    let mut ids = Vec::new();

    for chunk in membership_chunks(values) {
        let sql = format!(
            "SELECT id FROM {} WHERE {} IN ({})",
            table,
            column,
            placeholders(chunk.len())
        );

        let mut stmt = conn.prepare_cached(&sql)?;
        let chunk_ids = stmt
            .query_map(params_from_iter(chunk.iter()), |row| row.get::<_, i64>(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        ids.extend(chunk_ids);
    }

    ids.sort_unstable();
    Ok(ids)
}

/// Drop rows whose identity was already seen, keeping the first
pub fn distinct<R: Record>(rows: Vec<R>) -> Vec<R> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter().filter(|row| seen.insert(row.id())).collect()
}

/// Single row by primary key
pub fn get<R: Record>(conn: &Connection, id: i64) -> Result<R, StoreError> {
    let sql = format!("SELECT {} FROM {} WHERE id = ?", R::COLUMNS, R::TABLE);
    conn.query_row(&sql, [id], |row| R::from_row(row))
        .map_err(not_found)
}

/// Single row by primary key, `None` when absent
pub fn find<R: Record>(conn: &Connection, id: i64) -> Result<Option<R>, StoreError> {
    match get(conn, id) {
        Ok(row) => Ok(Some(row)),
        Err(StoreError::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn exists(conn: &Connection, table: Table, id: i64) -> Result<bool, StoreError> {
    let sql = format!("SELECT 1 FROM {} WHERE id = ?", table);
    let mut stmt = conn.prepare(&sql)?;
    Ok(stmt.exists([id])?)
}
