//! Storage driver contract and its SQLite implementation.
//!
//! # Responsibility
//! - Give repositories a narrow execute/query/scalar surface over SQL.
//! - Hand back row cursors that do not hold engine resources.
//!
//! # Invariants
//! - Variable data only ever travels as positional bound parameters.
//! - `query` finalizes its prepared statement before returning, so a cursor
//!   dropped on any path (including early `?` returns) leaks nothing.
//! - Engine errors are returned as-is; the driver never retries.

use super::DbResult;
use log::debug;
use rusqlite::types::{FromSql, FromSqlError, Value, ValueRef};
use rusqlite::{Connection, ToSql};
use std::collections::VecDeque;
use std::sync::Arc;

/// Narrow SQL surface the repositories are written against.
///
/// `params` are bound positionally (`?1`, `?2`, ...). Use
/// `rusqlite::params!` to build them.
pub trait StorageDriver {
    /// Runs a statement that returns no rows; yields the affected-row count.
    fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> DbResult<usize>;

    /// Runs a statement and buffers every returned row into a cursor.
    fn query(&self, sql: &str, params: &[&dyn ToSql]) -> DbResult<SqlRows>;

    /// Runs a statement whose first row's first column is an integer,
    /// typically `INSERT ... RETURNING id`.
    fn query_scalar_int(&self, sql: &str, params: &[&dyn ToSql]) -> DbResult<i64>;
}

/// Transactions reach this impl through deref (`&*tx`).
impl StorageDriver for Connection {
    fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> DbResult<usize> {
        Connection::execute(self, sql, params)
            .map_err(|err| trace_error("execute", sql, err).into())
    }

    fn query(&self, sql: &str, params: &[&dyn ToSql]) -> DbResult<SqlRows> {
        buffer_rows(self, sql, params).map_err(|err| trace_error("query", sql, err).into())
    }

    fn query_scalar_int(&self, sql: &str, params: &[&dyn ToSql]) -> DbResult<i64> {
        self.query_row(sql, params, |row| row.get::<_, i64>(0))
            .map_err(|err| trace_error("query_scalar_int", sql, err).into())
    }
}

fn buffer_rows(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> rusqlite::Result<SqlRows> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Arc<[String]> = stmt
        .column_names()
        .into_iter()
        .map(str::to_owned)
        .collect();

    let mut rows = stmt.query(params)?;
    let mut buffered = VecDeque::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(columns.len());
        for idx in 0..columns.len() {
            values.push(row.get::<_, Value>(idx)?);
        }
        buffered.push_back(values);
    }

    Ok(SqlRows {
        columns,
        rows: buffered,
    })
}

fn trace_error(op: &str, sql: &str, err: rusqlite::Error) -> rusqlite::Error {
    debug!(
        "event=sql_{op} module=db status=error statement={} error={err}",
        statement_kind(sql)
    );
    err
}

fn statement_kind(sql: &str) -> String {
    sql.split_whitespace()
        .next()
        .unwrap_or("<empty>")
        .to_ascii_uppercase()
}

/// Forward-only cursor over a buffered result set.
///
/// `next_row` (or `Iterator::next`) advances; `SqlRow::get` reads a column.
/// Dropping the cursor releases it.
#[derive(Debug, Clone)]
pub struct SqlRows {
    columns: Arc<[String]>,
    rows: VecDeque<Vec<Value>>,
}

impl Default for SqlRows {
    fn default() -> Self {
        Self {
            columns: Arc::from(Vec::new()),
            rows: VecDeque::new(),
        }
    }
}

impl SqlRows {
    /// Advances the cursor, returning `None` once the rows are exhausted.
    pub fn next_row(&mut self) -> Option<SqlRow> {
        let values = self.rows.pop_front()?;
        Some(SqlRow {
            columns: Arc::clone(&self.columns),
            values,
        })
    }

    /// Number of rows not yet consumed.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl Iterator for SqlRows {
    type Item = SqlRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row()
    }
}

/// One row handed out by [`SqlRows`].
#[derive(Debug, Clone)]
pub struct SqlRow {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl SqlRow {
    /// Reads and converts one column, by position or by (case-insensitive)
    /// column name.
    ///
    /// # Errors
    /// - `InvalidColumnIndex` / `InvalidColumnName` for unknown columns.
    /// - `InvalidColumnType`, `IntegralValueOutOfRange` or
    ///   `FromSqlConversionFailure` when the stored value does not convert.
    pub fn get<T: FromSql>(&self, column: impl ColumnIndex) -> DbResult<T> {
        let idx = column.resolve(&self.columns)?;
        let value = &self.values[idx];
        T::column_result(ValueRef::from(value))
            .map_err(|err| conversion_error(idx, &self.columns[idx], value, err).into())
    }
}

fn conversion_error(idx: usize, name: &str, value: &Value, err: FromSqlError) -> rusqlite::Error {
    match err {
        FromSqlError::InvalidType => {
            rusqlite::Error::InvalidColumnType(idx, name.to_owned(), value.data_type())
        }
        FromSqlError::OutOfRange(raw) => rusqlite::Error::IntegralValueOutOfRange(idx, raw),
        other => rusqlite::Error::FromSqlConversionFailure(idx, value.data_type(), Box::new(other)),
    }
}

/// Column selector accepted by [`SqlRow::get`].
pub trait ColumnIndex {
    fn resolve(&self, columns: &[String]) -> rusqlite::Result<usize>;
}

impl ColumnIndex for usize {
    fn resolve(&self, columns: &[String]) -> rusqlite::Result<usize> {
        if *self < columns.len() {
            Ok(*self)
        } else {
            Err(rusqlite::Error::InvalidColumnIndex(*self))
        }
    }
}

impl ColumnIndex for &str {
    fn resolve(&self, columns: &[String]) -> rusqlite::Result<usize> {
        columns
            .iter()
            .position(|column| column.eq_ignore_ascii_case(self))
            .ok_or_else(|| rusqlite::Error::InvalidColumnName((*self).to_string()))
    }
}
