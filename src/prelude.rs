//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and traits so callers
//! can get started with a single `use`.

pub use crate::{
    ColumnValue, DbRow, ResultSet, RowMapDbError, RowValues, SqlStatement, SqliteDb,
    SqliteOptions, SqliteOptionsBuilder, StatementKind, Table, TableRecord, TableSchema,
    TableSchemaBuilder, table_record,
};
