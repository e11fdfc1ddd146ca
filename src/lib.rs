//! Minimal record-to-table mapper for a single SQLite database file.
//!
//! A [`SqliteDb`] owns one blocking connection opened from a file path. Each
//! record type declares a [`TableSchema`] descriptor (normally via
//! [`table_record!`]) naming its table, identifier column, and data columns;
//! a [`Table`] validates that descriptor once and then provides
//! select-one/select-all/insert/update/delete keyed on the integer
//! identifier.
//!
//! ```rust
//! use rowmap::prelude::*;
//!
//! #[derive(Debug, Default, Clone, PartialEq)]
//! struct User {
//!     id: i64,
//!     name: String,
//!     age: i64,
//! }
//!
//! table_record! {
//!     User => "users" {
//!         key id: "id",
//!         name: "name",
//!         age: "age",
//!     }
//! }
//!
//! fn main() -> Result<(), RowMapDbError> {
//!     let db = SqliteDb::open(SqliteOptions::new(":memory:"))?;
//!     db.execute_batch(
//!         "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT, age INT);",
//!     )?;
//!
//!     let users: Table<User> = Table::new()?;
//!     let mut ann = User { id: 0, name: "Ann".into(), age: 30 };
//!     users.insert(&db, &mut ann)?;
//!
//!     let mut found = User { id: ann.id, ..User::default() };
//!     users.select_one(&db, &mut found)?;
//!     assert_eq!(found, ann);
//!     Ok(())
//! }
//! ```

mod conversion;
mod db;
mod error;
mod macros;
mod params;
mod results;
mod schema;
mod statement;
mod table;
mod types;

pub mod prelude;

pub use conversion::ColumnValue;
pub use db::{SqliteDb, SqliteOptions, SqliteOptionsBuilder};
pub use error::RowMapDbError;
pub use params::{build_result_set, convert_params, to_sqlite_value};
pub use results::{DbRow, ResultSet};
pub use schema::{TableSchema, TableSchemaBuilder};
pub use statement::{SqlStatement, StatementKind};
pub use table::{Table, TableRecord};
pub use types::RowValues;
