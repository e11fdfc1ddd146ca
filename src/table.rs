use std::marker::PhantomData;

use tracing::{error, info};

use crate::db::SqliteDb;
use crate::error::RowMapDbError;
use crate::results::DbRow;
use crate::schema::{TableSchema, TableSchemaBuilder};
use crate::statement::{SqlStatement, StatementKind};
use crate::types::RowValues;

/// Binding between a record type and its table.
///
/// Usually implemented with [`crate::table_record!`] rather than by hand.
/// The identifier field must be an `i64`; data values and row scans follow
/// the schema's column order.
pub trait TableRecord {
    /// Schema descriptor for this type. Returned as a builder so the shape
    /// contract is checked once, when a [`Table`] is constructed.
    fn schema() -> TableSchemaBuilder;

    /// Current identifier value.
    fn key(&self) -> i64;

    /// Write the engine-assigned identifier back into the record.
    fn set_key(&mut self, key: i64);

    /// Data-column values in schema order, identifier excluded.
    fn data_values(&self) -> Vec<RowValues>;

    /// Positional scan of one result row, identifier first.
    ///
    /// # Errors
    /// Returns `RowMapDbError::ScanError` if the row shape or a value does
    /// not match the record.
    fn apply_row(&mut self, row: &DbRow) -> Result<(), RowMapDbError>;
}

/// CRUD gateway for one mapped table.
///
/// Holds the validated schema; the statement text itself is assembled fresh
/// per call. The gateway is stateless beyond the schema and borrows the
/// caller's [`SqliteDb`] only for the duration of each operation.
pub struct Table<T: TableRecord> {
    schema: TableSchema,
    _record: PhantomData<T>,
}

impl<T: TableRecord> Table<T> {
    /// Validate the record type's schema descriptor and build the gateway.
    ///
    /// # Errors
    /// Returns `RowMapDbError::SchemaError` if the descriptor is malformed
    /// (see [`TableSchemaBuilder::build`]).
    pub fn new() -> Result<Self, RowMapDbError> {
        Ok(Self {
            schema: T::schema().build()?,
            _record: PhantomData,
        })
    }

    #[must_use]
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Fetch the row whose identifier matches the record's current key and
    /// scan it into the record.
    ///
    /// # Errors
    /// Returns `RowMapDbError::ScanError` if no row matches or the row shape
    /// mismatches, plus connection/prepare/execution errors from below.
    pub fn select_one(&self, db: &SqliteDb, record: &mut T) -> Result<(), RowMapDbError> {
        let stmt = SqlStatement::build(&self.schema, StatementKind::SelectOne);
        let params = [RowValues::Int(record.key())];
        let result_set = db
            .select(&stmt.sql, &params)
            .map_err(|e| self.observe(&stmt, &params, e))?;
        let row = result_set.results.first().ok_or_else(|| {
            self.observe(
                &stmt,
                &params,
                RowMapDbError::ScanError(format!(
                    "no row in `{}` with {} = {}",
                    self.schema.table(),
                    self.schema.key_column(),
                    record.key()
                )),
            )
        })?;
        record
            .apply_row(row)
            .map_err(|e| self.observe(&stmt, &params, e))?;
        info!(table = %self.schema.table(), key = record.key(), "selected one row");
        Ok(())
    }

    /// Fetch every row of the table, appending one fresh record per row to
    /// `out`. Returns the number of rows appended; an empty table yields 0.
    ///
    /// # Errors
    /// Returns `RowMapDbError::ScanError` on row shape mismatch, plus
    /// connection/prepare/execution errors from below.
    pub fn select_all(&self, db: &SqliteDb, out: &mut Vec<T>) -> Result<usize, RowMapDbError>
    where
        T: Default,
    {
        let stmt = SqlStatement::build(&self.schema, StatementKind::SelectAll);
        let result_set = db
            .select(&stmt.sql, &[])
            .map_err(|e| self.observe(&stmt, &[], e))?;

        let mut appended = 0;
        for row in &result_set.results {
            let mut record = T::default();
            record
                .apply_row(row)
                .map_err(|e| self.observe(&stmt, &[], e))?;
            out.push(record);
            appended += 1;
        }
        info!(table = %self.schema.table(), rows = appended, "selected all rows");
        Ok(appended)
    }

    /// Insert the record and write the engine-assigned identifier back into
    /// it.
    ///
    /// # Errors
    /// Returns `RowMapDbError::IdentifierError` if the engine reports no
    /// rowid after the insert (the row may still have been inserted), plus
    /// connection/prepare/execution errors from below.
    pub fn insert(&self, db: &SqliteDb, record: &mut T) -> Result<(), RowMapDbError> {
        let stmt = SqlStatement::build(&self.schema, StatementKind::Insert);
        let params = record.data_values();
        db.dml(&stmt.sql, &params)
            .map_err(|e| self.observe(&stmt, &params, e))?;
        let key = db
            .last_insert_rowid()
            .map_err(|e| self.observe(&stmt, &params, e))?;
        if key == 0 {
            return Err(self.observe(
                &stmt,
                &params,
                RowMapDbError::IdentifierError(format!(
                    "engine reported no rowid after insert into `{}`",
                    self.schema.table()
                )),
            ));
        }
        record.set_key(key);
        info!(table = %self.schema.table(), key, "inserted row");
        Ok(())
    }

    /// Update the row keyed by the record's identifier. Zero affected rows
    /// is reported, not an error.
    ///
    /// # Errors
    /// Returns connection/prepare/execution errors from below.
    pub fn update(&self, db: &SqliteDb, record: &T) -> Result<usize, RowMapDbError> {
        let stmt = SqlStatement::build(&self.schema, StatementKind::Update);
        let mut params = record.data_values();
        params.push(RowValues::Int(record.key()));
        let affected = db
            .dml(&stmt.sql, &params)
            .map_err(|e| self.observe(&stmt, &params, e))?;
        info!(table = %self.schema.table(), key = record.key(), affected, "updated rows");
        Ok(affected)
    }

    /// Delete the row keyed by the record's identifier. Zero affected rows
    /// is reported, not an error.
    ///
    /// # Errors
    /// Returns connection/prepare/execution errors from below.
    pub fn delete(&self, db: &SqliteDb, record: &T) -> Result<usize, RowMapDbError> {
        let stmt = SqlStatement::build(&self.schema, StatementKind::Delete);
        let params = [RowValues::Int(record.key())];
        let affected = db
            .dml(&stmt.sql, &params)
            .map_err(|e| self.observe(&stmt, &params, e))?;
        info!(table = %self.schema.table(), key = record.key(), affected, "deleted rows");
        Ok(affected)
    }

    /// Emit the structured failure snapshot before the error propagates.
    fn observe(&self, stmt: &SqlStatement, params: &[RowValues], err: RowMapDbError) -> RowMapDbError {
        error!(
            table = %self.schema.table(),
            operation = %stmt.kind,
            sql = %stmt.sql,
            params = ?params,
            error = %err,
            "operation failed"
        );
        err
    }
}
