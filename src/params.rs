use rusqlite::types::Value;
use rusqlite::{Row, Statement, ToSql};

use crate::error::RowMapDbError;
use crate::results::ResultSet;
use crate::types::RowValues;

/// Convert a single `RowValues` to a rusqlite `Value`.
///
/// Booleans become 0/1 integers, timestamps and JSON become text; that is
/// what SQLite stores and what the scan side expects back.
#[must_use]
pub fn to_sqlite_value(value: &RowValues) -> Value {
    match value {
        RowValues::Int(i) => Value::Integer(*i),
        RowValues::Float(f) => Value::Real(*f),
        RowValues::Text(s) => Value::Text(s.clone()),
        RowValues::Bool(b) => Value::Integer(i64::from(*b)),
        RowValues::Timestamp(dt) => Value::Text(dt.format("%F %T%.f").to_string()),
        RowValues::Null => Value::Null,
        RowValues::JSON(jval) => Value::Text(jval.to_string()),
        RowValues::Blob(bytes) => Value::Blob(bytes.clone()),
    }
}

/// Bind a parameter slice to SQLite values.
#[must_use]
pub fn convert_params(params: &[RowValues]) -> Vec<Value> {
    params.iter().map(to_sqlite_value).collect()
}

/// Extract one column of a result row as a `RowValues`.
///
/// # Errors
/// Returns `RowMapDbError::ScanError` if the column index is out of range
/// for the row.
pub fn extract_value(row: &Row, idx: usize) -> Result<RowValues, RowMapDbError> {
    let value: Value = row
        .get(idx)
        .map_err(|e| RowMapDbError::ScanError(format!("column {idx}: {e}")))?;
    match value {
        Value::Null => Ok(RowValues::Null),
        Value::Integer(i) => Ok(RowValues::Int(i)),
        Value::Real(f) => Ok(RowValues::Float(f)),
        Value::Text(s) => Ok(RowValues::Text(s)),
        Value::Blob(b) => Ok(RowValues::Blob(b)),
    }
}

/// Run a prepared statement and materialize every returned row.
///
/// # Errors
/// Returns `RowMapDbError::ExecutionError` if binding or stepping the
/// statement fails, and `RowMapDbError::ScanError` if a row value cannot be
/// extracted.
pub fn build_result_set(
    stmt: &mut Statement,
    params: &[Value],
) -> Result<ResultSet, RowMapDbError> {
    let param_refs: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let column_count = column_names.len();

    // Column names are stored once and shared by every row.
    let column_names_rc = std::sync::Arc::new(column_names);

    let mut rows_iter = stmt
        .query(&param_refs[..])
        .map_err(|e| RowMapDbError::ExecutionError(e.to_string()))?;

    let mut result_set = ResultSet::with_capacity(10);
    result_set.set_column_names(column_names_rc);

    loop {
        let row = rows_iter
            .next()
            .map_err(|e| RowMapDbError::ExecutionError(e.to_string()))?;
        let Some(row) = row else { break };

        let mut row_values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            row_values.push(extract_value(row, i)?);
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}
