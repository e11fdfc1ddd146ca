use crate::error::RowMapDbError;

/// Construction-time descriptor mapping one record type onto one table.
///
/// The descriptor replaces per-call field inspection: it is built once
/// (usually via [`crate::table_record!`]), validated once, and reused for
/// every statement. The identifier column is named explicitly rather than
/// carried by field position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    table: String,
    key_column: String,
    data_columns: Vec<String>,
}

impl TableSchema {
    #[must_use]
    pub fn builder(table: impl Into<String>) -> TableSchemaBuilder {
        TableSchemaBuilder::new(table)
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    /// Non-identifier columns, in record field order. This order is the
    /// positional binding order for insert and update parameters.
    #[must_use]
    pub fn data_columns(&self) -> &[String] {
        &self.data_columns
    }

    /// All columns with the identifier first: the order selects emit and the
    /// order rows are scanned back into records.
    #[must_use]
    pub fn select_columns(&self) -> Vec<&str> {
        let mut columns = Vec::with_capacity(self.data_columns.len() + 1);
        columns.push(self.key_column.as_str());
        columns.extend(self.data_columns.iter().map(String::as_str));
        columns
    }
}

/// Fluent builder for [`TableSchema`].
///
/// `build` is where the shape contract is enforced, so a misdeclared record
/// type fails at construction instead of producing malformed SQL later.
#[derive(Debug, Clone)]
pub struct TableSchemaBuilder {
    table: String,
    key_columns: Vec<String>,
    data_columns: Vec<String>,
}

impl TableSchemaBuilder {
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            key_columns: Vec::new(),
            data_columns: Vec::new(),
        }
    }

    /// Name the identifier column. Must be called exactly once.
    #[must_use]
    pub fn key(mut self, column: impl Into<String>) -> Self {
        self.key_columns.push(column.into());
        self
    }

    /// Append a data column, in record field order.
    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.data_columns.push(column.into());
        self
    }

    /// Validate and produce the schema.
    ///
    /// # Errors
    /// Returns `RowMapDbError::SchemaError` if the table name is empty, the
    /// identifier column is missing or declared twice, any column name is
    /// empty, no data column was declared, or a column name repeats.
    pub fn build(self) -> Result<TableSchema, RowMapDbError> {
        if self.table.is_empty() {
            return Err(RowMapDbError::SchemaError("table name is empty".into()));
        }
        let key_column = match self.key_columns.as_slice() {
            [key] => key.clone(),
            [] => {
                return Err(RowMapDbError::SchemaError(format!(
                    "table `{}` declares no identifier column",
                    self.table
                )));
            }
            _ => {
                return Err(RowMapDbError::SchemaError(format!(
                    "table `{}` declares more than one identifier column",
                    self.table
                )));
            }
        };
        if key_column.is_empty() {
            return Err(RowMapDbError::SchemaError(format!(
                "table `{}` has an empty identifier column name",
                self.table
            )));
        }
        if self.data_columns.is_empty() {
            return Err(RowMapDbError::SchemaError(format!(
                "table `{}` declares no data columns",
                self.table
            )));
        }

        let mut seen = vec![key_column.clone()];
        for column in &self.data_columns {
            if column.is_empty() {
                return Err(RowMapDbError::SchemaError(format!(
                    "table `{}` has an empty column name",
                    self.table
                )));
            }
            if seen.contains(column) {
                return Err(RowMapDbError::SchemaError(format!(
                    "table `{}` declares column `{column}` more than once",
                    self.table
                )));
            }
            seen.push(column.clone());
        }

        Ok(TableSchema {
            table: self.table,
            key_column,
            data_columns: self.data_columns,
        })
    }
}
