use thiserror::Error;

/// Errors surfaced by the mapper.
///
/// Every failure is terminal for the call in progress: there are no retries
/// and no compensating actions. A data-operation failure does not tear down
/// the connection handle; only an explicit disconnect closes it.
#[derive(Debug, Error)]
pub enum RowMapDbError {
    /// Driver-level error passed through unchanged.
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Schema descriptor rejected at construction time.
    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Statement preparation error: {0}")]
    PrepareError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    /// Result row shape or value does not match the destination record.
    /// Also covers select-one finding no row.
    #[error("Row scan error: {0}")]
    ScanError(String),

    /// The engine did not report a usable rowid after an insert. The row may
    /// still have been inserted.
    #[error("Identifier retrieval error: {0}")]
    IdentifierError(String),
}
