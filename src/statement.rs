use std::fmt;
use std::fmt::Write;

use crate::schema::TableSchema;

/// The five statement shapes the mapper can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    SelectOne,
    SelectAll,
    Insert,
    Update,
    Delete,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatementKind::SelectOne => "select_one",
            StatementKind::SelectAll => "select_all",
            StatementKind::Insert => "insert",
            StatementKind::Update => "update",
            StatementKind::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// SQL text assembled for one operation.
///
/// Built fresh per call from the validated schema, never cached. Table and
/// column names come straight from the descriptor and are not escaped; the
/// caller's declarations are trusted.
#[derive(Debug, Clone)]
pub struct SqlStatement {
    pub kind: StatementKind,
    pub sql: String,
}

impl SqlStatement {
    #[must_use]
    pub fn build(schema: &TableSchema, kind: StatementKind) -> Self {
        let sql = match kind {
            StatementKind::SelectOne => select_one_sql(schema),
            StatementKind::SelectAll => select_all_sql(schema),
            StatementKind::Insert => insert_sql(schema),
            StatementKind::Update => update_sql(schema),
            StatementKind::Delete => delete_sql(schema),
        };
        Self { kind, sql }
    }
}

/// `SELECT id, c2, ..., cn FROM t WHERE id = ?1` — one parameter, the
/// identifier value.
fn select_one_sql(schema: &TableSchema) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = ?1",
        schema.select_columns().join(", "),
        schema.table(),
        schema.key_column()
    )
}

/// `SELECT id, c2, ..., cn FROM t` — columns are enumerated rather than `*`
/// so the positional scan holds even if the physical table has extra or
/// reordered columns.
fn select_all_sql(schema: &TableSchema) -> String {
    format!(
        "SELECT {} FROM {}",
        schema.select_columns().join(", "),
        schema.table()
    )
}

/// `INSERT INTO t (c2, ..., cn) VALUES (?1, ..., ?n)` — parameters are the
/// data values in schema order; the identifier is assigned by the engine.
fn insert_sql(schema: &TableSchema) -> String {
    let placeholders: Vec<String> = (1..=schema.data_columns().len())
        .map(|n| format!("?{n}"))
        .collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema.table(),
        schema.data_columns().join(", "),
        placeholders.join(", ")
    )
}

/// `UPDATE t SET c2 = ?1, ..., cn = ?n-1 WHERE id = ?n` — data values first,
/// identifier last.
fn update_sql(schema: &TableSchema) -> String {
    let mut assignments = String::new();
    for (i, column) in schema.data_columns().iter().enumerate() {
        if i > 0 {
            assignments.push_str(", ");
        }
        let _ = write!(assignments, "{} = ?{}", column, i + 1);
    }
    format!(
        "UPDATE {} SET {} WHERE {} = ?{}",
        schema.table(),
        assignments,
        schema.key_column(),
        schema.data_columns().len() + 1
    )
}

/// `DELETE FROM t WHERE id = ?1` — one parameter, the identifier value.
fn delete_sql(schema: &TableSchema) -> String {
    format!(
        "DELETE FROM {} WHERE {} = ?1",
        schema.table(),
        schema.key_column()
    )
}
