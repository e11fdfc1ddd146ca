use rowmap::{RowMapDbError, SqliteDb, SqliteOptions, SqliteOptionsBuilder};

#[test]
fn connect_check_disconnect() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("test1.db");

    let opts = SqliteOptionsBuilder::new(path.to_string_lossy().into_owned())
        .journal_mode_wal(true)
        .busy_timeout(std::time::Duration::from_millis(250))
        .finish();
    let mut db = SqliteDb::open(opts)?;
    assert!(db.is_connected());
    db.check_connection()?;

    db.disconnect()?;
    assert!(!db.is_connected());

    // Not idempotent: the handle no longer holds a connection.
    let err = db.disconnect().unwrap_err();
    assert!(matches!(err, RowMapDbError::ConnectionError(_)));
    Ok(())
}

#[test]
fn empty_destination_is_a_noop() -> Result<(), Box<dyn std::error::Error>> {
    let mut db = SqliteDb::new(SqliteOptions::new(""));
    db.connect()?;
    assert!(!db.is_connected());

    // Data operations on an unconnected handle fail deterministically.
    let err = db.check_connection().unwrap_err();
    assert!(matches!(err, RowMapDbError::ConnectionError(_)));
    let err = db.select("SELECT 1", &[]).unwrap_err();
    assert!(matches!(err, RowMapDbError::ConnectionError(_)));
    let err = db.dml("DELETE FROM t", &[]).unwrap_err();
    assert!(matches!(err, RowMapDbError::ConnectionError(_)));
    Ok(())
}

#[test]
fn unreachable_destination_fails_to_connect() {
    let mut db = SqliteDb::new(SqliteOptions::new("/nonexistent-dir/nested/test1.db"));
    let err = db.connect().unwrap_err();
    assert!(matches!(err, RowMapDbError::ConnectionError(_)));
    assert!(!db.is_connected());
}

#[test]
fn connect_twice_is_harmless() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("test1_twice.db");
    let mut db = SqliteDb::open(SqliteOptions::new(path.to_string_lossy().into_owned()))?;
    db.connect()?;
    db.check_connection()?;
    Ok(())
}

#[test]
fn prepare_errors_are_reported() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("test1_prepare.db");
    let db = SqliteDb::open(SqliteOptions::new(path.to_string_lossy().into_owned()))?;

    let err = db.select("SELECT FROM WHERE", &[]).unwrap_err();
    assert!(matches!(err, RowMapDbError::PrepareError(_)));

    // Well-formed SQL against a missing table is also a prepare failure in
    // SQLite.
    let err = db.dml("DELETE FROM missing_table", &[]).unwrap_err();
    assert!(matches!(err, RowMapDbError::PrepareError(_)));
    Ok(())
}
