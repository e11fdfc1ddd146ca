use rowmap::prelude::*;

#[derive(Debug, Default, Clone, PartialEq)]
struct User {
    id: i64,
    name: String,
    age: i64,
}

table_record! {
    User => "users" {
        key id: "id",
        name: "name",
        age: "age",
    }
}

fn open_users_db(path: &std::path::Path) -> Result<SqliteDb, RowMapDbError> {
    let db = SqliteDb::open(SqliteOptions::new(path.to_string_lossy().into_owned()))?;
    db.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT,
            age INT
        );",
    )?;
    Ok(db)
}

#[test]
fn insert_select_update_delete_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let db = open_users_db(&dir.path().join("test2.db"))?;
    let users: Table<User> = Table::new()?;

    // Empty table: zero rows appended, not an error.
    let mut all = Vec::new();
    assert_eq!(users.select_all(&db, &mut all)?, 0);
    assert!(all.is_empty());

    // Insert assigns the identifier.
    let mut ann = User {
        id: 0,
        name: "Ann".to_string(),
        age: 30,
    };
    users.insert(&db, &mut ann)?;
    assert_eq!(ann.id, 1);

    // Select-one restores every field, identifier included.
    let mut found = User {
        id: ann.id,
        ..User::default()
    };
    users.select_one(&db, &mut found)?;
    assert_eq!(
        found,
        User {
            id: 1,
            name: "Ann".to_string(),
            age: 30
        }
    );

    // Update is idempotent and reports one affected row each time.
    ann.age = 31;
    assert_eq!(users.update(&db, &ann)?, 1);
    assert_eq!(users.update(&db, &ann)?, 1);
    let mut found = User {
        id: ann.id,
        ..User::default()
    };
    users.select_one(&db, &mut found)?;
    assert_eq!(found.age, 31);

    // Delete, then select-one fails rather than returning a zeroed record.
    assert_eq!(users.delete(&db, &ann)?, 1);
    let mut gone = User {
        id: ann.id,
        ..User::default()
    };
    let err = users.select_one(&db, &mut gone).unwrap_err();
    assert!(matches!(err, RowMapDbError::ScanError(_)));
    Ok(())
}

#[test]
fn select_all_returns_every_row() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let db = open_users_db(&dir.path().join("test2_all.db"))?;
    let users: Table<User> = Table::new()?;

    for (name, age) in [("Ann", 30), ("Ben", 41), ("Cid", 52)] {
        let mut user = User {
            id: 0,
            name: name.to_string(),
            age,
        };
        users.insert(&db, &mut user)?;
    }

    let mut all = Vec::new();
    let count = users.select_all(&db, &mut all)?;
    assert_eq!(count, 3);
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].name, "Ann");
    assert_eq!(all[2], User { id: 3, name: "Cid".to_string(), age: 52 });

    // Appends, does not clear.
    let count = users.select_all(&db, &mut all)?;
    assert_eq!(count, 3);
    assert_eq!(all.len(), 6);
    Ok(())
}

#[test]
fn update_and_delete_of_missing_row_report_zero() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let db = open_users_db(&dir.path().join("test2_zero.db"))?;
    let users: Table<User> = Table::new()?;

    let ghost = User {
        id: 999,
        name: "Ghost".to_string(),
        age: 0,
    };
    assert_eq!(users.update(&db, &ghost)?, 0);
    assert_eq!(users.delete(&db, &ghost)?, 0);
    Ok(())
}

#[test]
fn scan_rejects_shape_mismatch() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let db = open_users_db(&dir.path().join("test2_shape.db"))?;
    let users: Table<User> = Table::new()?;

    let mut ann = User {
        id: 0,
        name: "Ann".to_string(),
        age: 30,
    };
    users.insert(&db, &mut ann)?;

    // A narrower row than the record expects is a scan error.
    let result_set = db.select("SELECT id, name FROM users", &[])?;
    let mut target = User::default();
    let err = target.apply_row(&result_set.results[0]).unwrap_err();
    assert!(matches!(err, RowMapDbError::ScanError(_)));
    Ok(())
}
