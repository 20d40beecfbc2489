use rusqlite::Connection;
use taskstore_core::db::schema::{first_missing_column, table_exists, REQUIRED_TASK_COLUMNS};
use taskstore_core::db::{open_pool, open_pool_in_memory, PoolConfig};

#[test]
fn open_pool_in_memory_bootstraps_schema() {
    let pool = open_pool_in_memory().unwrap();
    let conn = pool.get().unwrap();

    assert!(table_exists(&conn, "tasks").unwrap());
    assert_eq!(
        first_missing_column(&conn, "tasks", REQUIRED_TASK_COLUMNS).unwrap(),
        None
    );
    assert_index_exists(&conn, "idx_tasks_created_at");
}

#[test]
fn opening_same_file_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");

    let first = open_pool(&path, &PoolConfig::default()).unwrap();
    first
        .get()
        .unwrap()
        .execute(
            "INSERT INTO tasks (title, body, completed, created_at, updated_at)
             VALUES ('kept', '', 0, 1, 1);",
            [],
        )
        .unwrap();
    drop(first);

    let second = open_pool(&path, &PoolConfig::default()).unwrap();
    let count: i64 = second
        .get()
        .unwrap()
        .query_row("SELECT COUNT(*) FROM tasks;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn schema_rejects_out_of_range_completion_flag() {
    let pool = open_pool_in_memory().unwrap();
    let conn = pool.get().unwrap();

    let result = conn.execute(
        "INSERT INTO tasks (title, body, completed, created_at, updated_at)
         VALUES ('bad', '', 2, 1, 1);",
        [],
    );
    assert!(result.is_err());
}

fn assert_index_exists(conn: &Connection, index_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'index' AND name = ?1
            );",
            [index_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "index {index_name} does not exist");
}
