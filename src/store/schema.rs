//! Table definitions.

use rusqlite::Connection;

/// `AUTOINCREMENT` keeps ids from being reused after a delete.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0),
    description TEXT
);

CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    title TEXT NOT NULL CHECK (length(trim(title)) > 0),
    description TEXT,
    priority INTEGER NOT NULL DEFAULT 1,
    deadline DATE,
    status TEXT NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'in_progress', 'completed'))
);

CREATE INDEX IF NOT EXISTS idx_tasks_project_id ON tasks(project_id);
";

/// Enable foreign keys and create tables. Idempotent.
pub fn init(conn: &Connection) -> rusqlite::Result<()> {
    // Must run outside a transaction; SQLite ignores it otherwise.
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(SCHEMA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init(&conn).unwrap();
        init(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('projects', 'tasks')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 2);
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let conn = Connection::open_in_memory().unwrap();
        init(&conn).unwrap();

        let result = conn.execute("INSERT INTO tasks (project_id, title) VALUES (42, 'orphan')", []);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_name_rejected_by_table() {
        let conn = Connection::open_in_memory().unwrap();
        init(&conn).unwrap();

        assert!(conn.execute("INSERT INTO projects (name) VALUES ('   ')", []).is_err());
    }
}
