pub const TODO_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS todo_items (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    content   TEXT    NOT NULL,
    status    TEXT    NOT NULL DEFAULT 'pending',
    createdAt TEXT    NOT NULL,
    updatedAt TEXT    NOT NULL,
    createdBy TEXT    NOT NULL,
    priority  INTEGER NOT NULL DEFAULT 0
);
"#;

pub const SELECT_COLUMNS: &str =
    "SELECT id, content, status, createdAt, updatedAt, createdBy, priority FROM todo_items";
