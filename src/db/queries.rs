//! SQL statements.

use super::DatabaseKind;

/// Connectivity probe
pub const PING: &str = "SELECT 1";

const CREATE_USERS_TABLE_MYSQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INT AUTO_INCREMENT PRIMARY KEY,
    username VARCHAR(255) NOT NULL,
    password VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

const CREATE_USERS_TABLE_SQLITE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    password TEXT NOT NULL,
    email TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)
"#;

pub fn create_users_table(kind: DatabaseKind) -> &'static str {
    match kind {
        DatabaseKind::MySql => CREATE_USERS_TABLE_MYSQL,
        DatabaseKind::Sqlite => CREATE_USERS_TABLE_SQLITE,
    }
}

// Both dialects take `?` placeholders.
pub const INSERT_USER: &str = "INSERT INTO users (username, password, email) VALUES (?, ?, ?)";

#[cfg(test)]
pub const COUNT_USERS: &str = "SELECT COUNT(*) FROM users";
