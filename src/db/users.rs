//! The `users` table.

use serde::{Deserialize, Serialize};

use super::{queries, Database, DbError};

/// A user as submitted to and echoed by the API.
///
/// The password is stored exactly as received.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("email", &self.email)
            .finish()
    }
}

impl Database {
    /// Insert one user row. No uniqueness check is made here.
    pub async fn insert_user(&self, user: &User) -> Result<(), DbError> {
        let mut cursor = self.cursor().await?;
        sqlx::query(queries::INSERT_USER)
            .bind(&user.username)
            .bind(&user.password)
            .bind(&user.email)
            .execute(&mut *cursor)
            .await?;
        cursor.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) async fn count_users(db: &Database) -> Result<i64, DbError> {
    let mut cursor = db.cursor().await?;
    let count: i64 = sqlx::query_scalar(queries::COUNT_USERS)
        .fetch_one(&mut *cursor)
        .await?;
    Ok(count)
}
