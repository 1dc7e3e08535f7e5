use crate::domain::{User, UserId};
use crate::ports::user_directory::{Result, UserDirectory as UserDirectoryTrait};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

/// UserDirectoryのPostgreSQL実装
pub struct UserDirectory {
    pool: PgPool,
}

impl UserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectoryTrait for UserDirectory {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| User {
            id: UserId::new(row.get("id")),
            name: row.get("name"),
            email: row.get("email"),
        }))
    }
}
