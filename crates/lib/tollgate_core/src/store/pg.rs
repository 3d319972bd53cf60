//! PostgreSQL-backed user store.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{Result, StorageError, UserStore};
use crate::models::UserRecord;

/// User-record store over a `users` table (see `migrations/`).
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type UserRow = (
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    Vec<String>,
);

fn row_to_record(row: UserRow) -> UserRecord {
    let (login, password, name, email, person, roles) = row;
    UserRecord {
        login,
        password,
        name,
        email,
        person,
        roles,
    }
}

fn unavailable(e: sqlx::Error) -> StorageError {
    StorageError::Unavailable(e.to_string())
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn get_user(&self, login: &str) -> Result<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT login, password_hash, name, email, person, roles \
             FROM users WHERE login = $1",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;
        Ok(row.map(row_to_record))
    }

    async fn put_user(&self, record: &UserRecord) -> Result<UserRecord> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (login, password_hash, name, email, person, roles) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (login) DO UPDATE SET \
               password_hash = EXCLUDED.password_hash, \
               name = EXCLUDED.name, \
               email = EXCLUDED.email, \
               person = EXCLUDED.person, \
               roles = EXCLUDED.roles \
             RETURNING login, password_hash, name, email, person, roles",
        )
        .bind(&record.login)
        .bind(&record.password)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.person)
        .bind(&record.roles)
        .fetch_one(&self.pool)
        .await
        .map_err(unavailable)?;
        Ok(row_to_record(row))
    }

    async fn delete_user(&self, login: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE login = $1")
            .bind(login)
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
