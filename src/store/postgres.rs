//! PostgreSQL-backed store plus startup helpers (database creation, table bootstrap).

use super::Store;
use crate::config::DatabaseConfig;
use crate::error::AppError;
use crate::model::{Item, ItemInput, NewUser, User};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::time::Duration;

const USERS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL
    )
"#;

// user_id carries no foreign key: items may reference users that do not exist.
const ITEMS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS items (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        author TEXT NOT NULL,
        description TEXT NOT NULL,
        user_id BIGINT NOT NULL
    )
"#;

const ITEMS_USER_INDEX_DDL: &str = "CREATE INDEX IF NOT EXISTS items_user_id_idx ON items (user_id)";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

/// Build a pool without connecting. Connectivity problems surface per request, not at startup,
/// and a request waits at most `acquire_timeout` for a connection.
pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let opts = config.connect_options()?;
    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy_with(opts))
}

/// Create the target database through the `postgres` maintenance database if it is missing.
pub async fn ensure_database_exists(opts: &PgConnectOptions, connect_timeout: Duration) -> Result<(), AppError> {
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(()),
    };
    let mut conn = tokio::time::timeout(connect_timeout, opts.clone().database("postgres").connect())
        .await
        .map_err(|_| {
            sqlx::Error::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "connecting to the maintenance database timed out",
            ))
        })??;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Create `users` and `items` if they do not exist. Idempotent; never alters existing tables.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in [USERS_DDL, ITEMS_DDL, ITEMS_USER_INDEX_DDL] {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = "SELECT id, name, email, password FROM users WHERE email = $1 ORDER BY id LIMIT 1";
        tracing::debug!(sql = %sql, email = %email, "query");
        let user = sqlx::query_as::<_, User>(sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: &NewUser) -> Result<i64, AppError> {
        let sql = "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING id";
        tracing::debug!(sql = %sql, email = %user.email, "query");
        let row: Result<(i64,), sqlx::Error> = sqlx::query_as(sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await;
        match row {
            Ok((id,)) => Ok(id),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::Conflict(format!("email already registered: {}", user.email)))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn create_item(&self, item: &ItemInput) -> Result<i64, AppError> {
        let sql = "INSERT INTO items (name, author, description, user_id) VALUES ($1, $2, $3, $4) RETURNING id";
        tracing::debug!(sql = %sql, user_id = item.user_id, "query");
        let (id,): (i64,) = sqlx::query_as(sql)
            .bind(&item.name)
            .bind(&item.author)
            .bind(&item.description)
            .bind(item.user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update_item(&self, id: i64, item: &ItemInput) -> Result<u64, AppError> {
        let sql = "UPDATE items SET name = $1, author = $2, description = $3, user_id = $4 WHERE id = $5";
        tracing::debug!(sql = %sql, id, user_id = item.user_id, "query");
        let result = sqlx::query(sql)
            .bind(&item.name)
            .bind(&item.author)
            .bind(&item.description)
            .bind(item.user_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn items_for_user(&self, user_id: i64) -> Result<Vec<Item>, AppError> {
        let sql = "SELECT id, name, author, description, user_id FROM items WHERE user_id = $1 ORDER BY id";
        tracing::debug!(sql = %sql, user_id, "query");
        let items = sqlx::query_as::<_, Item>(sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn delete_item(&self, id: i64) -> Result<u64, AppError> {
        let sql = "DELETE FROM items WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("garden"), "\"garden\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[tokio::test]
    async fn lazy_pool_does_not_connect() {
        let config = DatabaseConfig {
            host: "127.0.0.1".into(),
            port: 1,
            ..DatabaseConfig::default()
        };
        let pool = connect_lazy(&config).unwrap();
        assert_eq!(pool.size(), 0);
    }

    #[tokio::test]
    async fn unreachable_database_fails_within_acquire_timeout() {
        let config = DatabaseConfig {
            host: "127.0.0.1".into(),
            port: 1,
            acquire_timeout: Duration::from_millis(200),
            ..DatabaseConfig::default()
        };
        let pool = connect_lazy(&config).unwrap();
        let outcome = tokio::time::timeout(Duration::from_secs(5), ensure_tables(&pool)).await;
        assert!(matches!(outcome, Ok(Err(AppError::Db(_)))));

        let opts = config.connect_options().unwrap();
        let outcome = tokio::time::timeout(
            Duration::from_secs(5),
            ensure_database_exists(&opts, config.acquire_timeout),
        )
        .await;
        assert!(matches!(outcome, Ok(Err(AppError::Db(_)))));
    }
}
