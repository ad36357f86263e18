//! PostgreSQL-backed student store and DDL bootstrap.

use super::{StudentStore, STUDENT_TABLE};
use crate::error::{AppError, ConfigError};
use crate::model::Student;
use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const COLUMNS: &str = "id, name, address";

#[derive(Clone)]
pub struct PgStudentStore {
    pool: PgPool,
}

impl PgStudentStore {
    pub fn new(pool: PgPool) -> Self {
        PgStudentStore { pool }
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", COLUMNS, STUDENT_TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Student>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Student, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, STUDENT_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound(id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Student>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE name = $1 ORDER BY id", COLUMNS, STUDENT_TABLE);
        tracing::debug!(sql = %sql, name, "query");
        let rows = sqlx::query_as::<_, Student>(&sql)
            .bind(name)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn save(&self, student: &Student) -> Result<Student, AppError> {
        if student.is_unassigned() {
            let sql = format!(
                "INSERT INTO {} (name, address) VALUES ($1, $2) RETURNING {}",
                STUDENT_TABLE, COLUMNS
            );
            tracing::debug!(sql = %sql, "query");
            let row = sqlx::query_as::<_, Student>(&sql)
                .bind(&student.name)
                .bind(&student.address)
                .fetch_one(&self.pool)
                .await?;
            return Ok(row);
        }

        let upsert = format!(
            "INSERT INTO {} (id, name, address) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, address = EXCLUDED.address \
             RETURNING {}",
            STUDENT_TABLE, COLUMNS
        );
        // Explicit ids bypass the serial sequence; move it past them so later inserts don't collide.
        let advance = format!(
            "SELECT setval(pg_get_serial_sequence('{t}', 'id'), GREATEST((SELECT MAX(id) FROM {t}), 1))",
            t = STUDENT_TABLE
        );
        tracing::debug!(sql = %upsert, id = student.id, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Student>(&upsert)
            .bind(student.id)
            .bind(&student.name)
            .bind(&student.address)
            .fetch_one(&mut *tx)
            .await?;
        sqlx::query(&advance).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", STUDENT_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Create the `student` table if it does not exist.
pub async fn ensure_student_table(pool: &PgPool) -> Result<(), AppError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id SERIAL PRIMARY KEY,
            name TEXT,
            address TEXT
        )
        "#,
        STUDENT_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
/// A URL without a database path leaves the server default in place and creates nothing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some(target) = split_database_url(database_url)? else {
        return Ok(());
    };
    if target.db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&target.admin_url).map_err(|_| invalid_url(database_url))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&target.db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %target.db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&target.db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
struct DatabaseTarget {
    /// Same server and query parameters, pointed at the `postgres` maintenance database.
    admin_url: String,
    db_name: String,
}

fn invalid_url(url: &str) -> ConfigError {
    ConfigError::Invalid {
        name: "DATABASE_URL",
        value: url.to_string(),
    }
}

/// Split `scheme://authority/db?query` into the database name and an admin URL.
/// `None` when the URL names no database.
fn split_database_url(url: &str) -> Result<Option<DatabaseTarget>, ConfigError> {
    let authority_start = url.find("://").ok_or_else(|| invalid_url(url))? + 3;
    let Some(slash) = url[authority_start..].find('/') else {
        return Ok(None);
    };
    let path_start = authority_start + slash + 1;
    let path_end = url[path_start..].find('?').map_or(url.len(), |i| path_start + i);
    let db_name = &url[path_start..path_end];
    if db_name.is_empty() {
        return Ok(None);
    }
    Ok(Some(DatabaseTarget {
        admin_url: format!("{}postgres{}", &url[..path_start], &url[path_end..]),
        db_name: db_name.to_string(),
    }))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
