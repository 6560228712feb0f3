//! PostgreSQL-backed student store. A session is one transaction.

use super::{StudentSession, StudentStore};
use crate::error::{AppError, ConfigError};
use crate::model::Student;
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgPool, Postgres, Transaction};
use std::str::FromStr;

pub const STUDENTS_TABLE: &str = "students";

const SELECT_ALL: &str = "SELECT id, first_name, last_name, age FROM students ORDER BY id";
const SELECT_BY_ID: &str = "SELECT id, first_name, last_name, age FROM students WHERE id = $1";
const INSERT: &str = "INSERT INTO students (id, first_name, last_name, age) VALUES ($1, $2, $3, $4)";
const UPDATE: &str = "UPDATE students SET first_name = $2, last_name = $3, age = $4 WHERE id = $1";
const DELETE: &str = "DELETE FROM students WHERE id = $1";

#[derive(Clone, Debug)]
pub struct PgStudentStore {
    pool: PgPool,
}

impl PgStudentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn begin(&self) -> Result<Box<dyn StudentSession>, AppError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgStudentSession { tx }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

pub struct PgStudentSession {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StudentSession for PgStudentSession {
    async fn list(&mut self) -> Result<Vec<Student>, AppError> {
        tracing::debug!(sql = %SELECT_ALL, "query");
        let rows = sqlx::query_as::<_, Student>(SELECT_ALL)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&mut self, id: i32) -> Result<Option<Student>, AppError> {
        tracing::debug!(sql = %SELECT_BY_ID, id, "query");
        let row = sqlx::query_as::<_, Student>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn insert(&mut self, student: &Student) -> Result<(), AppError> {
        tracing::debug!(sql = %INSERT, params = ?student, "query (tx)");
        sqlx::query(INSERT)
            .bind(student.id)
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(student.age)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| AppError::from_insert(e, student.id))?;
        Ok(())
    }

    async fn update(&mut self, id: i32, student: &Student) -> Result<bool, AppError> {
        tracing::debug!(sql = %UPDATE, id, params = ?student, "query (tx)");
        let done = sqlx::query(UPDATE)
            .bind(id)
            .bind(&student.first_name)
            .bind(&student.last_name)
            .bind(student.age)
            .execute(&mut *self.tx)
            .await?;
        Ok(done.rows_affected() > 0)
    }

    async fn delete(&mut self, id: i32) -> Result<bool, AppError> {
        tracing::debug!(sql = %DELETE, id, "query (tx)");
        let done = sqlx::query(DELETE).bind(id).execute(&mut *self.tx).await?;
        Ok(done.rows_affected() > 0)
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }
}

/// Create the `students` table if it does not exist yet.
pub async fn ensure_students_table(pool: &PgPool) -> Result<(), AppError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id INTEGER PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            age INTEGER NOT NULL
        )
        "#,
        STUDENTS_TABLE
    );
    tracing::debug!(sql = %ddl, "ddl");
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

/// Connect to the `postgres` maintenance database and create the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::ConnectionString(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
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

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let scheme_end = url
        .find("://")
        .ok_or_else(|| ConfigError::ConnectionString("missing scheme".into()))?
        + 3;
    let path_start = match url[scheme_end..].find('/') {
        Some(i) => scheme_end + i + 1,
        None => return Ok((url.to_string(), String::new())),
    };
    let db_name = url[path_start..].split('?').next().unwrap_or("").trim();
    let admin_url = format!("{}postgres", &url[..path_start]);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
