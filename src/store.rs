//! Course store: the document collection the query service reads from.
//!
//! PostgreSQL keeps one JSONB document per course in `<schema>.<collection>`. The in-memory store
//! holds a fixed snapshot (fixture file or tests).

use crate::error::{AppError, StoreError};
use crate::model::{decode_course, Course};
use crate::service::{Audit, CourseValidator};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{ConnectOptions, PgPool};
use std::future::Future;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Every stored course. Order is whatever the backend yields and must not be relied upon.
    async fn find_all(&self) -> Result<Vec<Course>, StoreError>;

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

pub struct PgCourseStore {
    pool: PgPool,
    table: String,
    timeout: Duration,
}

impl PgCourseStore {
    /// `schema` and `collection` must already be validated identifiers.
    pub fn new(pool: PgPool, schema: &str, collection: &str, timeout: Duration) -> Self {
        PgCourseStore {
            pool,
            table: format!("{}.{}", schema, collection),
            timeout,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Close the pool; in-flight reads finish, new ones fail as unavailable.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Read the whole collection once and report undecodable or invalid documents as warnings.
    /// Returns how many documents decoded.
    pub async fn audit(&self) -> Result<usize, StoreError> {
        let courses = self.read_all(Audit::Startup).await?;
        Ok(courses.len())
    }

    async fn read_all(&self, audit: Audit) -> Result<Vec<Course>, StoreError> {
        let sql = format!("SELECT id, doc FROM {}", self.table);
        let rows: Vec<(i64, Value)> = self
            .bounded(sqlx::query_as(&sql).fetch_all(&self.pool))
            .await?;
        Ok(decode_documents(
            rows.into_iter().map(|(id, doc)| (format!("{} id {}", self.table, id), doc)),
            audit,
        ))
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        bounded(self.timeout, fut).await
    }
}

#[async_trait]
impl CourseStore for PgCourseStore {
    async fn find_all(&self) -> Result<Vec<Course>, StoreError> {
        self.read_all(Audit::Request).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.bounded(sqlx::query("SELECT 1").execute(&self.pool))
            .await
            .map(|_| ())
    }
}

/// Run `fut` with a deadline; expiry is reported as the store being unavailable.
pub async fn bounded<T, F>(timeout: Duration, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result.map_err(StoreError::from),
        Err(_) => Err(StoreError::Unavailable(format!(
            "no response within {} ms",
            timeout.as_millis()
        ))),
    }
}

/// Decode raw documents into courses. Undecodable documents are logged and skipped;
/// decodable ones with invariant violations are logged and kept. `audit` sets the log level.
pub fn decode_documents<I>(docs: I, audit: Audit) -> Vec<Course>
where
    I: IntoIterator<Item = (String, Value)>,
{
    let mut out = Vec::new();
    for (label, doc) in docs {
        match decode_course(doc) {
            Ok(course) => {
                CourseValidator::report(&course, audit);
                out.push(course);
            }
            Err(e) => audit.note(format_args!("skipping course document {}: {}", label, e)),
        }
    }
    out
}

/// Fixed snapshot of courses.
#[derive(Clone, Debug, Default)]
pub struct MemoryCourseStore {
    courses: Vec<Course>,
}

impl MemoryCourseStore {
    pub fn new(courses: Vec<Course>) -> Self {
        MemoryCourseStore { courses }
    }

    /// Load a JSON array of course documents. Documents are decoded like stored ones.
    pub async fn from_fixture(path: &Path) -> Result<Self, StoreError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::Decode(format!("{}: {}", path.display(), e)))?;
        let docs: Value = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Decode(format!("{}: {}", path.display(), e)))?;
        let Value::Array(docs) = docs else {
            return Err(StoreError::Decode(format!(
                "{}: expected a JSON array of course documents",
                path.display()
            )));
        };
        let courses = decode_documents(
            docs.into_iter()
                .enumerate()
                .map(|(i, doc)| (format!("{}[{}]", path.display(), i), doc)),
            Audit::Startup,
        );
        tracing::info!("loaded {} courses from {}", courses.len(), path.display());
        Ok(MemoryCourseStore { courses })
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[async_trait]
impl CourseStore for MemoryCourseStore {
    async fn find_all(&self) -> Result<Vec<Course>, StoreError> {
        Ok(self.courses.clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Create the schema and the course collection table if missing. Identifiers must be validated.
pub async fn ensure_collection(pool: &PgPool, schema: &str, collection: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", schema))
        .execute(pool)
        .await?;
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {}.{} (
            id BIGSERIAL PRIMARY KEY,
            doc JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        schema, collection
    );
    sqlx::query(&ddl).execute(pool).await?;
    tracing::info!("course collection {}.{} ready", schema, collection);
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
/// Each round trip, including the connect, is bounded by `timeout`.
pub async fn ensure_database_exists(database_url: &str, timeout: Duration) -> Result<(), AppError> {
    let (admin_url, db_name) = split_database_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)?;
    let mut conn: sqlx::PgConnection = bounded(timeout, opts.connect()).await?;
    let exists: (bool,) = bounded(
        timeout,
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn),
    )
    .await?;
    if !exists.0 {
        bounded(
            timeout,
            sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name))).execute(&mut conn),
        )
        .await?;
        tracing::info!("created database {}", db_name);
    }
    Ok(())
}

/// Split a connection URL into (admin URL on the `postgres` database, target database name).
fn split_database_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| AppError::Db(sqlx::Error::Configuration("DATABASE_URL has no database path".into())))?;
    let rest = &url[path_start..];
    let (db_name, query) = match rest.split_once('?') {
        Some((name, q)) => (name.trim(), Some(q)),
        None => (rest.trim(), None),
    };
    let mut admin_url = format!("{}postgres", &url[..path_start]);
    if let Some(q) = query {
        admin_url.push('?');
        admin_url.push_str(q);
    }
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
