use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::log::{LogRecordRow, NewLogRecord};
use crate::models::user::{NewUser, UserRow};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

/// Status-count summary for the dashboard cards: total record count plus
/// counts filtered to the success and failure statuses. Pending records
/// account for the gap between the buckets and the total.
#[derive(Debug, Clone, Copy, Serialize, sqlx::FromRow)]
pub struct StatusCounts {
    pub total: i64,
    pub success: i64,
    pub failure: i64,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    /// Create the store without opening a connection; the pool connects
    /// on first use. Lets tests exercise routes that never touch the
    /// database.
    pub fn connect_lazy(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run pending migrations from the migrations/ directory.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    // -- User Operations --

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password_hash, role, created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Insert a new user. The UNIQUE constraint on `users.email` is the
    /// authority for duplicate detection: a concurrent signup racing past
    /// the handler's pre-check still surfaces as `DuplicateEmail` here.
    pub async fn insert_user(&self, user: &NewUser) -> Result<UserRow, AppError> {
        let result = sqlx::query_as::<_, UserRow>(
            r#"INSERT INTO users (name, email, password_hash, role)
               VALUES ($1, $2, $3, $4)
               RETURNING id, name, email, password_hash, role, created_at, updated_at"#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AppError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    // -- Log Operations --

    pub async fn insert_log(&self, rec: &NewLogRecord) -> Result<Uuid, AppError> {
        rec.validate()?;

        let id = sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO logs (interface_name, integration_key, status, message, timestamp, severity)
               VALUES ($1, $2, $3, $4, COALESCE($5, NOW()), $6)
               RETURNING id"#,
        )
        .bind(&rec.interface_name)
        .bind(&rec.integration_key)
        .bind(rec.status)
        .bind(&rec.message)
        .bind(rec.timestamp)
        .bind(rec.severity)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Most-recent-first page of log records. Callers clamp `skip` and
    /// `limit` through `models::log::page_window` before reaching here.
    pub async fn page_logs(&self, skip: i64, limit: i64) -> Result<Vec<LogRecordRow>, AppError> {
        let rows = sqlx::query_as::<_, LogRecordRow>(
            r#"SELECT id, interface_name, integration_key, status, message, timestamp, severity
               FROM logs
               ORDER BY timestamp DESC
               LIMIT $1 OFFSET $2"#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Three counts, each with an explicit status filter, taken from one
    /// statement so a concurrent insert cannot skew the buckets against
    /// the total.
    pub async fn count_logs_by_status(&self) -> Result<StatusCounts, AppError> {
        let counts = sqlx::query_as::<_, StatusCounts>(
            r#"SELECT COUNT(*) AS total,
                      COUNT(*) FILTER (WHERE status = 'success') AS success,
                      COUNT(*) FILTER (WHERE status = 'failure') AS failure
               FROM logs"#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }
}
