use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Outcome of an interface execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "log_status", rename_all = "lowercase")]
pub enum LogStatus {
    Success,
    Failure,
    Pending,
}

/// An interface-execution record. Immutable once written.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LogRecordRow {
    pub id: Uuid,
    pub interface_name: String,
    pub integration_key: String,
    pub status: LogStatus,
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub severity: Option<i16>,
}

/// Fields for a log write. Records originate from upstream integration
/// events (or the `seed` command); the API itself never creates them.
#[derive(Debug)]
pub struct NewLogRecord {
    pub interface_name: String,
    pub integration_key: String,
    pub status: LogStatus,
    pub message: Option<String>,
    /// Falls back to the insertion time when absent.
    pub timestamp: Option<DateTime<Utc>>,
    pub severity: Option<i16>,
}

impl NewLogRecord {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.interface_name.is_empty() {
            return Err(AppError::Validation("interfaceName is required".into()));
        }
        if self.integration_key.is_empty() {
            return Err(AppError::Validation("integrationKey is required".into()));
        }
        if let Some(s) = self.severity {
            if !(1..=5).contains(&s) {
                return Err(AppError::Validation(
                    "severity must be between 1 and 5".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Defaults applied when the caller leaves pagination out of range.
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp raw pagination input to a usable (skip, limit) window:
/// negative skip becomes 0; a limit outside (0, 100] becomes 20.
pub fn page_window(skip: Option<i64>, load: Option<i64>) -> (i64, i64) {
    let skip = skip.unwrap_or(0).max(0);
    let load = match load {
        Some(l) if l > 0 && l <= MAX_PAGE_SIZE => l,
        _ => DEFAULT_PAGE_SIZE,
    };
    (skip, load)
}

// ── Tests ───────────────────────────────────────────────────────
