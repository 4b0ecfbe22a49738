use chrono::NaiveDate;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::app_error::{AppError, AppResult};

pub mod campaign;
pub mod customer;
pub mod plan;
pub mod subscription;

/// SQLite keeps the default bound-parameter limit low on older builds.
pub(crate) const MAX_IN_CLAUSE: usize = 500;

/// Read-only access to the ledger database.
#[derive(Clone)]
pub struct SqlitePersistence {
    pool: SqlitePool,
}

impl SqlitePersistence {
    pub fn new(pool: SqlitePool) -> Self {
        SqlitePersistence { pool }
    }
}

/// Reads a `YYYY-MM-DD` text column.
pub(crate) fn get_date(row: &SqliteRow, column: &str) -> AppResult<NaiveDate> {
    let raw: String = row.try_get(column)?;
    parse_stored_date(&raw, column)
}

/// Reads a nullable `YYYY-MM-DD` text column.
pub(crate) fn get_opt_date(row: &SqliteRow, column: &str) -> AppResult<Option<NaiveDate>> {
    let raw: Option<String> = row.try_get(column)?;
    raw.as_deref()
        .map(|value| parse_stored_date(value, column))
        .transpose()
}

fn parse_stored_date(raw: &str, column: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
        tracing::error!(column, value = raw, error = %e, "Stored date does not match YYYY-MM-DD");
        AppError::DataUnavailable(format!("column {column} holds a malformed date"))
    })
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound,
            sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => {
                tracing::error!(error = ?err, "Ledger rows do not match the expected schema");
                AppError::DataUnavailable("Ledger rows do not match the expected schema".into())
            }
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                // SQLite reports a missing table or column at prepare time
                if msg.contains("no such table") || msg.contains("no such column") {
                    tracing::error!(error = ?err, "Ledger schema missing");
                    AppError::DataUnavailable("Ledger schema is missing".into())
                } else {
                    tracing::error!(error = ?err, "Database error");
                    AppError::Database("Database operation failed".into())
                }
            }
            sqlx::Error::Io(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Configuration(_) => {
                tracing::error!(error = ?err, "Ledger database unreachable");
                AppError::DataUnavailable("Ledger database is unreachable".into())
            }
            _ => {
                tracing::error!(error = ?err, "Database error");
                AppError::Database("Database operation failed".into())
            }
        }
    }
}
