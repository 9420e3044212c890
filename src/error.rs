//! Stable error codes for API callers.

use rusqlite::ErrorCode;
use serde::Serialize;
use thiserror::Error;

/// Why the backing store could not serve a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unavailable {
    #[error("could not open database: {0}")]
    Connect(String),

    #[error("unsupported database location: {0}")]
    Unsupported(String),

    #[error("database schema missing: {0}")]
    SchemaMissing(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(Unavailable),

    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AppError {
    /// Missing or blank required field.
    pub fn missing_field(field: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: format!("{} is required", field),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::Unexpected(_) => "UNEXPECTED_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Text safe to show to the person who submitted the form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::StoreUnavailable(Unavailable::SchemaMissing(_)) => {
                "Database not properly initialized. Please contact IT support.".to_string()
            }
            Self::StoreUnavailable(_) => {
                "Database connection not available. Please try again later.".to_string()
            }
            Self::Unexpected(_) => "Failed to submit request. Please try again.".to_string(),
            Self::Config(msg) => format!("Invalid configuration: {}", msg),
        }
    }

    pub fn to_serde(&self) -> AppErrorDto {
        AppErrorDto {
            code: self.code().to_string(),
            message: self.user_message(),
            field: self.field().map(str::to_string),
        }
    }
}

impl From<Unavailable> for AppError {
    fn from(e: Unavailable) -> Self {
        AppError::StoreUnavailable(e)
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        let text = e.to_string();
        if text.contains("no such table") {
            return AppError::StoreUnavailable(Unavailable::SchemaMissing(text));
        }
        match e.sqlite_error_code() {
            Some(
                ErrorCode::CannotOpen
                | ErrorCode::ReadOnly
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::NotADatabase
                | ErrorCode::DatabaseCorrupt
                | ErrorCode::SystemIoFailure
                | ErrorCode::PermissionDenied,
            ) => AppError::StoreUnavailable(Unavailable::Connect(text)),
            _ => AppError::Unexpected(text),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AppErrorDto {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}
