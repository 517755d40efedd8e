use axum::{extract::rejection::JsonRejection, http::StatusCode};

use crate::constants::*;
use crate::error::ExpenseError;

pub fn db_error() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ERR_DATABASE_OPERATION.to_string(),
    )
}

pub fn db_error_with_context(context: &str) -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Database error: {}", context),
    )
}

pub fn not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, ERR_EXPENSE_NOT_FOUND.to_string())
}

pub fn validation_error(error: ExpenseError) -> (StatusCode, String) {
    match error {
        ExpenseError::Validation(message) => (StatusCode::BAD_REQUEST, message),
        other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

/// Unreadable request bodies are client errors, whatever axum's own status.
pub fn rejection_error(rejection: JsonRejection) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, rejection.body_text())
}
