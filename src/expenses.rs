use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::database::Db;
use crate::models::{Expense, ExpenseDraft, RemoteRecord, today};
use crate::utils::{db_error, db_error_with_context, not_found, rejection_error, validation_error};

const SELECT_EXPENSES: &str =
    "SELECT id, amount, category, description, date FROM expenses ORDER BY rowid";

pub fn extract_expense_from_row(row: libsql::Row) -> Result<RemoteRecord, (StatusCode, String)> {
    let id: String = row
        .get(0)
        .map_err(|e| db_error_with_context(&format!("failed to get expense id: {}", e)))?;
    let amount: f64 = row
        .get(1)
        .map_err(|e| db_error_with_context(&format!("failed to get expense amount: {}", e)))?;
    let category: String = row
        .get(2)
        .map_err(|e| db_error_with_context(&format!("failed to get expense category: {}", e)))?;
    let description: String = row.get(3).map_err(|e| {
        db_error_with_context(&format!("failed to get expense description: {}", e))
    })?;
    let date: String = row
        .get(4)
        .map_err(|e| db_error_with_context(&format!("failed to get expense date: {}", e)))?;

    Ok(RemoteRecord {
        id,
        expense: Expense {
            amount,
            category,
            description,
            date,
        },
    })
}

pub async fn list_expenses(
    State(db): State<Db>,
) -> Result<(StatusCode, Json<Vec<RemoteRecord>>), (StatusCode, String)> {
    let conn = db.read().await;
    let mut rows = conn
        .query(SELECT_EXPENSES, ())
        .await
        .map_err(|_| db_error_with_context("failed to query expenses"))?;

    let mut expenses = Vec::new();
    while let Some(row) = rows.next().await.map_err(|_| db_error())? {
        expenses.push(extract_expense_from_row(row)?);
    }

    Ok((StatusCode::OK, Json(expenses)))
}

#[instrument(skip(db, payload))]
pub async fn create_expense(
    State(db): State<Db>,
    payload: Result<Json<ExpenseDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<RemoteRecord>), (StatusCode, String)> {
    let Json(payload) = payload.map_err(rejection_error)?;
    // Validation and defaults shared with the client
    let expense = payload.into_expense(today()).map_err(validation_error)?;

    let id = Uuid::new_v4().to_string();
    let conn = db.write().await;
    conn.execute(
        "INSERT INTO expenses (id, amount, category, description, date) VALUES (?, ?, ?, ?, ?)",
        (
            id.as_str(),
            expense.amount,
            expense.category.as_str(),
            expense.description.as_str(),
            expense.date.as_str(),
        ),
    )
    .await
    .map_err(|_| db_error_with_context("expense creation failed"))?;

    info!(id = %id, category = %expense.category, "expense created");
    Ok((StatusCode::CREATED, Json(RemoteRecord { id, expense })))
}

#[instrument(skip(db, payload))]
pub async fn update_expense(
    State(db): State<Db>,
    Path(id): Path<String>,
    payload: Result<Json<ExpenseDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<RemoteRecord>), (StatusCode, String)> {
    let Json(payload) = payload.map_err(rejection_error)?;
    let expense = payload.into_expense(today()).map_err(validation_error)?;

    let conn = db.write().await;
    let affected_rows = conn
        .execute(
            "UPDATE expenses SET amount = ?, category = ?, description = ?, date = ? WHERE id = ?",
            (
                expense.amount,
                expense.category.as_str(),
                expense.description.as_str(),
                expense.date.as_str(),
                id.as_str(),
            ),
        )
        .await
        .map_err(|_| db_error_with_context("expense update failed"))?;

    if affected_rows == 0 {
        return Err(not_found());
    }

    info!(id = %id, "expense updated");
    Ok((StatusCode::OK, Json(RemoteRecord { id, expense })))
}

#[instrument(skip(db))]
pub async fn delete_expense(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let conn = db.write().await;
    let affected_rows = conn
        .execute("DELETE FROM expenses WHERE id = ?", [id.as_str()])
        .await
        .map_err(|_| db_error_with_context("expense deletion failed"))?;

    if affected_rows == 0 {
        return Err(not_found());
    }

    info!(id = %id, "expense deleted");
    Ok(StatusCode::NO_CONTENT)
}
