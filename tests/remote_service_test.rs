/*!
 * Remote Service Integration Tests
 *
 * Runs the HTTP backend against a live expense service and checks that every
 * failure comes back as an explicit error instead of being swallowed.
 *
 * Test Categories:
 * - CRUD round trips through the backend trait
 * - Unknown identifiers as silent no-ops
 * - Non-success statuses and transport failures
 */

mod common;

use common::*;
use expense_tracker::ExpenseError;
use expense_tracker::models::Expense;
use expense_tracker::store::{ExpenseBackend, RemoteService};
use reqwest::StatusCode;

fn expense(amount: f64, category: &str) -> Expense {
    Expense {
        amount,
        category: category.to_string(),
        description: "Bought online".to_string(),
        date: "2024-06-15".to_string(),
    }
}

#[tokio::test]
async fn create_then_list() {
    let (url, _temp_dir) = spawn_expense_server().await;
    let service = RemoteService::new(&url).unwrap();

    let created = service.create(expense(19.99, "Books")).await.unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.expense, expense(19.99, "Books"));

    let records = service.list().await.unwrap();
    assert_eq!(records, vec![created]);
}

#[tokio::test]
async fn update_and_delete_round_trip() {
    let (url, _temp_dir) = spawn_expense_server().await;
    let service = RemoteService::new(&url).unwrap();
    let first = service.create(expense(5.0, "Coffee")).await.unwrap();
    let second = service.create(expense(60.0, "Fuel")).await.unwrap();

    let updated = service
        .update(&first.id, expense(6.5, "Coffee"))
        .await
        .unwrap()
        .expect("record should exist");
    assert_eq!(updated.id, first.id);
    assert_eq!(updated.expense.amount, 6.5);

    service.delete(&second.id).await.unwrap();

    let records = service.list().await.unwrap();
    assert_eq!(records, vec![updated]);
}

#[tokio::test]
async fn unknown_identifiers_are_noops() {
    let (url, _temp_dir) = spawn_expense_server().await;
    let service = RemoteService::new(&url).unwrap();
    let existing = service.create(expense(1.0, "Misc")).await.unwrap();

    assert!(
        service
            .update("missing", expense(2.0, "Misc"))
            .await
            .unwrap()
            .is_none()
    );
    service.delete("missing").await.unwrap();

    assert_eq!(service.list().await.unwrap(), vec![existing]);
}

#[tokio::test]
async fn rejected_payload_is_status_error() {
    let (url, _temp_dir) = spawn_expense_server().await;
    let service = RemoteService::new(&url).unwrap();

    let err = service.create(expense(-10.0, "Refund")).await.unwrap_err();

    match err {
        ExpenseError::Status { status, message } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(message.contains("negative"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn wrong_endpoint_is_status_error() {
    let (url, _temp_dir) = spawn_expense_server().await;
    let service = RemoteService::new(&format!("{}/nested/collection", url)).unwrap();

    let err = service.list().await.unwrap_err();

    assert!(matches!(err, ExpenseError::Status { status, .. } if status == StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn unreachable_service_is_http_error() {
    let (mut repository, _storage_dir) = setup_offline_repository(expense_tracker::Mode::Remote).await;

    let err = repository.load().await.unwrap_err();

    assert!(matches!(err, ExpenseError::Http(_)));
    assert!(repository.expenses().is_empty());
}
