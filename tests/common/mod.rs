#![allow(dead_code)]

use expense_tracker::constants::API_BASE_PATH;
use expense_tracker::database::init_db;
use expense_tracker::server::router;
use expense_tracker::store::{LocalStore, RemoteService};
use expense_tracker::{ExpenseRepository, Mode};
use tempfile::{TempDir, tempdir};
use tokio::net::TcpListener;

pub async fn setup_test_environment() -> (String, TempDir) {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let data_path = temp_dir
        .path()
        .to_str()
        .expect("Failed to convert path to string")
        .to_string();

    (data_path, temp_dir)
}

/// Starts the expense service on an ephemeral port backed by a fresh
/// database. Returns the collection URL and the directory holding the DB.
pub async fn spawn_expense_server() -> (String, TempDir) {
    let (data_path, temp_dir) = setup_test_environment().await;
    let db = init_db(&data_path)
        .await
        .unwrap_or_else(|e| panic!("Failed to initialize database at {}: {}", data_path, e));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read listener address");

    tokio::spawn(async move {
        axum::serve(listener, router(db))
            .await
            .expect("Expense server stopped unexpectedly");
    });

    (format!("http://{}{}", addr, API_BASE_PATH), temp_dir)
}

pub fn local_store(temp_dir: &TempDir) -> LocalStore {
    LocalStore::new(temp_dir.path().join("storage"))
}

/// A repository whose local slot lives in a temp dir and whose remote
/// backend is a live test server.
pub async fn setup_repository(mode: Mode) -> (ExpenseRepository, TempDir, TempDir) {
    let (api_url, server_dir) = spawn_expense_server().await;
    let (_, storage_dir) = setup_test_environment().await;
    let remote = RemoteService::new(&api_url).expect("Failed to build remote service");
    let repository = ExpenseRepository::new(mode, local_store(&storage_dir), remote);

    (repository, storage_dir, server_dir)
}

/// A repository whose remote backend points at a closed port.
pub async fn setup_offline_repository(mode: Mode) -> (ExpenseRepository, TempDir) {
    let (_, storage_dir) = setup_test_environment().await;
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Failed to read listener address");
    drop(listener);

    let remote = RemoteService::new(&format!("http://{}{}", addr, API_BASE_PATH))
        .expect("Failed to build remote service");
    let repository = ExpenseRepository::new(mode, local_store(&storage_dir), remote);

    (repository, storage_dir)
}
