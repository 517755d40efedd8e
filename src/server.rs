use axum::{
    Router,
    routing::{get, put},
};
use tower_http::cors::CorsLayer;

use crate::constants::API_BASE_PATH;
use crate::database::Db;
use crate::expenses;

pub fn router(db: Db) -> Router {
    let item_path = format!("{}/{{id}}", API_BASE_PATH);

    Router::new()
        .route(
            API_BASE_PATH,
            get(expenses::list_expenses).post(expenses::create_expense),
        )
        .route(
            &item_path,
            put(expenses::update_expense).delete(expenses::delete_expense),
        )
        .layer(CorsLayer::permissive())
        .with_state(db)
}
