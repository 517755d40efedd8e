pub mod chart;
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod expenses;
pub mod ledger;
pub mod models;
pub mod repository;
pub mod server;
pub mod store;
pub mod utils;

pub use error::ExpenseError;
pub use models::{Expense, ExpenseDraft, ExpenseRecord, Identified};
pub use repository::{ExpenseRepository, Mode};
