//! Persistence backends for the expense collection.
//!
//! Both backends expose the same four operations over their own identifier
//! scheme: the local slot mints timestamp identifiers, the remote service
//! hands them out on create.

use crate::error::ExpenseError;
use crate::models::{Expense, ExpenseRecord, Identified};

pub mod local;
pub mod remote;

pub use local::LocalStore;
pub use remote::RemoteService;

#[allow(async_fn_in_trait)]
pub trait ExpenseBackend {
    type Record: Identified + Into<ExpenseRecord>;

    /// Returns the whole collection in stored order.
    async fn list(&self) -> Result<Vec<Self::Record>, ExpenseError>;

    async fn create(&self, expense: Expense) -> Result<Self::Record, ExpenseError>;

    /// Replaces the expense stored under `identifier`. `Ok(None)` when no
    /// such record exists.
    async fn update(
        &self,
        identifier: &str,
        expense: Expense,
    ) -> Result<Option<Self::Record>, ExpenseError>;

    /// Deleting an unknown identifier is not an error.
    async fn delete(&self, identifier: &str) -> Result<(), ExpenseError>;
}
