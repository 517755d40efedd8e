use reqwest::{Client, Response, StatusCode, Url};
use tracing::{debug, instrument};

use crate::error::ExpenseError;
use crate::models::{Expense, RemoteRecord};
use crate::store::ExpenseBackend;

/// HTTP client for the expense service. One request per operation, no
/// timeout and no retry.
#[derive(Debug, Clone)]
pub struct RemoteService {
    client: Client,
    base: Url,
}

impl RemoteService {
    pub fn new(base_url: &str) -> Result<Self, ExpenseError> {
        let base = Url::parse(base_url)
            .map_err(|e| ExpenseError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ExpenseError::InvalidUrl(base_url.to_string()));
        }
        let client = Client::builder().build()?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn item_url(&self, identifier: &str) -> Result<Url, ExpenseError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ExpenseError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .push(identifier);
        Ok(url)
    }
}

/// Turns a non-success response into `ExpenseError::Status` carrying the body.
async fn check_status(response: Response) -> Result<Response, ExpenseError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ExpenseError::Status { status, message })
}

impl ExpenseBackend for RemoteService {
    type Record = RemoteRecord;

    #[instrument(skip(self), fields(url = %self.base))]
    async fn list(&self) -> Result<Vec<RemoteRecord>, ExpenseError> {
        let response = self.client.get(self.base.clone()).send().await?;
        let records = check_status(response).await?.json().await?;
        Ok(records)
    }

    #[instrument(skip(self, expense), fields(url = %self.base))]
    async fn create(&self, expense: Expense) -> Result<RemoteRecord, ExpenseError> {
        let response = self
            .client
            .post(self.base.clone())
            .json(&expense)
            .send()
            .await?;
        let record: RemoteRecord = check_status(response).await?.json().await?;
        debug!(identifier = %record.id, "remote expense created");
        Ok(record)
    }

    #[instrument(skip(self, expense))]
    async fn update(
        &self,
        identifier: &str,
        expense: Expense,
    ) -> Result<Option<RemoteRecord>, ExpenseError> {
        let response = self
            .client
            .put(self.item_url(identifier)?)
            .json(&expense)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("no remote expense to update");
            return Ok(None);
        }
        let record = check_status(response).await?.json().await?;
        Ok(Some(record))
    }

    #[instrument(skip(self))]
    async fn delete(&self, identifier: &str) -> Result<(), ExpenseError> {
        let response = self.client.delete(self.item_url(identifier)?).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("no remote expense to delete");
            return Ok(());
        }
        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_url_appends_identifier() {
        let service = RemoteService::new("http://127.0.0.1:5000/api/expenses").unwrap();
        assert_eq!(
            service.item_url("abc-123").unwrap().as_str(),
            "http://127.0.0.1:5000/api/expenses/abc-123"
        );

        let trailing = RemoteService::new("http://127.0.0.1:5000/api/expenses/").unwrap();
        assert_eq!(
            trailing.item_url("x").unwrap().as_str(),
            "http://127.0.0.1:5000/api/expenses/x"
        );
    }

    #[test]
    fn item_url_escapes_path_characters() {
        let service = RemoteService::new("http://localhost/api/expenses").unwrap();
        assert_eq!(
            service.item_url("a/b").unwrap().as_str(),
            "http://localhost/api/expenses/a%2Fb"
        );
    }

    #[test]
    fn rejects_unparseable_base() {
        assert!(matches!(
            RemoteService::new("not a url"),
            Err(ExpenseError::InvalidUrl(_))
        ));
        assert!(matches!(
            RemoteService::new("mailto:someone@example.com"),
            Err(ExpenseError::InvalidUrl(_))
        ));
    }
}
