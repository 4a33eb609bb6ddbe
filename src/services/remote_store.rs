//! Hosted table store speaking the PostgREST dialect (Supabase and friends).

use crate::{
    config::RemoteStoreConfig, error::StoreError, models::VisitRecord, services::store::LogStore,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

/// One row per visit in a remote table
pub struct RemoteLogStore {
    client: Client,
    table_url: String,
    api_key: String,
}

impl RemoteLogStore {
    /// Create a store for the configured table
    pub fn new(config: RemoteStoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(5)))
            .build()
            .map_err(|e| StoreError::Client(e.to_string()))?;

        Ok(Self {
            client,
            table_url: config.table_url(),
            api_key: config.api_key,
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check_status(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::RemoteStatus {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl LogStore for RemoteLogStore {
    fn backend(&self) -> &'static str {
        "remote"
    }

    async fn append(&self, record: &VisitRecord) -> Result<(), StoreError> {
        let request = self
            .client
            .post(&self.table_url)
            .header("Prefer", "return=minimal")
            .json(record);

        let response = self.authorized(request).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<VisitRecord>, StoreError> {
        let request = self
            .client
            .get(&self.table_url)
            .query(&[("select", "*"), ("order", "timestamp.desc")]);

        let response = self.authorized(request).send().await?;
        let response = Self::check_status(response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
