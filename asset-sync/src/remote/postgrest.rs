//! PostgrestRemote - reqwest client for a PostgREST / Supabase table

use super::{RemoteError, RemoteResult, RemoteStore};
use crate::core::RemoteConfig;
use crate::utils::AppError;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use shared::models::{AssetRecordComplete, AssetStatus};
use std::time::Duration;

/// HTTP adapter for the remote `assets` table
pub struct PostgrestRemote {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl PostgrestRemote {
    pub fn new(config: &RemoteConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/rest/v1/{}",
                config.base_url.trim_end_matches('/'),
                config.table
            ),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send(&self, request: RequestBuilder) -> RemoteResult<Response> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Rejected {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(response)
    }

    async fn rows(&self, request: RequestBuilder) -> RemoteResult<Vec<AssetRecordComplete>> {
        let response = self.send(request).await?;
        response
            .json::<Vec<AssetRecordComplete>>()
            .await
            .map_err(|e| RemoteError::Decode(format!("Failed to parse asset rows: {e}")))
    }

    fn select(&self) -> RequestBuilder {
        self.client.get(&self.endpoint).query(&[("select", "*")])
    }
}

fn id_filter(id: i64) -> [(&'static str, String); 1] {
    [("id", format!("eq.{id}"))]
}

#[async_trait]
impl RemoteStore for PostgrestRemote {
    async fn insert(&self, asset: &AssetRecordComplete) -> RemoteResult<AssetRecordComplete> {
        let request = self
            .client
            .post(&self.endpoint)
            .header("Prefer", "return=representation")
            .json(asset);
        self.rows(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RemoteError::Decode("insert returned no representation".into()))
    }

    async fn update(&self, asset: &AssetRecordComplete) -> RemoteResult<AssetRecordComplete> {
        let request = self
            .client
            .patch(&self.endpoint)
            .query(&id_filter(asset.id))
            .header("Prefer", "return=representation")
            .json(asset);
        self.rows(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RemoteError::NotFound(format!("Asset {} not found remotely", asset.id)))
    }

    async fn delete(&self, id: i64) -> RemoteResult<bool> {
        let request = self
            .client
            .delete(&self.endpoint)
            .query(&id_filter(id))
            .header("Prefer", "return=representation");
        Ok(!self.rows(request).await?.is_empty())
    }

    async fn list_all(&self) -> RemoteResult<Vec<AssetRecordComplete>> {
        self.rows(self.select()).await
    }

    async fn get_by_id(&self, id: i64) -> RemoteResult<Option<AssetRecordComplete>> {
        let rows = self.rows(self.select().query(&id_filter(id))).await?;
        Ok(rows.into_iter().next())
    }

    async fn list_by_category(&self, category: &str) -> RemoteResult<Vec<AssetRecordComplete>> {
        let request = self
            .select()
            .query(&[("category", format!("eq.{category}"))]);
        self.rows(request).await
    }

    async fn list_by_status(&self, status: AssetStatus) -> RemoteResult<Vec<AssetRecordComplete>> {
        let request = self.select().query(&[("status", format!("eq.{status}"))]);
        self.rows(request).await
    }
}
