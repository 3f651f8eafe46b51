use crate::config::PRODUCTS_ENDPOINT;
use crate::http::build_client;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Error)]
pub enum ListingError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("listing rejected: {0}")]
    Rejected(String),
}

/// Payload of the create-listing call. `image` is the cover (first reconciled
/// identifier), `images` the full ordered list.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingRequest {
    pub seller_id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub images: Vec<String>,
    pub status: &'static str,
}

pub const LISTING_STATUS_AVAILABLE: &str = "available";

/// Seam over the listing-creation endpoint. `create` returns the identifier
/// of the created record.
#[async_trait]
pub trait ListingApi: Send + Sync {
    async fn create(&self, request: &CreateListingRequest) -> Result<String, ListingError>;
}

#[derive(Debug, Clone)]
pub struct ListingClient {
    http: Client,
}

impl ListingClient {
    pub fn new() -> Self {
        Self {
            http: build_client(),
        }
    }
}

impl Default for ListingClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingApi for ListingClient {
    async fn create(&self, request: &CreateListingRequest) -> Result<String, ListingError> {
        let response = self
            .http
            .post(PRODUCTS_ENDPOINT.as_str())
            .json(request)
            .send()
            .await
            .map_err(|err| ListingError::Request(err.to_string()))?;
        if !response.status().is_success() {
            return Err(ListingError::Rejected(format!("HTTP {}", response.status())));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| ListingError::Rejected(err.to_string()))?;
        let listing_id = created_id_from_body(&body)
            .ok_or_else(|| ListingError::Rejected("missing created id".into()))?;
        info!(
            target = "bazaar.listings",
            listing_id = %listing_id,
            images = request.images.len(),
            "listing created"
        );
        Ok(listing_id)
    }
}

/// A response counts as success only when it carries a non-empty created id.
fn created_id_from_body(body: &Value) -> Option<String> {
    let id = body.get("data")?.get("id")?;
    match id {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
