use crate::config::{ASSET_ROOT, UPLOAD_ENDPOINT};
use crate::http::build_client;
use crate::models::PickedFile;
use async_trait::async_trait;
use reqwest::{Client, multipart};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Error)]
pub enum AssetError {
    #[error("upload request failed: {0}")]
    Request(String),
    #[error("invalid upload response: {0}")]
    Deserialize(String),
}

/// What a finished upload contributes to its slot.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadReceipt {
    pub server_id: String,
    pub display_url: String,
}

/// Seam over the file-upload endpoint so the flow can be driven without a
/// network in tests. Implementations must be safe to call concurrently.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(&self, file: PickedFile) -> Result<UploadReceipt, AssetError>;
}

#[derive(Debug, Clone)]
pub struct AssetClient {
    http: Client,
}

impl AssetClient {
    pub fn new() -> Self {
        Self {
            http: build_client(),
        }
    }
}

impl Default for AssetClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageStore for AssetClient {
    async fn upload(&self, file: PickedFile) -> Result<UploadReceipt, AssetError> {
        let file_name = file.file_name.clone();
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|err| AssetError::Request(err.to_string()))?;
        let form = multipart::Form::new()
            .part("files", part)
            .text("ref", "listing");

        let response = self
            .http
            .post(UPLOAD_ENDPOINT.as_str())
            .multipart(form)
            .send()
            .await
            .map_err(|err| AssetError::Request(err.to_string()))?;
        if !response.status().is_success() {
            return Err(AssetError::Request(format!("HTTP {}", response.status())));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| AssetError::Deserialize(err.to_string()))?;
        let receipt = receipt_from_body(&body)?;
        info!(
            target = "bazaar.assets",
            file = %file_name,
            server_id = %receipt.server_id,
            "upload finished"
        );
        Ok(receipt)
    }
}

/// Extracts `{ data: { id, filename } }` and derives the display URL from the
/// asset root. The id is opaque; numeric ids are carried as their decimal
/// rendering.
fn receipt_from_body(body: &Value) -> Result<UploadReceipt, AssetError> {
    let data = body
        .get("data")
        .ok_or_else(|| AssetError::Deserialize("missing data".into()))?;
    let server_id = match data.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Err(AssetError::Deserialize("missing id".into())),
    };
    let filename = data
        .get("filename")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AssetError::Deserialize("missing filename".into()))?;
    Ok(UploadReceipt {
        server_id,
        display_url: format!("{}/{}", *ASSET_ROOT, filename.trim_start_matches('/')),
    })
}
