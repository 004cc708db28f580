use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::EngineError;

use super::{TranslationEngine, TranslationRequest, TranslationResponse};

/// HTTP client for a hosted SQL translation service
#[derive(Debug)]
pub struct RemoteEngine {
    /// HTTP client for API requests
    client: Client,

    /// Normalized service endpoint
    endpoint: Url,

    /// API key for authentication
    api_key: String,
}

/// Request body for the translate endpoint
#[derive(Debug, Serialize)]
struct TranslateBody {
    /// Source dialect identifier
    source_dialect: String,

    /// Target dialect identifier
    target_dialect: String,

    /// File name, echoed back by the service
    file_name: String,

    /// Preprocessed SQL text
    content: String,
}

/// Response body from the translate endpoint
#[derive(Debug, Deserialize)]
struct TranslatedBody {
    /// Translated SQL text
    content: String,
}

impl RemoteEngine {
    /// Create a new remote engine client
    ///
    /// A bare `host:port` endpoint is accepted and normalized to `http://`.
    pub fn new(endpoint: &str, api_key: &str, timeout_secs: u64) -> Result<Self, EngineError> {
        let endpoint = if endpoint.contains("://") {
            Url::parse(endpoint)
        } else {
            Url::parse(&format!("http://{}", endpoint))
        }
        .map_err(|e| EngineError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| EngineError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
        })
    }

    /// Join a path onto the configured endpoint
    fn api_url(&self, path: &str) -> Result<Url, EngineError> {
        self.endpoint
            .join(path)
            .map_err(|e| EngineError::InvalidEndpoint(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl TranslationEngine for RemoteEngine {
    async fn translate(&self, request: TranslationRequest) -> Result<TranslationResponse, EngineError> {
        let url = self.api_url("v2/translate")?;
        let body = TranslateBody {
            source_dialect: request.source_dialect,
            target_dialect: request.target_dialect,
            file_name: request.file_name,
            content: request.text,
        };

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EngineError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Translation API error ({}): {}", status, message);
            return Err(EngineError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let translated = response
            .json::<TranslatedBody>()
            .await
            .map_err(|e| EngineError::ParseError(e.to_string()))?;

        Ok(TranslationResponse {
            text: translated.content,
        })
    }

    async fn test_connection(&self) -> Result<(), EngineError> {
        let url = self.api_url("v2/health")?;
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| EngineError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::ApiError {
                status_code: status.as_u16(),
                message: "health check failed".to_string(),
            });
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
