//! Optional enhanced-analysis service client
//!
//! The service annotates a completed page result with business-impact and
//! remediation data. It is best-effort: the executor logs failures and moves
//! on without an annotation.

use crate::config::EnhancementConfig;
use crate::scan::engine::{http_error, service_base};
use crate::scan::types::{EnhancedAnalysis, ScanResult};
use crate::EngineError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// HTTP client for the enhanced-analysis service
#[derive(Debug, Clone)]
pub struct HttpEnhancer {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpEnhancer {
    /// Creates an enhancer from its configuration section
    pub fn new(config: &EnhancementConfig) -> Result<Self, crate::SweepError> {
        let endpoint = service_base(&config.api_url)?.join("api/enhance")?;
        let timeout = Duration::from_secs(config.timeout_secs);

        Ok(Self {
            client: Client::builder().connect_timeout(timeout).build()?,
            endpoint,
            api_key: config.api_key.clone(),
            timeout,
        })
    }

    /// Requests an annotation for one completed page result
    pub async fn enhance(&self, result: &ScanResult) -> Result<EnhancedAnalysis, EngineError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .timeout(self.timeout)
            .json(result);

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                EngineError::Timeout {
                    seconds: self.timeout.as_secs(),
                }
            } else {
                EngineError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(http_error(status, response.text().await.unwrap_or_default()));
        }

        response
            .json::<EnhancedAnalysis>()
            .await
            .map_err(|e| EngineError::InvalidResponse(e.to_string()))
    }
}
