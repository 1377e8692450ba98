//! Scan engine client
//!
//! The engine is an external service that loads a page in a browser and runs
//! the accessibility rules. This module defines the seam the executor depends
//! on and the HTTP implementation of it.

use crate::scan::types::{EngineResponse, ScanRequest};
use crate::EngineError;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Longest error body carried into an `EngineError::Http`
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Something that can scan one page
///
/// Implementations must keep calls independent: no state from one page scan
/// may leak into the next.
pub trait ScanEngine {
    /// Scans one page
    fn scan(
        &self,
        request: &ScanRequest,
    ) -> impl Future<Output = Result<EngineResponse, EngineError>> + Send;

    /// Checks that the engine is reachable before a run starts
    fn health_check(&self) -> impl Future<Output = Result<(), EngineError>> + Send {
        async { Ok(()) }
    }
}

/// Scan engine reached over HTTP
///
/// - `POST {engine}/api/scan` with a JSON `ScanRequest`
/// - `GET {engine}/health`
///
/// Endpoints are resolved under the base URL's path, so an engine mounted at
/// `http://host/engine` is reached at `http://host/engine/api/scan`.
#[derive(Debug, Clone)]
pub struct HttpScanEngine {
    client: Client,
    engine_url: Url,
    timeout: Duration,
}

impl HttpScanEngine {
    /// Creates an engine client
    ///
    /// # Arguments
    ///
    /// * `engine_url` - Base URL of the engine service
    /// * `timeout` - Per-scan timeout; an elapsed timeout fails only that page
    pub fn new(engine_url: &str, timeout: Duration) -> Result<Self, crate::SweepError> {
        let engine_url = service_base(engine_url)?;
        let client = Client::builder().connect_timeout(timeout).build()?;

        Ok(Self {
            client,
            engine_url,
            timeout,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, EngineError> {
        self.engine_url
            .join(path)
            .map_err(|e| EngineError::Network(format!("Invalid engine URL: {}", e)))
    }

    fn map_send_error(&self, e: reqwest::Error) -> EngineError {
        if e.is_timeout() {
            EngineError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            EngineError::Network(e.to_string())
        }
    }
}

impl ScanEngine for HttpScanEngine {
    async fn scan(&self, request: &ScanRequest) -> Result<EngineResponse, EngineError> {
        let endpoint = self.endpoint("api/scan")?;

        let response = self
            .client
            .post(endpoint)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(http_error(status, response.text().await.unwrap_or_default()));
        }

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        let parsed: EngineResponse = serde_json::from_str(&body)
            .map_err(|e| EngineError::InvalidResponse(e.to_string()))?;

        match parsed.status.as_deref() {
            None => Ok(parsed),
            Some(s) if s.eq_ignore_ascii_case("completed") => Ok(parsed),
            Some(other) => Err(EngineError::Rejected {
                status: other.to_string(),
                message: parsed
                    .error
                    .clone()
                    .unwrap_or_else(|| "no reason given".to_string()),
            }),
        }
    }

    async fn health_check(&self) -> Result<(), EngineError> {
        let endpoint = self.endpoint("health")?;

        let response = self
            .client
            .get(endpoint)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(http_error(status, response.text().await.unwrap_or_default()))
        }
    }
}

/// Parses a service base URL, treating its path as a directory
///
/// Relative endpoint paths joined onto the result keep any path prefix.
pub(crate) fn service_base(raw: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Builds an HTTP error carrying a bounded prefix of the response body
pub(crate) fn http_error(status: StatusCode, body: String) -> EngineError {
    let message = body.trim();
    let message = if message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        message.chars().take(MAX_ERROR_BODY_CHARS).collect()
    };

    EngineError::Http {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_uses_reason_for_empty_body() {
        let error = http_error(StatusCode::SERVICE_UNAVAILABLE, "  ".to_string());
        assert!(matches!(
            error,
            EngineError::Http { status: 503, ref message } if message == "Service Unavailable"
        ));
    }

    #[test]
    fn test_http_error_truncates_body() {
        let error = http_error(StatusCode::INTERNAL_SERVER_ERROR, "x".repeat(1000));
        match error {
            EngineError::Http { message, .. } => assert_eq!(message.len(), MAX_ERROR_BODY_CHARS),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        assert!(HttpScanEngine::new("not a url", Duration::from_secs(5)).is_err());
    }

    #[test]
    fn test_endpoints_keep_base_path() {
        for base in ["http://localhost:3001/engine", "http://localhost:3001/engine/"] {
            let engine = HttpScanEngine::new(base, Duration::from_secs(5)).unwrap();
            assert_eq!(
                engine.endpoint("api/scan").unwrap().as_str(),
                "http://localhost:3001/engine/api/scan"
            );
            assert_eq!(
                engine.endpoint("health").unwrap().as_str(),
                "http://localhost:3001/engine/health"
            );
        }

        let engine = HttpScanEngine::new("http://localhost:3001", Duration::from_secs(5)).unwrap();
        assert_eq!(
            engine.endpoint("api/scan").unwrap().as_str(),
            "http://localhost:3001/api/scan"
        );
    }
}
