//! HTTP request helper - all backend traffic funnels through `ApiClient`

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::error::SmokeResult;

/// Deployment the suite runs against when no `--base-url` is given.
pub const DEFAULT_BASE_URL: &str = "https://posmate-4.preview.emergentagent.com/api";

/// Per-request timeout. Every failure past this point is terminal for the
/// calling test case only.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of a single JSON exchange with the backend.
///
/// Transport faults and non-2xx statuses are folded into `success == false`
/// with a message; they never surface as an `Err` to the caller.
#[derive(Debug)]
pub struct Exchange {
    /// True iff the response status was in the 200-299 range.
    pub success: bool,
    /// Parsed JSON body, when the response body was JSON-decodable.
    pub data: Option<Value>,
    /// Status and embedded `error` field, or the transport error message.
    pub error: Option<String>,
}

impl Exchange {
    fn transport(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }

    /// Classify a completed response by status code, surfacing any `error`
    /// field the backend put in a JSON error body.
    fn classify(status: StatusCode, data: Option<Value>) -> Self {
        if status.is_success() {
            return Self {
                success: true,
                data,
                error: None,
            };
        }

        let mut message = format!("status {}", status.as_u16());
        if let Some(reason) = data
            .as_ref()
            .and_then(|body| body.get("error"))
            .and_then(Value::as_str)
        {
            message = format!("{}: {}", message, reason);
        }

        Self {
            success: false,
            data,
            error: Some(message),
        }
    }
}

/// Outcome of fetching a binary payload (barcode PNG, invoice PDF).
#[derive(Debug)]
pub struct RawExchange {
    pub success: bool,
    pub status: Option<u16>,
    pub content_type: String,
    pub body: Bytes,
    pub error: Option<String>,
}

impl RawExchange {
    fn transport(message: String) -> Self {
        Self {
            success: false,
            status: None,
            content_type: String::new(),
            body: Bytes::new(),
            error: Some(message),
        }
    }
}

/// Thin reqwest wrapper bound to one backend deployment.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url`. A trailing slash on the base URL is
    /// tolerated; request paths are expected to start with `/`.
    pub fn new(base_url: impl Into<String>) -> SmokeResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Perform one JSON request. See [`Exchange`] for the failure contract.
    pub async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Exchange {
        let url = self.url_for(path);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Exchange::transport(e.to_string()),
        };

        let status = response.status();
        let data = response.json::<Value>().await.ok();
        Exchange::classify(status, data)
    }

    pub async fn get(&self, path: &str) -> Exchange {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Exchange {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Exchange {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Exchange {
        self.request(Method::DELETE, path, None).await
    }

    /// Fetch a binary payload, keeping the declared content type alongside
    /// the raw bytes. Transport faults are folded into the result the same
    /// way [`ApiClient::request`] folds them.
    pub async fn fetch_bytes(&self, path: &str) -> RawExchange {
        let url = self.url_for(path);
        debug!("GET {} (binary)", url);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return RawExchange::transport(e.to_string()),
        };

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return RawExchange::transport(e.to_string()),
        };

        RawExchange {
            success: status.is_success(),
            status: Some(status.as_u16()),
            content_type,
            body,
            error: if status.is_success() {
                None
            } else {
                Some(format!("status {}", status.as_u16()))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://127.0.0.1:8080/api/").unwrap();
        assert_eq!(client.url_for("/products"), "http://127.0.0.1:8080/api/products");
    }

    #[test]
    fn classify_success_keeps_body() {
        let exchange = Exchange::classify(
            StatusCode::CREATED,
            Some(serde_json::json!({"id": "p1"})),
        );
        assert!(exchange.success);
        assert!(exchange.error.is_none());
        assert_eq!(exchange.data.unwrap()["id"], "p1");
    }

    #[test]
    fn classify_surfaces_embedded_error_field() {
        let exchange = Exchange::classify(
            StatusCode::NOT_FOUND,
            Some(serde_json::json!({"error": "product not found"})),
        );
        assert!(!exchange.success);
        assert_eq!(
            exchange.error.as_deref(),
            Some("status 404: product not found")
        );
    }

    #[test]
    fn classify_without_json_body_reports_status_only() {
        let exchange = Exchange::classify(StatusCode::INTERNAL_SERVER_ERROR, None);
        assert!(!exchange.success);
        assert_eq!(exchange.error.as_deref(), Some("status 500"));
    }
}
