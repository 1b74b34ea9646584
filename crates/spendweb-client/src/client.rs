//! JSON HTTP client for the expense API.
//!
//! Every call resolves to an [`ApiResponse`] envelope when the server
//! answered at all, whatever the status code. Only failures where no usable
//! answer arrived surface as [`ClientError`].

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use spendweb_config::ApiConfig;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};
use crate::models::ApiResponse;

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl ApiClient {
    /// Create a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be initialized.
    pub fn new(base_url: &str, timeout_secs: u64) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ClientError::Build { message: e.to_string() })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    pub fn from_config(config: &ApiConfig) -> ClientResult<Self> {
        Self::new(&config.base_url, config.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and parse the envelope.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<ApiResponse<T>> {
        self.request::<(), T>(Method::GET, path, None).await
    }

    /// POST `body` as JSON to `path` and parse the envelope.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn request<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> ClientResult<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("[ExpenseApi] {} {}", method, url);

        let mut builder = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("[ExpenseApi] {} {} failed: {}", method, url, e);
            if e.is_timeout() {
                ClientError::Timeout { seconds: self.timeout_secs }
            } else {
                ClientError::Network { message: e.to_string() }
            }
        })?;

        self.parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> ClientResult<ApiResponse<T>> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network { message: e.to_string() })?;

        match serde_json::from_str::<ApiResponse<serde_json::Value>>(&body) {
            Ok(envelope) => {
                if !status.is_success() {
                    debug!("[ExpenseApi] HTTP {} with envelope: {}", status, envelope.message);
                }
                Ok(decode_payload(envelope))
            }
            Err(e) if status.is_success() => Err(ClientError::Decode {
                status: status.as_u16(),
                message: e.to_string(),
            }),
            Err(_) => {
                // The server answered but not with an envelope; the caller
                // shows its own fallback text.
                warn!(
                    "[ExpenseApi] HTTP {} without envelope: {}",
                    status,
                    body.chars().take(200).collect::<String>()
                );
                Ok(ApiResponse::failure(String::new()))
            }
        }
    }
}

/// Decode the envelope's payload.
///
/// The envelope's verdict stands even when its payload has an unexpected
/// shape; the payload is then dropped.
fn decode_payload<T: DeserializeOwned>(envelope: ApiResponse<serde_json::Value>) -> ApiResponse<T> {
    let ApiResponse { success, message, data } = envelope;
    let data = data.and_then(|value| match serde_json::from_value::<T>(value) {
        Ok(data) => Some(data),
        Err(e) => {
            warn!("[ExpenseApi] Ignoring undecodable payload: {}", e);
            None
        }
    });
    ApiResponse { success, message, data }
}
