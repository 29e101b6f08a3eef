//! HTTP client for the file-management service.
//!
//! # Design
//! - One request per invocation; no retries.
//! - Every outcome is classified into `RemoteResult`; nothing here panics or
//!   propagates past the caller.
//! - Success means status 200 with a JSON content type. Anything else is a
//!   failure, including other 2xx statuses.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{Client, Response, StatusCode, Url};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

use fileaway_config::{ApiKey, HookConfig};

use crate::error::{HookError, HookResult};
use crate::resolve::{OperationMode, ResolvedOperation};

pub(crate) const HEADER_API_KEY: &str = "x-api-key";
pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";
const JSON_MEDIA_TYPE: &str = "application/json";

/// Response body on success, or the classified failure.
pub type RemoteResult = Result<Vec<u8>, RemoteError>;

/// Closed set of remote operation failures.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The service answered with a non-2xx status.
    #[error("file service rejected the request with status {status}")]
    Api {
        /// HTTP status returned by the service.
        status: StatusCode,
        /// Raw response body, kept for diagnostics.
        body: Vec<u8>,
    },
    /// No complete HTTP exchange took place.
    #[error("file service request failed ({reason})")]
    Transport {
        /// Short classification of the failure.
        reason: &'static str,
        /// Source HTTP client error.
        source: reqwest::Error,
    },
    /// The service answered, but not with a 200 JSON response.
    #[error(
        "unexpected response from file service (status {status}, content type {})",
        content_type.as_deref().unwrap_or("<none>")
    )]
    UnexpectedResponse {
        /// HTTP status returned by the service.
        status: StatusCode,
        /// `Content-Type` header, when present and readable.
        content_type: Option<String>,
    },
}

impl RemoteError {
    fn transport(source: reqwest::Error) -> Self {
        let reason = if source.is_timeout() {
            "timed out"
        } else if source.is_connect() {
            "connection failed"
        } else if source.is_body() || source.is_decode() {
            "response body unreadable"
        } else {
            "request failed"
        };
        Self::Transport { reason, source }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileOperationRequest<'a> {
    source_path: &'a str,
    target_path: &'a str,
}

/// Client bound to one service base URL and API key.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: Url,
    api_key: ApiKey,
}

impl RemoteClient {
    /// Build a client with the configured timeouts, tagging every request
    /// with `request_id`.
    ///
    /// # Errors
    ///
    /// Returns an error when the request id is not a valid header value or the
    /// underlying HTTP client cannot be constructed.
    pub fn from_config(config: &HookConfig, request_id: &str) -> HookResult<Self> {
        let mut default_headers = HeaderMap::new();
        let request_id = HeaderValue::from_str(request_id).map_err(|_| HookError::InvalidHeader {
            name: HEADER_REQUEST_ID,
        })?;
        default_headers.insert(HEADER_REQUEST_ID, request_id);

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(Policy::none())
            .default_headers(default_headers)
            .build()
            .map_err(|source| HookError::HttpClient { source })?;

        Self::new(client, config.api_url.clone(), config.api_key.clone())
    }

    /// Wrap an existing HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error when `base_url` cannot carry a path (e.g. `mailto:`).
    pub fn new(client: Client, base_url: Url, api_key: ApiKey) -> HookResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(HookError::Config {
                source: fileaway_config::ConfigError::InvalidField {
                    field: "api_url".to_string(),
                    value: Some(base_url.to_string()),
                    reason: "must be a hierarchical URL",
                },
            });
        }
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Endpoint for `mode`, appended to any path prefix of the base URL.
    #[must_use]
    pub fn endpoint(&self, mode: OperationMode) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "files", mode.endpoint()]);
        }
        url
    }

    /// Send `operation` to the service and classify the outcome.
    #[instrument(
        name = "remote.execute",
        skip_all,
        fields(mode = %operation.mode, source = %operation.source_path, target = %operation.target_path)
    )]
    pub async fn execute(&self, operation: &ResolvedOperation) -> RemoteResult {
        let url = self.endpoint(operation.mode);
        debug!(url = %url, "sending file operation request");

        let payload = FileOperationRequest {
            source_path: &operation.source_path,
            target_path: &operation.target_path,
        };

        let response = self
            .client
            .post(url)
            .header(ACCEPT, JSON_MEDIA_TYPE)
            .header(CONTENT_TYPE, JSON_MEDIA_TYPE)
            .header(HEADER_API_KEY, self.api_key.expose())
            .json(&payload)
            .send()
            .await
            .map_err(RemoteError::transport)?;

        classify_response(response).await
    }
}

/// Classify an HTTP response into a [`RemoteResult`].
pub(crate) async fn classify_response(response: Response) -> RemoteResult {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    if status == StatusCode::OK && content_type.as_deref().is_some_and(is_json_media_type) {
        let body = response.bytes().await.map_err(RemoteError::transport)?;
        return Ok(body.to_vec());
    }

    if !status.is_success() {
        let body = response.bytes().await.unwrap_or_default();
        return Err(RemoteError::Api {
            status,
            body: body.to_vec(),
        });
    }

    Err(RemoteError::UnexpectedResponse {
        status,
        content_type,
    })
}

/// Compare the media type, ignoring parameters such as `charset`.
fn is_json_media_type(value: &str) -> bool {
    value
        .split(';')
        .next()
        .is_some_and(|media| media.trim().eq_ignore_ascii_case(JSON_MEDIA_TYPE))
}
