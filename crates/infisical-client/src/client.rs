//! Request plumbing: URL building, bearer auth, retry with backoff, and
//! error-body decoding.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::InfisicalError;
use crate::{
    DEFAULT_MAX_RETRIES, DEFAULT_SITE_URL, DEFAULT_TIMEOUT, InfisicalClient, InfisicalConfig,
    RETRY_BASE_DELAY,
};

/// One API call, described independently of how many times it is sent.
#[derive(Debug, Clone)]
pub(crate) struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub(crate) fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub(crate) fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub(crate) fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub(crate) fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub(crate) fn query_opt<T: ToString>(self, key: &'static str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    pub(crate) fn json<B: Serialize>(mut self, body: &B) -> Result<Self, InfisicalError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    #[cfg(test)]
    pub(crate) fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }
}

/// Percent-encode a single path segment (secret names, key names, ids).
pub(crate) fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorBody {
    message: Option<String>,
    error: Option<String>,
    req_id: Option<String>,
}

impl InfisicalClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns `InfisicalError::Config` if the credentials are incomplete or
    /// the HTTP client cannot be built.
    #[allow(clippy::needless_pass_by_value)]
    pub fn with_config(cfg: InfisicalConfig) -> Result<Self, InfisicalError> {
        cfg.credentials.validate()?;

        let site_url = if cfg.site_url.is_empty() {
            DEFAULT_SITE_URL
        } else {
            cfg.site_url.as_str()
        }
        .trim_end_matches('/')
        .to_owned();

        let timeout = if cfg.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            cfg.timeout
        };

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("infisical-client-rust/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| InfisicalError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            site_url,
            credentials: cfg.credentials,
            max_retries: cfg.max_retries,
            http,
            token: RwLock::new(None),
        })
    }

    /// Create a client for `site_url` using universal-auth credentials and
    /// default timeouts.
    ///
    /// # Errors
    ///
    /// See [`InfisicalClient::with_config`].
    pub fn universal_auth(
        site_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, InfisicalError> {
        Self::with_config(InfisicalConfig {
            credentials: crate::Credentials::UniversalAuth {
                client_id: client_id.into(),
                client_secret: client_secret.into(),
            },
            site_url: site_url.into(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// The API base URL this client talks to.
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Check that the client can authenticate, logging in if needed.
    ///
    /// # Errors
    ///
    /// Returns the login error when the credentials are rejected or the API
    /// is unreachable.
    pub async fn authenticate(&self) -> Result<(), InfisicalError> {
        self.access_token().await.map(|_| ())
    }

    /// Send an authenticated request. A `401` drops the cached token and the
    /// request is sent once more with a fresh login.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<T, InfisicalError> {
        let token = self.access_token().await?;
        let result = self.execute(request, Some(&token)).await;

        let rejected = matches!(
            result,
            Err(InfisicalError::Auth {
                status_code: 401,
                ..
            })
        );
        if rejected && self.invalidate_token(&token).await {
            debug!(path = %request.path, "access token rejected, logging in again");
            let token = self.access_token().await?;
            return self.execute(request, Some(&token)).await;
        }

        result
    }

    pub(crate) async fn send_unauthenticated<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<T, InfisicalError> {
        self.execute(request, None).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<T, InfisicalError> {
        let url = format!("{}{}", self.site_url, request.path);
        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            let mut req = self.http.request(request.method.clone(), &url);
            if !request.query.is_empty() {
                req = req.query(&request.query);
            }
            if let Some(token) = bearer {
                req = req.bearer_auth(token);
            }
            if let Some(ref body) = request.body {
                req = req.json(body);
            }

            match req.send().await {
                Ok(resp) => {
                    let status = resp.status();

                    if status.is_success() {
                        let text = resp.text().await?;
                        if text.trim().is_empty() {
                            return serde_json::from_str("{}").map_err(InfisicalError::Json);
                        }
                        return serde_json::from_str(&text).map_err(InfisicalError::Json);
                    }

                    let error_text = resp.text().await.unwrap_or_default();
                    let message = error_message(status, &error_text);

                    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                        return Err(InfisicalError::Auth {
                            status_code: status.as_u16(),
                            message,
                        });
                    }
                    if status == StatusCode::NOT_FOUND {
                        return Err(InfisicalError::NotFound(message));
                    }

                    last_err = Some(InfisicalError::Api {
                        status_code: status.as_u16(),
                        message,
                    });

                    if attempt < self.max_retries && is_retryable(status) {
                        debug!(
                            method = %request.method,
                            path = %request.path,
                            status = status.as_u16(),
                            attempt = attempt.saturating_add(1),
                            "retryable API status, backing off"
                        );
                        sleep_with_jitter(attempt).await;
                        continue;
                    }
                }
                Err(e) => {
                    last_err = Some(if e.is_timeout() {
                        InfisicalError::Timeout
                    } else {
                        InfisicalError::Network(e)
                    });

                    if attempt < self.max_retries {
                        debug!(
                            method = %request.method,
                            path = %request.path,
                            attempt = attempt.saturating_add(1),
                            "request failed before a response, backing off"
                        );
                        sleep_with_jitter(attempt).await;
                        continue;
                    }
                }
            }

            break;
        }

        Err(last_err.unwrap_or(InfisicalError::Api {
            status_code: 0,
            message: "unknown error".to_owned(),
        }))
    }
}

/// Pull the most useful message out of an API error body.
fn error_message(status: StatusCode, body: &str) -> String {
    let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) else {
        return format!("HTTP {}", status.as_u16());
    };
    let message = parsed
        .message
        .or(parsed.error)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    match parsed.req_id {
        Some(req_id) => format!("{message} (request id {req_id})"),
        None => message,
    }
}

fn is_retryable(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

async fn sleep_with_jitter(attempt: u32) {
    #[allow(clippy::cast_possible_truncation)]
    let base = (RETRY_BASE_DELAY.as_millis() as u64).saturating_mul(2u64.saturating_pow(attempt));
    #[allow(clippy::cast_precision_loss)]
    let base_f = base as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let jitter = (base_f * 0.3 * rand_f64()) as u64;
    tokio::time::sleep(Duration::from_millis(base.saturating_add(jitter))).await;
}

/// Pseudo-random f64 in [0, 1) from the clock's sub-second nanos.
fn rand_f64() -> f64 {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    f64::from(nanos % 1000) / 1000.0
}
