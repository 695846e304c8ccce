//! Machine-identity authentication and access-token caching.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::ApiRequest;
use crate::error::InfisicalError;
use crate::InfisicalClient;

/// A cached token is refreshed this long before the API would expire it.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(30);

/// How the client proves its identity to the API.
#[derive(Clone)]
pub enum Credentials {
    /// Universal auth: exchange a machine identity's client id and secret for
    /// a short-lived access token.
    UniversalAuth {
        client_id: String,
        client_secret: String,
    },
    /// A pre-issued access token, used as-is and never refreshed.
    AccessToken(String),
}

impl Credentials {
    fn can_refresh(&self) -> bool {
        matches!(self, Self::UniversalAuth { .. })
    }

    pub(crate) fn validate(&self) -> Result<(), InfisicalError> {
        match self {
            Self::UniversalAuth {
                client_id,
                client_secret,
            } => {
                if client_id.is_empty() || client_secret.is_empty() {
                    return Err(InfisicalError::Config(
                        "universal auth requires both a client id and a client secret".to_owned(),
                    ));
                }
            }
            Self::AccessToken(token) => {
                if token.is_empty() {
                    return Err(InfisicalError::Config("missing access token".to_owned()));
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UniversalAuth { client_id, .. } => f
                .debug_struct("UniversalAuth")
                .field("client_id", client_id)
                .field("client_secret", &"[redacted]")
                .finish(),
            Self::AccessToken(_) => f.debug_tuple("AccessToken").field(&"[redacted]").finish(),
        }
    }
}

pub(crate) struct CachedToken {
    value: String,
    /// `None` for pre-issued tokens.
    refresh_at: Option<Instant>,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        self.refresh_at.is_none_or(|at| Instant::now() < at)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UniversalAuthLogin<'a> {
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    pub access_token: String,
    /// Seconds until the token expires.
    pub expires_in: u64,
    #[serde(default, rename = "accessTokenMaxTTL")]
    pub access_token_max_ttl: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl InfisicalClient {
    /// Return a valid access token, logging in when the cached one is
    /// missing or about to expire.
    pub(crate) async fn access_token(&self) -> Result<String, InfisicalError> {
        {
            let cached = self.token.read().await;
            if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
                return Ok(token.value.clone());
            }
        }

        let mut cached = self.token.write().await;
        // Another task may have logged in while we waited for the lock.
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh()) {
            return Ok(token.value.clone());
        }

        let fresh = match &self.credentials {
            Credentials::AccessToken(token) => CachedToken {
                value: token.clone(),
                refresh_at: None,
            },
            Credentials::UniversalAuth {
                client_id,
                client_secret,
            } => {
                let login = self.login(client_id, client_secret).await?;
                let lifetime = Duration::from_secs(login.expires_in);
                CachedToken {
                    value: login.access_token,
                    refresh_at: Some(Instant::now() + lifetime.saturating_sub(TOKEN_REFRESH_MARGIN)),
                }
            }
        };

        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }

    /// Drop the cached token if it is still the one the API just rejected.
    ///
    /// Returns whether a fresh login is worth attempting.
    pub(crate) async fn invalidate_token(&self, rejected: &str) -> bool {
        if !self.credentials.can_refresh() {
            return false;
        }
        let mut cached = self.token.write().await;
        if cached.as_ref().is_some_and(|t| t.value == rejected) {
            *cached = None;
        }
        true
    }

    async fn login(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<LoginResponse, InfisicalError> {
        debug!(client_id, "logging in with universal auth");
        let request = ApiRequest::post("/api/v1/auth/universal-auth/login").json(
            &UniversalAuthLogin {
                client_id,
                client_secret,
            },
        )?;
        let response: LoginResponse = self.send_unauthenticated(&request).await?;
        debug!(
            expires_in = response.expires_in,
            max_ttl = ?response.access_token_max_ttl,
            token_type = ?response.token_type,
            "universal auth login succeeded"
        );
        Ok(response)
    }
}
