// Console API HTTP client
//
// Wraps `reqwest::Client` with bearer-token auth, URL construction, and
// status-to-error mapping. Endpoint modules (devices, gateways, internal,
// multicast) are implemented as inherent methods via separate files to
// keep this module focused on transport mechanics.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::trace;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Error envelope the server uses for non-2xx responses.
#[derive(serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

/// HTTP client for the network-server console API.
///
/// All requests carry `Authorization: Bearer <token>`. Methods return
/// deserialized response bodies; non-2xx statuses are mapped to
/// [`Error`] variants before the caller sees them.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: SecretString,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the server root (e.g. `https://ns.example.com:8080`).
    pub fn new(base_url: Url, token: SecretString, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// Create a client with a pre-built `reqwest::Client` (used in tests).
    pub fn with_client(http: reqwest::Client, base_url: Url, token: SecretString) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an absolute URL for an API path (no leading slash).
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(&format!("api/{path}"))?)
    }

    // ── HTTP verbs ────────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        trace!(%url, "GET");
        let resp = self
            .http
            .get(url)
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;
        Self::unwrap_response(resp).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        trace!(%url, "POST");
        let resp = self
            .http
            .post(url)
            .bearer_auth(self.token.expose_secret())
            .json(body)
            .send()
            .await?;
        Self::unwrap_response(resp).await
    }

    pub(crate) async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        trace!(%url, "PUT");
        let resp = self
            .http
            .put(url)
            .bearer_auth(self.token.expose_secret())
            .json(body)
            .send()
            .await?;
        Self::unwrap_response(resp).await
    }

    // ── Response handling ─────────────────────────────────────────────

    /// Map status codes to errors and deserialize the body.
    async fn unwrap_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let path = resp.url().path().to_owned();

        if status.is_success() {
            let body = resp.text().await?;
            return serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            });
        }

        let message = resp
            .text()
            .await
            .ok()
            .and_then(|body| {
                serde_json::from_str::<ApiErrorBody>(&body)
                    .ok()
                    .filter(|e| !e.message.is_empty())
                    .map(|e| e.message)
                    .or(Some(body))
            })
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| status.to_string());

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Authentication { message },
            StatusCode::NOT_FOUND => Error::NotFound { resource: path },
            _ => Error::Api {
                message,
                status: status.as_u16(),
            },
        })
    }
}
