//! # Devises Client
//!
//! A typed client for the `live` exchange-rate endpoint, exposed to the
//! repository layer through the `ExchangeSource` port.

use async_trait::async_trait;
use devises_types::{ExchangeError, ExchangeResponse, ExchangeSource};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ClientError> for ExchangeError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) => ExchangeError::Transport(e.to_string()),
            ClientError::Api { status, message } => ExchangeError::Api { status, message },
            ClientError::Json(e) => ExchangeError::Decode(e.to_string()),
        }
    }
}

/// Exchange-rate API client.
pub struct ExchangeClient {
    base_url: String,
    access_key: Option<String>,
    http: Client,
}

impl ExchangeClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key: None,
            http: Client::new(),
        }
    }

    /// Sets the access key sent with every request.
    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    /// Fetches live quotes for a comma-separated list of currency codes.
    #[instrument(name = "ExchangeFetch", skip(self))]
    pub async fn live(&self, currencies: &str) -> Result<ExchangeResponse, ClientError> {
        let mut query = vec![("currencies", currencies), ("format", "1")];
        if let Some(key) = &self.access_key {
            query.push(("access_key", key.as_str()));
        }
        self.get("/live", &query).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");
        let resp = self.http.get(url).query(query).send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| {
                    v.pointer("/error/info")
                        .and_then(|e| e.as_str())
                        .map(String::from)
                })
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl ExchangeSource for ExchangeClient {
    async fn request_exchange(&self, codes: &str) -> Result<ExchangeResponse, ExchangeError> {
        self.live(codes).await.map_err(Into::into)
    }
}
