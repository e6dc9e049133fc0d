//! HTTP driver transport.
//!
//! Talks to a long-running driver service:
//! - `POST {url}/parse` with a JSON `WireRequest`, answered by a `WireResponse`
//! - `GET {url}/health`, any 2xx means healthy

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::wire::{self, WireRequest};
use super::{ClientError, Driver, RawTree};
use crate::lang::Language;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Driver reachable over HTTP.
pub struct HttpDriver {
    http: Client,
    base: String,
}

impl HttpDriver {
    pub fn new(url: &str) -> Result<Self, ClientError> {
        let base = url.trim_end_matches('/').to_string();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ClientError::Unavailable(format!(
                "unsupported driver url {:?}",
                url
            )));
        }

        let http = Client::builder()
            .user_agent(concat!("uastd/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Unavailable(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { http, base })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path)
    }
}

/// Map a transport failure onto the client error kinds.
fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        // The caller owns the deadline; reqwest only times out on connect.
        ClientError::Timeout(CONNECT_TIMEOUT)
    } else if e.is_decode() {
        ClientError::Protocol(e.to_string())
    } else {
        ClientError::Unavailable(e.to_string())
    }
}

#[async_trait]
impl Driver for HttpDriver {
    async fn parse(&self, content: &[u8], language: &Language) -> Result<RawTree, ClientError> {
        let body = WireRequest::new(language, content).to_bytes()?;

        let response = self
            .http
            .post(self.url("parse"))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(transport_error)?;

        match status.as_u16() {
            200..=299 => wire::decode_response(&bytes),
            // Client errors carry the driver's rejection when it sent one.
            400..=499 => match wire::decode_response(&bytes) {
                Err(ClientError::Protocol(_)) => Err(ClientError::Rejected(format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    wire::snippet(&bytes)
                ))),
                Err(e) => Err(e),
                Ok(_) => Err(ClientError::Protocol(format!(
                    "tree returned with HTTP {}",
                    status.as_u16()
                ))),
            },
            code => Err(ClientError::Unavailable(format!(
                "HTTP {}: {}",
                code,
                wire::snippet(&bytes)
            ))),
        }
    }

    async fn health_check(&self) -> Result<(), ClientError> {
        let response = self
            .http
            .get(self.url("health"))
            .send()
            .await
            .map_err(transport_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::Unavailable(format!(
                "health check returned HTTP {}",
                response.status().as_u16()
            )))
        }
    }
}
