//! Remote service gateway
//!
//! Thin blocking HTTP clients for the data API and the data compiler API.
//! They report what came back over the wire and nothing more; deciding what a
//! reply means is left to `model::outcome::classify`.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Status code and raw body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// A request that never produced a complete reply
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("could not set up the HTTP client: {reason}")]
    Client { reason: String },
    #[error("invalid endpoint {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("could not read response from {url}: {reason}")]
    ReadBody { url: String, reason: String },
}

/// Operations the table browser needs from the data API
pub trait DataApi: Send + Sync {
    /// `GET {base}/db_tables`
    fn list_tables(&self) -> Result<HttpReply, GatewayError>;

    /// `GET {base}/data/{table}`
    fn table_data(&self, table: &str) -> Result<HttpReply, GatewayError>;
}

/// Operations the schema upload needs from the compiler service
pub trait CompilerApi: Send + Sync {
    /// `POST {base}/compile` with `{"json_data": document}`
    fn compile(&self, document: &Value) -> Result<HttpReply, GatewayError>;
}

fn build_client() -> Result<Client, GatewayError> {
    // No request timeout: a slow service keeps the view in its loading state.
    Client::builder()
        .timeout(None::<Duration>)
        .build()
        .map_err(|e| GatewayError::Client {
            reason: e.to_string(),
        })
}

/// Append path segments to a base URL, percent-encoding each one
fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url, GatewayError> {
    let invalid = |reason: String| GatewayError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("URL cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn send(request: RequestBuilder, url: &Url) -> Result<HttpReply, GatewayError> {
    let response = request.send().map_err(|e| GatewayError::Transport {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let status = response.status().as_u16();
    let body = response.text().map_err(|e| GatewayError::ReadBody {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    tracing::debug!(%url, status, bytes = body.len(), "reply received");
    Ok(HttpReply { status, body })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Data API
// ═══════════════════════════════════════════════════════════════════════════════

/// HTTP client for the data API
pub struct HttpDataApi {
    base_url: String,
    client: Client,
}

impl HttpDataApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        Ok(Self {
            base_url: base_url.into(),
            client: build_client()?,
        })
    }

    fn get(&self, segments: &[&str]) -> Result<HttpReply, GatewayError> {
        let url = endpoint(&self.base_url, segments)?;
        tracing::debug!(%url, "GET");
        let request = self
            .client
            .get(url.clone())
            .header(CONTENT_TYPE, "application/json");
        send(request, &url)
    }
}

impl DataApi for HttpDataApi {
    fn list_tables(&self) -> Result<HttpReply, GatewayError> {
        self.get(&["db_tables"])
    }

    fn table_data(&self, table: &str) -> Result<HttpReply, GatewayError> {
        self.get(&["data", table])
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Compiler API
// ═══════════════════════════════════════════════════════════════════════════════

/// HTTP client for the data compiler service
pub struct HttpCompilerApi {
    base_url: String,
    client: Client,
}

impl HttpCompilerApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        Ok(Self {
            base_url: base_url.into(),
            client: build_client()?,
        })
    }
}

impl CompilerApi for HttpCompilerApi {
    fn compile(&self, document: &Value) -> Result<HttpReply, GatewayError> {
        let url = endpoint(&self.base_url, &["compile"])?;
        tracing::debug!(%url, "POST");
        let request = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&json!({ "json_data": document }));
        send(request, &url)
    }
}
