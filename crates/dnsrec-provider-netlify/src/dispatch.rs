//! Authenticated request dispatch and shape-driven response decoding
//!
//! Every call to the Netlify API goes through [`Dispatcher::dispatch`]. The
//! caller declares up front which [`ResponseShape`] it expects; decoding
//! never looks at the status code beyond the `>= 400` failure check.
//!
//! The network itself sits behind [`Transport`], implemented by
//! [`HttpTransport`] over reqwest.

use async_trait::async_trait;
use dnsrec_core::{Error, Result};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;

use crate::model::{DeleteErrorEnvelope, NetlifyDnsRecord, NetlifyZone};

/// Netlify API base URL
pub const NETLIFY_API_BASE: &str = "https://api.netlify.com/api/v1";

/// HTTP verbs the Netlify DNS API needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        })
    }
}

/// A fully built API request, ready for a [`Transport`]
#[derive(Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the API base, e.g. `/dns_zones`
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<serde_json::Value>,
    /// Value of the `Authorization` header
    pub authorization: String,
}

// Keeps the bearer token out of logs
impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("body", &self.body)
            .field("authorization", &"<REDACTED>")
            .finish()
    }
}

/// Raw response: status code and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends one request and returns the raw response
///
/// Implementations report connection failures as [`Error::Transport`] and
/// return every received response, whatever its status, as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// [`Transport`] over a reqwest client
///
/// No timeout is configured; deadlines belong to the caller.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Transport against the public Netlify API
    pub fn new() -> Result<Self> {
        Self::with_base_url(NETLIFY_API_BASE)
    }

    /// Transport against another base URL (proxies, staging)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };
        builder = builder.header(reqwest::header::AUTHORIZATION, &request.authorization);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response body: {}", e)))?;

        Ok(ApiResponse { status, body })
    }
}

/// What a request's response body is expected to contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Array of zones (zone lookup)
    ZoneList,
    /// Array of records (list / find)
    RecordList,
    /// One record (create)
    SingleRecord,
    /// Empty on success, `{message}` envelope on failure (delete)
    DeleteResult,
}

/// A decoded response, one variant per [`ResponseShape`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Zones(Vec<NetlifyZone>),
    Records(Vec<NetlifyDnsRecord>),
    Record(NetlifyDnsRecord),
    Deleted,
}

impl Decoded {
    pub fn into_zones(self) -> Result<Vec<NetlifyZone>> {
        match self {
            Decoded::Zones(zones) => Ok(zones),
            other => Err(other.mismatch("zone list")),
        }
    }

    pub fn into_records(self) -> Result<Vec<NetlifyDnsRecord>> {
        match self {
            Decoded::Records(records) => Ok(records),
            other => Err(other.mismatch("record list")),
        }
    }

    pub fn into_record(self) -> Result<NetlifyDnsRecord> {
        match self {
            Decoded::Record(record) => Ok(record),
            other => Err(other.mismatch("single record")),
        }
    }

    pub fn into_deleted(self) -> Result<()> {
        match self {
            Decoded::Deleted => Ok(()),
            other => Err(other.mismatch("delete result")),
        }
    }

    fn mismatch(&self, expected: &str) -> Error {
        let got = match self {
            Decoded::Zones(_) => "zone list",
            Decoded::Records(_) => "record list",
            Decoded::Record(_) => "single record",
            Decoded::Deleted => "delete result",
        };
        Error::decode(format!("expected {}, decoded {}", expected, got))
    }
}

/// Decode a successful response body according to `shape`
pub fn decode(shape: ResponseShape, body: &str) -> Result<Decoded> {
    match shape {
        ResponseShape::ZoneList => {
            let zones: Option<Vec<NetlifyZone>> = parse_json(body, "zone list")?;
            Ok(Decoded::Zones(zones.unwrap_or_default()))
        }
        ResponseShape::RecordList => {
            let records: Option<Vec<NetlifyDnsRecord>> = parse_json(body, "record list")?;
            Ok(Decoded::Records(records.unwrap_or_default()))
        }
        ResponseShape::SingleRecord => Ok(Decoded::Record(parse_json(body, "record")?)),
        ResponseShape::DeleteResult => {
            if body.trim().is_empty() {
                return Ok(Decoded::Deleted);
            }
            let envelope: DeleteErrorEnvelope = parse_json(body, "delete error envelope")?;
            Err(Error::delete_rejected(envelope.message))
        }
    }
}

fn parse_json<T: DeserializeOwned>(body: &str, what: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!("Failed to decode {}: {}", what, e);
        Error::decode(format!("invalid {}: {}", what, e))
    })
}

/// Builds authenticated requests and decodes their responses
#[derive(Clone)]
pub struct Dispatcher {
    /// ⚠️ NEVER log this value
    token: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("token", &"<REDACTED>")
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(token: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            token: token.into(),
            transport,
        }
    }

    /// Send one request and decode the response as `shape`
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] if no response was received
    /// - [`Error::Http`] for any status >= 400, whatever the shape
    /// - [`Error::Decode`] if the body does not match `shape`
    /// - [`Error::DeleteRejected`] if a delete answered with a message
    pub async fn dispatch(
        &self,
        method: Method,
        path: impl Into<String>,
        query: Vec<(&'static str, String)>,
        body: Option<serde_json::Value>,
        shape: ResponseShape,
    ) -> Result<Decoded> {
        let request = ApiRequest {
            method,
            path: path.into(),
            query,
            body,
            authorization: format!("Bearer {}", self.token),
        };
        tracing::debug!("[netlify] {} {} {:?}", request.method, request.path, request.query);

        let response = self.transport.send(request).await?;
        tracing::debug!("[netlify] Response Status: {}", response.status);

        if response.status >= 400 {
            tracing::warn!("[netlify] Request failed with HTTP {}", response.status);
            return Err(Error::http(response.status, response.body));
        }

        decode(shape, &response.body)
    }
}
