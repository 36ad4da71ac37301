use async_trait::async_trait;
use base64::prelude::*;
use serde_json::Value;
use std::time::Duration;

use crate::errors::SecureLinkError;

/// HTTP verbs the SecureLink API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// How a request authenticates itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    None,
    /// Session credential, sent as `Authorization: Bearer <token>`.
    Bearer(String),
    /// Admin panel credentials, sent as HTTP Basic.
    Basic { username: String, password: String },
}

impl Credentials {
    /// Value of the `Authorization` header, if any.
    pub fn header_value(&self) -> Option<String> {
        match self {
            Credentials::None => None,
            Credentials::Bearer(token) => Some(format!("Bearer {}", token)),
            Credentials::Basic { username, password } => Some(format!(
                "Basic {}",
                BASE64_STANDARD.encode(format!("{}:{}", username, password))
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    pub credentials: Credentials,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and hands back the raw status and body.
///
/// Only transport failures are errors here; status handling belongs to `Client`.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, SecureLinkError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, SecureLinkError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SecureLinkError::RequestFailed(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, SecureLinkError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };

        if let Some(header) = request.credentials.header_value() {
            builder = builder.header(reqwest::header::AUTHORIZATION, header);
        }

        builder = match &request.body {
            Some(body) => builder.json(body),
            None if request.method == Method::Post => {
                builder.header(reqwest::header::CONTENT_TYPE, "application/json")
            }
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| SecureLinkError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| SecureLinkError::RequestFailed(e.to_string()))?;

        Ok(ApiResponse {
            status,
            body: body.to_vec(),
        })
    }
}
