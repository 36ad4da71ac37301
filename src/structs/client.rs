use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use super::{AdminStats, AuthResponse, UserProfile};
use crate::errors::SecureLinkError;
use crate::logger;
use crate::transport::{ApiRequest, Credentials, HttpTransport, Method, Transport};

pub(crate) const ME_PATH: &str = "/auth/me";
pub(crate) const TELEGRAM_AUTH_PATH: &str = "/auth/telegram";
pub(crate) const LOGOUT_PATH: &str = "/auth/logout";
pub(crate) const CREATE_PAYMENT_PATH: &str = "/create-payment";
pub(crate) const FREE_TRIAL_PATH: &str = "/free-trial";
pub(crate) const ADMIN_STATS_PATH: &str = "/admin/stats";

/// SecureLink Client. Used to interact with the SecureLink API.
#[derive(Clone)]
pub struct Client {
    /// Normalized origin of the backend, without a trailing slash.
    pub base_url: String,
    /// Whether the client should print debug statements.
    pub debug: bool,
    transport: Rc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

/// SecureLink Client options. Pass this into the `new()` function of the SecureLink Client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Origin of the backend, e.g. `https://vpn.example.com`.
    pub base_url: String,
    /// Whether the client should print debug statements.
    pub debug: bool,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Admin panel credentials for `/admin/*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Deserialize)]
struct MeReturnData {
    user: Option<UserProfile>,
}

#[derive(Deserialize)]
struct PaymentReturnData {
    confirmation_url: Option<String>,
}

#[derive(Deserialize)]
struct TrialReturnData {
    message: Option<String>,
}

impl Client {
    /// Creates a new SecureLink client backed by `reqwest`.
    pub fn new(options: ClientOptions) -> Result<Self, SecureLinkError> {
        let transport = HttpTransport::new(options.timeout)?;
        Self::with_transport(options, Rc::new(transport))
    }

    /// Creates a client that sends its requests through `transport`.
    pub fn with_transport(
        options: ClientOptions,
        transport: Rc<dyn Transport>,
    ) -> Result<Self, SecureLinkError> {
        let base_url = crate::config::normalize_base_url(&options.base_url)?;

        Ok(Self {
            base_url,
            debug: options.debug,
            transport,
        })
    }

    /// Turns a server-relative reference such as `/download/5` into an absolute URL.
    pub fn absolute_url(&self, reference: &str) -> String {
        crate::config::join_url(&self.base_url, reference)
    }

    /// Validates a stored credential by requesting the current-user profile.
    pub async fn me(&self, token: &str) -> Result<UserProfile, SecureLinkError> {
        let data: MeReturnData = self
            .api_call(
                Method::Get,
                ME_PATH,
                Credentials::Bearer(token.to_string()),
                None,
            )
            .await?;

        data.user.ok_or(SecureLinkError::MissingField("user"))
    }

    /// Exchanges mini-app init data for a bearer credential.
    pub async fn telegram_login(&self, init_data: &str) -> Result<AuthResponse, SecureLinkError> {
        let body = json!({ "init_data": init_data });
        self.api_call(Method::Post, TELEGRAM_AUTH_PATH, Credentials::None, Some(body))
            .await
    }

    /// Invalidates the server-side session.
    pub async fn logout(&self, token: &str) -> Result<(), SecureLinkError> {
        self.api_call::<Value>(
            Method::Post,
            LOGOUT_PATH,
            Credentials::Bearer(token.to_string()),
            None,
        )
        .await
        .map(|_| ())
    }

    /// Starts a payment and returns the provider's confirmation URL.
    pub async fn create_payment(&self, email: &str, plan_id: u32) -> Result<String, SecureLinkError> {
        let body = json!({ "email": email, "plan_id": plan_id });
        let data: PaymentReturnData = self
            .api_call(Method::Post, CREATE_PAYMENT_PATH, Credentials::None, Some(body))
            .await?;

        data.confirmation_url
            .filter(|url| !url.is_empty())
            .ok_or(SecureLinkError::MissingField("confirmation_url"))
    }

    /// Activates the free trial plan for `email` and returns the server's message.
    pub async fn free_trial(&self, email: &str) -> Result<String, SecureLinkError> {
        let body = json!({ "email": email });
        let data: TrialReturnData = self
            .api_call(Method::Post, FREE_TRIAL_PATH, Credentials::None, Some(body))
            .await?;

        data.message.ok_or(SecureLinkError::MissingField("message"))
    }

    /// Fetches the admin polling snapshot.
    pub async fn admin_stats(
        &self,
        credentials: &AdminCredentials,
    ) -> Result<AdminStats, SecureLinkError> {
        self.api_call(
            Method::Get,
            ADMIN_STATS_PATH,
            credentials.to_transport(),
            None,
        )
        .await
    }

    /// Removes a peer. Only the HTTP status matters.
    pub async fn admin_delete(
        &self,
        credentials: &AdminCredentials,
        public_key: &str,
    ) -> Result<(), SecureLinkError> {
        let path = format!("/admin/delete/{}", urlencoding::encode(public_key));
        self.api_call::<Value>(Method::Post, &path, credentials.to_transport(), None)
            .await
            .map(|_| ())
    }

    /// Query an endpoint from the SecureLink API.
    pub async fn api_call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        credentials: Credentials,
        body: Option<Value>,
    ) -> Result<T, SecureLinkError> {
        // Append a / to path if it does not start with one
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        logger::debug(self.debug, "HTTP", &format!("{:?} {}", method, path));

        let request = ApiRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            credentials,
            body,
        };

        let response = self.transport.send(request).await?;

        if !response.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&response.body)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "API error".to_string());

            let status = StatusCode::from_u16(response.status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

            return Err(match status {
                StatusCode::BAD_REQUEST => SecureLinkError::BadRequest(message),
                StatusCode::UNAUTHORIZED => SecureLinkError::Unauthorized(message),
                StatusCode::FORBIDDEN => SecureLinkError::Forbidden(message),
                StatusCode::NOT_FOUND => SecureLinkError::NotFound(message),
                StatusCode::TOO_MANY_REQUESTS => SecureLinkError::RateLimited,
                _ => SecureLinkError::ServerError(response.status, message),
            });
        }

        // Endpoints that answer with an empty body still decode into `Value::Null`
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return serde_json::from_value(Value::Null)
                .map_err(|e| SecureLinkError::FailedToDecode(e.to_string()));
        }

        serde_json::from_slice(&response.body)
            .map_err(|e| SecureLinkError::FailedToDecode(e.to_string()))
    }
}

impl AdminCredentials {
    fn to_transport(&self) -> Credentials {
        Credentials::Basic {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}
