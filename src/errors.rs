use thiserror::Error;

/// SecureLink client errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SecureLinkError {
    /// The base URL is not in the right format. Must start with http:// or https:// and include a host.
    #[error("Invalid base URL. Must use http:// or https:// and include a host.")]
    InvalidBaseUrl,

    /// Failed to send a request to the SecureLink API.
    #[error("Failed to send a request to the SecureLink API: {0}")]
    RequestFailed(String),

    /// Failed to decode a SecureLink API response.
    #[error("Failed to decode SecureLink API response: {0}")]
    FailedToDecode(String),

    /// A response decoded but a field the client relies on was absent.
    #[error("Response is missing the `{0}` field.")]
    MissingField(&'static str),

    /// The SecureLink API returned a 400: Bad Request status code.
    /// The message is taken from the `{error}` body when the server sent one.
    #[error("Bad request: {0}")]
    BadRequest(String),
    /// The SecureLink API returned a 401: Unauthorized status code.
    /// This means that the bearer credential is missing, expired or revoked.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// The SecureLink API returned a 403: Forbidden status code.
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// The SecureLink API returned a 404: Not Found status code.
    #[error("Not found: {0}")]
    NotFound(String),
    /// The SecureLink API returned a 429: Too Many Requests status code.
    #[error("You are being rate limited.")]
    RateLimited,
    /// The SecureLink API returned any other unsuccessful status code.
    #[error("Server error ({0}): {1}")]
    ServerError(u16, String),

    /// No session has been established yet, or it was destroyed by logout.
    #[error("Not authenticated.")]
    NotAuthenticated,
    /// No embedded mini-app identity is available for the credential exchange.
    #[error("No host identity context available.")]
    NoHostContext,
    /// Navigation was requested to a section the dashboard does not have.
    #[error("Unknown section \"{0}\".")]
    UnknownSection(String),
    /// The backend reports that the config artifact has no file behind it.
    #[error("Configuration {0} has no file available.")]
    FileUnavailable(i64),

    /// Checkout was submitted before a plan was picked.
    #[error("No plan selected.")]
    NoPlanSelected,
    /// Checkout was submitted with an address that cannot be an email.
    #[error("Invalid email address.")]
    InvalidEmail,
    /// The free trial plan was already activated from this checkout.
    #[error("The free trial can only be used once.")]
    TrialAlreadyUsed,
    /// A previous checkout submit has not finished yet.
    #[error("An order is already being processed.")]
    CheckoutInProgress,
    /// The selected plan id is not part of the catalogue.
    #[error("Unknown plan {0}.")]
    UnknownPlan(u32),

    /// The delivery page was opened without config text or plan name.
    #[error("No configuration or plan data to deliver.")]
    MissingDeliveryData,

    /// Reading or writing the persisted credential failed.
    #[error("Credential storage error: {0}")]
    Storage(String),
}

impl SecureLinkError {
    /// Whether the error came back from the backend as a non-success status.
    pub fn is_api_rejection(&self) -> bool {
        matches!(
            self,
            SecureLinkError::BadRequest(_)
                | SecureLinkError::Unauthorized(_)
                | SecureLinkError::Forbidden(_)
                | SecureLinkError::NotFound(_)
                | SecureLinkError::RateLimited
                | SecureLinkError::ServerError(_, _)
        )
    }
}
