//! Environment-driven configuration.

use std::time::Duration;

use crate::errors::SecureLinkError;
use crate::structs::client::{AdminCredentials, ClientOptions};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_BASE_URL: &str = "SECURELINK_BASE_URL";
pub const ENV_DEBUG: &str = "SECURELINK_DEBUG";
pub const ENV_TIMEOUT_SECS: &str = "SECURELINK_TIMEOUT_SECS";
pub const ENV_CREDENTIAL_PATH: &str = "SECURELINK_CREDENTIAL_PATH";
pub const ENV_TELEGRAM_INIT_DATA: &str = "SECURELINK_TELEGRAM_INIT_DATA";
pub const ENV_ADMIN_USER: &str = "SECURELINK_ADMIN_USER";
pub const ENV_ADMIN_PASSWORD: &str = "SECURELINK_ADMIN_PASSWORD";

/// Trims whitespace and trailing slashes and checks for an http(s) scheme with a host.
pub fn normalize_base_url(raw: &str) -> Result<String, SecureLinkError> {
    let trimmed = raw.trim().trim_end_matches('/');

    let Some((scheme, remainder)) = trimmed.split_once("://") else {
        return Err(SecureLinkError::InvalidBaseUrl);
    };
    if scheme != "http" && scheme != "https" {
        return Err(SecureLinkError::InvalidBaseUrl);
    }
    if remainder.trim().is_empty() || remainder.starts_with('/') {
        return Err(SecureLinkError::InvalidBaseUrl);
    }

    Ok(trimmed.to_string())
}

/// Joins a server-relative reference onto `base_url`. Absolute URLs pass through.
pub(crate) fn join_url(base_url: &str, reference: &str) -> String {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        reference.to_string()
    } else if reference.starts_with('/') {
        format!("{}{}", base_url, reference)
    } else {
        format!("{}/{}", base_url, reference)
    }
}

pub(crate) fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

impl ClientOptions {
    /// Reads `SECURELINK_BASE_URL`, `SECURELINK_DEBUG` and `SECURELINK_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, SecureLinkError> {
        let base_url = env_non_empty(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let debug = env_non_empty(ENV_DEBUG).map(|v| parse_flag(&v)).unwrap_or(false);
        let timeout = env_non_empty(ENV_TIMEOUT_SECS)
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            base_url: normalize_base_url(&base_url)?,
            debug,
            timeout: Duration::from_secs(timeout),
        })
    }
}

impl AdminCredentials {
    /// Reads `SECURELINK_ADMIN_USER` and `SECURELINK_ADMIN_PASSWORD`. Both must be set.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            username: env_non_empty(ENV_ADMIN_USER)?,
            password: env_non_empty(ENV_ADMIN_PASSWORD)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_slashes() {
        assert_eq!(
            normalize_base_url("  https://vpn.example.com//  ").unwrap(),
            "https://vpn.example.com"
        );
        assert_eq!(
            normalize_base_url("http://127.0.0.1:5000").unwrap(),
            "http://127.0.0.1:5000"
        );
    }

    #[test]
    fn normalize_rejects_bad_urls() {
        for raw in ["", "vpn.example.com", "ftp://vpn.example.com", "https://", "https:///x"] {
            assert_eq!(
                normalize_base_url(raw),
                Err(SecureLinkError::InvalidBaseUrl),
                "{raw}"
            );
        }
    }

    #[test]
    fn flags() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nope"));
    }
}
