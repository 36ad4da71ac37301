//! The environment the client is embedded in: the mini-app identity it was
//! launched with, and the ability to send the user somewhere else.

use crate::config::{env_non_empty, join_url, ENV_TELEGRAM_INIT_DATA};
use crate::logger;

/// Where unauthenticated users and logouts end up.
pub const LANDING_PATH: &str = "/";

/// Identity handed over by the host when running as an embedded mini-app.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostContext {
    init_data: Option<String>,
}

impl HostContext {
    /// Running outside any mini-app.
    pub fn none() -> Self {
        Self::default()
    }

    /// Signed Telegram WebApp `initData`. Blank data counts as absent.
    pub fn telegram(init_data: impl Into<String>) -> Self {
        let init_data = init_data.into();
        Self {
            init_data: Some(init_data).filter(|data| !data.trim().is_empty()),
        }
    }

    /// Reads `SECURELINK_TELEGRAM_INIT_DATA`.
    pub fn from_env() -> Self {
        env_non_empty(ENV_TELEGRAM_INIT_DATA)
            .map(Self::telegram)
            .unwrap_or_default()
    }

    pub fn init_data(&self) -> Option<&str> {
        self.init_data.as_deref()
    }
}

/// Sets the current location. Leaving the page is terminal for the caller.
pub trait Navigator {
    fn navigate(&self, target: &str);
}

/// Opens targets in the system browser, resolving relative paths against the backend origin.
#[derive(Debug, Clone)]
pub struct SystemNavigator {
    base_url: String,
    debug: bool,
}

impl SystemNavigator {
    pub fn new(client: &crate::Client) -> Self {
        Self {
            base_url: client.base_url.clone(),
            debug: client.debug,
        }
    }

    fn resolve(&self, target: &str) -> String {
        join_url(&self.base_url, target)
    }
}

impl Navigator for SystemNavigator {
    fn navigate(&self, target: &str) {
        let url = self.resolve(target);
        logger::debug(self.debug, "NAV", &format!("Opening {}", url));

        if let Err(err) = open::that(&url) {
            logger::error("NAV", &format!("Failed to open {}: {}", url, err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_init_data_is_absent() {
        assert_eq!(HostContext::telegram("   ").init_data(), None);
        assert_eq!(HostContext::none().init_data(), None);
        assert_eq!(
            HostContext::telegram("query_id=1&hash=ab").init_data(),
            Some("query_id=1&hash=ab")
        );
    }

    #[test]
    fn system_navigator_resolves_relative_targets() {
        let navigator = SystemNavigator {
            base_url: "https://vpn.example.com".to_string(),
            debug: false,
        };
        assert_eq!(navigator.resolve("/"), "https://vpn.example.com/");
        assert_eq!(navigator.resolve("download/4"), "https://vpn.example.com/download/4");
        assert_eq!(
            navigator.resolve("https://pay.example.com/c/1"),
            "https://pay.example.com/c/1"
        );
    }
}
