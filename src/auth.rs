//! Startup credential resolution.

use crate::errors::SecureLinkError;
use crate::host::{HostContext, LANDING_PATH};
use crate::logger;
use crate::storage::CredentialStore;
use crate::structs::session::Session;
use crate::Client;

/// Where the session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// A persisted credential that the backend accepted.
    Stored,
    /// A fresh credential from the mini-app identity exchange.
    HostExchange,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Authenticated { session: Session, source: AuthSource },
    /// No strategy produced a session. The page must leave for `target`.
    Redirect { target: String },
}

/// Resolves a session from the persisted credential, then from the host identity.
///
/// Failures at any step are logged and fall through to the next strategy. Only
/// total failure is surfaced, as a redirect.
pub struct AuthGate<'a> {
    client: &'a Client,
    store: &'a dyn CredentialStore,
    host: &'a HostContext,
}

impl<'a> AuthGate<'a> {
    pub fn new(client: &'a Client, store: &'a dyn CredentialStore, host: &'a HostContext) -> Self {
        Self {
            client,
            store,
            host,
        }
    }

    pub async fn resolve(&self) -> AuthOutcome {
        logger::debug(self.client.debug, "AUTH", "Authenticating...");

        if let Some(session) = self.from_stored_credential().await {
            logger::debug(
                self.client.debug,
                "AUTH",
                &format!("Welcome back, {}.", session.user.display_name()),
            );
            return AuthOutcome::Authenticated {
                session,
                source: AuthSource::Stored,
            };
        }

        match self.from_host_identity().await {
            Ok(session) => {
                logger::debug(
                    self.client.debug,
                    "AUTH",
                    &format!("Signed in as {}.", session.user.display_name()),
                );
                AuthOutcome::Authenticated {
                    session,
                    source: AuthSource::HostExchange,
                }
            }
            Err(err) => {
                if err != SecureLinkError::NoHostContext {
                    logger::error("AUTH", &format!("Identity exchange failed: {}", err));
                }
                logger::debug(self.client.debug, "AUTH", "No session, leaving for the landing page.");
                AuthOutcome::Redirect {
                    target: LANDING_PATH.to_string(),
                }
            }
        }
    }

    async fn from_stored_credential(&self) -> Option<Session> {
        let token = match self.store.load() {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(err) => {
                logger::error("AUTH", &format!("Could not read stored credential: {}", err));
                return None;
            }
        };

        match self.client.me(&token).await {
            Ok(user) => Some(Session::new(token, user)),
            Err(err) => {
                logger::error("AUTH", &format!("Stored credential rejected: {}", err));
                if let Err(err) = self.store.clear() {
                    logger::error("STORAGE", &format!("Could not discard credential: {}", err));
                }
                None
            }
        }
    }

    async fn from_host_identity(&self) -> Result<Session, SecureLinkError> {
        let init_data = self.host.init_data().ok_or(SecureLinkError::NoHostContext)?;

        let response = self.client.telegram_login(init_data).await?;
        if response.token.is_empty() {
            return Err(SecureLinkError::MissingField("token"));
        }

        if let Err(err) = self.store.save(&response.token) {
            logger::error("STORAGE", &format!("Could not persist credential: {}", err));
        }

        Ok(Session::new(response.token, response.user))
    }
}
