//! User-triggered dashboard operations. Each reports its outcome with a toast.

use crate::dashboard::Dashboard;
use crate::errors::SecureLinkError;
use crate::host::LANDING_PATH;
use crate::logger;
use crate::view::SettingsForm;

/// Clears the local session when dropped, so logout cleanup runs whatever the
/// server said and even if the logout future is abandoned mid-request.
struct SessionTeardown<'a> {
    dashboard: &'a Dashboard,
}

impl Drop for SessionTeardown<'_> {
    fn drop(&mut self) {
        self.dashboard.end_session();
    }
}

impl Dashboard {
    /// Resolves the config's download reference and sends the browser to it.
    pub async fn download_config(&self, config_id: i64) -> Result<String, SecureLinkError> {
        let result = self.resolve_download(config_id).await;

        match &result {
            Ok(url) => {
                self.navigator.navigate(url);
                self.toaster.success("Configuration downloaded");
            }
            Err(err) => {
                logger::error("ACTION", &format!("Download of config {} failed: {}", config_id, err));
                self.toaster.error("Failed to download configuration");
            }
        }

        result
    }

    async fn resolve_download(&self, config_id: i64) -> Result<String, SecureLinkError> {
        let session = self.session()?;
        self.ensure_file(config_id)?;
        session.config_download_url(&self.client, config_id).await
    }

    /// Fetches the config's QR reference and opens it in the overlay.
    pub async fn show_qr(&self, config_id: i64) -> Result<String, SecureLinkError> {
        let result = self.resolve_qr(config_id).await;

        match &result {
            Ok(url) => self.modal.open(url.clone()),
            Err(err) => {
                logger::error("ACTION", &format!("QR for config {} failed: {}", config_id, err));
                self.toaster.error("Failed to load QR code");
            }
        }

        result
    }

    async fn resolve_qr(&self, config_id: i64) -> Result<String, SecureLinkError> {
        let session = self.session()?;
        self.ensure_file(config_id)?;
        session.config_qr_url(&self.client, config_id).await
    }

    /// A config the last listing reported without a file never reaches the backend.
    fn ensure_file(&self, config_id: i64) -> Result<(), SecureLinkError> {
        let has_file = self
            .configs
            .borrow()
            .iter()
            .find(|config| config.id == config_id)
            .map(|config| config.has_file);

        match has_file {
            Some(false) => Err(SecureLinkError::FileUnavailable(config_id)),
            _ => Ok(()),
        }
    }

    /// Marks one notification read, then reloads the list and badge.
    pub async fn mark_notification_read(&self, notification_id: i64) -> Result<(), SecureLinkError> {
        let result = match self.session() {
            Ok(session) => {
                session
                    .mark_notification_read(&self.client, notification_id)
                    .await
            }
            Err(err) => Err(err),
        };

        match &result {
            Ok(()) => {
                self.toaster.success("Notification marked as read");
                self.load_notifications().await;
            }
            Err(err) => {
                logger::error(
                    "ACTION",
                    &format!("Marking notification {} failed: {}", notification_id, err),
                );
                self.toaster.error("Failed to update notification");
            }
        }

        result
    }

    /// Not implemented by the backend.
    pub fn mark_all_notifications_read(&self) {
        self.toaster.info("Feature in development");
    }

    /// The backend has no settings endpoint; the form is acknowledged locally.
    pub fn save_settings(&self, form: &SettingsForm) {
        logger::debug(
            self.client.debug,
            "ACTION",
            &format!("Settings saved locally (language {})", form.language),
        );
        self.toaster.success("Settings saved");
    }

    /// Renew and buy-new buttons lead to the plan store.
    pub fn open_store(&self) {
        self.navigator.navigate(LANDING_PATH);
    }

    /// Best-effort server logout followed by unconditional local cleanup.
    pub async fn logout(&self) {
        let _teardown = SessionTeardown { dashboard: self };

        let session = self.session.borrow().clone();
        if let Some(session) = session {
            if let Err(err) = session.logout(&self.client).await {
                logger::error("ACTION", &format!("Server logout failed: {}", err));
            }
        }
    }

    pub(crate) fn end_session(&self) {
        if let Err(err) = self.store.clear() {
            logger::error("STORAGE", &format!("Could not clear credential: {}", err));
        }
        self.session.borrow_mut().take();
        self.configs.borrow_mut().clear();
        self.navigator.navigate(LANDING_PATH);
    }
}
