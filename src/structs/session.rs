use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use super::{ConfigArtifact, Notification, Subscription, TrafficReport, UserProfile};
use crate::errors::SecureLinkError;
use crate::transport::{Credentials, Method};
use crate::Client;

/// The authenticated identity. Returned by the auth gate once a credential has been resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Bearer credential for every authenticated call.
    pub token: String,
    pub user: UserProfile,
}

#[derive(Deserialize)]
struct SubscriptionsReturnData {
    #[serde(default)]
    subscriptions: Vec<Subscription>,
}

#[derive(Deserialize)]
struct ConfigsReturnData {
    #[serde(default)]
    configs: Vec<ConfigArtifact>,
}

#[derive(Deserialize)]
struct NotificationsReturnData {
    #[serde(default)]
    notifications: Vec<Notification>,
}

#[derive(Deserialize)]
struct DownloadReference {
    url: Option<String>,
}

#[derive(Deserialize)]
struct QrReference {
    qr_url: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub async fn subscriptions(&self, client: &Client) -> Result<Vec<Subscription>, SecureLinkError> {
        let data: SubscriptionsReturnData = self.get(client, "/api/user/subscriptions").await?;
        Ok(data.subscriptions)
    }

    pub async fn configs(&self, client: &Client) -> Result<Vec<ConfigArtifact>, SecureLinkError> {
        let data: ConfigsReturnData = self.get(client, "/api/user/configs").await?;
        Ok(data.configs)
    }

    pub async fn traffic(&self, client: &Client) -> Result<TrafficReport, SecureLinkError> {
        self.get(client, "/api/user/traffic").await
    }

    pub async fn notifications(&self, client: &Client) -> Result<Vec<Notification>, SecureLinkError> {
        let data: NotificationsReturnData = self.get(client, "/api/user/notifications").await?;
        Ok(data.notifications)
    }

    pub async fn mark_notification_read(
        &self,
        client: &Client,
        notification_id: i64,
    ) -> Result<(), SecureLinkError> {
        let path = format!("/api/user/notifications/{}/read", notification_id);
        self.session_api_call::<Value>(client, Method::Post, &path)
            .await
            .map(|_| ())
    }

    /// Resolves the download reference of a config artifact.
    pub async fn config_download_url(
        &self,
        client: &Client,
        config_id: i64,
    ) -> Result<String, SecureLinkError> {
        let path = format!("/api/configs/{}/download", config_id);
        let data: DownloadReference = self.get(client, &path).await?;

        data.url
            .filter(|url| !url.is_empty())
            .map(|url| client.absolute_url(&url))
            .ok_or(SecureLinkError::MissingField("url"))
    }

    /// Resolves the QR image reference of a config artifact.
    pub async fn config_qr_url(
        &self,
        client: &Client,
        config_id: i64,
    ) -> Result<String, SecureLinkError> {
        let path = format!("/api/configs/{}/qr", config_id);
        let data: QrReference = self.get(client, &path).await?;

        data.qr_url
            .filter(|url| !url.is_empty())
            .map(|url| client.absolute_url(&url))
            .ok_or(SecureLinkError::MissingField("qr_url"))
    }

    pub async fn logout(&self, client: &Client) -> Result<(), SecureLinkError> {
        client.logout(&self.token).await
    }

    async fn get<T: DeserializeOwned>(&self, client: &Client, path: &str) -> Result<T, SecureLinkError> {
        self.session_api_call(client, Method::Get, path).await
    }

    pub async fn session_api_call<T: DeserializeOwned>(
        &self,
        client: &Client,
        method: Method,
        path: &str,
    ) -> Result<T, SecureLinkError> {
        client
            .api_call(method, path, Credentials::Bearer(self.token.clone()), None)
            .await
    }
}
