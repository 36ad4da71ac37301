use serde::{Deserialize, Deserializer, Serialize};

pub mod client;
pub mod session;

/// Reads an explicit `null` the same way as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Profile of the signed-in user, returned by `/auth/me` and `/auth/telegram`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

impl UserProfile {
    /// `@handle` when the user has one, otherwise the first name, otherwise "User".
    pub fn display_name(&self) -> String {
        if let Some(username) = self.username.as_deref().filter(|u| !u.is_empty()) {
            return format!("@{}", username);
        }

        self.first_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "User".to_string())
    }

    /// Uppercased first letter of the first name, "U" if there is none.
    pub fn avatar_initial(&self) -> String {
        self.first_name
            .as_deref()
            .and_then(|name| name.chars().next())
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "U".to_string())
    }
}

/// Data returned by the server after exchanging mini-app init data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// A purchased plan instance.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: i64,
    /// Display name of the plan.
    #[serde(default, deserialize_with = "null_as_default")]
    pub plan: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    /// Stored status: "pending", "paid", "expired", ...
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    /// ISO-8601 expiry. `None` for plans that never expire.
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_config: bool,
}

/// A downloadable client configuration.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigArtifact {
    pub id: i64,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    /// Whether the server still holds the `.conf` file. Download and QR controls depend on it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_file: bool,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub qr_url: Option<String>,
}

/// Usage counters of one connection.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSample {
    #[serde(default, deserialize_with = "null_as_default")]
    pub client_ip: String,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rx_bytes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tx_bytes: u64,
    /// Bytes per second.
    #[serde(default, deserialize_with = "null_as_default")]
    pub speed_rx: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub speed_tx: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub online: bool,
    /// Unix timestamp of the last handshake, 0 if never seen.
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_seen: f64,
}

/// Snapshot returned by `/api/user/traffic`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficReport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub traffic: Vec<TrafficSample>,
}

impl TrafficReport {
    /// Received and transmitted byte totals across every connection.
    pub fn totals(&self) -> (u64, u64) {
        self.traffic.iter().fold((0, 0), |(rx, tx), sample| {
            (rx.saturating_add(sample.rx_bytes), tx.saturating_add(sample.tx_bytes))
        })
    }

    /// First connection currently online.
    pub fn active_connection(&self) -> Option<&TrafficSample> {
        self.traffic.iter().find(|sample| sample.online)
    }
}

/// A user-facing message.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Admin polling snapshot from `/admin/stats`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cpu_percent: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ram_percent: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disk_percent: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clients: Vec<AdminClient>,
}

/// One paid peer as seen by the admin monitor.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminClient {
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub public_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub client_ip: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub plan: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rx_bytes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tx_bytes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub speed_rx: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub speed_tx: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub online: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_seen: f64,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_fields_decode_as_defaults() {
        let report: TrafficReport = serde_json::from_value(json!({ "traffic": [
            { "client_ip": "10.0.0.2", "rx_bytes": 10 },
            { "client_ip": null, "plan": null, "rx_bytes": null, "online": null },
        ]}))
        .unwrap();
        assert_eq!(report.traffic[1].client_ip, "");
        assert_eq!(report.traffic[1].rx_bytes, 0);

        let stats: AdminStats = serde_json::from_value(json!({
            "cpu_percent": null,
            "clients": [{ "email": null, "public_key": null, "plan": null }],
        }))
        .unwrap();
        assert_eq!(stats.clients[0].email, "");
        assert_eq!(stats.clients[0].public_key, "");

        let subscription: Subscription =
            serde_json::from_value(json!({ "id": 4, "plan": null, "status": null })).unwrap();
        assert_eq!(subscription.status, "");
    }

    #[test]
    fn totals_saturate() {
        let report = TrafficReport {
            traffic: vec![
                TrafficSample {
                    rx_bytes: u64::MAX,
                    tx_bytes: 1,
                    ..Default::default()
                },
                TrafficSample {
                    rx_bytes: 5,
                    tx_bytes: 2,
                    ..Default::default()
                },
            ],
        };
        assert_eq!(report.totals(), (u64::MAX, 3));
    }
}
