//! View models handed to page regions.
//!
//! Everything a region needs is already formatted here; turning a fragment into
//! markup is the host's job.

use chrono::{DateTime, Utc};

use crate::format::{format_bytes, format_date, format_last_seen, format_megabytes, format_speed};
use crate::status::{display_status, is_expired, DisplayStatus};
use crate::structs::{
    AdminClient, AdminStats, ConfigArtifact, Notification, Subscription, TrafficReport,
    TrafficSample, UserProfile,
};

pub const EMPTY_SUBSCRIPTIONS: &str = "You have no subscriptions yet";
pub const EMPTY_CONFIGS: &str = "No configurations yet";
pub const EMPTY_TRAFFIC: &str = "No active connections";
pub const EMPTY_NOTIFICATIONS: &str = "No notifications";

/// Content for a single region.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Loading(String),
    Error(String),
    Empty(String),
    Text(String),
    User(UserBadge),
    ActiveSubscription(ActiveSubscriptionCard),
    TrafficSummary(TrafficSummary),
    Connection(ConnectionStatus),
    Subscriptions(Vec<SubscriptionCard>),
    Configs(Vec<ConfigCard>),
    Traffic(TrafficPanel),
    Notifications(Vec<NotificationCard>),
    /// Unread count. `None` hides the badge.
    Badge(Option<usize>),
    Settings(SettingsForm),
    Toast(Toast),
    DismissToast(u64),
    Modal(ModalView),
    Admin(AdminPanel),
    RemoveRow(String),
    Plans(Vec<PlanCard>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserBadge {
    pub display_name: String,
    pub avatar_initial: String,
}

impl UserBadge {
    pub fn from_profile(user: &UserProfile) -> Self {
        Self {
            display_name: user.display_name(),
            avatar_initial: user.avatar_initial(),
        }
    }
}

/// Dashboard card for the subscription currently in force.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSubscriptionCard {
    pub title: String,
    pub expiry: String,
    pub user_plan: String,
}

impl ActiveSubscriptionCard {
    /// Uses the first paid subscription that has not expired.
    pub fn build(subscriptions: &[Subscription], now: DateTime<Utc>) -> Self {
        let active = subscriptions
            .iter()
            .find(|s| s.status == "paid" && !is_expired(s.expires_at.as_deref(), now));

        match active {
            Some(subscription) => Self {
                title: subscription.plan.clone(),
                expiry: format!("Valid until {}", format_date(subscription.expires_at.as_deref())),
                user_plan: subscription.plan.clone(),
            },
            None => Self {
                title: "No active subscription".to_string(),
                expiry: "—".to_string(),
                user_plan: "No subscription".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficSummary {
    pub total: String,
    pub details: String,
}

impl TrafficSummary {
    pub fn build(report: &TrafficReport) -> Self {
        let (rx, tx) = report.totals();
        Self {
            total: format_bytes(rx.saturating_add(tx)),
            details: format!("↓ {} ↑ {}", format_bytes(rx), format_bytes(tx)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub online: bool,
    pub label: String,
    pub detail: String,
}

impl ConnectionStatus {
    pub fn build(report: &TrafficReport) -> Self {
        match report.active_connection() {
            Some(sample) => Self {
                online: true,
                label: "Online".to_string(),
                detail: format!("IP: {}", or_dash(&sample.client_ip)),
            },
            None => Self {
                online: false,
                label: "Offline".to_string(),
                detail: "—".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionCard {
    pub id: i64,
    pub plan: String,
    pub price: String,
    pub status: DisplayStatus,
    pub created: String,
    pub expires: String,
    /// Expired subscriptions offer a renew button.
    pub renewable: bool,
}

impl SubscriptionCard {
    pub fn build(subscription: &Subscription, now: DateTime<Utc>) -> Self {
        let expires_at = subscription.expires_at.as_deref();
        Self {
            id: subscription.id,
            plan: subscription.plan.clone(),
            price: format_price(subscription.price),
            status: display_status(&subscription.status, expires_at, now),
            created: format_date(subscription.created_at.as_deref()),
            expires: format_date(expires_at),
            renewable: is_expired(expires_at, now),
        }
    }
}

fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{} ₽", price as i64)
    } else {
        format!("{:.2} ₽", price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigCard {
    pub id: i64,
    pub plan: String,
    pub status: DisplayStatus,
    pub created: String,
    pub expires: String,
    /// Download and QR controls are only present when the server holds the file.
    pub has_file: bool,
}

impl ConfigCard {
    pub fn build(config: &ConfigArtifact, now: DateTime<Utc>) -> Self {
        let expires_at = config.expires_at.as_deref();
        Self {
            id: config.id,
            plan: config.plan.clone().unwrap_or_default(),
            status: display_status(&config.status, expires_at, now),
            created: format_date(config.created_at.as_deref()),
            expires: format_date(expires_at),
            has_file: config.has_file,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrafficPanel {
    pub total: String,
    pub received: String,
    pub transmitted: String,
    pub connections: Vec<ConnectionRow>,
}

impl TrafficPanel {
    pub fn build(report: &TrafficReport) -> Self {
        let (rx, tx) = report.totals();
        Self {
            total: format_bytes(rx.saturating_add(tx)),
            received: format_bytes(rx),
            transmitted: format_bytes(tx),
            connections: report.traffic.iter().map(ConnectionRow::build).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRow {
    pub client_ip: String,
    pub plan: String,
    pub online: bool,
    pub received: String,
    pub transmitted: String,
    pub speed: String,
}

impl ConnectionRow {
    fn build(sample: &TrafficSample) -> Self {
        Self {
            client_ip: or_dash(&sample.client_ip),
            plan: sample.plan.clone().unwrap_or_default(),
            online: sample.online,
            received: format_bytes(sample.rx_bytes),
            transmitted: format_bytes(sample.tx_bytes),
            speed: format!(
                "↓ {} ↑ {}",
                format_speed(sample.speed_rx),
                format_speed(sample.speed_tx)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationCard {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub time: String,
    /// Unread items carry a "mark as read" control.
    pub unread: bool,
}

impl NotificationCard {
    pub fn build(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            title: notification.title.clone(),
            message: notification.message.clone(),
            time: format_date(notification.created_at.as_deref()),
            unread: !notification.is_read,
        }
    }
}

/// Badge content for a notification list: hidden when nothing is unread.
pub fn unread_badge(notifications: &[Notification]) -> Option<usize> {
    let unread = notifications.iter().filter(|n| !n.is_read).count();
    (unread > 0).then_some(unread)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    pub email: String,
    pub language: String,
}

impl SettingsForm {
    pub fn from_profile(user: &UserProfile) -> Self {
        Self {
            email: user.email.clone().unwrap_or_default(),
            language: user
                .language_code
                .clone()
                .filter(|code| !code.is_empty())
                .unwrap_or_else(|| "ru".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalView {
    Open { image_url: String },
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminPanel {
    pub cpu_percent: f64,
    pub ram_percent: f64,
    pub disk_percent: f64,
    pub clients: Vec<AdminRow>,
}

impl AdminPanel {
    pub fn build(stats: &AdminStats, now: DateTime<Utc>) -> Self {
        Self {
            cpu_percent: stats.cpu_percent,
            ram_percent: stats.ram_percent,
            disk_percent: stats.disk_percent,
            clients: stats.clients.iter().map(|c| AdminRow::build(c, now)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRow {
    pub email: String,
    pub plan: String,
    pub client_ip: String,
    pub public_key: String,
    pub received: String,
    pub transmitted: String,
    pub online: bool,
    pub last_seen: String,
    pub start: String,
    pub end: String,
}

impl AdminRow {
    fn build(client: &AdminClient, now: DateTime<Utc>) -> Self {
        // Peers that never handshook fall back to their start date.
        let last_seen = if client.last_seen > 0.0 {
            client.last_seen
        } else {
            client
                .start_date
                .as_deref()
                .and_then(crate::format::parse_timestamp)
                .map(|t| t.timestamp() as f64)
                .unwrap_or(0.0)
        };

        Self {
            email: or_dash(&client.email),
            plan: or_dash(&client.plan),
            client_ip: or_dash(&client.client_ip),
            public_key: client.public_key.clone(),
            received: format_megabytes(client.rx_bytes),
            transmitted: format_megabytes(client.tx_bytes),
            online: client.online,
            last_seen: format_last_seen(last_seen, client.online, now),
            start: client.start_date.clone().unwrap_or_else(|| "-".to_string()),
            end: client.end_date.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Blank table cells show "-".
fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCard {
    pub id: u32,
    pub name: String,
    pub price: String,
    pub selected: bool,
}
