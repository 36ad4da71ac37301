use chrono::{DateTime, Utc};

use crate::format::parse_timestamp;

/// How a subscription or config is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    Active,
    Pending,
    Expired,
    /// Any other stored status. Styled like an expired item.
    Inactive,
}

impl DisplayStatus {
    pub fn css_class(&self) -> &'static str {
        match self {
            DisplayStatus::Active => "active",
            DisplayStatus::Pending => "pending",
            DisplayStatus::Expired | DisplayStatus::Inactive => "expired",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DisplayStatus::Active => "Active",
            DisplayStatus::Pending => "Awaiting payment",
            DisplayStatus::Expired => "Expired",
            DisplayStatus::Inactive => "Inactive",
        }
    }
}

/// A missing or unparseable expiry never counts as expired.
pub fn is_expired(expires_at: Option<&str>, now: DateTime<Utc>) -> bool {
    expires_at
        .and_then(parse_timestamp)
        .map(|expiry| expiry < now)
        .unwrap_or(false)
}

/// A past expiry wins over whatever status the backend stored.
pub fn display_status(status: &str, expires_at: Option<&str>, now: DateTime<Utc>) -> DisplayStatus {
    if is_expired(expires_at, now) {
        return DisplayStatus::Expired;
    }

    match status {
        "paid" => DisplayStatus::Active,
        "pending" => DisplayStatus::Pending,
        "expired" => DisplayStatus::Expired,
        _ => DisplayStatus::Inactive,
    }
}
