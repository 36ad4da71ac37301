//! Per-section data loaders.
//!
//! Every loader puts a placeholder up first, fetches, and then replaces the
//! placeholder with content, an empty state, or an inline error. Failures end
//! at the loader boundary with a console diagnostic; nothing is retried.

use chrono::Utc;

use crate::dashboard::Dashboard;
use crate::logger;
use crate::page::Region;
use crate::router::Section;
use crate::sequence::RequestSequence;
use crate::structs::session::Session;
use crate::view::{
    unread_badge, ActiveSubscriptionCard, ConfigCard, ConnectionStatus, Fragment,
    NotificationCard, SettingsForm, SubscriptionCard, TrafficPanel, TrafficSummary,
    EMPTY_CONFIGS, EMPTY_NOTIFICATIONS, EMPTY_SUBSCRIPTIONS, EMPTY_TRAFFIC,
};

impl Dashboard {
    pub(crate) async fn load_section(&self, section: Section) {
        match section {
            Section::Dashboard => self.load_dashboard().await,
            Section::Subscriptions => self.load_subscriptions().await,
            Section::Configs => self.load_configs().await,
            Section::Traffic => self.load_traffic().await,
            Section::Notifications => self.load_notifications().await,
            Section::Settings => self.load_settings(),
        }
    }

    /// Subscription card and traffic summary. Both fetches run at once and
    /// each fills its own regions as soon as it lands.
    pub async fn load_dashboard(&self) {
        let Ok(session) = self.session() else {
            return;
        };

        tokio::join!(
            self.load_dashboard_subscriptions(&session),
            self.load_dashboard_traffic(&session)
        );
    }

    async fn load_dashboard_subscriptions(&self, session: &Session) {
        let sequence = &self.feeds.dashboard_subscriptions;
        let region = self.page.active_subscription.as_ref();

        let ticket = sequence.issue();
        region.render(Fragment::Loading("Loading subscription...".to_string()));

        let result = session.subscriptions(&self.client).await;
        if !self.accept(sequence, ticket, "dashboard subscriptions") {
            return;
        }

        match result {
            Ok(subscriptions) => region.render(Fragment::ActiveSubscription(
                ActiveSubscriptionCard::build(&subscriptions, Utc::now()),
            )),
            Err(err) => fail(region, "dashboard subscriptions", &err, "Failed to load subscription"),
        }
    }

    async fn load_dashboard_traffic(&self, session: &Session) {
        let sequence = &self.feeds.dashboard_traffic;
        let summary = self.page.traffic_summary.as_ref();
        let connection = self.page.connection_status.as_ref();

        let ticket = sequence.issue();
        summary.render(Fragment::Loading("Loading traffic...".to_string()));

        let result = session.traffic(&self.client).await;
        if !self.accept(sequence, ticket, "dashboard traffic") {
            return;
        }

        match result {
            Ok(report) => {
                summary.render(Fragment::TrafficSummary(TrafficSummary::build(&report)));
                connection.render(Fragment::Connection(ConnectionStatus::build(&report)));
            }
            Err(err) => {
                fail(summary, "dashboard traffic", &err, "Failed to load traffic");
                connection.render(Fragment::Error("Connection status unavailable".to_string()));
            }
        }
    }

    pub async fn load_subscriptions(&self) {
        let Ok(session) = self.session() else {
            return;
        };
        let sequence = &self.feeds.subscriptions;
        let region = self.page.subscriptions_list.as_ref();

        let ticket = sequence.issue();
        region.render(Fragment::Loading("Loading subscriptions...".to_string()));

        let result = session.subscriptions(&self.client).await;
        if !self.accept(sequence, ticket, "subscriptions") {
            return;
        }

        match result {
            Ok(subscriptions) if subscriptions.is_empty() => {
                region.render(Fragment::Empty(EMPTY_SUBSCRIPTIONS.to_string()))
            }
            Ok(subscriptions) => {
                let now = Utc::now();
                region.render(Fragment::Subscriptions(
                    subscriptions
                        .iter()
                        .map(|s| SubscriptionCard::build(s, now))
                        .collect(),
                ));
            }
            Err(err) => fail(region, "subscriptions", &err, "Failed to load subscriptions"),
        }
    }

    pub async fn load_configs(&self) {
        let Ok(session) = self.session() else {
            return;
        };
        let sequence = &self.feeds.configs;
        let region = self.page.configs_list.as_ref();

        let ticket = sequence.issue();
        region.render(Fragment::Loading("Loading configurations...".to_string()));

        let result = session.configs(&self.client).await;
        if !self.accept(sequence, ticket, "configs") {
            return;
        }

        match result {
            Ok(configs) => {
                if configs.is_empty() {
                    region.render(Fragment::Empty(EMPTY_CONFIGS.to_string()));
                } else {
                    let now = Utc::now();
                    region.render(Fragment::Configs(
                        configs.iter().map(|c| ConfigCard::build(c, now)).collect(),
                    ));
                }
                *self.configs.borrow_mut() = configs;
            }
            Err(err) => fail(region, "configs", &err, "Failed to load configurations"),
        }
    }

    pub async fn load_traffic(&self) {
        let Ok(session) = self.session() else {
            return;
        };
        let sequence = &self.feeds.traffic;
        let region = self.page.traffic_stats.as_ref();

        let ticket = sequence.issue();
        region.render(Fragment::Loading("Loading traffic statistics...".to_string()));

        let result = session.traffic(&self.client).await;
        if !self.accept(sequence, ticket, "traffic") {
            return;
        }

        match result {
            Ok(report) if report.traffic.is_empty() => {
                region.render(Fragment::Empty(EMPTY_TRAFFIC.to_string()))
            }
            Ok(report) => region.render(Fragment::Traffic(TrafficPanel::build(&report))),
            Err(err) => fail(region, "traffic", &err, "Failed to load traffic statistics"),
        }
    }

    pub async fn load_notifications(&self) {
        let Ok(session) = self.session() else {
            return;
        };
        let sequence = &self.feeds.notifications;
        let region = self.page.notifications_list.as_ref();

        let ticket = sequence.issue();
        region.render(Fragment::Loading("Loading notifications...".to_string()));

        let result = session.notifications(&self.client).await;
        if !self.accept(sequence, ticket, "notifications") {
            return;
        }

        match result {
            Ok(notifications) => {
                self.page
                    .notification_badge
                    .render(Fragment::Badge(unread_badge(&notifications)));

                if notifications.is_empty() {
                    region.render(Fragment::Empty(EMPTY_NOTIFICATIONS.to_string()));
                } else {
                    region.render(Fragment::Notifications(
                        notifications.iter().map(NotificationCard::build).collect(),
                    ));
                }
            }
            Err(err) => fail(region, "notifications", &err, "Failed to load notifications"),
        }
    }

    /// Fills the settings form from the session profile. No fetch.
    pub fn load_settings(&self) {
        let Ok(session) = self.session() else {
            return;
        };

        self.page
            .settings_form
            .render(Fragment::Settings(SettingsForm::from_profile(&session.user)));
    }

    fn accept(&self, sequence: &RequestSequence, ticket: u64, feed: &str) -> bool {
        let fresh = sequence.try_apply(ticket);
        if !fresh {
            logger::debug(
                self.client.debug,
                "LOADER",
                &format!(
                    "Discarded stale {} response #{} (latest #{})",
                    feed,
                    ticket,
                    sequence.latest_issued()
                ),
            );
        }
        fresh
    }
}

fn fail(region: &dyn Region, feed: &str, err: &crate::SecureLinkError, message: &str) {
    logger::error("LOADER", &format!("Failed to load {}: {}", feed, err));
    region.render(Fragment::Error(message.to_string()));
}
