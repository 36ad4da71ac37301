//! Admin traffic monitor: server load and per-peer traffic, refreshed on a timer.

use chrono::Utc;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::errors::SecureLinkError;
use crate::logger;
use crate::page::Region;
use crate::sequence::RequestSequence;
use crate::structs::client::AdminCredentials;
use crate::view::{AdminPanel, Fragment};
use crate::Client;

pub const ADMIN_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

pub struct AdminMonitor {
    client: Client,
    credentials: AdminCredentials,
    /// Load figures and the client table.
    stats: Rc<dyn Region>,
    /// Failure notices for delete actions.
    notices: Rc<dyn Region>,
    sequence: RequestSequence,
}

impl AdminMonitor {
    pub fn new(
        client: Client,
        credentials: AdminCredentials,
        stats: Rc<dyn Region>,
        notices: Rc<dyn Region>,
    ) -> Self {
        Self {
            client,
            credentials,
            stats,
            notices,
            sequence: RequestSequence::new(),
        }
    }

    /// Runs one polling cycle. Returns whether its response was rendered.
    ///
    /// Cycles may overlap; a response older than one already shown is dropped.
    pub async fn refresh(&self) -> bool {
        let ticket = self.sequence.issue();
        let result = self.client.admin_stats(&self.credentials).await;

        match result {
            Ok(stats) => {
                if !self.sequence.try_apply(ticket) {
                    logger::debug(
                        self.client.debug,
                        "ADMIN",
                        &format!(
                            "Discarded stale stats cycle #{} (latest #{})",
                            ticket,
                            self.sequence.latest_issued()
                        ),
                    );
                    return false;
                }
                self.stats
                    .render(Fragment::Admin(AdminPanel::build(&stats, Utc::now())));
                true
            }
            Err(err) => {
                logger::error("ADMIN", &format!("Stats cycle #{} failed: {}", ticket, err));
                false
            }
        }
    }

    /// Starts polling: one cycle right away, then one per interval. Each cycle
    /// runs as its own task, so a slow response never delays the next cycle.
    pub fn spawn(self: &Rc<Self>, interval: Duration) -> JoinHandle<()> {
        let monitor = Rc::clone(self);

        tokio::task::spawn_local(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let cycle = Rc::clone(&monitor);
                tokio::task::spawn_local(async move {
                    cycle.refresh().await;
                });
            }
        })
    }

    /// Removes a peer. The caller is expected to have confirmed with the user.
    pub async fn delete_client(&self, public_key: &str) -> Result<(), SecureLinkError> {
        match self.client.admin_delete(&self.credentials, public_key).await {
            Ok(()) => {
                logger::debug(self.client.debug, "ADMIN", &format!("Deleted client {}", public_key));
                self.stats.render(Fragment::RemoveRow(public_key.to_string()));
                Ok(())
            }
            Err(err) => {
                logger::error("ADMIN", &format!("Deleting client {} failed: {}", public_key, err));
                self.notices
                    .render(Fragment::Error("Failed to delete client".to_string()));
                Err(err)
            }
        }
    }
}
