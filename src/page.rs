//! Typed handles to the interactive regions of the dashboard page.
//!
//! Handles are resolved once, when the page is built. A region the host does
//! not provide is reported there and replaced with a detached no-op, so the
//! loaders and actions never have to check for presence again.

use std::fmt;
use std::rc::Rc;

use crate::logger;
use crate::router::Section;
use crate::view::Fragment;

/// A part of the page that displays one fragment at a time.
pub trait Region {
    fn render(&self, fragment: Fragment);
}

/// Visual "active" state of a section panel or its navigation entry.
pub trait Toggle {
    fn set_active(&self, active: bool);
}

/// Named regions of the dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionId {
    UserInfo,
    ActiveSubscription,
    TrafficSummary,
    ConnectionStatus,
    SubscriptionsList,
    ConfigsList,
    TrafficStats,
    NotificationsList,
    NotificationBadge,
    SettingsForm,
    Toasts,
    QrModal,
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// What the host exposes: the DOM in a browser, a recorder in tests.
pub trait Surface {
    fn region(&self, id: RegionId) -> Option<Rc<dyn Region>>;
    fn panel(&self, section: Section) -> Option<Rc<dyn Toggle>>;
    fn nav_entry(&self, section: Section) -> Option<Rc<dyn Toggle>>;
}

struct Detached;

impl Region for Detached {
    fn render(&self, _fragment: Fragment) {}
}

impl Toggle for Detached {
    fn set_active(&self, _active: bool) {}
}

pub struct Page {
    pub user_info: Rc<dyn Region>,
    pub active_subscription: Rc<dyn Region>,
    pub traffic_summary: Rc<dyn Region>,
    pub connection_status: Rc<dyn Region>,
    pub subscriptions_list: Rc<dyn Region>,
    pub configs_list: Rc<dyn Region>,
    pub traffic_stats: Rc<dyn Region>,
    pub notifications_list: Rc<dyn Region>,
    pub notification_badge: Rc<dyn Region>,
    pub settings_form: Rc<dyn Region>,
    pub toasts: Rc<dyn Region>,
    pub qr_modal: Rc<dyn Region>,
    panels: [Rc<dyn Toggle>; 6],
    nav: [Rc<dyn Toggle>; 6],
}

impl Page {
    pub fn resolve(surface: &dyn Surface, debug: bool) -> Self {
        let region = |id: RegionId| -> Rc<dyn Region> {
            surface.region(id).unwrap_or_else(|| {
                logger::error("PAGE", &format!("Region {} is missing, its updates are dropped", id));
                Rc::new(Detached)
            })
        };
        let toggle = |found: Option<Rc<dyn Toggle>>, what: &str, section: Section| -> Rc<dyn Toggle> {
            found.unwrap_or_else(|| {
                logger::error("PAGE", &format!("No {} for section {}", what, section));
                Rc::new(Detached)
            })
        };

        let page = Self {
            user_info: region(RegionId::UserInfo),
            active_subscription: region(RegionId::ActiveSubscription),
            traffic_summary: region(RegionId::TrafficSummary),
            connection_status: region(RegionId::ConnectionStatus),
            subscriptions_list: region(RegionId::SubscriptionsList),
            configs_list: region(RegionId::ConfigsList),
            traffic_stats: region(RegionId::TrafficStats),
            notifications_list: region(RegionId::NotificationsList),
            notification_badge: region(RegionId::NotificationBadge),
            settings_form: region(RegionId::SettingsForm),
            toasts: region(RegionId::Toasts),
            qr_modal: region(RegionId::QrModal),
            panels: Section::ALL.map(|s| toggle(surface.panel(s), "panel", s)),
            nav: Section::ALL.map(|s| toggle(surface.nav_entry(s), "nav entry", s)),
        };

        logger::debug(debug, "PAGE", "Regions resolved");
        page
    }

    pub fn panel(&self, section: Section) -> &dyn Toggle {
        self.panels[section.index()].as_ref()
    }

    pub fn nav_entry(&self, section: Section) -> &dyn Toggle {
        self.nav[section.index()].as_ref()
    }
}
