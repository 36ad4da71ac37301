use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use crate::errors::SecureLinkError;
use crate::logger;
use crate::page::Page;

/// One of the mutually exclusive dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Dashboard,
    Subscriptions,
    Configs,
    Traffic,
    Notifications,
    Settings,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Dashboard,
        Section::Subscriptions,
        Section::Configs,
        Section::Traffic,
        Section::Notifications,
        Section::Settings,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Subscriptions => "subscriptions",
            Section::Configs => "configs",
            Section::Traffic => "traffic",
            Section::Notifications => "notifications",
            Section::Settings => "settings",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Section::Dashboard => 0,
            Section::Subscriptions => 1,
            Section::Configs => 2,
            Section::Traffic => 3,
            Section::Notifications => 4,
            Section::Settings => 5,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = SecureLinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.name() == s)
            .ok_or_else(|| SecureLinkError::UnknownSection(s.to_string()))
    }
}

/// Tracks the active section and flips panel and nav visual state.
#[derive(Debug)]
pub struct Router {
    current: Cell<Section>,
    debug: bool,
}

impl Router {
    pub fn new(debug: bool) -> Self {
        Self {
            current: Cell::new(Section::Dashboard),
            debug,
        }
    }

    pub fn current(&self) -> Section {
        self.current.get()
    }

    /// Parses a section name coming from the UI. Unknown names are logged and rejected.
    pub fn parse(&self, name: &str) -> Result<Section, SecureLinkError> {
        name.parse::<Section>().map_err(|err| {
            logger::error("ROUTER", &format!("Rejected navigation: {}", err));
            err
        })
    }

    /// Deactivates every other section and its nav entry, then activates `section`.
    pub fn activate(&self, page: &Page, section: Section) {
        for other in Section::ALL {
            if other != section {
                page.panel(other).set_active(false);
                page.nav_entry(other).set_active(false);
            }
        }
        page.panel(section).set_active(true);
        page.nav_entry(section).set_active(true);

        self.current.set(section);
        logger::debug(self.debug, "ROUTER", &format!("Section {} active", section));
    }
}
