use std::cell::RefCell;
use std::rc::Rc;

use crate::auth::{AuthGate, AuthOutcome, AuthSource};
use crate::errors::SecureLinkError;
use crate::host::{HostContext, Navigator};
use crate::logger;
use crate::modal::Modal;
use crate::page::{Page, Surface};
use crate::router::{Router, Section};
use crate::sequence::RequestSequence;
use crate::storage::CredentialStore;
use crate::structs::session::Session;
use crate::structs::ConfigArtifact;
use crate::toast::Toaster;
use crate::view::{Fragment, UserBadge};
use crate::Client;

/// Result of [`Dashboard::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Startup {
    /// A session exists and the dashboard section has been loaded.
    Ready(AuthSource),
    /// No session could be resolved; the navigator was sent to the landing page.
    Redirected,
}

/// One sequence per independently rendered feed.
#[derive(Debug, Default)]
pub(crate) struct Feeds {
    pub(crate) dashboard_subscriptions: RequestSequence,
    pub(crate) dashboard_traffic: RequestSequence,
    pub(crate) subscriptions: RequestSequence,
    pub(crate) configs: RequestSequence,
    pub(crate) traffic: RequestSequence,
    pub(crate) notifications: RequestSequence,
}

/// The user dashboard: auth gate, section router, loaders and actions around one session.
///
/// Owned by the page entry point and shared with event handlers through `Rc`.
/// All methods take `&self` so an action can run while a loader is in flight.
/// Must be driven from inside a `tokio::task::LocalSet`.
pub struct Dashboard {
    pub(crate) client: Client,
    pub(crate) store: Rc<dyn CredentialStore>,
    host: HostContext,
    pub(crate) navigator: Rc<dyn Navigator>,
    pub(crate) page: Page,
    router: Router,
    pub(crate) modal: Modal,
    pub(crate) toaster: Toaster,
    pub(crate) session: RefCell<Option<Session>>,
    /// Last applied config list. Gates download and QR actions.
    pub(crate) configs: RefCell<Vec<ConfigArtifact>>,
    pub(crate) feeds: Feeds,
}

impl Dashboard {
    pub fn new(
        client: Client,
        store: Rc<dyn CredentialStore>,
        host: HostContext,
        navigator: Rc<dyn Navigator>,
        surface: &dyn Surface,
    ) -> Self {
        let page = Page::resolve(surface, client.debug);
        let modal = Modal::new(Rc::clone(&page.qr_modal));
        let toaster = Toaster::new(Rc::clone(&page.toasts));
        let router = Router::new(client.debug);

        Self {
            client,
            store,
            host,
            navigator,
            page,
            router,
            modal,
            toaster,
            session: RefCell::new(None),
            configs: RefCell::new(Vec::new()),
            feeds: Feeds::default(),
        }
    }

    /// Resolves the session and, on success, shows and loads the dashboard section.
    pub async fn start(&self) -> Startup {
        let outcome = AuthGate::new(&self.client, self.store.as_ref(), &self.host)
            .resolve()
            .await;

        let (session, source) = match outcome {
            AuthOutcome::Authenticated { session, source } => (session, source),
            AuthOutcome::Redirect { target } => {
                self.navigator.navigate(&target);
                return Startup::Redirected;
            }
        };

        self.page
            .user_info
            .render(Fragment::User(UserBadge::from_profile(&session.user)));
        *self.session.borrow_mut() = Some(session);

        if source == AuthSource::HostExchange {
            self.toaster.success("Signed in successfully");
        }

        self.router.activate(&self.page, Section::Dashboard);
        self.load_section(Section::Dashboard).await;

        Startup::Ready(source)
    }

    /// Switches to the section named `name` and runs its loader.
    pub async fn navigate(&self, name: &str) -> Result<Section, SecureLinkError> {
        let section = self.router.parse(name)?;
        self.show_section(section).await?;
        Ok(section)
    }

    pub async fn show_section(&self, section: Section) -> Result<(), SecureLinkError> {
        self.session()?;
        self.router.activate(&self.page, section);
        self.load_section(section).await;
        Ok(())
    }

    pub fn current_section(&self) -> Section {
        self.router.current()
    }

    pub fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// Snapshot of the session. Nothing renders without one.
    pub(crate) fn session(&self) -> Result<Session, SecureLinkError> {
        self.session.borrow().clone().ok_or_else(|| {
            logger::error("ROUTER", "No session, refusing to load data");
            SecureLinkError::NotAuthenticated
        })
    }
}
