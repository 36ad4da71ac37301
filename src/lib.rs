mod actions;
mod errors;
mod loaders;
mod logger;
mod structs;

pub mod admin;
pub mod auth;
pub mod checkout;
pub mod config;
pub mod dashboard;
pub mod delivery;
pub mod format;
pub mod host;
pub mod modal;
pub mod page;
pub mod router;
pub mod sequence;
pub mod status;
pub mod storage;
pub mod toast;
pub mod transport;
pub mod view;

pub use config::normalize_base_url;
pub use errors::SecureLinkError;
pub use structs::client::{AdminCredentials, Client, ClientOptions};
pub use structs::session::Session;
pub use structs::{
    AdminClient, AdminStats, AuthResponse, ConfigArtifact, Notification, Subscription,
    TrafficReport, TrafficSample, UserProfile,
};

pub use admin::AdminMonitor;
pub use checkout::Checkout;
pub use dashboard::{Dashboard, Startup};
pub use host::{HostContext, Navigator, SystemNavigator};
pub use page::{Page, Region, Surface, Toggle};
pub use router::Section;
pub use storage::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
