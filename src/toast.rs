use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::page::Region;
use crate::view::{Fragment, Toast, ToastKind};

pub const TOAST_LIFETIME: Duration = Duration::from_secs(5);

/// Transient notifications that dismiss themselves after [`TOAST_LIFETIME`].
///
/// Dismissal is scheduled with `spawn_local`, so toasts must be shown from
/// inside a `tokio::task::LocalSet`.
pub struct Toaster {
    region: Rc<dyn Region>,
    next_id: Cell<u64>,
}

impl Toaster {
    pub fn new(region: Rc<dyn Region>) -> Self {
        Self {
            region,
            next_id: Cell::new(0),
        }
    }

    pub fn show(&self, message: impl Into<String>, kind: ToastKind) -> u64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);

        self.region.render(Fragment::Toast(Toast {
            id,
            message: message.into(),
            kind,
        }));

        let region = Rc::clone(&self.region);
        tokio::task::spawn_local(async move {
            tokio::time::sleep(TOAST_LIFETIME).await;
            region.render(Fragment::DismissToast(id));
        });

        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.show(message, ToastKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.show(message, ToastKind::Error)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.show(message, ToastKind::Info)
    }
}
