use std::cell::Cell;
use std::rc::Rc;

use crate::page::Region;
use crate::view::{Fragment, ModalView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
}

/// Where a click on the open overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayClick {
    /// The dimmed area around the dialog.
    Background,
    /// The dialog itself.
    Content,
}

/// QR overlay. Opens only after a successful QR fetch; closes from the close
/// button or a click on the background.
pub struct Modal {
    region: Rc<dyn Region>,
    state: Cell<ModalState>,
}

impl Modal {
    pub fn new(region: Rc<dyn Region>) -> Self {
        Self {
            region,
            state: Cell::new(ModalState::Closed),
        }
    }

    pub fn state(&self) -> ModalState {
        self.state.get()
    }

    pub(crate) fn open(&self, image_url: String) {
        self.region.render(Fragment::Modal(ModalView::Open { image_url }));
        self.state.set(ModalState::Open);
    }

    /// Close button.
    pub fn close(&self) {
        if self.state.get() == ModalState::Closed {
            return;
        }
        self.region.render(Fragment::Modal(ModalView::Closed));
        self.state.set(ModalState::Closed);
    }

    pub fn click(&self, target: OverlayClick) {
        if target == OverlayClick::Background {
            self.close();
        }
    }
}
