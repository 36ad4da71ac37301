use std::cell::Cell;

/// Orders responses of requests that may overlap.
///
/// Every request takes a number from `issue`. A response is applied only when
/// nothing newer has been applied already, so a slow response can never
/// overwrite a fresher one.
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: Cell<u64>,
    applied: Cell<u64>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> u64 {
        let next = self.issued.get() + 1;
        self.issued.set(next);
        next
    }

    /// Returns `true` and records `ticket` if it is newer than anything applied so far.
    pub fn try_apply(&self, ticket: u64) -> bool {
        if ticket <= self.applied.get() {
            return false;
        }
        self.applied.set(ticket);
        true
    }

    pub fn latest_issued(&self) -> u64 {
        self.issued.get()
    }
}
