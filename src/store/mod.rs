//! In-memory mirrors of backend-owned collections.
//!
//! Stores never perform I/O. Starting an operation returns the `Effect` to
//! run; the outcome comes back tagged with the `RequestSeq` it was issued
//! under and is applied only if that request is still the pending one.

pub mod chat;
pub mod tasks;

pub use chat::ChatStore;
pub use tasks::TaskStore;

/// Monotonic per-store request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(u64);

impl RequestSeq {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Issues `RequestSeq`s. Never reset, not even when a store is cleared, so
/// a response from before a logout can never match a request made after it.
#[derive(Debug, Default, Clone)]
pub struct Sequencer {
    last: u64,
}

impl Sequencer {
    pub fn next(&mut self) -> RequestSeq {
        self.last += 1;
        RequestSeq(self.last)
    }
}

/// Single in-flight slot.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pending(Option<RequestSeq>);

impl Pending {
    pub fn is_pending(&self) -> bool {
        self.0.is_some()
    }

    pub fn begin(&mut self, seq: RequestSeq) {
        self.0 = Some(seq);
    }

    /// Free the slot if `seq` is the request it holds.
    pub fn settle(&mut self, seq: RequestSeq) -> bool {
        if self.0 == Some(seq) {
            self.0 = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.0 = None;
    }
}

/// What applying a backend outcome did to a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// Error recorded in the store's error slot.
    Failed,
    /// Not the pending request; ignored.
    Stale,
    /// 401: the caller must tear the session down.
    Unauthorized,
}
