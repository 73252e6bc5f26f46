//! One-shot reveal timer.
//!
//! Every card shown gets a fresh [`RevealTicket`]. Arming a timer replaces the
//! pending one, and whoever receives the expiry hands the ticket back to the
//! controller, which drops it unless it still belongs to the card on screen.

use log::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RevealTicket(u64);

impl RevealTicket {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

pub trait RevealScheduler: Send {
    /// Fire `ticket` after `delay`. Any pending ticket is cancelled first.
    fn arm(&mut self, ticket: RevealTicket, delay: Duration);

    fn cancel(&mut self);
}

pub type OnReveal = Arc<dyn Fn(RevealTicket) + Send + Sync>;

/// Sleeps on a tokio runtime and calls `on_reveal` when the delay elapses.
pub struct TokioRevealTimer {
    runtime: Handle,
    on_reveal: OnReveal,
    pending: Option<JoinHandle<()>>,
}

impl TokioRevealTimer {
    pub fn new(runtime: Handle, on_reveal: OnReveal) -> Self {
        Self {
            runtime,
            on_reveal,
            pending: None,
        }
    }

    /// Uses the runtime of the calling context. Panics outside of tokio.
    pub fn current(on_reveal: OnReveal) -> Self {
        Self::new(Handle::current(), on_reveal)
    }
}

impl RevealScheduler for TokioRevealTimer {
    fn arm(&mut self, ticket: RevealTicket, delay: Duration) {
        self.cancel();
        let on_reveal = Arc::clone(&self.on_reveal);
        trace!("arming {ticket:?} in {delay:?}");
        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            on_reveal(ticket);
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for TokioRevealTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
