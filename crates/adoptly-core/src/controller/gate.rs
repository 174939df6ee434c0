// ── Request generations and cancellation ──
//
// Every request takes a ticket when it is issued. Its result may only be
// written while that ticket is still the newest one and the controller is
// open. Ticket issue and ticket check both run inside the `watch` write
// lock, so a stale result can never interleave with a newer `Loading`.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Generation number captured when a request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Ticket(u64);

impl Ticket {
    pub(super) fn generation(self) -> u64 {
        self.0
    }
}

pub(super) struct RequestGate {
    generation: AtomicU64,
    cancel: CancellationToken,
}

impl RequestGate {
    pub(super) fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            cancel: CancellationToken::new(),
        }
    }

    /// Issue a new ticket and apply `f` (typically "enter Loading") atomically.
    pub(super) fn begin<T>(&self, state: &watch::Sender<T>, f: impl FnOnce(&mut T)) -> Ticket {
        let mut ticket = Ticket(0);
        state.send_modify(|s| {
            ticket = Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
            f(s);
        });
        ticket
    }

    /// Apply `f` only if `ticket` is still current and the gate is open.
    ///
    /// Returns whether the state was written. Subscribers are notified
    /// only when it was.
    pub(super) fn settle<T>(
        &self,
        state: &watch::Sender<T>,
        ticket: Ticket,
        f: impl FnOnce(&mut T),
    ) -> bool {
        state.send_if_modified(|s| {
            if self.is_closed() || self.generation.load(Ordering::SeqCst) != ticket.0 {
                return false;
            }
            f(s);
            true
        })
    }

    /// Drive `fut` unless the gate is closed first.
    pub(super) async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => None,
            out = fut => Some(out),
        }
    }

    pub(super) fn close(&self) {
        self.cancel.cancel();
    }

    pub(super) fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tickets_increase_monotonically() {
        let gate = RequestGate::new();
        let (tx, _rx) = watch::channel(0u32);
        let a = gate.begin(&tx, |_| {});
        let b = gate.begin(&tx, |_| {});
        assert!(b.generation() > a.generation());
    }

    #[test]
    fn only_the_newest_ticket_settles() {
        let gate = RequestGate::new();
        let (tx, rx) = watch::channel(0u32);
        let old = gate.begin(&tx, |_| {});
        let new = gate.begin(&tx, |_| {});

        assert!(!gate.settle(&tx, old, |s| *s = 1));
        assert_eq!(*rx.borrow(), 0);
        assert!(gate.settle(&tx, new, |s| *s = 2));
        assert_eq!(*rx.borrow(), 2);
    }

    #[test]
    fn closed_gate_rejects_current_ticket() {
        let gate = RequestGate::new();
        let (tx, rx) = watch::channel(0u32);
        let ticket = gate.begin(&tx, |_| {});
        gate.close();

        assert!(gate.is_closed());
        assert!(!gate.settle(&tx, ticket, |s| *s = 9));
        assert_eq!(*rx.borrow(), 0);
    }

    #[tokio::test]
    async fn run_returns_none_once_closed() {
        let gate = RequestGate::new();
        assert_eq!(gate.run(async { 5 }).await, Some(5));

        gate.close();
        assert_eq!(gate.run(std::future::pending::<u8>()).await, None);
    }
}
