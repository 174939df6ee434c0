// ── Catalog screen controller ──
//
// Owns the pet collection and its fetch lifecycle. `refresh()` replaces
// the collection wholesale; `add_local()` prepends without a round-trip.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use adoptly_api::Pet;

use super::LIST_LOAD_FAILED;
use super::gate::RequestGate;
use crate::error::CoreError;
use crate::source::PetSource;
use crate::state::{LoadPhase, PetListState, RefreshOutcome};
use crate::stream::StateStream;

/// Controller for the catalog (list) screen.
///
/// Cheaply cloneable via `Arc`; clones share state. The machine has no
/// terminal state: `refresh()` can be re-entered from any phase.
pub struct PetListController<S> {
    inner: Arc<ListInner<S>>,
}

struct ListInner<S> {
    source: S,
    state: watch::Sender<PetListState>,
    gate: RequestGate,
    /// Cause of the failure currently shown. Written under the state
    /// channel's write lock, together with the phase.
    last_error: watch::Sender<Option<Arc<CoreError>>>,
}

impl<S> Clone for PetListController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: PetSource> PetListController<S> {
    /// Create an idle controller with an empty collection. Does not fetch.
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(PetListState::default());
        Self {
            inner: Arc::new(ListInner {
                source,
                state,
                gate: RequestGate::new(),
                last_error: watch::Sender::new(None),
            }),
        }
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Reload the full collection.
    ///
    /// Enters `Loading` immediately, keeping the current collection
    /// visible. On success the collection is replaced (never merged). On
    /// failure the collection is emptied and the phase carries
    /// [`LIST_LOAD_FAILED`]. A result is written only if no newer
    /// `refresh()` was issued meanwhile.
    pub async fn refresh(&self) -> RefreshOutcome {
        let inner = &self.inner;
        if inner.gate.is_closed() {
            return RefreshOutcome::Cancelled;
        }

        let ticket = inner
            .gate
            .begin(&inner.state, |s| s.phase = LoadPhase::Loading);
        debug!(generation = ticket.generation(), "refreshing pet list");

        let Some(result) = inner.gate.run(inner.source.list_pets()).await else {
            debug!(generation = ticket.generation(), "pet list refresh cancelled");
            return RefreshOutcome::Cancelled;
        };

        match result {
            Ok(pets) => {
                let count = pets.len();
                let applied = inner.gate.settle(&inner.state, ticket, |s| {
                    s.pets = Arc::new(pets);
                    s.phase = LoadPhase::Loaded;
                    inner.last_error.send_replace(None);
                });
                if applied {
                    debug!(count, "pet list loaded");
                    return RefreshOutcome::Applied;
                }
            }
            Err(e) => {
                let err = Arc::new(CoreError::from(e));
                let applied = inner.gate.settle(&inner.state, ticket, |s| {
                    s.pets = Arc::new(Vec::new());
                    s.phase = LoadPhase::failed(LIST_LOAD_FAILED);
                    inner.last_error.send_replace(Some(Arc::clone(&err)));
                });
                if applied {
                    warn!(error = %err, "error fetching pets");
                    return RefreshOutcome::Applied;
                }
                debug!(error = %err, "ignoring failure from superseded refresh");
            }
        }

        self.discarded(ticket.generation())
    }

    /// Prepend a caller-supplied pet to the collection.
    ///
    /// Purely local: no request is made and the server never learns about
    /// this pet, so the next `refresh()` drops it. The phase is left as is.
    /// Ignored once the controller is closed.
    pub fn add_local(&self, pet: Pet) {
        let (id, name) = (pet.id, pet.name.clone());
        let gate = &self.inner.gate;
        let added = self.inner.state.send_if_modified(|s| {
            if gate.is_closed() {
                return false;
            }
            let mut pets = Vec::with_capacity(s.pets.len() + 1);
            pets.push(pet);
            pets.extend(s.pets.iter().cloned());
            s.pets = Arc::new(pets);
            true
        });
        if added {
            debug!(id, %name, "added pet locally");
        } else {
            debug!(id, %name, "pet list controller closed; local pet dropped");
        }
    }

    /// Abandon in-flight requests and stop accepting new ones.
    ///
    /// Call when the owning screen is torn down. State is frozen afterwards.
    pub fn close(&self) {
        debug!("closing pet list controller");
        self.inner.gate.close();
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Current state snapshot.
    pub fn state(&self) -> PetListState {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> StateStream<PetListState> {
        StateStream::new(self.inner.state.subscribe())
    }

    /// Underlying cause of the failure currently shown, if any.
    pub fn last_error(&self) -> Option<Arc<CoreError>> {
        self.inner.last_error.borrow().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.gate.is_closed()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn discarded(&self, generation: u64) -> RefreshOutcome {
        if self.inner.gate.is_closed() {
            debug!(generation, "pet list controller closed; result dropped");
            RefreshOutcome::Cancelled
        } else {
            debug!(generation, "stale pet list response discarded");
            RefreshOutcome::Superseded
        }
    }
}
