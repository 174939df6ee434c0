// ── Single-pet screen controller ──
//
// Fetch-by-id on demand, with user-initiated retry. Nothing is fetched on
// creation; the screen calls `load()` when the user asks for the pet.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use adoptly_api::PetId;

use super::DETAIL_LOAD_FAILED;
use super::gate::RequestGate;
use crate::error::CoreError;
use crate::source::PetSource;
use crate::state::{LoadPhase, PetDetailState, RefreshOutcome};
use crate::stream::StateStream;

/// Controller for the single-pet (detail) screen.
///
/// The identifier is opaque: whatever form `load()` receives is handed to
/// the source unchanged and reused by `refresh()`.
pub struct PetDetailController<S> {
    inner: Arc<DetailInner<S>>,
}

struct DetailInner<S> {
    source: S,
    state: watch::Sender<PetDetailState>,
    gate: RequestGate,
    last_error: watch::Sender<Option<Arc<CoreError>>>,
}

impl<S> Clone for PetDetailController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: PetSource> PetDetailController<S> {
    /// Create an unloaded controller. Does not fetch.
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(PetDetailState::default());
        Self {
            inner: Arc::new(DetailInner {
                source,
                state,
                gate: RequestGate::new(),
                last_error: watch::Sender::new(None),
            }),
        }
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Fetch the pet identified by `id`.
    ///
    /// Enters `Loading` and remembers `id`. A pet already on screen stays
    /// visible only when it is being reloaded under the same id. Failure
    /// (including 404) leaves `pet` unset and the phase carrying
    /// [`DETAIL_LOAD_FAILED`]. Only the most recently issued load may
    /// write its result.
    pub async fn load(&self, id: impl Into<PetId>) -> RefreshOutcome {
        let id = id.into();
        let inner = &self.inner;
        if inner.gate.is_closed() {
            return RefreshOutcome::Cancelled;
        }

        let ticket = inner.gate.begin(&inner.state, |s| {
            if s.id.as_ref() != Some(&id) {
                s.pet = None;
            }
            s.id = Some(id.clone());
            s.phase = LoadPhase::Loading;
        });
        debug!(%id, generation = ticket.generation(), "loading pet");

        let Some(result) = inner.gate.run(inner.source.get_pet(&id)).await else {
            debug!(%id, "pet load cancelled");
            return RefreshOutcome::Cancelled;
        };

        match result {
            Ok(pet) => {
                let applied = inner.gate.settle(&inner.state, ticket, |s| {
                    s.pet = Some(Arc::new(pet));
                    s.phase = LoadPhase::Loaded;
                    inner.last_error.send_replace(None);
                });
                if applied {
                    debug!(%id, "pet loaded");
                    return RefreshOutcome::Applied;
                }
            }
            Err(e) => {
                let err = Arc::new(CoreError::from(e));
                let applied = inner.gate.settle(&inner.state, ticket, |s| {
                    s.pet = None;
                    s.phase = LoadPhase::failed(DETAIL_LOAD_FAILED);
                    inner.last_error.send_replace(Some(Arc::clone(&err)));
                });
                if applied {
                    if err.is_not_found() {
                        warn!(%id, "pet not found");
                    } else {
                        warn!(%id, error = %err, "error fetching pet");
                    }
                    return RefreshOutcome::Applied;
                }
                debug!(%id, error = %err, "ignoring failure from superseded load");
            }
        }

        if inner.gate.is_closed() {
            RefreshOutcome::Cancelled
        } else {
            debug!(%id, generation = ticket.generation(), "stale pet response discarded");
            RefreshOutcome::Superseded
        }
    }

    /// Re-issue `load()` with the most recently used id.
    ///
    /// Before any `load()` there is nothing to refresh and this returns
    /// [`RefreshOutcome::NoTarget`] without touching state.
    pub async fn refresh(&self) -> RefreshOutcome {
        let id = self.inner.state.borrow().id.clone();
        match id {
            Some(id) => self.load(id).await,
            None => {
                debug!("refresh requested before any load");
                RefreshOutcome::NoTarget
            }
        }
    }

    /// Abandon in-flight requests and stop accepting new ones.
    pub fn close(&self) {
        debug!("closing pet detail controller");
        self.inner.gate.close();
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn state(&self) -> PetDetailState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> StateStream<PetDetailState> {
        StateStream::new(self.inner.state.subscribe())
    }

    /// Underlying cause of the failure currently shown, if any.
    pub fn last_error(&self) -> Option<Arc<CoreError>> {
        self.inner.last_error.borrow().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.gate.is_closed()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use tokio_test::{assert_pending, assert_ready};

    use super::*;
    use crate::controller::testing::{ScriptedSource, not_found, pet, server_error};

    fn controller() -> (Arc<ScriptedSource>, PetDetailController<Arc<ScriptedSource>>) {
        let source = Arc::new(ScriptedSource::default());
        (Arc::clone(&source), PetDetailController::new(source))
    }

    #[test]
    fn starts_unloaded_without_fetching() {
        let (source, detail) = controller();
        assert_eq!(detail.state(), PetDetailState::default());
        assert!(source.requested_ids().is_empty());
    }

    #[tokio::test]
    async fn load_numeric_id() {
        let (source, detail) = controller();
        source.reply_pet(Ok(pet(42, "Biscuit")));

        assert_eq!(detail.load(42_u64).await, RefreshOutcome::Applied);

        let state = detail.state();
        assert_eq!(state.phase, LoadPhase::Loaded);
        assert_eq!(state.pet.unwrap().id, 42);
        assert_eq!(state.id, Some(PetId::Number(42)));
        assert_eq!(source.requested_ids(), vec![PetId::Number(42)]);
    }

    #[tokio::test]
    async fn text_id_is_passed_through_unchanged() {
        let (source, detail) = controller();
        source.reply_pet(Ok(pet(42, "Biscuit")));

        detail.load("42").await;

        assert_eq!(source.requested_ids(), vec![PetId::Text("42".into())]);
    }

    #[tokio::test]
    async fn not_found_leaves_pet_unset_and_refresh_reissues_same_id() {
        let (source, detail) = controller();
        source.reply_pet(Err(not_found(7)));
        source.reply_pet(Ok(pet(7, "Found")));

        assert_eq!(detail.load("7").await, RefreshOutcome::Applied);
        let state = detail.state();
        assert_eq!(state.phase, LoadPhase::failed("Failed to load pet"));
        assert!(state.pet.is_none());
        assert!(detail.last_error().unwrap().is_not_found());

        assert_eq!(detail.refresh().await, RefreshOutcome::Applied);
        assert_eq!(
            source.requested_ids(),
            vec![PetId::Text("7".into()), PetId::Text("7".into())]
        );
        assert_eq!(detail.state().pet.unwrap().name, "Found");
        assert!(detail.last_error().is_none());
    }

    #[tokio::test]
    async fn failure_after_success_clears_pet() {
        let (source, detail) = controller();
        source.reply_pet(Ok(pet(1, "a")));
        source.reply_pet(Err(server_error()));

        detail.load(1_u64).await;
        detail.refresh().await;

        let state = detail.state();
        assert!(state.pet.is_none());
        assert_eq!(state.phase.error_message(), Some("Failed to load pet"));
    }

    #[tokio::test]
    async fn refresh_before_load_is_a_no_op() {
        let (source, detail) = controller();

        assert_eq!(detail.refresh().await, RefreshOutcome::NoTarget);
        assert_eq!(detail.state(), PetDetailState::default());
        assert!(source.requested_ids().is_empty());
    }

    #[test]
    fn refresh_keeps_pet_visible_while_loading() {
        let (source, detail) = controller();
        source.reply_pet(Ok(pet(1, "a")));
        assert_ready!(tokio_test::task::spawn(detail.load(1_u64)).poll());

        let _reply = source.gate_pet();
        let mut again = tokio_test::task::spawn(detail.refresh());
        assert_pending!(again.poll());

        let state = detail.state();
        assert!(state.phase.is_loading());
        assert_eq!(state.pet.unwrap().name, "a");
    }

    #[test]
    fn loading_a_different_id_hides_previous_pet() {
        let (source, detail) = controller();
        source.reply_pet(Ok(pet(1, "a")));
        assert_ready!(tokio_test::task::spawn(detail.load(1_u64)).poll());

        let _reply = source.gate_pet();
        let mut other = tokio_test::task::spawn(detail.load(2_u64));
        assert_pending!(other.poll());

        assert!(detail.state().pet.is_none());
    }

    #[test]
    fn newest_issued_load_wins() {
        let (source, detail) = controller();
        let reply_first = source.gate_pet();
        let reply_second = source.gate_pet();

        let mut first = tokio_test::task::spawn(detail.load(1_u64));
        assert_pending!(first.poll());
        let mut second = tokio_test::task::spawn(detail.load(2_u64));
        assert_pending!(second.poll());

        reply_second.send(Ok(pet(2, "second"))).unwrap();
        assert_eq!(assert_ready!(second.poll()), RefreshOutcome::Applied);
        reply_first.send(Ok(pet(1, "first"))).unwrap();
        assert_eq!(assert_ready!(first.poll()), RefreshOutcome::Superseded);

        let state = detail.state();
        assert_eq!(state.pet.unwrap().name, "second");
        assert_eq!(state.id, Some(PetId::Number(2)));
    }

    #[test]
    fn close_abandons_in_flight_load() {
        let (source, detail) = controller();
        let _reply = source.gate_pet();

        let mut inflight = tokio_test::task::spawn(detail.load(5_u64));
        assert_pending!(inflight.poll());
        detail.close();

        assert_eq!(assert_ready!(inflight.poll()), RefreshOutcome::Cancelled);
        assert!(detail.is_closed());
    }

    #[tokio::test]
    async fn load_after_close_is_ignored() {
        let (source, detail) = controller();
        detail.close();

        assert_eq!(detail.load(3_u64).await, RefreshOutcome::Cancelled);
        assert!(source.requested_ids().is_empty());
        assert_eq!(detail.state(), PetDetailState::default());
    }

    #[tokio::test]
    async fn subscribers_observe_failure() {
        let (source, detail) = controller();
        let mut states = detail.subscribe();
        source.reply_pet(Err(server_error()));

        detail.load(9_u64).await;

        let state = states.changed().await.unwrap();
        assert_eq!(state.phase.error_message(), Some("Failed to load pet"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn cause_is_cleared_before_success_is_published() {
        let (source, detail) = controller();
        source.reply_pet(Err(not_found(5)));
        detail.load(5_u64).await;
        assert!(detail.last_error().is_some());

        let mut states = detail.subscribe();
        let reply = source.gate_pet();
        let watcher = {
            let detail = detail.clone();
            tokio::spawn(async move {
                while let Some(state) = states.changed().await {
                    if state.phase == LoadPhase::Loaded {
                        return detail.last_error().is_none();
                    }
                }
                false
            })
        };
        let task = {
            let detail = detail.clone();
            tokio::spawn(async move { detail.refresh().await })
        };

        reply.send(Ok(pet(5, "Nemo"))).unwrap();
        assert_eq!(task.await.unwrap(), RefreshOutcome::Applied);
        assert!(watcher.await.unwrap());
    }
}
