//! Fetch-state controllers between `adoptly-api` and UI consumers.
//!
//! This crate owns the request lifecycle for the two catalog screens:
//!
//! - **[`PetListController`]**: Drives the catalog screen.
//!   [`refresh()`](PetListController::refresh) reloads the full collection,
//!   [`add_local()`](PetListController::add_local) prepends a caller-supplied
//!   pet without touching the network.
//!
//! - **[`PetDetailController`]**: Drives the single-pet screen.
//!   [`load()`](PetDetailController::load) fetches by id on demand and
//!   [`refresh()`](PetDetailController::refresh) re-issues the last id.
//!
//! - **[`PetSource`]**: The seam both controllers fetch through.
//!   [`PetClient`](adoptly_api::PetClient) implements it; tests script it.
//!
//! - **[`StateStream<T>`]**: Subscription handle over a controller's
//!   published state. Exposes `current()` / `latest()` / `changed()`.
//!
//! Every request is tagged with a generation number. Only the most
//! recently issued request may write state, and [`close()`](PetListController::close)
//! abandons anything still in flight.

pub mod controller;
pub mod error;
pub mod source;
pub mod state;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use controller::{DETAIL_LOAD_FAILED, LIST_LOAD_FAILED, PetDetailController, PetListController};
pub use error::CoreError;
pub use source::PetSource;
pub use state::{LoadPhase, PetDetailState, PetListState, RefreshOutcome};
pub use stream::StateStream;

// Re-export wire types at the crate root for ergonomics.
pub use adoptly_api::{AdoptionStatus, Pet, PetId};
