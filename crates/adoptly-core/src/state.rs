// ── Published controller state ──
//
// Value snapshots handed to subscribers. Cheap to clone: collections and
// pets sit behind `Arc`.

use std::sync::Arc;

use adoptly_api::{Pet, PetId};

/// Request lifecycle of one screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum LoadPhase {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Loaded,
    /// The last applied request failed. `message` is user-facing and static.
    Failed { message: String },
}

impl LoadPhase {
    pub(crate) fn failed(message: &str) -> Self {
        Self::Failed {
            message: message.to_owned(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Catalog screen state.
///
/// `pets` is ordered: server order after a refresh, most recent local
/// addition first after `add_local`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetListState {
    pub pets: Arc<Vec<Pet>>,
    pub phase: LoadPhase,
}

/// Single-pet screen state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetDetailState {
    /// Identifier of the most recent `load`, reused by `refresh`.
    pub id: Option<PetId>,
    pub pet: Option<Arc<Pet>>,
    pub phase: LoadPhase,
}

/// What became of a single controller request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RefreshOutcome {
    /// The result (success or failure) was written to state.
    Applied,
    /// A newer request was issued meanwhile; the result was discarded.
    Superseded,
    /// The controller was closed; the request was abandoned.
    Cancelled,
    /// `refresh()` was called before any `load()`.
    NoTarget,
}
