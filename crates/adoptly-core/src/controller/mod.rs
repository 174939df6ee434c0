// ── Screen controllers ──
//
// One controller per screen. Each owns its state exclusively and is the
// only writer of it; the shared `PetSource` is stateless.

mod detail;
mod gate;
mod list;

#[cfg(test)]
pub(crate) mod testing;

pub use detail::PetDetailController;
pub use list::PetListController;

/// User-facing message after a failed catalog refresh.
pub const LIST_LOAD_FAILED: &str = "Failed to load pets";

/// User-facing message after a failed single-pet load.
pub const DETAIL_LOAD_FAILED: &str = "Failed to load pet";
