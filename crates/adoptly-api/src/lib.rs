// adoptly-api: Async Rust client for the adoptable-pets REST API

pub mod client;
pub mod error;
pub mod pet;
pub mod transport;

pub use client::PetClient;
pub use error::Error;
pub use pet::{AdoptionStatus, Pet, PetId};
pub use transport::{ClientConfig, DEFAULT_BASE_URL, REQUEST_TIMEOUT};
