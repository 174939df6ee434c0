// ── Pet resource types ──
//
// Wire shapes for the `/pets` resource plus the opaque identifier used
// to address a single pet. Field names follow the JSON exactly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── Pet ─────────────────────────────────────────────────────────────

/// A catalog record describing one adoptable animal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    /// Server-assigned, or caller-supplied for locally added pets.
    pub id: u64,
    pub name: String,
    /// Species or category. Serialized as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    /// URI of the pet's picture.
    pub image: String,
    #[serde(default)]
    pub adopted: AdoptionStatus,
}

impl Pet {
    pub fn is_adopted(&self) -> bool {
        self.adopted.is_adopted()
    }

    /// Identifier suitable for [`PetClient::get_pet`](crate::PetClient::get_pet).
    pub fn pet_id(&self) -> PetId {
        PetId::Number(self.id)
    }
}

// ── AdoptionStatus ──────────────────────────────────────────────────

/// Adoption flag as sent by the server.
///
/// Only the exact literal `"Yes"` means adopted. Every other value,
/// including unexpected ones, means available. The raw string is kept
/// so it serializes back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdoptionStatus(String);

impl AdoptionStatus {
    const ADOPTED: &'static str = "Yes";

    pub fn adopted() -> Self {
        Self(Self::ADOPTED.to_owned())
    }

    pub fn available() -> Self {
        Self("No".to_owned())
    }

    pub fn is_adopted(&self) -> bool {
        self.0 == Self::ADOPTED
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AdoptionStatus {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AdoptionStatus {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for AdoptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── PetId ───────────────────────────────────────────────────────────

/// Opaque identifier for a single pet.
///
/// Accepts numeric and textual forms and never converts between them.
/// Both collapse to one wire representation, the `Display` output, which
/// the client places into the request path as a single segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PetId {
    Number(u64),
    Text(String),
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for PetId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<u64> for PetId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<String> for PetId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for PetId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}
