//! Domain model for the Tianfa dashboard.
//!
//! Pure types with no I/O: the world, the inquisitor, the villain roster,
//! the game modes and the seed data every normalized field falls back to.

pub mod defaults;
pub mod entities;
pub mod error;
pub mod types;
pub mod value_objects;

pub use entities::{find_villain, select_or_first, Inquisitor, Villain, WorldState};
pub use error::DomainError;
pub use types::{GameMode, Gender, ThreatBand, ThreatLevel};
pub use value_objects::{ActiveModes, ModeActivation, ModeEvent, Morality, Percentage};
