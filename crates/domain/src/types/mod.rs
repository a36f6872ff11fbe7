//! Closed vocabularies shared by every layer.
//!
//! These enums carry the host's own tokens so they can be written back
//! verbatim.

mod game_mode;
mod gender;
mod threat_level;

pub use game_mode::GameMode;
pub use gender::Gender;
pub use threat_level::{ThreatBand, ThreatLevel};
