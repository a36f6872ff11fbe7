//! Value objects - Immutable objects defined by their attributes

mod active_modes;
mod score;

pub use active_modes::{ActiveModes, ModeActivation, ModeEvent};
pub use score::{Morality, Percentage};
