//! Active game modes and the per-mode activation state machine.
//!
//! Modes only ever accumulate. `Normal` is inserted by every constructor, and
//! there is no method that removes a mode.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::types::GameMode;

/// The set of modes currently in effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<GameMode>", into = "Vec<GameMode>")]
pub struct ActiveModes(BTreeSet<GameMode>);

impl ActiveModes {
    /// Only the baseline mode.
    pub fn baseline() -> Self {
        Self(BTreeSet::from([GameMode::Normal]))
    }

    /// Collect modes, always adding the baseline.
    pub fn from_modes(modes: impl IntoIterator<Item = GameMode>) -> Self {
        let mut set: BTreeSet<GameMode> = modes.into_iter().collect();
        set.insert(GameMode::Normal);
        Self(set)
    }

    pub fn contains(&self, mode: GameMode) -> bool {
        self.0.contains(&mode)
    }

    /// Returns a copy with `mode` added. There is no inverse.
    pub fn with(&self, mode: GameMode) -> Self {
        let mut next = self.0.clone();
        next.insert(mode);
        Self(next)
    }

    pub fn iter(&self) -> impl Iterator<Item = GameMode> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true: the baseline is always present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Membership for every known mode, baseline forced on.
    pub fn flags(&self) -> Vec<(GameMode, bool)> {
        GameMode::all()
            .iter()
            .map(|mode| (*mode, mode.is_baseline() || self.contains(*mode)))
            .collect()
    }
}

impl Default for ActiveModes {
    fn default() -> Self {
        Self::baseline()
    }
}

impl From<Vec<GameMode>> for ActiveModes {
    fn from(modes: Vec<GameMode>) -> Self {
        Self::from_modes(modes)
    }
}

impl From<ActiveModes> for Vec<GameMode> {
    fn from(modes: ActiveModes) -> Self {
        modes.0.into_iter().collect()
    }
}

/// Activation state of a single mode.
///
/// ```text
/// Inactive --Request--> PendingActivation --Confirm--> Active
///                              |
///                              +--Cancel--> Inactive
/// ```
///
/// `Active` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeActivation {
    Inactive,
    PendingActivation,
    Active,
}

/// Input to [`ModeActivation::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeEvent {
    /// The user toggled the mode on
    Request,
    Confirm,
    Cancel,
}

impl ModeActivation {
    pub fn apply(self, event: ModeEvent) -> Result<Self, DomainError> {
        match (self, event) {
            (ModeActivation::Inactive, ModeEvent::Request) => Ok(ModeActivation::PendingActivation),
            (ModeActivation::PendingActivation, ModeEvent::Request) => {
                Ok(ModeActivation::PendingActivation)
            }
            (ModeActivation::PendingActivation, ModeEvent::Confirm) => Ok(ModeActivation::Active),
            (ModeActivation::PendingActivation, ModeEvent::Cancel) => Ok(ModeActivation::Inactive),
            (state, event) => Err(DomainError::invalid_state_transition(format!(
                "{:?} cannot handle {:?}",
                state, event
            ))),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ModeActivation::Active)
    }
}
