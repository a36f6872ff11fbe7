//! Villain threat tiers

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Threat tier assigned to a villain, weakest (`E`) to strongest (`SSS`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum ThreatLevel {
    E,
    D,
    /// Fallback tier for anything the host sends that is not recognized
    #[default]
    C,
    B,
    A,
    S,
    SS,
    SSS,
}

/// Coarse grouping used when highlighting the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreatBand {
    Moderate,
    High,
    Critical,
}

impl ThreatLevel {
    pub fn all() -> &'static [ThreatLevel] {
        &[
            ThreatLevel::E,
            ThreatLevel::D,
            ThreatLevel::C,
            ThreatLevel::B,
            ThreatLevel::A,
            ThreatLevel::S,
            ThreatLevel::SS,
            ThreatLevel::SSS,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::E => "E",
            ThreatLevel::D => "D",
            ThreatLevel::C => "C",
            ThreatLevel::B => "B",
            ThreatLevel::A => "A",
            ThreatLevel::S => "S",
            ThreatLevel::SS => "SS",
            ThreatLevel::SSS => "SSS",
        }
    }

    pub fn band(&self) -> ThreatBand {
        match self {
            ThreatLevel::SS | ThreatLevel::SSS => ThreatBand::Critical,
            ThreatLevel::S | ThreatLevel::A => ThreatBand::High,
            _ => ThreatBand::Moderate,
        }
    }

    /// Uppercases the input and matches it against the known tiers,
    /// falling back to [`ThreatLevel::C`].
    pub fn from_str_lenient(s: &str) -> Self {
        s.to_uppercase().parse().unwrap_or_default()
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThreatLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|level| level.as_str() == s)
            .copied()
            .ok_or_else(|| DomainError::parse(format!("Unknown threat level: {}", s)))
    }
}
