//! Bounded score value objects
//!
//! Host data is free-form, so these types accept any finite number through
//! `clamped` and hold only in-range whole values afterwards.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A whole-number percentage in `0..=100`.
///
/// Used for purification, experience, corruption and affinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value > Self::MAX {
            return Err(DomainError::validation(format!(
                "percentage must be 0..=100, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Round and clamp an arbitrary finite number into range.
    pub fn clamped(value: f64) -> Self {
        Self(value.round().clamp(0.0, f64::from(Self::MAX)) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Good/evil alignment in `-100..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Morality(i8);

impl Morality {
    pub const MIN: i8 = -100;
    pub const MAX: i8 = 100;

    pub fn new(value: i8) -> Result<Self, DomainError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DomainError::validation(format!(
                "morality must be -100..=100, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn clamped(value: f64) -> Self {
        Self(
            value
                .round()
                .clamp(f64::from(Self::MIN), f64::from(Self::MAX)) as i8,
        )
    }

    pub fn value(&self) -> i8 {
        self.0
    }

    pub fn is_evil(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Morality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_new_rejects_out_of_range() {
        assert!(Percentage::new(100).is_ok());
        assert!(matches!(
            Percentage::new(101),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_percentage_clamped() {
        assert_eq!(Percentage::clamped(-5.0).value(), 0);
        assert_eq!(Percentage::clamped(15.4).value(), 15);
        assert_eq!(Percentage::clamped(15.5).value(), 16);
        assert_eq!(Percentage::clamped(250.0).value(), 100);
    }

    #[test]
    fn test_morality_clamped() {
        assert_eq!(Morality::clamped(-185.0).value(), -100);
        assert_eq!(Morality::clamped(42.2).value(), 42);
        assert!(Morality::clamped(-1.0).is_evil());
    }

    #[test]
    fn test_morality_new_bounds() {
        assert!(Morality::new(-100).is_ok());
        assert!(Morality::new(-101).is_err());
    }

    #[test]
    fn test_scores_serialize_as_plain_numbers() {
        assert_eq!(serde_json::to_string(&Percentage::clamped(12.0)).unwrap(), "12");
        assert_eq!(serde_json::to_string(&Morality::clamped(-85.0)).unwrap(), "-85");
    }
}
