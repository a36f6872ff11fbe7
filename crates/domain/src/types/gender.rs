use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inquisitor gender, stored by the host as a single-word token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    #[serde(rename = "男")]
    Male,
    #[serde(rename = "女")]
    Female,
    #[serde(rename = "无性")]
    Agender,
    #[serde(rename = "扶她")]
    Other,
}

impl Gender {
    pub fn host_token(&self) -> &'static str {
        match self {
            Gender::Male => "男",
            Gender::Female => "女",
            Gender::Agender => "无性",
            Gender::Other => "扶她",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_token())
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "男" => Ok(Gender::Male),
            "女" => Ok(Gender::Female),
            "无性" => Ok(Gender::Agender),
            "扶她" => Ok(Gender::Other),
            other => match other.to_ascii_lowercase().as_str() {
                "male" => Ok(Gender::Male),
                "female" => Ok(Gender::Female),
                "agender" => Ok(Gender::Agender),
                "other" => Ok(Gender::Other),
                _ => Err(DomainError::parse(format!("Unknown gender: {}", s))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_tokens_and_english() {
        assert_eq!("女".parse::<Gender>().ok(), Some(Gender::Female));
        assert_eq!("Agender".parse::<Gender>().ok(), Some(Gender::Agender));
        assert_eq!("扶她".parse::<Gender>().ok(), Some(Gender::Other));
        assert!("robot".parse::<Gender>().is_err());
    }

    #[test]
    fn test_round_trips_through_host_token() {
        for gender in [Gender::Male, Gender::Female, Gender::Agender, Gender::Other] {
            assert_eq!(gender.host_token().parse::<Gender>().ok(), Some(gender));
        }
    }
}
