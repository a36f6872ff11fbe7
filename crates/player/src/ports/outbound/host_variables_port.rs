//! Host Variables Port - Read and replace the per-message variable container

use std::fmt;

use serde_json::Value;

use super::HostError;

/// Which message's variables to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageTarget {
    Id(i64),
    /// The host's "latest" sentinel
    Latest,
}

impl MessageTarget {
    /// Target the given message, or the latest one when there is no id.
    pub fn from_current(id: Option<i64>) -> Self {
        id.map_or(MessageTarget::Latest, MessageTarget::Id)
    }
}

impl fmt::Display for MessageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageTarget::Id(id) => write!(f, "{}", id),
            MessageTarget::Latest => f.write_str("latest"),
        }
    }
}

/// Port for the host's message-variable store.
///
/// Calls are synchronous and may fail, but never suspend.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait HostVariablesPort: Send + Sync {
    /// Id of the message the dashboard is attached to, if the host knows it.
    fn current_message_id(&self) -> Option<i64>;

    /// Read the whole untyped container for `target`.
    fn get_variables(&self, target: MessageTarget) -> Result<Value, HostError>;

    /// Replace the whole container for `target`.
    fn replace_variables(&self, variables: Value, target: MessageTarget) -> Result<(), HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_from_current() {
        assert_eq!(MessageTarget::from_current(Some(7)), MessageTarget::Id(7));
        assert_eq!(MessageTarget::from_current(None), MessageTarget::Latest);
        assert_eq!(MessageTarget::Latest.to_string(), "latest");
    }
}
