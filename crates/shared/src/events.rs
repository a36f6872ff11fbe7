//! Host event names that trigger a re-sync.

use serde::{Deserialize, Serialize};

/// The host's table of chat event names.
///
/// Any name may be missing; only present names are subscribed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct HostEventNames {
    #[serde(default)]
    pub message_updated: Option<String>,
    #[serde(default)]
    pub message_edited: Option<String>,
    #[serde(default)]
    pub message_received: Option<String>,
    #[serde(default, rename = "CHAT_CHANGED")]
    pub chat_changed: Option<String>,
}

impl HostEventNames {
    /// A table with no names; disables live sync.
    pub fn none() -> Self {
        Self {
            message_updated: None,
            message_edited: None,
            message_received: None,
            chat_changed: None,
        }
    }

    /// Every present event name, in subscription order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [
            &self.message_updated,
            &self.message_edited,
            &self.message_received,
            &self.chat_changed,
        ]
        .into_iter()
        .filter_map(|name| name.as_deref())
        .filter(|name| !name.is_empty())
    }
}

impl Default for HostEventNames {
    /// The names used by the tavern chat host.
    fn default() -> Self {
        Self {
            message_updated: Some("message_updated".to_string()),
            message_edited: Some("message_edited".to_string()),
            message_received: Some("message_received".to_string()),
            chat_changed: Some("chat_id_changed".to_string()),
        }
    }
}
