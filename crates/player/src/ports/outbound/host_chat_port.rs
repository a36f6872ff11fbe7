//! Host Chat Port - Current message text and the input bar

use super::HostError;

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait HostChatPort: Send + Sync {
    /// Raw text of the message with `message_id`, or the latest message.
    fn message_text(&self, message_id: Option<i64>) -> Result<Option<String>, HostError>;

    /// Put `text` into the host's input bar.
    ///
    /// Returns `false` when the host has no input bar to fill.
    fn fill_input(&self, text: &str) -> Result<bool, HostError>;
}
