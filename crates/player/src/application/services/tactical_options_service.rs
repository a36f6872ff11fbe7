//! Tactical Options Service - Lettered choices from the current message
//!
//! Reads the current chat message, extracts up to four options (A-D), and
//! can place a chosen option into the host's input bar.

use tianfa_shared::{parse_options, OptionKey, TacticalOptions};

use crate::application::ServiceError;
use crate::ports::outbound::HostError;
use crate::state::HostRuntime;

pub struct TacticalOptionsService {
    runtime: HostRuntime,
}

impl TacticalOptionsService {
    pub fn new(runtime: HostRuntime) -> Self {
        Self { runtime }
    }

    /// Options offered by the current message. Empty when the host has no
    /// chat capability or the message cannot be read.
    pub fn current_options(&self) -> TacticalOptions {
        let Some(chat) = self.runtime.chat() else {
            tracing::debug!("Host exposes no chat; no tactical options");
            return TacticalOptions::default();
        };

        let message_id = self.runtime.current_message_id();
        match chat.message_text(message_id) {
            Ok(Some(text)) => parse_options(&text),
            Ok(None) => TacticalOptions::default(),
            Err(error) => {
                tracing::warn!(?message_id, error = %error, "Failed to read current message");
                TacticalOptions::default()
            }
        }
    }

    /// Put option `key` into the host's input bar.
    ///
    /// Returns `false` when the option is empty or the host has no input bar.
    pub fn choose(&self, key: OptionKey) -> Result<bool, ServiceError> {
        let options = self.current_options();
        let Some(text) = options.get(key) else {
            tracing::debug!(option = %key, "Option is empty; nothing to fill");
            return Ok(false);
        };

        let chat = self
            .runtime
            .chat()
            .ok_or(HostError::Unavailable("chat"))?;
        let filled = chat.fill_input(text)?;
        if filled {
            tracing::info!(option = %key, "Option placed in input bar");
        } else {
            tracing::warn!(option = %key, "No input bar found; option not filled");
        }
        Ok(filled)
    }
}
