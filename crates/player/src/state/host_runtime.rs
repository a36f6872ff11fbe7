//! Host Runtime DI Container
//!
//! This module provides the `HostRuntime` struct - a dependency injection
//! container that aggregates the host's capabilities behind port traits.
//!
//! Every slot is optional. A host that lacks a capability leaves the slot
//! empty and the services degrade instead of failing:
//! - no variables: sync and persistence are skipped with a warning
//! - no events: only the initial sync happens
//! - no chat: tactical options are empty
//!
//! Usage:
//! - Built by the runner (or a test) with the `with_*` methods
//! - Handed to `DashboardService::new` and `TacticalOptionsService::new`

use std::sync::Arc;

use crate::ports::outbound::{HostChatPort, HostEventsPort, HostVariablesPort, MessageTarget};

/// Host capabilities container
#[derive(Clone, Default)]
pub struct HostRuntime {
    variables: Option<Arc<dyn HostVariablesPort>>,
    events: Option<Arc<dyn HostEventsPort>>,
    chat: Option<Arc<dyn HostChatPort>>,
}

impl HostRuntime {
    /// A runtime with no capabilities.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variables(mut self, variables: Arc<dyn HostVariablesPort>) -> Self {
        self.variables = Some(variables);
        self
    }

    pub fn with_events(mut self, events: Arc<dyn HostEventsPort>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn with_chat(mut self, chat: Arc<dyn HostChatPort>) -> Self {
        self.chat = Some(chat);
        self
    }

    pub fn variables(&self) -> Option<&Arc<dyn HostVariablesPort>> {
        self.variables.as_ref()
    }

    pub fn events(&self) -> Option<&Arc<dyn HostEventsPort>> {
        self.events.as_ref()
    }

    pub fn chat(&self) -> Option<&Arc<dyn HostChatPort>> {
        self.chat.as_ref()
    }

    /// Current message id as known to the variables capability.
    pub fn current_message_id(&self) -> Option<i64> {
        self.variables.as_ref().and_then(|v| v.current_message_id())
    }

    /// Target for reads and writes: the current message, else "latest".
    pub fn message_target(&self) -> MessageTarget {
        MessageTarget::from_current(self.current_message_id())
    }
}

impl std::fmt::Debug for HostRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostRuntime")
            .field("variables", &self.variables.is_some())
            .field("events", &self.events.is_some())
            .field("chat", &self.chat.is_some())
            .finish()
    }
}
