//! In-memory host runtime.
//!
//! Implements every host port over process memory. Used by tests and as a
//! reference for what a real host adapter has to provide.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde_json::Value;
use tianfa_shared::HostEventNames;

use crate::ports::outbound::{
    EventListener, EventSubscription, HostChatPort, HostError, HostEventsPort, HostVariablesPort,
    MessageRef, MessageTarget,
};

type Listeners = Mutex<Vec<(u64, String, EventListener)>>;

pub struct MemoryHost {
    variables: Mutex<Value>,
    message_id: Option<i64>,
    event_names: Option<HostEventNames>,
    listeners: Arc<Listeners>,
    next_listener: AtomicU64,
    message_text: Mutex<Option<String>>,
    input: Option<Mutex<String>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryHost {
    /// A host holding `variables`, with the default event names and an
    /// input bar.
    pub fn new(variables: Value) -> Self {
        Self {
            variables: Mutex::new(variables),
            message_id: None,
            event_names: Some(HostEventNames::default()),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener: AtomicU64::new(0),
            message_text: Mutex::new(None),
            input: Some(Mutex::new(String::new())),
        }
    }

    pub fn with_message_id(mut self, id: i64) -> Self {
        self.message_id = Some(id);
        self
    }

    pub fn with_event_names(mut self, names: Option<HostEventNames>) -> Self {
        self.event_names = names;
        self
    }

    pub fn with_message_text(self, text: impl Into<String>) -> Self {
        *lock(&self.message_text) = Some(text.into());
        self
    }

    pub fn without_input_bar(mut self) -> Self {
        self.input = None;
        self
    }

    /// Current container, as the host would store it.
    pub fn variables(&self) -> Value {
        lock(&self.variables).clone()
    }

    /// Overwrite the container without notifying anyone.
    pub fn set_variables(&self, variables: Value) {
        *lock(&self.variables) = variables;
    }

    /// Text last placed in the input bar.
    pub fn input_text(&self) -> Option<String> {
        self.input.as_ref().map(|input| lock(input).clone())
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.listeners).len()
    }

    /// Deliver `event` to its listeners. Listeners run without any host
    /// lock held, so they may call back into the host.
    pub fn emit(&self, event: &str, message: MessageRef) {
        let targets: Vec<EventListener> = lock(&self.listeners)
            .iter()
            .filter(|(_, name, _)| name == event)
            .map(|(_, _, listener)| listener.clone())
            .collect();
        for listener in targets {
            listener(message.clone());
        }
    }
}

impl HostVariablesPort for MemoryHost {
    fn current_message_id(&self) -> Option<i64> {
        self.message_id
    }

    fn get_variables(&self, _target: MessageTarget) -> Result<Value, HostError> {
        Ok(self.variables())
    }

    fn replace_variables(&self, variables: Value, _target: MessageTarget) -> Result<(), HostError> {
        self.set_variables(variables);
        Ok(())
    }
}

struct MemorySubscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl EventSubscription for MemorySubscription {
    fn stop(&self) {
        if let Some(listeners) = self.listeners.upgrade() {
            lock(&listeners).retain(|(id, _, _)| *id != self.id);
        }
    }
}

impl HostEventsPort for MemoryHost {
    fn event_names(&self) -> Option<HostEventNames> {
        self.event_names.clone()
    }

    fn event_on(&self, event: &str, listener: EventListener) -> Box<dyn EventSubscription> {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        lock(&self.listeners).push((id, event.to_string(), listener));
        Box::new(MemorySubscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        })
    }
}

impl HostChatPort for MemoryHost {
    fn message_text(&self, _message_id: Option<i64>) -> Result<Option<String>, HostError> {
        Ok(lock(&self.message_text).clone())
    }

    fn fill_input(&self, text: &str) -> Result<bool, HostError> {
        match &self.input {
            Some(input) => {
                *lock(input) = text.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_emit_reaches_only_matching_listeners() {
        let host = MemoryHost::new(json!({}));
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let subscription = host.event_on(
            "message_edited",
            Arc::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        host.emit("message_edited", MessageRef::Id(1));
        host.emit("message_received", MessageRef::Id(1));
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        subscription.stop();
        subscription.stop();
        host.emit("message_edited", MessageRef::Name("x".into()));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(host.subscriber_count(), 0);
    }

    #[test]
    fn test_replace_and_read_variables() {
        let host = MemoryHost::new(json!({"a": 1})).with_message_id(3);
        assert_eq!(host.current_message_id(), Some(3));
        host.replace_variables(json!({"b": 2}), MessageTarget::Id(3)).unwrap();
        assert_eq!(host.get_variables(MessageTarget::Latest).unwrap(), json!({"b": 2}));
    }

    #[test]
    fn test_input_bar() {
        let host = MemoryHost::new(json!({}));
        assert!(host.fill_input("A").unwrap());
        assert_eq!(host.input_text().as_deref(), Some("A"));

        let host = MemoryHost::new(json!({})).without_input_bar();
        assert!(!host.fill_input("A").unwrap());
        assert_eq!(host.input_text(), None);
    }
}
