//! Host Events Port - Subscribe to chat events
//!
//! Note: this trait takes `Fn` listeners, which mockall cannot mock. Tests use
//! `MemoryHost` from the infrastructure layer instead.

use std::fmt;
use std::sync::Arc;

use tianfa_shared::HostEventNames;

/// Message reference passed to event listeners.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageRef {
    Id(i64),
    Name(String),
}

impl fmt::Display for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRef::Id(id) => write!(f, "{}", id),
            MessageRef::Name(name) => f.write_str(name),
        }
    }
}

pub type EventListener = Arc<dyn Fn(MessageRef) + Send + Sync>;

/// Disposer returned by [`HostEventsPort::event_on`].
pub trait EventSubscription: Send + Sync {
    /// Stop delivering events. Calling it twice is harmless.
    fn stop(&self);
}

pub trait HostEventsPort: Send + Sync {
    /// The host's event-name table, if it publishes one.
    fn event_names(&self) -> Option<HostEventNames>;

    /// Register `listener` for `event`.
    fn event_on(&self, event: &str, listener: EventListener) -> Box<dyn EventSubscription>;
}
