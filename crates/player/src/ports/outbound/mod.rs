//! Outbound ports - Interfaces to the host chat runtime
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to talk to the host without depending on a
//! concrete runtime. Every capability is optional at the host level; the
//! `HostRuntime` container models that with empty slots.

pub mod clock_port;
pub mod host_chat_port;
pub mod host_error;
pub mod host_events_port;
pub mod host_variables_port;

pub use clock_port::ClockPort;
pub use host_chat_port::HostChatPort;
pub use host_error::HostError;
pub use host_events_port::{EventListener, EventSubscription, HostEventsPort, MessageRef};
pub use host_variables_port::{HostVariablesPort, MessageTarget};

#[cfg(any(test, feature = "testing"))]
pub use clock_port::MockClockPort;
#[cfg(any(test, feature = "testing"))]
pub use host_chat_port::MockHostChatPort;
#[cfg(any(test, feature = "testing"))]
pub use host_variables_port::MockHostVariablesPort;
