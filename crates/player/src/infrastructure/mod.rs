//! Infrastructure adapters for the host runtime ports.

pub mod clock;
pub mod file_chat;
pub mod json_file_host;
pub mod memory_host;

pub use clock::SystemClock;
pub use file_chat::FileChat;
pub use json_file_host::JsonFileHost;
pub use memory_host::MemoryHost;
