//! Tianfa Shared - The contract between the dashboard and the host's variables
//!
//! This crate contains everything that touches the host's untyped variable
//! container, and nothing that performs I/O:
//! - Ordered alias tables for every root and field key
//! - The `stat_data` wrapper envelope
//! - Tolerant per-field coercion with host-script number/string semantics
//! - The Normalizer (untyped container -> typed dashboard state)
//! - The Mutator (untyped container + edit -> new untyped container)
//! - The host event-name table and the tactical option parser
//!
//! # Design Principles
//!
//! 1. **Never fail on input** - malformed data falls back to seed defaults
//! 2. **Preserve what we don't own** - writes touch only the edited sub-tree
//! 3. **One key per logical field** - writes collapse alias duplicates

pub mod aliases;
pub mod coerce;
pub mod envelope;
pub mod events;
pub mod mutations;
pub mod normalize;
pub mod options;

pub use aliases::Aliases;
pub use envelope::HostEnvelope;
pub use events::HostEventNames;
pub use mutations::{
    add_mode, delete_item, delete_title, delete_villain, write_modes, Mutation, MutationError,
};
pub use normalize::{
    normalize, parse_inquisitor, parse_modes, parse_villains, parse_world, ListShape,
    NormalizedState,
};
pub use options::{parse_options, OptionKey, TacticalOptions};
