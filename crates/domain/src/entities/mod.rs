//! Entities - The typed dashboard model derived from host variables

mod inquisitor;
mod villain;
mod world;

pub use inquisitor::Inquisitor;
pub use villain::{find_villain, select_or_first, Villain};
pub use world::WorldState;
