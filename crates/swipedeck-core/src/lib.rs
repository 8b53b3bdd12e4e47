//! Core primitives for swipedeck: observable state cells, item identity and
//! the hash map aliases shared by the other crates.

pub mod collections;
mod identity;
mod state;

pub use identity::*;
pub use state::*;
