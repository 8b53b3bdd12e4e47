//! Hash map aliases.
//!
//! Card ids are hashed with `rustc-hash` by default; the `std-hash` feature
//! switches to the standard SipHash map for ids that come from untrusted
//! input.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::hash_map::Entry;
    pub use std::collections::HashMap;

    pub(crate) fn with_capacity<K, V>(capacity: usize) -> HashMap<K, V> {
        HashMap::with_capacity(capacity)
    }
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::FxHashMap as HashMap;
    pub use std::collections::hash_map::Entry;

    pub(crate) fn with_capacity<K, V>(capacity: usize) -> HashMap<K, V> {
        HashMap::with_capacity_and_hasher(capacity, Default::default())
    }
}

/// Lookup from card id to deck position.
pub type KeyIndex<K> = map::HashMap<K, usize>;
