//! Stable item identity and the [`Deck`] collection.

use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use crate::collections::map::{self, Entry};
use crate::collections::KeyIndex;

/// An item with a stable identity that is independent of its position.
///
/// The identity is used to pair each rendered card with its item across
/// passes, so it must not change while the item is displayed.
pub trait Identifiable {
    /// The identity type.
    type Id: Clone + Eq + Hash + Debug + 'static;

    /// Returns the item's identity.
    fn id(&self) -> Self::Id;
}

macro_rules! identifiable_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identifiable for $ty {
                type Id = $ty;

                fn id(&self) -> Self::Id {
                    self.clone()
                }
            }
        )*
    };
}

identifiable_by_value!(u8, u16, u32, u64, usize, i8, i16, i32, i64, char, String, &'static str);

/// An immutable, ordered, indexable collection of identifiable items.
///
/// Cloning is cheap: items live behind an `Rc<[T]>`. The deck also keeps a
/// key to index lookup built once at construction.
pub struct Deck<T: Identifiable> {
    items: Rc<[T]>,
    index_by_id: Rc<KeyIndex<T::Id>>,
}

impl<T: Identifiable> Clone for Deck<T> {
    fn clone(&self) -> Self {
        Self {
            items: Rc::clone(&self.items),
            index_by_id: Rc::clone(&self.index_by_id),
        }
    }
}

impl<T: Identifiable> Debug for Deck<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deck")
            .field("len", &self.items.len())
            .finish_non_exhaustive()
    }
}

impl<T: Identifiable> Deck<T> {
    /// Builds a deck from anything convertible into a shared slice.
    ///
    /// If two items share an id, the first one wins for [`Deck::index_of`].
    pub fn new(items: impl Into<Rc<[T]>>) -> Self {
        let items: Rc<[T]> = items.into();
        let mut index_by_id: KeyIndex<T::Id> = map::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match index_by_id.entry(item.id()) {
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
                Entry::Occupied(existing) => {
                    log::warn!(
                        "duplicate card id {:?} at index {} (first seen at {})",
                        existing.key(),
                        index,
                        existing.get()
                    );
                }
            }
        }
        Self {
            items,
            index_by_id: Rc::new(index_by_id),
        }
    }

    /// Creates an empty deck.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the deck holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the last item, or `None` for an empty deck.
    pub fn last_index(&self) -> Option<usize> {
        self.items.len().checked_sub(1)
    }

    /// Returns the item at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Returns the items as a slice.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Iterates over the items in deck order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Finds the position of the item with the given id.
    pub fn index_of(&self, id: &T::Id) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }
}

impl<T: Identifiable> From<Vec<T>> for Deck<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<'a, T: Identifiable> IntoIterator for &'a Deck<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Photo {
        id: u32,
    }

    impl Identifiable for Photo {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    #[test]
    fn index_of_uses_identity_not_position() {
        let deck = Deck::new(vec![Photo { id: 40 }, Photo { id: 7 }, Photo { id: 12 }]);
        assert_eq!(deck.index_of(&7), Some(1));
        assert_eq!(deck.index_of(&99), None);
        assert_eq!(deck.last_index(), Some(2));
    }

    #[test]
    fn duplicate_ids_keep_first_position() {
        let deck = Deck::new(vec!["a", "b", "a"]);
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.index_of(&"a"), Some(0));
    }

    #[test]
    fn empty_deck_has_no_last_index() {
        let deck: Deck<u32> = Deck::empty();
        assert!(deck.is_empty());
        assert_eq!(deck.last_index(), None);
        assert!(deck.get(0).is_none());
    }
}
