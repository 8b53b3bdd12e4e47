//! Observable state cells.
//!
//! [`MutableState`] is the explicit replacement for a reactive binding: a
//! shared cell whose writes notify registered observers synchronously. The
//! card stack uses it as the two-way "current index" binding.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`MutableState::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer<T> = Rc<dyn Fn(&T)>;

struct StateInner<T> {
    value: T,
    observers: Vec<(SubscriptionId, Observer<T>)>,
    next_subscription: u64,
}

/// A shared, observable value.
///
/// Cloning a `MutableState` yields another handle to the same cell. Writes
/// that change the value (by `PartialEq`) notify every observer after the
/// cell is released, so observers may read or write the state again.
///
/// # Example
///
/// ```
/// use swipedeck_core::MutableState;
///
/// let index = MutableState::new(0usize);
/// index.set(2);
/// assert_eq!(index.get(), 2);
/// ```
pub struct MutableState<T> {
    inner: Rc<RefCell<StateInner<T>>>,
}

impl<T> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MutableState")
            .field("value", &inner.value)
            .field("observers", &inner.observers.len())
            .finish()
    }
}

impl<T: Default> Default for MutableState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> MutableState<T> {
    /// Creates a new state cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StateInner {
                value,
                observers: Vec::new(),
                next_subscription: 1,
            })),
        }
    }

    /// Runs `f` with a shared reference to the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Registers an observer called after every effective write.
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.observers.push((id, Rc::new(observer)));
        id
    }

    /// Removes a previously registered observer.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .borrow_mut()
            .observers
            .retain(|(observer_id, _)| *observer_id != id);
    }

    /// Returns the number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    /// Returns true if both handles point at the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone> MutableState<T> {
    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }
}

impl<T: Clone + PartialEq> MutableState<T> {
    /// Replaces the value, notifying observers if it changed.
    ///
    /// Returns true if the value changed.
    pub fn set(&self, value: T) -> bool {
        let observers = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return false;
            }
            inner.value = value;
            inner
                .observers
                .iter()
                .map(|(_, observer)| Rc::clone(observer))
                .collect::<Vec<_>>()
        };

        let snapshot = self.get();
        for observer in observers {
            observer(&snapshot);
        }
        true
    }

    /// Applies `f` to a copy of the value and stores the result.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = self.with(f);
        self.set(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn set_notifies_only_on_change() {
        let state = MutableState::new(1);
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        state.subscribe(move |_| seen.set(seen.get() + 1));

        assert!(state.set(2));
        assert!(!state.set(2));
        assert_eq!(calls.get(), 1);
        assert_eq!(state.get(), 2);
    }

    #[test]
    fn observers_can_read_state_reentrantly() {
        let state = MutableState::new(0usize);
        let observed = Rc::new(Cell::new(0usize));
        let handle = state.clone();
        let sink = observed.clone();
        state.subscribe(move |_| sink.set(handle.get()));

        state.set(4);
        assert_eq!(observed.get(), 4);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let state = MutableState::new(0);
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let id = state.subscribe(move |_| seen.set(seen.get() + 1));
        state.unsubscribe(id);

        state.set(9);
        assert_eq!(calls.get(), 0);
        assert_eq!(state.observer_count(), 0);
    }

    #[test]
    fn clones_share_the_cell() {
        let a = MutableState::new(String::from("a"));
        let b = a.clone();
        b.update(|value| format!("{value}b"));
        assert_eq!(a.get(), "ab");
        assert!(a.ptr_eq(&b));
    }
}
