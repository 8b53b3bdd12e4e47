//! Card stack state management.
//!
//! Provides [`CardStackState`], the explicit state container behind the card
//! stack: the continuous scroll position, the anchor used as the baseline
//! of the next drag, and the snap procedure that resolves a released drag
//! into a settled index.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use swipedeck_animation::{Animatable, SpringSpec};

use crate::card_stack_spec::{sanitize_swipe_distance, CardStackSpec, DEFAULT_SWIPE_DISTANCE};

type SettleListener = Rc<dyn Fn(usize)>;
type InvalidateCallback = Rc<dyn Fn()>;

/// Resolves a raw scroll position into the index the deck settles at.
///
/// Rounds half away from zero and clamps into `[0, item_count - 1]`. A
/// non-finite position falls back to `anchor`. Returns `None` for an empty
/// deck.
pub fn resolve_settle_index(position: f32, anchor: f32, item_count: usize) -> Option<usize> {
    let max_index = item_count.checked_sub(1)?;
    let position = if position.is_finite() { position } else { anchor };
    let clamped = position.round().clamp(0.0, max_index as f32);
    // Also catches a non-finite anchor: NaN casts to 0.
    Some(clamped as usize)
}

/// State object for card stack scroll position tracking.
///
/// Holds the continuous scroll position (`current_index`) and the anchor
/// (`previous_index`) and converts drag callbacks into position updates.
/// Create with [`CardStackState::new`]; clones share the same state.
///
/// # Example
///
/// ```
/// use swipedeck_foundation::CardStackState;
///
/// let state = CardStackState::new();
/// state.attach(6, None);
///
/// state.on_drag_start();
/// state.on_drag(-450.0);
/// assert_eq!(state.current_position(), 1.5);
///
/// assert_eq!(state.on_drag_end(), Some(2));
/// assert_eq!(state.anchor_position(), 2.0);
/// ```
#[derive(Clone)]
pub struct CardStackState {
    inner: Rc<RefCell<CardStackStateInner>>,
}

struct CardStackStateInner {
    /// Continuous scroll position; presentation value while animating.
    position: Animatable,

    /// Last settled position, baseline for the next drag.
    anchor: f32,

    /// Number of cards in the deck from the last composition.
    item_count: usize,

    /// Whether a widget has mounted this state.
    attached: bool,

    /// Whether a drag is in progress.
    dragging: bool,

    /// Drag distance for one card.
    swipe_distance: f32,

    /// Spring used by the snap procedure.
    spring: SpringSpec,

    /// Last settled index reported to listeners.
    settled_index: Option<usize>,

    settle_listeners: Vec<(u64, SettleListener)>,
    invalidate_callbacks: Vec<(u64, InvalidateCallback)>,
    next_callback_id: u64,
}

impl CardStackState {
    /// Creates a new [`CardStackState`] positioned at index 0.
    pub fn new() -> Self {
        Self::with_initial_index(0)
    }

    /// Creates a new [`CardStackState`] positioned at `index`.
    ///
    /// The index is clamped to the deck when the state is attached.
    pub fn with_initial_index(index: usize) -> Self {
        let spec = CardStackSpec::default();
        Self {
            inner: Rc::new(RefCell::new(CardStackStateInner {
                position: Animatable::new(index as f32),
                anchor: index as f32,
                item_count: 0,
                attached: false,
                dragging: false,
                swipe_distance: DEFAULT_SWIPE_DISTANCE,
                spring: spec.spring,
                settled_index: None,
                settle_listeners: Vec::new(),
                invalidate_callbacks: Vec::new(),
                next_callback_id: 1,
            })),
        }
    }

    /// Current continuous scroll position, as it should be drawn this frame.
    pub fn current_position(&self) -> f32 {
        self.inner.borrow().position.value()
    }

    /// Position the deck is moving to; equals [`Self::current_position`]
    /// while dragging or idle.
    pub fn target_position(&self) -> f32 {
        self.inner.borrow().position.target_value()
    }

    /// Baseline of the next drag (the last settled position).
    pub fn anchor_position(&self) -> f32 {
        self.inner.borrow().anchor
    }

    /// Last settled index, or `None` before mount or for an empty deck.
    pub fn settled_index(&self) -> Option<usize> {
        self.inner.borrow().settled_index
    }

    pub fn item_count(&self) -> usize {
        self.inner.borrow().item_count
    }

    pub fn is_attached(&self) -> bool {
        self.inner.borrow().attached
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().dragging
    }

    /// Returns true while the snap spring is running.
    pub fn is_animating(&self) -> bool {
        self.inner.borrow().position.is_running()
    }

    pub fn swipe_distance(&self) -> f32 {
        self.inner.borrow().swipe_distance
    }

    /// Applies the drag and spring configuration from `spec`.
    pub fn apply_spec(&self, spec: &CardStackSpec) {
        let mut inner = self.inner.borrow_mut();
        inner.swipe_distance = spec.effective_swipe_distance();
        inner.spring = spec.spring;
    }

    /// Sets the drag distance for one card.
    pub fn set_swipe_distance(&self, distance: f32) {
        self.inner.borrow_mut().swipe_distance = sanitize_swipe_distance(distance);
    }

    /// Mounts the state for a deck of `item_count` cards.
    ///
    /// Positions the deck at `initial_index` (or the current anchor when
    /// `None`), clamped into range, and reports the settled index once.
    /// Returns the settled index, `None` for an empty deck.
    pub fn attach(&self, item_count: usize, initial_index: Option<usize>) -> Option<usize> {
        let settled = {
            let mut inner = self.inner.borrow_mut();
            inner.item_count = item_count;
            inner.attached = true;
            inner.dragging = false;
            let start = initial_index.map_or(inner.anchor, |index| index as f32);
            let settled = resolve_settle_index(start, 0.0, item_count);
            let position = settled.map_or(0.0, |index| index as f32);
            inner.position.snap_to(position);
            inner.anchor = position;
            inner.settled_index = settled;
            settled
        };

        log::debug!("card stack attached: {item_count} cards, settled at {settled:?}");
        if let Some(index) = settled {
            self.notify_settled(index);
        }
        self.invalidate();
        settled
    }

    /// Unmounts the state. Any running animation stops where it is.
    pub fn detach(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.attached = false;
        inner.dragging = false;
        inner.position.stop();
    }

    /// Updates the deck size between gestures.
    ///
    /// If the settled index no longer fits, the deck settles at the new last
    /// card. An empty deck resets the position to 0 without notifying.
    pub fn update_item_count(&self, item_count: usize) {
        let needs_settle = {
            let mut inner = self.inner.borrow_mut();
            if inner.item_count == item_count {
                return;
            }
            inner.item_count = item_count;
            match item_count.checked_sub(1) {
                None => {
                    inner.position.snap_to(0.0);
                    inner.anchor = 0.0;
                    inner.dragging = false;
                    inner.settled_index = None;
                    false
                }
                Some(max_index) => {
                    inner.anchor > max_index as f32
                        || inner.position.target_value() > max_index as f32
                        || inner.settled_index.is_none()
                }
            }
        };

        if needs_settle {
            self.settle();
        } else {
            self.invalidate();
        }
    }

    /// Begins a drag. Cancels a running snap animation where it is.
    pub fn on_drag_start(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.item_count == 0 {
                return;
            }
            inner.dragging = true;
            inner.position.stop();
        }
        log::debug!("card stack drag started at {}", self.current_position());
    }

    /// Applies a drag update.
    ///
    /// `translation` is the cumulative drag distance along the stack axis
    /// since the pointer went down. The position is assigned directly so the
    /// deck tracks the pointer without lag.
    pub fn on_drag(&self, translation: f32) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.item_count == 0 {
                return;
            }
            if !translation.is_finite() {
                log::warn!("ignoring non-finite drag translation {translation}");
                return;
            }
            inner.dragging = true;
            let fraction = translation / inner.swipe_distance;
            let position = inner.anchor - fraction;
            inner.position.snap_to(position);
        }
        log::trace!("card stack dragged to {}", self.current_position());
        self.invalidate();
    }

    /// Ends a drag and runs the snap procedure.
    pub fn on_drag_end(&self) -> Option<usize> {
        self.settle()
    }

    /// Cancels a drag; the deck settles exactly as on release.
    pub fn on_drag_cancel(&self) -> Option<usize> {
        self.settle()
    }

    /// Snap procedure: rounds the target position to the nearest index,
    /// clamps it into the deck, springs toward it, moves the anchor there and
    /// reports it to the settle listeners.
    ///
    /// Calling it again without an intervening drag settles at the same index.
    pub fn settle(&self) -> Option<usize> {
        let target = self.target_position();
        self.settle_at(target, true)
    }

    /// Animates to `index` (clamped) as if a drag had been released there.
    pub fn animate_to_index(&self, index: usize) -> Option<usize> {
        self.settle_at(index as f32, true)
    }

    /// Jumps to `index` (clamped) without animation.
    pub fn snap_to_index(&self, index: usize) -> Option<usize> {
        self.settle_at(index as f32, false)
    }

    /// Whether there is a card after the settled one.
    pub fn can_swipe_forward(&self) -> bool {
        let inner = self.inner.borrow();
        match inner.item_count.checked_sub(1) {
            Some(max_index) => inner.anchor < max_index as f32,
            None => false,
        }
    }

    /// Whether there is a card before the settled one.
    pub fn can_swipe_backward(&self) -> bool {
        let inner = self.inner.borrow();
        inner.item_count > 0 && inner.anchor > 0.0
    }

    /// Advances the snap animation to `frame_time_nanos`.
    ///
    /// Returns true while the animation still needs frames.
    pub fn advance_frame(&self, frame_time_nanos: u64) -> bool {
        let (running, moved) = {
            let mut inner = self.inner.borrow_mut();
            let before = inner.position.value();
            let running = inner.position.advance_frame(frame_time_nanos);
            (running, inner.position.value() != before)
        };
        if moved {
            log::trace!("card stack animating at {}", self.current_position());
            self.invalidate();
        }
        running
    }

    /// Adds a listener called with the settled index after every settle.
    pub fn add_settle_listener(&self, listener: impl Fn(usize) + 'static) -> u64 {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_callback_id;
        inner.next_callback_id += 1;
        inner.settle_listeners.push((id, Rc::new(listener)));
        id
    }

    /// Removes a settle listener.
    pub fn remove_settle_listener(&self, id: u64) {
        let mut inner = self.inner.borrow_mut();
        inner.settle_listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    /// Adds an invalidation callback, called whenever the position changes.
    pub fn add_invalidate_callback(&self, callback: Box<dyn Fn()>) -> u64 {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_callback_id;
        inner.next_callback_id += 1;
        inner.invalidate_callbacks.push((id, Rc::from(callback)));
        id
    }

    /// Removes an invalidation callback.
    pub fn remove_invalidate_callback(&self, id: u64) {
        let mut inner = self.inner.borrow_mut();
        inner.invalidate_callbacks.retain(|(cb_id, _)| *cb_id != id);
    }

    fn settle_at(&self, raw_position: f32, animated: bool) -> Option<usize> {
        let target = {
            let mut inner = self.inner.borrow_mut();
            inner.dragging = false;
            let target = resolve_settle_index(raw_position, inner.anchor, inner.item_count)?;
            let spring = inner.spring;
            if animated {
                inner.position.animate_to(target as f32, spring);
            } else {
                inner.position.snap_to(target as f32);
            }
            inner.anchor = target as f32;
            inner.settled_index = Some(target);
            target
        };

        log::debug!("card stack settling at {target} (from {raw_position})");
        self.notify_settled(target);
        self.invalidate();
        Some(target)
    }

    fn notify_settled(&self, index: usize) {
        let listeners: Vec<SettleListener> = self
            .inner
            .borrow()
            .settle_listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(index);
        }
    }

    fn invalidate(&self) {
        let callbacks: Vec<InvalidateCallback> = self
            .inner
            .borrow()
            .invalidate_callbacks
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            callback();
        }
    }
}

impl Default for CardStackState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CardStackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("CardStackState")
            .field("position", &inner.position.value())
            .field("anchor", &inner.anchor)
            .field("item_count", &inner.item_count)
            .field("dragging", &inner.dragging)
            .field("settled_index", &inner.settled_index)
            .finish()
    }
}
