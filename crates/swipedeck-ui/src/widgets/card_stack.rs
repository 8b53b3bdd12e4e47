//! CardStack widget implementation.
//!
//! Renders a [`Deck`] as a fanned stack of overlapping cards. Dragging along
//! the stack axis scrolls through the deck; on release the deck springs to
//! the nearest card and reports it through the settle callback and the
//! optional `current_index` binding.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;
use swipedeck_core::{Deck, Identifiable, MutableState, SubscriptionId};
use swipedeck_foundation::{
    CardStackSpec, CardStackState, CardTransform, DragEvent, DragGestureDetector, Point,
    PointerEvent, PointerEventKind, Rect,
};

use crate::debug::{debug_layers_enabled, log_card_layers};
use crate::modifier::{ClickHandler, Modifier, ResolvedModifiers};
use crate::render_state::request_render_invalidation;
use crate::widgets::{CardContent, CardView};

type SettleCallback = Rc<dyn Fn(usize)>;

/// Description of a card stack, turned into a live [`CardStackNode`] by
/// [`CardStack::compose`].
///
/// # Example
///
/// ```
/// use swipedeck_core::MutableState;
/// use swipedeck_foundation::Rect;
/// use swipedeck_ui::{CardStack, CardView};
///
/// let selected = MutableState::new(0usize);
/// let node = CardStack::new(vec!["a", "b", "c"], |item: &&str| CardView::labeled(*item))
///     .current_index(selected.clone())
///     .compose(Rect::new(0.0, 0.0, 400.0, 600.0));
///
/// node.state().animate_to_index(2);
/// assert_eq!(selected.get(), 2);
/// ```
pub struct CardStack<T: Identifiable> {
    deck: Deck<T>,
    content: Rc<dyn CardContent<T>>,
    state: Option<CardStackState>,
    current_index: Option<MutableState<usize>>,
    on_settle: Option<SettleCallback>,
    spec: CardStackSpec,
    modifier: Modifier,
}

impl<T: Identifiable + 'static> CardStack<T> {
    pub fn new(data: impl Into<Deck<T>>, content: impl CardContent<T> + 'static) -> Self {
        Self {
            deck: data.into(),
            content: Rc::new(content),
            state: None,
            current_index: None,
            on_settle: None,
            spec: CardStackSpec::default(),
            modifier: Modifier::empty(),
        }
    }

    /// Uses an existing state object instead of creating one at mount.
    pub fn state(mut self, state: CardStackState) -> Self {
        self.state = Some(state);
        self
    }

    /// Two-way binding of the settled index.
    ///
    /// Read once at mount as the initial index; written whenever the deck
    /// settles. Writing it from outside animates the deck to that index.
    pub fn current_index(mut self, binding: MutableState<usize>) -> Self {
        self.current_index = Some(binding);
        self
    }

    /// Called with the settled index at mount and after every settle.
    pub fn on_settle(mut self, on_settle: impl Fn(usize) + 'static) -> Self {
        self.on_settle = Some(Rc::new(on_settle));
        self
    }

    pub fn spec(mut self, spec: CardStackSpec) -> Self {
        self.spec = spec;
        self
    }

    /// Drag distance for one card. Shorthand for the spec field.
    pub fn swipe_distance(mut self, distance: f32) -> Self {
        self.spec.swipe_distance = distance;
        self
    }

    /// Modifier of the stack container.
    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    /// Mounts the stack into `viewport` and composes the first pass.
    pub fn compose(self, viewport: Rect) -> CardStackNode<T> {
        CardStackNode::mount(self, viewport)
    }
}

/// One card of a composed pass.
#[derive(Clone, Debug)]
pub struct ComposedCard<K> {
    /// Identity of the item the card renders.
    pub key: K,
    /// Position of the item in the deck.
    pub index: usize,
    pub view: CardView,
    pub transform: CardTransform,
    /// Card modifier followed by the stack transforms.
    pub modifier: Modifier,
    pub resolved: ResolvedModifiers,
    /// Layout bounds before transforms, centered in the container.
    pub bounds: Rect,
}

impl<K> ComposedCard<K> {
    pub fn label(&self) -> Option<&str> {
        self.view.label.as_deref()
    }

    /// Center of the card as drawn.
    pub fn drawn_center(&self) -> Point {
        self.bounds.center() + self.resolved.translation()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.resolved.contains(self.bounds, point)
    }

    /// Maps `point` into the card's untransformed local space.
    pub fn to_local(&self, point: Point) -> Option<Point> {
        self.resolved.to_local(self.bounds, point)
    }
}

struct PendingTap<K> {
    key: K,
}

/// A mounted card stack.
///
/// Owns the scroll state subscriptions and the drag detector. The node
/// recomposes its cards whenever the state invalidates; call
/// [`CardStackNode::advance_frame`] once per frame while
/// [`CardStackNode::is_animating`] and feed pointer input through
/// [`CardStackNode::on_pointer_event`].
pub struct CardStackNode<T: Identifiable> {
    deck: Deck<T>,
    content: Rc<dyn CardContent<T>>,
    spec: CardStackSpec,
    container: ResolvedModifiers,
    state: CardStackState,
    binding: Option<(MutableState<usize>, SubscriptionId)>,
    detector: DragGestureDetector,
    viewport: Rect,
    cards: Vec<ComposedCard<T::Id>>,
    dirty: Rc<Cell<bool>>,
    invalidate_id: u64,
    settle_id: u64,
    pending_tap: Option<PendingTap<T::Id>>,
    compositions: u64,
}

impl<T: Identifiable + 'static> CardStackNode<T> {
    fn mount(stack: CardStack<T>, viewport: Rect) -> Self {
        let CardStack {
            deck,
            content,
            state,
            current_index,
            on_settle,
            spec,
            modifier,
        } = stack;

        let initial_index = match (&current_index, &state) {
            (Some(binding), _) => Some(binding.get()),
            (None, Some(_)) => None,
            (None, None) => Some(spec.initial_index),
        };
        let state = state.unwrap_or_default();
        state.apply_spec(&spec);

        let dirty = Rc::new(Cell::new(true));
        let invalidate_id = state.add_invalidate_callback({
            let dirty = Rc::clone(&dirty);
            Box::new(move || {
                dirty.set(true);
                request_render_invalidation();
            })
        });

        let settle_id = state.add_settle_listener({
            let binding = current_index.clone();
            move |index| {
                if let Some(binding) = &binding {
                    binding.set(index);
                }
                if let Some(on_settle) = &on_settle {
                    on_settle(index);
                }
            }
        });

        let binding = current_index.map(|binding| {
            let observed = state.clone();
            let subscription = binding.subscribe(move |&index| {
                if observed.settled_index() != Some(index) && !observed.is_dragging() {
                    log::debug!("card stack binding changed externally to {index}");
                    observed.animate_to_index(index);
                }
            });
            (binding, subscription)
        });

        let mut detector = DragGestureDetector::new(spec.orientation);
        detector.set_enabled(!deck.is_empty());

        let mut node = Self {
            deck,
            content,
            spec,
            container: modifier.resolve(),
            state,
            binding,
            detector,
            viewport,
            cards: Vec::new(),
            dirty,
            invalidate_id,
            settle_id,
            pending_tap: None,
            compositions: 0,
        };

        node.state.attach(node.deck.len(), initial_index);
        node.recompose();
        node
    }

    pub fn state(&self) -> &CardStackState {
        &self.state
    }

    pub fn deck(&self) -> &Deck<T> {
        &self.deck
    }

    pub fn spec(&self) -> &CardStackSpec {
        &self.spec
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Cards of the last pass in paint order (last drawn on top).
    pub fn cards(&self) -> &[ComposedCard<T::Id>] {
        &self.cards
    }

    /// The composed card for deck position `index`.
    pub fn card(&self, index: usize) -> Option<&ComposedCard<T::Id>> {
        self.cards.iter().find(|card| card.index == index)
    }

    pub fn card_by_key(&self, key: &T::Id) -> Option<&ComposedCard<T::Id>> {
        self.cards.iter().find(|card| &card.key == key)
    }

    /// Number of composition passes so far, including the first.
    pub fn compositions(&self) -> u64 {
        self.compositions
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    /// Bounds the stack occupies inside the viewport.
    pub fn container_bounds(&self) -> Rect {
        let area = match self.container.size {
            Some(size) => self.viewport.centered(size),
            None => self.viewport,
        };
        let offset = self.container.offset;
        Rect::new(area.x + offset.x, area.y + offset.y, area.width, area.height)
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.dirty.set(true);
            self.recompose_if_needed();
        }
    }

    /// Replaces the deck. The settled index is clamped if the deck shrank.
    pub fn update_deck(&mut self, data: impl Into<Deck<T>>) {
        self.deck = data.into();
        self.pending_tap = None;
        if let Some(DragEvent::Cancelled) = self.detector.set_enabled(!self.deck.is_empty()) {
            self.state.on_drag_cancel();
        }
        self.state.update_item_count(self.deck.len());
        self.dirty.set(true);
        self.recompose_if_needed();
    }

    /// Steps the snap animation. Returns true while more frames are needed.
    pub fn advance_frame(&mut self, frame_time_nanos: u64) -> bool {
        let running = self.state.advance_frame(frame_time_nanos);
        self.recompose_if_needed();
        running
    }

    /// Recomposes if the state changed since the last pass.
    pub fn recompose_if_needed(&mut self) -> bool {
        if self.dirty.get() {
            self.recompose();
            true
        } else {
            false
        }
    }

    fn recompose(&mut self) {
        self.dirty.set(false);
        self.compositions += 1;

        let position = self.state.current_position();
        let deck_size = self.deck.len();
        let geometry = self.spec.geometry;
        let orientation = self.spec.orientation;
        let container = self.container_bounds();

        let mut cards: Vec<ComposedCard<T::Id>> = self
            .deck
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let view = self.content.render(item);
                let transform = geometry.transform(index, position, deck_size);
                let modifier = view.modifier.clone().then(
                    Modifier::empty()
                        .z_index(transform.z_index)
                        .offset_point(orientation.point(transform.offset))
                        .scale(transform.scale)
                        .rotate(transform.rotation_degrees),
                );
                let resolved = modifier.resolve();
                let bounds = container.centered(resolved.size.unwrap_or(self.spec.card_size));
                ComposedCard {
                    key: item.id(),
                    index,
                    view,
                    transform,
                    modifier,
                    resolved,
                    bounds,
                }
            })
            .collect();
        cards.sort_by(|a, b| a.resolved.z_index.total_cmp(&b.resolved.z_index));

        if debug_layers_enabled() {
            log_card_layers(position, &cards);
        }
        self.cards = cards;
    }

    /// Topmost card under `point`.
    pub fn hit_test(&self, point: Point) -> Option<&ComposedCard<T::Id>> {
        self.cards.iter().rev().find(|card| card.contains(point))
    }

    /// Dispatches a pointer event. Returns true if the stack consumed it.
    ///
    /// The drag detector sees every event first. Until it claims the
    /// pointer, the event goes on to the topmost card under it so taps on
    /// clickable cards still work; a claimed drag cancels the pending tap.
    pub fn on_pointer_event(&mut self, event: PointerEvent) -> bool {
        self.recompose_if_needed();

        if event.kind == PointerEventKind::Down
            && !self.detector.is_tracking()
            && !self.container_bounds().contains(event.position)
        {
            return false;
        }

        let mut consumed = false;
        for drag in self.detector.on_pointer_event(&event) {
            consumed = true;
            match drag {
                DragEvent::Started => {
                    self.pending_tap = None;
                    self.state.on_drag_start();
                }
                DragEvent::Dragged { translation } => self.state.on_drag(translation),
                DragEvent::Ended { translation } => {
                    self.state.on_drag(translation);
                    self.state.on_drag_end();
                }
                DragEvent::Cancelled => {
                    self.state.on_drag_cancel();
                }
            }
        }

        if !consumed && !self.detector.is_dragging() {
            consumed = self.dispatch_tap(&event);
        }

        self.recompose_if_needed();
        consumed
    }

    fn dispatch_tap(&mut self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => {
                self.pending_tap = self
                    .hit_test(event.position)
                    .filter(|card| card.resolved.clickable)
                    .map(|card| PendingTap {
                        key: card.key.clone(),
                    });
                self.pending_tap.is_some()
            }
            PointerEventKind::Move => self.pending_tap.is_some(),
            PointerEventKind::Up => {
                let Some(tap) = self.pending_tap.take() else {
                    return false;
                };
                let Some(card) = self.hit_test(event.position) else {
                    return true;
                };
                if card.key != tap.key {
                    return true;
                }
                let local = card.to_local(event.position).unwrap_or(Point::ZERO);
                let handlers: SmallVec<[ClickHandler; 2]> =
                    card.modifier.click_handlers().cloned().collect();
                log::debug!("card {} tapped at ({}, {})", card.index, local.x, local.y);
                for handler in handlers {
                    handler(local);
                }
                true
            }
            PointerEventKind::Cancel => self.pending_tap.take().is_some(),
        }
    }
}

impl<T: Identifiable> Drop for CardStackNode<T> {
    fn drop(&mut self) {
        self.state.remove_invalidate_callback(self.invalidate_id);
        self.state.remove_settle_listener(self.settle_id);
        if let Some((binding, subscription)) = self.binding.take() {
            binding.unsubscribe(subscription);
        }
        self.state.detach();
    }
}

impl<T: Identifiable> fmt::Debug for CardStackNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardStackNode")
            .field("deck", &self.deck)
            .field("state", &self.state)
            .field("viewport", &self.viewport)
            .field("cards", &self.cards.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use swipedeck_foundation::Size;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 400.0, 600.0);

    fn labeled(item: &u32) -> CardView {
        CardView::labeled(format!("card {item}"))
    }

    fn deck(count: u32) -> Vec<u32> {
        (0..count).collect()
    }

    fn settle(node: &mut CardStackNode<u32>) {
        let mut frame = 0u64;
        while node.advance_frame(frame * 16_666_667) {
            frame += 1;
            assert!(frame < 300, "card stack never settled");
        }
    }

    fn drag(node: &mut CardStackNode<u32>, from: Point, dx: f32) {
        node.on_pointer_event(PointerEvent::down(from));
        for step in 1..=10 {
            let progress = step as f32 / 10.0;
            node.on_pointer_event(PointerEvent::moved(Point::new(from.x + dx * progress, from.y)));
        }
        node.on_pointer_event(PointerEvent::up(Point::new(from.x + dx, from.y)));
    }

    #[test]
    fn composes_one_card_per_item_in_paint_order() {
        let node = CardStack::new(deck(5), labeled).compose(VIEWPORT);
        assert_eq!(node.cards().len(), 5);
        let depths: Vec<f32> = node.cards().iter().map(|card| card.resolved.z_index).collect();
        assert!(depths.windows(2).all(|pair| pair[0] <= pair[1]));
        // At rest on the first card, it is drawn last.
        assert_eq!(node.cards().last().map(|card| card.index), Some(0));
    }

    #[test]
    fn focused_card_is_centered_and_untransformed() {
        let node = CardStack::new(deck(3), labeled).compose(VIEWPORT);
        let card = node.card(0).unwrap();
        assert_eq!(card.bounds, VIEWPORT.centered(Size::new(240.0, 320.0)));
        assert_eq!(card.resolved.graphics_layer.scale_x, 1.0);
        assert_eq!(card.resolved.graphics_layer.rotation_z, 0.0);
        assert_eq!(card.drawn_center(), VIEWPORT.center());
        assert_eq!(card.label(), Some("card 0"));
    }

    #[test]
    fn card_size_modifier_overrides_spec() {
        let node = CardStack::new(deck(2), |item: &u32| {
            CardView::labeled(item.to_string()).modifier(Modifier::empty().size_points(100.0, 50.0))
        })
        .compose(VIEWPORT);
        assert_eq!(node.card(1).unwrap().bounds.size(), Size::new(100.0, 50.0));
    }

    #[test]
    fn drag_left_moves_to_next_card() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut node = CardStack::new(deck(6), labeled)
            .on_settle(move |index| sink.borrow_mut().push(index))
            .compose(VIEWPORT);

        drag(&mut node, Point::new(300.0, 300.0), -450.0);
        assert_eq!(node.state().settled_index(), Some(2));
        assert_eq!(*seen.borrow(), vec![0, 2]);

        settle(&mut node);
        assert_eq!(node.state().current_position(), 2.0);
        let focused = node.card(2).unwrap();
        assert_eq!(focused.transform.scale, 1.0);
        assert_eq!(focused.drawn_center(), VIEWPORT.center());
    }

    #[test]
    fn binding_is_read_at_mount_and_written_on_settle() {
        let binding = MutableState::new(4usize);
        let mut node = CardStack::new(deck(6), labeled)
            .current_index(binding.clone())
            .compose(VIEWPORT);
        assert_eq!(node.state().current_position(), 4.0);

        drag(&mut node, Point::new(200.0, 300.0), 300.0);
        assert_eq!(binding.get(), 3);
    }

    #[test]
    fn out_of_range_binding_is_clamped_back() {
        let binding = MutableState::new(10usize);
        let node = CardStack::new(deck(3), labeled)
            .current_index(binding.clone())
            .compose(VIEWPORT);
        assert_eq!(binding.get(), 2);

        binding.set(7);
        assert_eq!(binding.get(), 2);
        assert_eq!(node.state().settled_index(), Some(2));
    }

    #[test]
    fn external_binding_write_animates() {
        let binding = MutableState::new(0usize);
        let mut node = CardStack::new(deck(4), labeled)
            .current_index(binding.clone())
            .compose(VIEWPORT);
        binding.set(3);
        assert!(node.is_animating());
        settle(&mut node);
        assert_eq!(node.state().current_position(), 3.0);
    }

    #[test]
    fn tap_reaches_focused_card() {
        let taps = Rc::new(RefCell::new(Vec::new()));
        let sink = taps.clone();
        let mut node = CardStack::new(deck(3), move |item: &u32| {
            let sink = sink.clone();
            let item = *item;
            CardView::labeled(item.to_string())
                .modifier(Modifier::empty().clickable(move |_| sink.borrow_mut().push(item)))
        })
        .compose(VIEWPORT);

        let center = VIEWPORT.center();
        assert!(node.on_pointer_event(PointerEvent::down(center)));
        assert!(node.on_pointer_event(PointerEvent::up(center)));
        assert_eq!(*taps.borrow(), vec![0]);
    }

    #[test]
    fn drag_cancels_pending_tap() {
        let taps = Rc::new(Cell::new(0));
        let counter = taps.clone();
        let mut node = CardStack::new(deck(3), move |item: &u32| {
            let counter = counter.clone();
            CardView::labeled(item.to_string())
                .modifier(Modifier::empty().clickable(move |_| counter.set(counter.get() + 1)))
        })
        .compose(VIEWPORT);

        drag(&mut node, VIEWPORT.center(), -40.0);
        assert_eq!(taps.get(), 0);
        assert_eq!(node.state().settled_index(), Some(0));
    }

    #[test]
    fn empty_deck_has_no_layers_and_ignores_drags() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut node = CardStack::new(Vec::<u32>::new(), labeled)
            .on_settle(move |_| counter.set(counter.get() + 1))
            .compose(VIEWPORT);
        assert!(node.cards().is_empty());

        drag(&mut node, VIEWPORT.center(), -500.0);
        assert_eq!(calls.get(), 0);
        assert_eq!(node.state().current_position(), 0.0);
    }

    #[test]
    fn pointer_down_outside_container_is_ignored() {
        let mut node = CardStack::new(deck(3), labeled)
            .modifier(Modifier::empty().size_points(100.0, 100.0))
            .compose(VIEWPORT);
        assert!(!node.on_pointer_event(PointerEvent::down(Point::new(5.0, 5.0))));
        assert!(!node.on_pointer_event(PointerEvent::moved(Point::new(-200.0, 5.0))));
        assert!(!node.state().is_dragging());
    }

    #[test]
    fn shrinking_deck_clamps_settled_index() {
        let mut node = CardStack::new(deck(6), labeled).compose(VIEWPORT);
        node.state().snap_to_index(5);
        node.update_deck(deck(2));
        assert_eq!(node.state().settled_index(), Some(1));
        assert_eq!(node.cards().len(), 2);
    }

    #[test]
    fn drop_releases_state_callbacks() {
        let state = CardStackState::new();
        let binding = MutableState::new(0usize);
        let node = CardStack::new(deck(3), labeled)
            .state(state.clone())
            .current_index(binding.clone())
            .compose(VIEWPORT);
        assert_eq!(binding.observer_count(), 1);
        drop(node);
        assert_eq!(binding.observer_count(), 0);
        assert!(!state.is_attached());
        // No listener left to write the binding.
        state.snap_to_index(2);
        assert_eq!(binding.get(), 0);
    }
}
