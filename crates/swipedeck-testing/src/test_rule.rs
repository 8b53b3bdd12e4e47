use swipedeck_animation::{FrameClock, ManualFrameClock};
use swipedeck_core::Identifiable;
use swipedeck_foundation::{CardStackState, Point, PointerEvent, PointerEventKind, Rect};
use swipedeck_ui::{CardStack, CardStackNode, ComposedCard};

/// Frames [`CardStackTestRule::await_idle`] runs before giving up.
pub const MAX_IDLE_FRAMES: u32 = 300;

/// Default viewport of a test rule, in logical pixels.
pub const DEFAULT_TEST_VIEWPORT: Rect = Rect::new(0.0, 0.0, 400.0, 600.0);

/// What a matcher can see of a card.
#[derive(Clone, Copy, Debug)]
pub struct CardSemantics<'a> {
    pub index: usize,
    pub label: Option<&'a str>,
}

pub struct CardMatcher {
    description: String,
    matcher: Box<dyn Fn(&CardSemantics<'_>) -> bool>,
}

impl CardMatcher {
    pub fn new(
        description: impl Into<String>,
        matcher: impl Fn(&CardSemantics<'_>) -> bool + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            matcher: Box::new(matcher),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn matches<K>(&self, card: &ComposedCard<K>) -> bool {
        (self.matcher)(&CardSemantics {
            index: card.index,
            label: card.label(),
        })
    }
}

pub fn has_label(text: impl Into<String>) -> CardMatcher {
    let text = text.into();
    CardMatcher::new(format!("has_label({:?})", text), move |card| {
        card.label == Some(text.as_str())
    })
}

pub fn has_index(index: usize) -> CardMatcher {
    CardMatcher::new(format!("has_index({index})"), move |card| card.index == index)
}

/// Headless host for one card stack.
///
/// Drives frames from a [`ManualFrameClock`] so animations run
/// deterministically, and injects pointer input through
/// [`TouchInjectionScope`].
pub struct CardStackTestRule<T: Identifiable> {
    clock: ManualFrameClock,
    viewport: Rect,
    node: Option<CardStackNode<T>>,
    auto_advance: bool,
}

impl<T: Identifiable + 'static> CardStackTestRule<T> {
    pub fn new() -> Self {
        Self::with_viewport(DEFAULT_TEST_VIEWPORT)
    }

    pub fn with_viewport(viewport: Rect) -> Self {
        Self {
            clock: ManualFrameClock::new(),
            viewport,
            node: None,
            auto_advance: true,
        }
    }

    /// Mounts `stack`, replacing any previous content, and waits for idle.
    pub fn set_content(&mut self, stack: CardStack<T>) {
        self.node = None;
        self.node = Some(stack.compose(self.viewport));
        self.await_idle();
    }

    /// When false, input no longer runs frames afterwards; use
    /// [`Self::advance_frames`] or [`Self::await_idle`] explicitly.
    pub fn set_auto_advance(&mut self, auto_advance: bool) {
        self.auto_advance = auto_advance;
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.clock.frame_time_nanos()
    }

    pub fn node(&self) -> &CardStackNode<T> {
        self.node
            .as_ref()
            .expect("No content set; call set_content first")
    }

    pub fn node_mut(&mut self) -> &mut CardStackNode<T> {
        self.node
            .as_mut()
            .expect("No content set; call set_content first")
    }

    pub fn state(&self) -> &CardStackState {
        self.node().state()
    }

    pub fn cards(&self) -> &[ComposedCard<T::Id>] {
        self.node().cards()
    }

    /// Runs exactly `frames` frames.
    pub fn advance_frames(&mut self, frames: u32) {
        for _ in 0..frames {
            self.clock.advance_frame();
            let now = self.clock.frame_time_nanos();
            self.node_mut().advance_frame(now);
        }
    }

    /// Runs frames until the stack stops animating.
    ///
    /// Panics if it is still animating after [`MAX_IDLE_FRAMES`] frames.
    pub fn await_idle(&mut self) {
        let mut frames = 0;
        loop {
            let now = self.clock.frame_time_nanos();
            let node = self.node_mut();
            node.recompose_if_needed();
            if !node.is_animating() {
                break;
            }
            node.advance_frame(now);
            self.clock.advance_frame();
            frames += 1;
            if frames > MAX_IDLE_FRAMES {
                panic!("Card stack failed to settle after {MAX_IDLE_FRAMES} frames");
            }
        }
    }

    /// Injects a single pointer event at `position`.
    pub fn inject(&mut self, kind: PointerEventKind, position: Point) -> bool {
        let consumed = self
            .node_mut()
            .on_pointer_event(PointerEvent::new(0, kind, position));
        if self.auto_advance {
            self.await_idle();
        }
        consumed
    }

    /// Runs `block` with a touch scope starting at the viewport center.
    pub fn perform_touch_input(&mut self, block: impl FnOnce(&mut TouchInjectionScope<'_, T>)) {
        let start = self.viewport.center();
        let mut scope = TouchInjectionScope {
            rule: self,
            current: start,
        };
        block(&mut scope);
    }

    /// Finds the topmost card matching `matcher`.
    pub fn on_card(&mut self, matcher: CardMatcher) -> TestCard<'_, T> {
        let key = {
            let card = self
                .cards()
                .iter()
                .rev()
                .find(|card| matcher.matches(card))
                .unwrap_or_else(|| panic!("No card found matching {}", matcher.description()));
            card.key.clone()
        };

        TestCard { rule: self, key }
    }

    /// Number of cards matching `matcher` in the last pass.
    pub fn count_cards(&self, matcher: &CardMatcher) -> usize {
        self.cards().iter().filter(|card| matcher.matches(card)).count()
    }
}

impl<T: Identifiable + 'static> Default for CardStackTestRule<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A card found by [`CardStackTestRule::on_card`].
pub struct TestCard<'a, T: Identifiable> {
    rule: &'a mut CardStackTestRule<T>,
    key: T::Id,
}

impl<'a, T: Identifiable + 'static> TestCard<'a, T> {
    fn card(&self) -> &ComposedCard<T::Id> {
        self.rule
            .node()
            .card_by_key(&self.key)
            .unwrap_or_else(|| panic!("Card {:?} no longer composed", self.key))
    }

    pub fn index(&self) -> usize {
        self.card().index
    }

    pub fn label(&self) -> Option<String> {
        self.card().label().map(str::to_owned)
    }

    /// Center of the card as currently drawn.
    pub fn center(&self) -> Point {
        self.card().drawn_center()
    }

    /// Taps the card's drawn center.
    ///
    /// Panics if another card covers that point.
    pub fn perform_click(&mut self) {
        let center = self.center();
        let topmost = self.rule.node().hit_test(center).map(|card| card.key.clone());
        assert_eq!(
            topmost.as_ref(),
            Some(&self.key),
            "Card {:?} is covered at its center {:?}",
            self.key,
            center
        );
        self.rule.inject(PointerEventKind::Down, center);
        self.rule.inject(PointerEventKind::Up, center);
    }

    /// Runs `block` with a touch scope starting at the card's center.
    pub fn perform_touch_input(&mut self, block: impl FnOnce(&mut TouchInjectionScope<'_, T>)) {
        let start = self.center();
        let mut scope = TouchInjectionScope {
            rule: &mut *self.rule,
            current: start,
        };
        block(&mut scope);
    }

    pub fn assert_exists(&self) {
        assert!(
            self.rule.node().card_by_key(&self.key).is_some(),
            "Card {:?} does not exist",
            self.key
        );
    }

    /// Asserts the card is the one the stack settled on.
    pub fn assert_is_settled(&self) {
        let index = self.index();
        assert_eq!(
            self.rule.state().settled_index(),
            Some(index),
            "Card {:?} at index {} is not the settled card",
            self.key,
            index
        );
    }
}

/// Scripted pointer input against a [`CardStackTestRule`].
pub struct TouchInjectionScope<'a, T: Identifiable> {
    rule: &'a mut CardStackTestRule<T>,
    current: Point,
}

impl<'a, T: Identifiable + 'static> TouchInjectionScope<'a, T> {
    const SWIPE_STEPS: u32 = 10;

    pub fn current_position(&self) -> Point {
        self.current
    }

    pub fn down(&mut self, x: Option<f32>, y: Option<f32>) {
        if let Some(x) = x {
            self.current.x = x;
        }
        if let Some(y) = y {
            self.current.y = y;
        }
        self.rule.inject(PointerEventKind::Down, self.current);
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.current = Point::new(x, y);
        self.rule.inject(PointerEventKind::Move, self.current);
    }

    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.move_to(self.current.x + dx, self.current.y + dy);
    }

    pub fn up(&mut self) {
        self.rule.inject(PointerEventKind::Up, self.current);
    }

    pub fn cancel(&mut self) {
        self.rule.inject(PointerEventKind::Cancel, self.current);
    }

    /// Presses, moves by `(dx, dy)` in a few steps, and releases.
    pub fn swipe_by(&mut self, dx: f32, dy: f32) {
        self.down(None, None);
        let start = self.current;
        for i in 1..=Self::SWIPE_STEPS {
            let progress = i as f32 / Self::SWIPE_STEPS as f32;
            self.move_to(start.x + dx * progress, start.y + dy * progress);
        }
        self.up();
    }

    /// Drag right-to-left; advances a horizontal stack.
    pub fn swipe_left(&mut self, distance: f32) {
        self.swipe_by(-distance, 0.0);
    }

    pub fn swipe_right(&mut self, distance: f32) {
        self.swipe_by(distance, 0.0);
    }

    /// Drag bottom-to-top; advances a vertical stack.
    pub fn swipe_up(&mut self, distance: f32) {
        self.swipe_by(0.0, -distance);
    }

    pub fn swipe_down(&mut self, distance: f32) {
        self.swipe_by(0.0, distance);
    }
}
