//! Robot driver for scripting a mounted card stack.
//!
//! Unlike [`crate::CardStackTestRule`], the robot reports failures as
//! `Err(String)` instead of panicking, so it can drive demos and
//! long-running scenarios.

use std::thread;

use swipedeck_animation::{FrameClock, ManualFrameClock, SystemFrameClock, FRAME_INTERVAL};
use swipedeck_core::Identifiable;
use swipedeck_foundation::{Point, PointerEvent, PointerEventKind};
use swipedeck_ui::render_state::take_render_invalidation;
use swipedeck_ui::CardStackNode;

use crate::test_rule::MAX_IDLE_FRAMES;

enum RobotClock {
    /// Virtual time; every frame advances the clock without sleeping.
    Manual(ManualFrameClock),
    /// Wall-clock time; every frame sleeps one frame interval.
    System(SystemFrameClock),
}

impl RobotClock {
    fn now(&self) -> u64 {
        match self {
            RobotClock::Manual(clock) => clock.frame_time_nanos(),
            RobotClock::System(clock) => clock.frame_time_nanos(),
        }
    }

    fn next_frame(&self) {
        match self {
            RobotClock::Manual(clock) => clock.advance_frame(),
            RobotClock::System(_) => thread::sleep(FRAME_INTERVAL),
        }
    }
}

/// Drives a [`CardStackNode`] with scripted touches and frames.
pub struct DeckRobot<T: Identifiable> {
    node: CardStackNode<T>,
    clock: RobotClock,
    frames: u64,
    redraws: u64,
}

impl<T: Identifiable + 'static> DeckRobot<T> {
    /// Robot running on virtual time.
    pub fn new(node: CardStackNode<T>) -> Self {
        Self {
            node,
            clock: RobotClock::Manual(ManualFrameClock::new()),
            frames: 0,
            redraws: 0,
        }
    }

    /// Robot running on the wall clock, pacing frames at 60 fps.
    pub fn realtime(node: CardStackNode<T>) -> Self {
        Self {
            node,
            clock: RobotClock::System(SystemFrameClock::new()),
            frames: 0,
            redraws: 0,
        }
    }

    pub fn node(&self) -> &CardStackNode<T> {
        &self.node
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames and input events after which the scene needed redrawing.
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    fn present(&mut self) {
        if take_render_invalidation() {
            self.redraws += 1;
        }
    }

    /// Runs frames until the snap animation finishes.
    pub fn wait_for_idle(&mut self) -> Result<(), String> {
        let mut frames = 0;
        while self.node.is_animating() {
            if frames >= MAX_IDLE_FRAMES {
                return Err(format!(
                    "card stack still animating after {MAX_IDLE_FRAMES} frames at position {}",
                    self.node.state().current_position()
                ));
            }
            self.frame();
            frames += 1;
        }
        self.node.recompose_if_needed();
        Ok(())
    }

    fn frame(&mut self) {
        self.node.advance_frame(self.clock.now());
        self.present();
        self.clock.next_frame();
        self.frames += 1;
    }

    /// Index of the topmost card labeled `label`.
    pub fn find_card_with_label(&self, label: &str) -> Result<usize, String> {
        self.node
            .cards()
            .iter()
            .rev()
            .find(|card| card.label() == Some(label))
            .map(|card| card.index)
            .ok_or_else(|| format!("no card labeled {label:?}"))
    }

    pub fn touch_down(&mut self, x: f32, y: f32) -> Result<(), String> {
        self.send(PointerEventKind::Down, x, y)
    }

    pub fn touch_move(&mut self, x: f32, y: f32) -> Result<(), String> {
        self.send(PointerEventKind::Move, x, y)
    }

    pub fn touch_up(&mut self, x: f32, y: f32) -> Result<(), String> {
        self.send(PointerEventKind::Up, x, y)
    }

    /// Drags from `start` by `(dx, dy)`, running one frame per move, then
    /// releases.
    pub fn swipe(&mut self, start: Point, dx: f32, dy: f32) -> Result<(), String> {
        self.touch_down(start.x, start.y)?;
        let steps = 10;
        for i in 1..=steps {
            let progress = i as f32 / steps as f32;
            self.touch_move(start.x + dx * progress, start.y + dy * progress)?;
            self.frame();
        }
        self.touch_up(start.x + dx, start.y + dy)
    }

    /// Swipe right-to-left from the viewport center.
    pub fn swipe_left(&mut self, distance: f32) -> Result<(), String> {
        let start = self.node.viewport().center();
        self.swipe(start, -distance, 0.0)
    }

    /// Swipe left-to-right from the viewport center.
    pub fn swipe_right(&mut self, distance: f32) -> Result<(), String> {
        let start = self.node.viewport().center();
        self.swipe(start, distance, 0.0)
    }

    /// Taps the center of the topmost card labeled `label`.
    ///
    /// Fails if another card covers that point.
    pub fn tap_card(&mut self, label: &str) -> Result<(), String> {
        let index = self.find_card_with_label(label)?;
        let center = self
            .node
            .card(index)
            .map(|card| card.drawn_center())
            .ok_or_else(|| format!("card {index} is not composed"))?;
        match self.node.hit_test(center) {
            Some(card) if card.index == index => {}
            Some(card) => {
                return Err(format!(
                    "card {label:?} is covered by card {} at ({}, {})",
                    card.index, center.x, center.y
                ))
            }
            None => return Err(format!("card {label:?} is not hittable at its center")),
        }
        self.touch_down(center.x, center.y)?;
        self.touch_up(center.x, center.y)
    }

    pub fn settled_index(&self) -> Result<usize, String> {
        self.node
            .state()
            .settled_index()
            .ok_or_else(|| "card stack has not settled on any card".to_string())
    }

    pub fn assert_settled(&self, expected: usize) -> Result<(), String> {
        let actual = self.settled_index()?;
        if actual == expected {
            Ok(())
        } else {
            Err(format!("expected card {expected} to be settled, found {actual}"))
        }
    }

    fn send(&mut self, kind: PointerEventKind, x: f32, y: f32) -> Result<(), String> {
        let position = Point::new(x, y);
        if !position.x.is_finite() || !position.y.is_finite() {
            return Err(format!("invalid pointer position ({x}, {y})"));
        }
        let consumed = self
            .node
            .on_pointer_event(PointerEvent::new(0, kind, position));
        log::trace!("robot {kind:?} at ({x}, {y}) consumed={consumed}");
        self.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use swipedeck_foundation::Rect;
    use swipedeck_ui::{CardStack, CardView, Modifier};

    fn robot(count: u32) -> DeckRobot<u32> {
        let node = CardStack::new((0..count).collect::<Vec<_>>(), |item: &u32| {
            CardView::labeled(format!("card {item}"))
        })
        .compose(Rect::new(0.0, 0.0, 400.0, 600.0));
        DeckRobot::new(node)
    }

    #[test]
    fn swipes_settle_on_neighbouring_cards() {
        let mut robot = robot(4);
        robot.swipe_left(300.0).unwrap();
        robot.wait_for_idle().unwrap();
        robot.assert_settled(1).unwrap();

        robot.swipe_right(300.0).unwrap();
        robot.wait_for_idle().unwrap();
        robot.assert_settled(0).unwrap();
        assert!(robot.frames() > 0);
        assert!(robot.redraws() > 0);
    }

    #[test]
    fn reports_missing_cards_as_errors() {
        let robot = robot(2);
        assert_eq!(robot.find_card_with_label("card 1"), Ok(1));
        assert!(robot.find_card_with_label("card 9").is_err());
        assert!(robot.assert_settled(1).is_err());
    }

    #[test]
    fn tap_reaches_focused_card_after_swipe() {
        let taps = Rc::new(RefCell::new(Vec::new()));
        let sink = taps.clone();
        let node = CardStack::new((0..3u32).collect::<Vec<_>>(), move |item: &u32| {
            let sink = sink.clone();
            let item = *item;
            CardView::labeled(format!("card {item}"))
                .modifier(Modifier::empty().clickable(move |_| sink.borrow_mut().push(item)))
        })
        .compose(Rect::new(0.0, 0.0, 400.0, 600.0));
        let mut robot = DeckRobot::new(node);

        robot.swipe_left(300.0).unwrap();
        robot.wait_for_idle().unwrap();
        robot.assert_settled(1).unwrap();

        robot.tap_card("card 1").unwrap();
        assert_eq!(*taps.borrow(), vec![1]);
    }

    #[test]
    fn tapping_a_covered_card_fails() {
        let mut robot = robot(3);
        let error = robot.tap_card("card 1").unwrap_err();
        assert!(error.contains("covered"), "{error}");
    }

    #[test]
    fn empty_deck_never_settles() {
        let robot = robot(0);
        assert!(robot.settled_index().is_err());
    }
}
