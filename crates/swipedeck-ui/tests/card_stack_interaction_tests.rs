use std::cell::RefCell;
use std::rc::Rc;

use swipedeck_core::{Identifiable, MutableState};
use swipedeck_testing::{has_index, has_label, CardStackTestRule};
use swipedeck_ui::{CardStack, CardStackSpec, CardView, Modifier, Orientation};

#[derive(Clone, Debug)]
struct Photo {
    id: u64,
    title: &'static str,
}

impl Identifiable for Photo {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

fn photos(count: u64) -> Vec<Photo> {
    const TITLES: [&str; 8] = [
        "Harbor", "Dunes", "Glacier", "Canyon", "Meadow", "Reef", "Summit", "Delta",
    ];
    (0..count)
        .map(|i| Photo {
            id: 100 + i,
            title: TITLES[i as usize % TITLES.len()],
        })
        .collect()
}

fn photo_card(photo: &Photo) -> CardView {
    CardView::labeled(photo.title)
}

#[test]
fn swipe_past_half_card_settles_on_next() {
    let mut rule = CardStackTestRule::new();
    let selected = MutableState::new(0usize);
    rule.set_content(CardStack::new(photos(6), photo_card).current_index(selected.clone()));

    rule.perform_touch_input(|touch| touch.swipe_left(450.0));

    assert_eq!(selected.get(), 2);
    assert_eq!(rule.state().current_position(), 2.0);
    rule.on_card(has_label("Glacier")).assert_is_settled();
}

#[test]
fn short_swipe_springs_back() {
    let mut rule = CardStackTestRule::new();
    rule.set_content(CardStack::new(photos(6), photo_card));

    rule.perform_touch_input(|touch| touch.swipe_left(120.0));

    assert_eq!(rule.state().settled_index(), Some(0));
    assert_eq!(rule.state().current_position(), 0.0);
}

#[test]
fn swipes_clamp_at_both_ends() {
    let mut rule = CardStackTestRule::new();
    let settles = Rc::new(RefCell::new(Vec::new()));
    let sink = settles.clone();
    rule.set_content(
        CardStack::new(photos(3), photo_card).on_settle(move |index| sink.borrow_mut().push(index)),
    );

    rule.perform_touch_input(|touch| touch.swipe_right(900.0));
    assert_eq!(rule.state().settled_index(), Some(0));

    rule.perform_touch_input(|touch| touch.swipe_left(2000.0));
    assert_eq!(rule.state().settled_index(), Some(2));

    assert_eq!(*settles.borrow(), vec![0, 0, 2]);
}

#[test]
fn drag_tracks_pointer_without_lag() {
    let mut rule = CardStackTestRule::new();
    rule.set_content(CardStack::new(photos(6), photo_card));

    rule.perform_touch_input(|touch| {
        touch.down(None, None);
        touch.move_by(-150.0, 0.0);
    });
    assert_eq!(rule.state().current_position(), 0.5);
    assert!(rule.state().is_dragging());

    // Translation stays measured from where the pointer went down.
    rule.perform_touch_input(|touch| {
        touch.move_to(-250.0, 300.0);
    });
    assert_eq!(rule.state().current_position(), 1.5);
}

#[test]
fn cancelled_drag_settles_like_release() {
    let mut rule = CardStackTestRule::new();
    rule.set_content(CardStack::new(photos(6), photo_card));

    rule.perform_touch_input(|touch| {
        touch.down(None, None);
        touch.move_by(-200.0, 0.0);
        touch.cancel();
    });

    assert_eq!(rule.state().settled_index(), Some(1));
    assert!(!rule.state().is_dragging());
}

#[test]
fn animation_runs_over_several_frames() {
    let mut rule = CardStackTestRule::new();
    rule.set_content(CardStack::new(photos(6), photo_card));
    rule.set_auto_advance(false);

    rule.perform_touch_input(|touch| touch.swipe_left(240.0));
    assert_eq!(rule.state().settled_index(), Some(1));
    assert_eq!(rule.state().current_position(), 0.8);

    rule.advance_frames(3);
    let midway = rule.state().current_position();
    assert!(midway > 0.8 && midway != 1.0, "position was {midway}");

    rule.await_idle();
    assert_eq!(rule.state().current_position(), 1.0);
}

#[test]
fn tap_on_focused_card_fires_click() {
    let mut rule = CardStackTestRule::new();
    let opened = Rc::new(RefCell::new(Vec::new()));
    let sink = opened.clone();
    rule.set_content(CardStack::new(photos(4), move |photo: &Photo| {
        let sink = sink.clone();
        let id = photo.id;
        CardView::labeled(photo.title)
            .modifier(Modifier::empty().clickable(move |_| sink.borrow_mut().push(id)))
    }));

    rule.on_card(has_label("Harbor")).perform_click();
    assert_eq!(*opened.borrow(), vec![100]);

    rule.perform_touch_input(|touch| touch.swipe_left(300.0));
    assert_eq!(rule.state().settled_index(), Some(1));
    rule.on_card(has_label("Dunes")).perform_click();
    assert_eq!(*opened.borrow(), vec![100, 101]);

    rule.perform_touch_input(|touch| touch.swipe_left(300.0));
    rule.on_card(has_label("Glacier")).perform_click();
    assert_eq!(*opened.borrow(), vec![100, 101, 102]);
}

#[test]
fn passed_cards_do_not_cover_the_focused_card() {
    let mut rule = CardStackTestRule::new();
    rule.set_content(CardStack::new(photos(4), photo_card));

    rule.perform_touch_input(|touch| touch.swipe_left(600.0));
    assert_eq!(rule.state().settled_index(), Some(2));

    let top = rule.cards().last().map(|card| card.index);
    assert_eq!(top, Some(2));
    rule.on_card(has_label("Glacier")).assert_exists();
    assert_eq!(rule.count_cards(&has_label("Harbor")), 1);
    let center = rule.viewport().center();
    assert_eq!(rule.node().hit_test(center).map(|card| card.index), Some(2));
}

#[test]
fn swiping_on_a_clickable_card_does_not_click() {
    let mut rule = CardStackTestRule::new();
    let clicks = Rc::new(RefCell::new(0));
    let counter = clicks.clone();
    rule.set_content(CardStack::new(photos(4), move |photo: &Photo| {
        let counter = counter.clone();
        CardView::labeled(photo.title)
            .modifier(Modifier::empty().clickable(move |_| *counter.borrow_mut() += 1))
    }));

    rule.on_card(has_index(0))
        .perform_touch_input(|touch| touch.swipe_left(320.0));

    assert_eq!(*clicks.borrow(), 0);
    assert_eq!(rule.state().settled_index(), Some(1));
}

#[test]
fn vertical_stack_follows_vertical_drags() {
    let mut rule = CardStackTestRule::new();
    rule.set_content(
        CardStack::new(photos(5), photo_card)
            .spec(CardStackSpec::new().orientation(Orientation::Vertical)),
    );

    rule.perform_touch_input(|touch| touch.swipe_left(600.0));
    assert_eq!(rule.state().settled_index(), Some(0));

    rule.perform_touch_input(|touch| touch.swipe_up(600.0));
    assert_eq!(rule.state().settled_index(), Some(2));

    rule.perform_touch_input(|touch| touch.swipe_down(300.0));
    assert_eq!(rule.state().settled_index(), Some(1));
}

#[test]
fn custom_swipe_distance_scales_drag() {
    let mut rule = CardStackTestRule::new();
    rule.set_content(CardStack::new(photos(8), photo_card).swipe_distance(100.0));

    rule.perform_touch_input(|touch| touch.swipe_left(260.0));
    assert_eq!(rule.state().settled_index(), Some(3));
}

#[test]
fn single_card_deck_always_returns_to_it() {
    let mut rule = CardStackTestRule::new();
    rule.set_content(CardStack::new(photos(1), photo_card));

    rule.perform_touch_input(|touch| touch.swipe_left(700.0));
    assert_eq!(rule.state().settled_index(), Some(0));

    rule.perform_touch_input(|touch| touch.swipe_right(700.0));
    assert_eq!(rule.state().settled_index(), Some(0));
}

#[test]
fn empty_deck_renders_nothing() {
    let mut rule = CardStackTestRule::new();
    let selected = MutableState::new(3usize);
    rule.set_content(CardStack::new(Vec::<Photo>::new(), photo_card).current_index(selected.clone()));

    assert!(rule.cards().is_empty());
    rule.perform_touch_input(|touch| touch.swipe_left(450.0));
    assert_eq!(rule.state().current_position(), 0.0);
    assert_eq!(selected.get(), 3);
}
