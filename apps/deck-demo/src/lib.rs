//! Demo deck: travel destinations rendered as a swipeable card stack.

use std::cell::RefCell;
use std::rc::Rc;

use swipedeck_core::{Identifiable, MutableState};
use swipedeck_ui::{CardStack, CardStackNode, CardView, Color, Modifier, Rect};

pub const VIEWPORT: Rect = Rect::new(0.0, 0.0, 480.0, 720.0);

#[derive(Clone, Debug, PartialEq)]
pub struct Destination {
    pub slug: &'static str,
    pub name: &'static str,
    pub color: Color,
}

impl Identifiable for Destination {
    type Id = &'static str;

    fn id(&self) -> Self::Id {
        self.slug
    }
}

pub fn destinations() -> Vec<Destination> {
    vec![
        Destination {
            slug: "lisbon",
            name: "Lisbon",
            color: Color::rgba(0.95, 0.76, 0.31, 1.0),
        },
        Destination {
            slug: "kyoto",
            name: "Kyoto",
            color: Color::rgba(0.86, 0.33, 0.38, 1.0),
        },
        Destination {
            slug: "reykjavik",
            name: "Reykjavik",
            color: Color::rgba(0.36, 0.62, 0.86, 1.0),
        },
        Destination {
            slug: "oaxaca",
            name: "Oaxaca",
            color: Color::rgba(0.55, 0.78, 0.42, 1.0),
        },
        Destination {
            slug: "tbilisi",
            name: "Tbilisi",
            color: Color::rgba(0.64, 0.47, 0.83, 1.0),
        },
        Destination {
            slug: "hobart",
            name: "Hobart",
            color: Color::rgba(0.27, 0.73, 0.69, 1.0),
        },
    ]
}

/// Shared demo state observed by the printer.
#[derive(Clone, Default)]
pub struct DemoModel {
    pub selected: MutableState<usize>,
    pub opened: Rc<RefCell<Vec<&'static str>>>,
}

/// Builds the demo stack: every card is tappable and records its slug.
pub fn deck_app(model: &DemoModel) -> CardStackNode<Destination> {
    let opened = Rc::clone(&model.opened);
    CardStack::new(destinations(), move |destination: &Destination| {
        let opened = Rc::clone(&opened);
        let slug = destination.slug;
        CardView::labeled(destination.name).modifier(
            Modifier::empty()
                .background(destination.color)
                .clickable(move |_| opened.borrow_mut().push(slug)),
        )
    })
    .current_index(model.selected.clone())
    .on_settle(|index| log::info!("deck settled on card {index}"))
    .compose(VIEWPORT)
}

/// One line per card, top of the paint order first.
pub fn describe(node: &CardStackNode<Destination>) -> Vec<String> {
    node.cards()
        .iter()
        .rev()
        .map(|card| {
            format!(
                "{:>10}  z={:+.0}  offset={:+7.1}  scale={:.2}  rotation={:+.1}",
                card.label().unwrap_or("?"),
                card.transform.z_index,
                card.transform.offset,
                card.transform.scale,
                card.transform.rotation_degrees
            )
        })
        .collect()
}
