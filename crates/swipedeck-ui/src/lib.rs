//! Widgets for swipedeck.
//!
//! - [`Modifier`] - value chain of offsets, graphics layers, z-index and
//!   click handlers, folded into [`ResolvedModifiers`]
//! - [`CardStack`] - the card stack widget; [`CardStack::compose`] mounts it
//!   into a [`CardStackNode`] that owns the gesture and recomposition loop
//! - [`render_state`] - invalidation flags read by the host renderer

mod debug;
pub mod modifier;
pub mod render_state;
pub mod widgets;

pub use modifier::{ClickHandler, GraphicsLayer, Modifier, ModifierElement, ResolvedModifiers};
pub use widgets::*;

pub use swipedeck_foundation::{
    CardStackGeometry, CardStackSpec, CardStackState, CardTransform, Color, Orientation, Point,
    PointerEvent, PointerEventKind, Rect, Size,
};
