//! Foundation layer of swipedeck.
//!
//! # Architecture
//!
//! - [`card_geometry`] - pure mapping from (card index, scroll position,
//!   deck size) to a [`CardTransform`]
//! - [`CardStackState`] - scroll/anchor position, snap procedure and spring
//!   settling; the state container the widget observes
//! - [`DragGestureDetector`] - turns pointer events into drag callbacks
//!   along one axis
//! - [`CardStackSpec`] - configuration shared by the state and the widget

pub mod card_geometry;
mod card_stack_spec;
mod card_stack_state;
mod drag;
pub mod gesture_constants;
mod graphics;
mod pointer;

pub use card_geometry::{CardStackGeometry, CardTransform};
pub use card_stack_spec::*;
pub use card_stack_state::*;
pub use drag::*;
pub use graphics::*;
pub use pointer::*;
