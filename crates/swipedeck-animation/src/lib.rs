//! Animation primitives for swipedeck.
//!
//! - [`SpringSpec`] - damping ratio / stiffness description of a spring
//! - [`Animatable`] - a single `f32` driven toward a target by a spring
//! - [`FrameClock`] - source of frame timestamps ([`SystemFrameClock`],
//!   [`ManualFrameClock`])

mod animatable;
mod frame_clock;
mod spring;

pub use animatable::*;
pub use frame_clock::*;
pub use spring::*;
