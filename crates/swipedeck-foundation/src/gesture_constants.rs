//! Shared gesture constants for consistent touch/pointer handling.
//!
//! Values are in logical pixels.

/// Drag threshold in logical pixels.
///
/// Once the pointer moves more than this along the drag axis:
/// - the card stack drag begins and starts moving the deck
/// - a pending tap on the card under the pointer is cancelled
pub const DRAG_THRESHOLD: f32 = 8.0;
