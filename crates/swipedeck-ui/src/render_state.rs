//! Per-thread redraw flag.
//!
//! Card stacks raise the flag whenever their scroll position changes; the
//! host presenting frames takes it once per frame to decide whether the
//! composed layers need drawing again.

use std::cell::Cell;

thread_local! {
    static RENDER_INVALIDATED: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current scene as stale.
pub fn request_render_invalidation() {
    RENDER_INVALIDATED.with(|flag| flag.set(true));
}

/// Clears the flag, returning whether a redraw was requested.
pub fn take_render_invalidation() -> bool {
    RENDER_INVALIDATED.with(|flag| flag.replace(false))
}

/// Reads the flag without clearing it.
pub fn peek_render_invalidation() -> bool {
    RENDER_INVALIDATED.with(Cell::get)
}
