use std::rc::Rc;

use swipedeck_foundation::Point;

use super::{Modifier, ModifierElement};

impl Modifier {
    /// Calls `on_click` when a tap lands on the content.
    ///
    /// A tap is a press and release on the same content without the pointer
    /// leaving the touch slop. The position is in local coordinates.
    pub fn clickable(self, on_click: impl Fn(Point) + 'static) -> Self {
        self.with_element(ModifierElement::Clickable(Rc::new(on_click)))
    }
}
