use swipedeck_foundation::Point;

use super::{Modifier, ModifierElement};

impl Modifier {
    /// Moves the content by `(x, y)` without affecting its bounds.
    pub fn offset(self, x: f32, y: f32) -> Self {
        self.offset_point(Point::new(x, y))
    }

    pub fn offset_point(self, offset: Point) -> Self {
        self.with_element(ModifierElement::Offset(offset))
    }
}
