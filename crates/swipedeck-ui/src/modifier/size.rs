use swipedeck_foundation::Size;

use super::{Modifier, ModifierElement};

impl Modifier {
    /// Lays the content out at exactly `size`.
    pub fn size(self, size: Size) -> Self {
        self.with_element(ModifierElement::Size(size))
    }

    pub fn size_points(self, width: f32, height: f32) -> Self {
        self.size(Size::new(width, height))
    }
}
