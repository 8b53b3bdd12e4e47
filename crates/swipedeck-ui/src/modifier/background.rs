use swipedeck_foundation::Color;

use super::{Modifier, ModifierElement};

impl Modifier {
    pub fn background(self, color: Color) -> Self {
        self.with_element(ModifierElement::Background(color))
    }
}
