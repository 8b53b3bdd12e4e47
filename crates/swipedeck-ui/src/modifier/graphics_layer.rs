use swipedeck_foundation::Point;

use super::{Modifier, ModifierElement};

/// Draw-time transform applied about the center of the content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphicsLayer {
    pub scale_x: f32,
    pub scale_y: f32,
    /// Clockwise rotation in degrees.
    pub rotation_z: f32,
    pub translation_x: f32,
    pub translation_y: f32,
}

impl Default for GraphicsLayer {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            rotation_z: 0.0,
            translation_x: 0.0,
            translation_y: 0.0,
        }
    }
}

impl GraphicsLayer {
    pub fn translation(&self) -> Point {
        Point::new(self.translation_x, self.translation_y)
    }

    /// Combines two layers: scales multiply, rotations and translations add.
    pub fn then(self, next: GraphicsLayer) -> GraphicsLayer {
        GraphicsLayer {
            scale_x: self.scale_x * next.scale_x,
            scale_y: self.scale_y * next.scale_y,
            rotation_z: self.rotation_z + next.rotation_z,
            translation_x: self.translation_x + next.translation_x,
            translation_y: self.translation_y + next.translation_y,
        }
    }
}

impl Modifier {
    pub fn graphics_layer(self, layer: GraphicsLayer) -> Self {
        self.with_element(ModifierElement::GraphicsLayer(layer))
    }
}
