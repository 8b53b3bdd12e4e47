use super::{GraphicsLayer, Modifier};

impl Modifier {
    /// Tilts the content by `degrees` about its center, clockwise for
    /// positive values.
    pub fn rotate(self, degrees: f32) -> Self {
        self.graphics_layer(GraphicsLayer {
            rotation_z: degrees,
            ..GraphicsLayer::default()
        })
    }
}
