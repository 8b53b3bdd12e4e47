use super::{GraphicsLayer, Modifier};

impl Modifier {
    /// Uniform scale about the center of the content.
    ///
    /// # Example
    /// ```
    /// use swipedeck_ui::Modifier;
    ///
    /// let modifier = Modifier::empty().scale(1.5);
    /// assert_eq!(modifier.resolve().graphics_layer.scale_x, 1.5);
    /// ```
    pub fn scale(self, scale: f32) -> Self {
        self.scale_xy(scale, scale)
    }

    /// Independent horizontal and vertical scale about the center.
    pub fn scale_xy(self, scale_x: f32, scale_y: f32) -> Self {
        self.graphics_layer(GraphicsLayer {
            scale_x,
            scale_y,
            ..GraphicsLayer::default()
        })
    }
}
