//! Value-based modifier chain.
//!
//! A [`Modifier`] is an ordered list of elements. Elements are applied front
//! to back when the chain is resolved into [`ResolvedModifiers`], so
//! `a.then(b)` applies `a` first.

mod background;
mod clickable;
mod graphics_layer;
mod offset;
mod rotate;
mod scale;
mod size;

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;
use swipedeck_foundation::{Color, Point, Rect, Size};

pub use graphics_layer::GraphicsLayer;

/// Tap handler; receives the tap position in the card's local coordinates.
pub type ClickHandler = Rc<dyn Fn(Point)>;

#[derive(Clone)]
pub enum ModifierElement {
    Offset(Point),
    GraphicsLayer(GraphicsLayer),
    ZIndex(f32),
    Background(Color),
    Size(Size),
    Clickable(ClickHandler),
}

impl fmt::Debug for ModifierElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierElement::Offset(offset) => f.debug_tuple("Offset").field(offset).finish(),
            ModifierElement::GraphicsLayer(layer) => {
                f.debug_tuple("GraphicsLayer").field(layer).finish()
            }
            ModifierElement::ZIndex(z) => f.debug_tuple("ZIndex").field(z).finish(),
            ModifierElement::Background(color) => {
                f.debug_tuple("Background").field(color).finish()
            }
            ModifierElement::Size(size) => f.debug_tuple("Size").field(size).finish(),
            ModifierElement::Clickable(_) => f.write_str("Clickable(..)"),
        }
    }
}

/// An ordered, immutable chain of modifier elements.
#[derive(Clone, Debug, Default)]
pub struct Modifier {
    elements: SmallVec<[ModifierElement; 4]>,
}

impl Modifier {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn with_element(mut self, element: ModifierElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Appends `next` after the elements of `self`.
    pub fn then(mut self, next: Modifier) -> Self {
        self.elements.extend(next.elements);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Sets the paint order among siblings. The last z-index in the chain wins.
    pub fn z_index(self, z_index: f32) -> Self {
        self.with_element(ModifierElement::ZIndex(z_index))
    }

    /// Click handlers in chain order.
    pub fn click_handlers(&self) -> impl Iterator<Item = &ClickHandler> + '_ {
        self.elements.iter().filter_map(|element| match element {
            ModifierElement::Clickable(handler) => Some(handler),
            _ => None,
        })
    }

    pub fn is_clickable(&self) -> bool {
        self.click_handlers().next().is_some()
    }

    /// Folds the chain into the properties the renderer and hit testing use.
    pub fn resolve(&self) -> ResolvedModifiers {
        let mut resolved = ResolvedModifiers::default();
        for element in &self.elements {
            match element {
                ModifierElement::Offset(delta) => {
                    resolved.offset = resolved.offset + *delta;
                }
                ModifierElement::GraphicsLayer(layer) => {
                    resolved.graphics_layer = resolved.graphics_layer.then(*layer);
                }
                ModifierElement::ZIndex(z_index) => resolved.z_index = *z_index,
                ModifierElement::Background(color) => resolved.background = Some(*color),
                ModifierElement::Size(size) => resolved.size = Some(*size),
                ModifierElement::Clickable(_) => resolved.clickable = true,
            }
        }
        resolved
    }
}

/// Flattened view of a [`Modifier`] chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedModifiers {
    pub offset: Point,
    pub graphics_layer: GraphicsLayer,
    pub z_index: f32,
    pub background: Option<Color>,
    pub size: Option<Size>,
    pub clickable: bool,
}

impl Default for ResolvedModifiers {
    fn default() -> Self {
        Self {
            offset: Point::ZERO,
            graphics_layer: GraphicsLayer::default(),
            z_index: 0.0,
            background: None,
            size: None,
            clickable: false,
        }
    }
}

impl ResolvedModifiers {
    /// Total translation: layout offset plus layer translation.
    pub fn translation(&self) -> Point {
        self.offset + self.graphics_layer.translation()
    }

    /// Maps `point` into the untransformed coordinate space of `bounds`.
    ///
    /// The layer scales and rotates about the center of `bounds`, then
    /// translates. Returns `None` when the layer collapses the content.
    pub fn to_local(&self, bounds: Rect, point: Point) -> Option<Point> {
        let layer = self.graphics_layer;
        if layer.scale_x == 0.0 || layer.scale_y == 0.0 {
            return None;
        }
        let center = bounds.center();
        let relative = point - center - self.translation();
        let radians = -layer.rotation_z.to_radians();
        let (sin, cos) = radians.sin_cos();
        let unrotated = Point::new(
            relative.x * cos - relative.y * sin,
            relative.x * sin + relative.y * cos,
        );
        let unscaled = Point::new(unrotated.x / layer.scale_x, unrotated.y / layer.scale_y);
        Some(unscaled + center - Point::new(bounds.x, bounds.y))
    }

    /// Hit test against `bounds` drawn with these modifiers.
    pub fn contains(&self, bounds: Rect, point: Point) -> bool {
        self.to_local(bounds, point)
            .is_some_and(|local| Rect::from_size(bounds.size()).contains(local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn resolve_applies_elements_in_order() {
        let modifier = Modifier::empty()
            .offset(10.0, 0.0)
            .z_index(1.0)
            .then(Modifier::empty().offset(5.0, 2.0).z_index(3.0));
        let resolved = modifier.resolve();
        assert_eq!(resolved.offset, Point::new(15.0, 2.0));
        assert_eq!(resolved.z_index, 3.0);
    }

    #[test]
    fn layers_compose() {
        let resolved = Modifier::empty().scale(0.5).scale(0.5).rotate(10.0).rotate(5.0).resolve();
        assert_eq!(resolved.graphics_layer.scale_x, 0.25);
        assert_eq!(resolved.graphics_layer.rotation_z, 15.0);
    }

    #[test]
    fn hit_test_follows_translation_and_scale() {
        let bounds = Rect::new(100.0, 100.0, 200.0, 200.0);
        let resolved = Modifier::empty().offset(300.0, 0.0).scale(0.5).resolve();
        // Scaled card spans 450..550 horizontally after the offset.
        assert!(resolved.contains(bounds, Point::new(460.0, 200.0)));
        assert!(!resolved.contains(bounds, Point::new(200.0, 200.0)));
        assert!(!resolved.contains(bounds, Point::new(440.0, 200.0)));
    }

    #[test]
    fn hit_test_follows_rotation() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 20.0);
        let resolved = Modifier::empty().rotate(90.0).resolve();
        // Rotated a quarter turn, the thin bar stands upright about (50, 10).
        assert!(resolved.contains(bounds, Point::new(50.0, 50.0)));
        assert!(!resolved.contains(bounds, Point::new(90.0, 10.0)));
    }

    #[test]
    fn zero_scale_is_not_hittable() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let resolved = Modifier::empty().scale(0.0).resolve();
        assert!(!resolved.contains(bounds, Point::new(5.0, 5.0)));
    }

    #[test]
    fn click_handlers_are_collected() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let modifier = Modifier::empty()
            .background(Color::WHITE)
            .clickable(move |_| counter.set(counter.get() + 1));
        assert!(modifier.is_clickable());
        assert!(modifier.resolve().clickable);
        for handler in modifier.click_handlers() {
            handler(Point::ZERO);
        }
        assert_eq!(clicks.get(), 1);
    }
}
