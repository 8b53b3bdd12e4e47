use swipedeck_animation::SpringSpec;

use crate::card_geometry::CardStackGeometry;
use crate::graphics::Size;
use crate::pointer::Orientation;

/// Drag distance that moves the deck by one full card.
pub const DEFAULT_SWIPE_DISTANCE: f32 = 300.0;

/// Default card size in logical pixels.
pub const DEFAULT_CARD_SIZE: Size = Size::new(240.0, 320.0);

/// Damping ratio of the snap animation.
pub const DEFAULT_SNAP_DAMPING_RATIO: f32 = 0.8;

/// Stiffness of the snap animation.
pub const DEFAULT_SNAP_STIFFNESS: f32 = 300.0;

/// Specification for card stack behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardStackSpec {
    /// Drag distance, in the unit of the drag translation, for one card.
    pub swipe_distance: f32,
    /// Index shown at mount when no binding provides one.
    pub initial_index: usize,
    /// Axis the deck is dragged and fanned along.
    pub orientation: Orientation,
    /// Size each card is laid out at before transforms.
    pub card_size: Size,
    /// Fan geometry constants.
    pub geometry: CardStackGeometry,
    /// Spring used when snapping to the settled index.
    pub spring: SpringSpec,
}

impl Default for CardStackSpec {
    fn default() -> Self {
        Self {
            swipe_distance: DEFAULT_SWIPE_DISTANCE,
            initial_index: 0,
            orientation: Orientation::Horizontal,
            card_size: DEFAULT_CARD_SIZE,
            geometry: CardStackGeometry::default(),
            spring: SpringSpec::new(DEFAULT_SNAP_DAMPING_RATIO, DEFAULT_SNAP_STIFFNESS),
        }
    }
}

impl CardStackSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn swipe_distance(mut self, distance: f32) -> Self {
        self.swipe_distance = distance;
        self
    }

    pub fn initial_index(mut self, index: usize) -> Self {
        self.initial_index = index;
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn card_size(mut self, size: Size) -> Self {
        self.card_size = size;
        self
    }

    pub fn geometry(mut self, geometry: CardStackGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn spring(mut self, spring: SpringSpec) -> Self {
        self.spring = spring;
        self
    }

    /// Swipe distance with non-positive or non-finite values replaced by
    /// [`DEFAULT_SWIPE_DISTANCE`].
    pub fn effective_swipe_distance(&self) -> f32 {
        sanitize_swipe_distance(self.swipe_distance)
    }
}

pub(crate) fn sanitize_swipe_distance(distance: f32) -> f32 {
    if distance.is_finite() && distance > 0.0 {
        distance
    } else {
        log::warn!(
            "invalid swipe distance {}, falling back to {}",
            distance,
            DEFAULT_SWIPE_DISTANCE
        );
        DEFAULT_SWIPE_DISTANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_stack_spec_default() {
        let spec = CardStackSpec::default();
        assert_eq!(spec.swipe_distance, 300.0);
        assert_eq!(spec.initial_index, 0);
        assert_eq!(spec.orientation, Orientation::Horizontal);
    }

    #[test]
    fn test_card_stack_spec_builder() {
        let spec = CardStackSpec::new()
            .swipe_distance(150.0)
            .initial_index(3)
            .orientation(Orientation::Vertical)
            .card_size(Size::new(100.0, 140.0));

        assert_eq!(spec.effective_swipe_distance(), 150.0);
        assert_eq!(spec.initial_index, 3);
        assert_eq!(spec.card_size, Size::new(100.0, 140.0));
    }

    #[test]
    fn test_invalid_swipe_distance_falls_back() {
        assert_eq!(
            CardStackSpec::new().swipe_distance(0.0).effective_swipe_distance(),
            DEFAULT_SWIPE_DISTANCE
        );
        assert_eq!(
            CardStackSpec::new()
                .swipe_distance(f32::INFINITY)
                .effective_swipe_distance(),
            DEFAULT_SWIPE_DISTANCE
        );
    }
}
