use crate::graphics::Point;

/// Identifier of a pointer (mouse or touch contact).
pub type PointerId = u64;

/// Phase of a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single pointer event in the coordinate space of the receiving node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(id: PointerId, kind: PointerEventKind, position: Point) -> Self {
        Self { id, kind, position }
    }

    pub fn down(position: Point) -> Self {
        Self::new(0, PointerEventKind::Down, position)
    }

    pub fn moved(position: Point) -> Self {
        Self::new(0, PointerEventKind::Move, position)
    }

    pub fn up(position: Point) -> Self {
        Self::new(0, PointerEventKind::Up, position)
    }

    pub fn cancel(position: Point) -> Self {
        Self::new(0, PointerEventKind::Cancel, position)
    }
}

/// Axis a gesture or a layout runs along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Component of `point` along this axis.
    pub fn main_axis(self, point: Point) -> f32 {
        match self {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        }
    }

    /// Point with `value` on this axis and zero on the other.
    pub fn point(self, value: f32) -> Point {
        match self {
            Orientation::Horizontal => Point::new(value, 0.0),
            Orientation::Vertical => Point::new(0.0, value),
        }
    }
}
