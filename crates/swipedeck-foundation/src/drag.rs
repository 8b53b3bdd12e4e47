//! Single-axis drag detection.

use smallvec::SmallVec;

use crate::gesture_constants::DRAG_THRESHOLD;
use crate::graphics::Point;
use crate::pointer::{Orientation, PointerEvent, PointerEventKind, PointerId};

/// Drag callbacks produced by [`DragGestureDetector`].
///
/// Translations are measured along the detector's axis from the position the
/// pointer went down at, not from the previous event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEvent {
    Started,
    Dragged { translation: f32 },
    Ended { translation: f32 },
    Cancelled,
}

pub type DragEvents = SmallVec<[DragEvent; 2]>;

/// Recognizes a drag along one axis once the pointer travels further than
/// [`DRAG_THRESHOLD`]. Only the first pointer down is tracked; others are
/// ignored until it lifts.
#[derive(Clone, Debug)]
pub struct DragGestureDetector {
    orientation: Orientation,
    enabled: bool,
    pointer: Option<PointerId>,
    down_position: Point,
    dragging: bool,
}

impl DragGestureDetector {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            enabled: true,
            pointer: None,
            down_position: Point::ZERO,
            dragging: false,
        }
    }

    /// Enables or disables recognition. Disabling mid-drag cancels it.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<DragEvent> {
        self.enabled = enabled;
        if enabled {
            return None;
        }
        let was_dragging = self.dragging;
        self.reset();
        was_dragging.then_some(DragEvent::Cancelled)
    }

    /// True once the touch slop has been exceeded for the tracked pointer.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// True while a pointer is down, dragging or not.
    pub fn is_tracking(&self) -> bool {
        self.pointer.is_some()
    }

    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> DragEvents {
        let mut events = DragEvents::new();
        if !self.enabled {
            return events;
        }

        match event.kind {
            PointerEventKind::Down => {
                if self.pointer.is_none() {
                    self.pointer = Some(event.id);
                    self.down_position = event.position;
                    self.dragging = false;
                }
            }
            PointerEventKind::Move => {
                if self.pointer != Some(event.id) {
                    return events;
                }
                let translation = self.translation(event.position);
                if !self.dragging && translation.abs() > DRAG_THRESHOLD {
                    self.dragging = true;
                    log::trace!("drag started, translation {translation}");
                    events.push(DragEvent::Started);
                }
                if self.dragging {
                    events.push(DragEvent::Dragged { translation });
                }
            }
            PointerEventKind::Up => {
                if self.pointer != Some(event.id) {
                    return events;
                }
                if self.dragging {
                    let translation = self.translation(event.position);
                    log::trace!("drag ended, translation {translation}");
                    events.push(DragEvent::Ended { translation });
                }
                self.reset();
            }
            PointerEventKind::Cancel => {
                if self.pointer != Some(event.id) {
                    return events;
                }
                if self.dragging {
                    events.push(DragEvent::Cancelled);
                }
                self.reset();
            }
        }
        events
    }

    fn translation(&self, position: Point) -> f32 {
        self.orientation.main_axis(position - self.down_position)
    }

    fn reset(&mut self) {
        self.pointer = None;
        self.dragging = false;
        self.down_position = Point::ZERO;
    }
}

impl Default for DragGestureDetector {
    fn default() -> Self {
        Self::new(Orientation::Horizontal)
    }
}
