//! Per-gesture drag state.

use gridsnap_core::geometry::{Point, Rect, Size};

use crate::hierarchy::NodeId;
use crate::resolver::{GrabOffset, begin_grab};

/// Lifecycle phase of an element's drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Grab offset captured; pointer moves update the position.
    Armed,
}

/// State of one drag gesture.
///
/// Created when the element is grabbed and dropped when the gesture ends.
/// The grab offset and element size are fixed for the session's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    element: NodeId,
    grab_offset: GrabOffset,
    element_size: Size<f32>,
    last_pointer: Point,
    last_position: Option<Point>,
}

impl DragSession {
    /// Start a session for `element`, grabbed at `pointer`.
    pub fn begin(element: NodeId, element_rect: Rect, pointer: Point) -> Self {
        Self {
            element,
            grab_offset: begin_grab(element_rect, pointer),
            element_size: element_rect.size().normalized(),
            last_pointer: pointer,
            last_position: None,
        }
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn grab_offset(&self) -> GrabOffset {
        self.grab_offset
    }

    pub fn element_size(&self) -> Size<f32> {
        self.element_size
    }

    pub fn last_pointer(&self) -> Point {
        self.last_pointer
    }

    /// Most recent resolved position, if any move landed on a valid target.
    pub fn last_position(&self) -> Option<Point> {
        self.last_position
    }

    pub fn record_pointer(&mut self, pointer: Point) {
        self.last_pointer = pointer;
    }

    pub fn record_position(&mut self, position: Point) {
        self.last_position = Some(position);
    }
}
