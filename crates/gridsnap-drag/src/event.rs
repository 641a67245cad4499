//! Pointer events that drive drag gestures.

use std::collections::VecDeque;

use gridsnap_core::geometry::Point;

use crate::hierarchy::NodeId;

/// A discrete pointer event addressed to one draggable element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// Pointer pressed on the element; starts a gesture.
    GrabStart { element: NodeId, pointer: Point },
    /// Pointer moved while the element is grabbed.
    PointerMove { element: NodeId, pointer: Point },
    /// Element released over a drop target.
    Drop { element: NodeId },
    /// Gesture ended without a drop (e.g. released outside any target).
    DragEnd { element: NodeId },
}

impl DragEvent {
    pub fn element(&self) -> NodeId {
        match *self {
            DragEvent::GrabStart { element, .. }
            | DragEvent::PointerMove { element, .. }
            | DragEvent::Drop { element }
            | DragEvent::DragEnd { element } => element,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, DragEvent::PointerMove { .. })
    }
}

/// Whether a handler consumed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleStatus {
    Ignored,
    Consumed,
}

impl HandleStatus {
    pub fn is_consumed(&self) -> bool {
        matches!(self, HandleStatus::Consumed)
    }
}

/// FIFO queue of drag events with move coalescing.
///
/// A pointer move that directly follows another move for the same element
/// replaces it, since only the latest pointer position affects the result.
/// Grabs, drops and drag ends are never coalesced or reordered.
#[derive(Debug)]
pub struct DragEventQueue {
    pending: VecDeque<DragEvent>,
    stats: EventStats,
}

impl DragEventQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(32),
            stats: EventStats::default(),
        }
    }

    pub fn push(&mut self, event: DragEvent) {
        self.stats.events_received += 1;

        if event.is_move()
            && let Some(back) = self.pending.back_mut()
            && back.is_move()
            && back.element() == event.element()
        {
            *back = event;
            self.stats.events_coalesced += 1;
            return;
        }

        self.pending.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take all pending events as a batch, in arrival order.
    pub fn drain(&mut self) -> DragEventBatch {
        let events: Vec<DragEvent> = self.pending.drain(..).collect();
        self.stats.events_processed += events.len();
        DragEventBatch { events }
    }

    pub fn stats(&self) -> &EventStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = EventStats::default();
    }
}

impl Default for DragEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// A batch of drained events.
#[derive(Debug, Default)]
pub struct DragEventBatch {
    events: Vec<DragEvent>,
}

impl DragEventBatch {
    pub fn iter(&self) -> impl Iterator<Item = &DragEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Run `handler` over every event, keeping only the ones it did not consume.
    pub fn dispatch<H>(&mut self, mut handler: H)
    where
        H: FnMut(&DragEvent) -> HandleStatus,
    {
        self.events.retain(|event| {
            let status = handler(event);
            !status.is_consumed()
        });
    }
}

impl FromIterator<DragEvent> for DragEventBatch {
    fn from_iter<I: IntoIterator<Item = DragEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct EventStats {
    pub events_received: usize,
    pub events_processed: usize,
    pub events_coalesced: usize,
}
