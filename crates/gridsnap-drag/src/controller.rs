//! Drag gesture state machine.
//!
//! ```text
//! Idle  --grab start-->               Armed (grab offset captured)
//! Armed --move over a drop target-->  Armed (position resolved)
//! Armed --move elsewhere-->           Armed (position frozen)
//! Armed --drop / drag end-->          Idle  (session discarded)
//! ```
//!
//! Every element has its own session; gestures on different elements never
//! share state. Container geometry is read from the hierarchy on every move,
//! so a container resized mid-gesture takes effect on the next move.

use gridsnap_core::alloc::HashMap;
use gridsnap_core::geometry::Point;
use gridsnap_core::profiling::{self, profile_function};

use crate::event::{DragEvent, DragEventBatch, HandleStatus};
use crate::hierarchy::{Capabilities, ContainerHierarchy, NodeId, is_valid_target};
use crate::resolver::{GrabOffset, OutputSpace, PositionResolver, ResolverConfig};
use crate::session::{DragPhase, DragSession};

/// Why an event had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The element is not in the hierarchy.
    UnknownElement,
    /// The element lacks [`Capabilities::DRAGGABLE`].
    NotDraggable,
    /// The element has no active session.
    NoSession,
}

/// Result of handling one [`DragEvent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// A session started.
    Armed {
        element: NodeId,
        grab_offset: GrabOffset,
    },
    /// The pointer is over a drop target and the element has a new position.
    Moved {
        element: NodeId,
        container: NodeId,
        /// Position in the configured [`OutputSpace`].
        position: Point,
        /// Position in pointer space, ready to apply to the element.
        absolute: Point,
    },
    /// No drop target under the pointer; the last resolved position stands.
    Frozen {
        element: NodeId,
        last_position: Option<Point>,
    },
    /// The session ended.
    Released {
        element: NodeId,
        final_position: Option<Point>,
    },
    Ignored {
        element: NodeId,
        reason: IgnoreReason,
    },
}

impl DragOutcome {
    pub fn element(&self) -> NodeId {
        match *self {
            DragOutcome::Armed { element, .. }
            | DragOutcome::Moved { element, .. }
            | DragOutcome::Frozen { element, .. }
            | DragOutcome::Released { element, .. }
            | DragOutcome::Ignored { element, .. } => element,
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, DragOutcome::Ignored { .. })
    }
}

/// Drives drag sessions from pointer events.
#[derive(Debug, Default)]
pub struct DragController {
    resolver: PositionResolver,
    sessions: HashMap<NodeId, DragSession>,
}

impl DragController {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            resolver: PositionResolver::new(config),
            sessions: HashMap::new(),
        }
    }

    pub fn resolver(&self) -> &PositionResolver {
        &self.resolver
    }

    pub fn session(&self, element: NodeId) -> Option<&DragSession> {
        self.sessions.get(&element)
    }

    pub fn phase(&self, element: NodeId) -> DragPhase {
        if self.sessions.contains_key(&element) {
            DragPhase::Armed
        } else {
            DragPhase::Idle
        }
    }

    /// Number of elements currently being dragged.
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Discard every session without emitting outcomes.
    pub fn cancel_all(&mut self) {
        if !self.sessions.is_empty() {
            tracing::debug!("Cancelling {} drag session(s)", self.sessions.len());
        }
        self.sessions.clear();
    }

    /// Apply one event.
    pub fn handle<H>(&mut self, event: &DragEvent, hierarchy: &H) -> DragOutcome
    where
        H: ContainerHierarchy + ?Sized,
    {
        profile_function!();
        match *event {
            DragEvent::GrabStart { element, pointer } => self.grab(element, pointer, hierarchy),
            DragEvent::PointerMove { element, pointer } => {
                self.pointer_move(element, pointer, hierarchy)
            }
            DragEvent::Drop { element } | DragEvent::DragEnd { element } => self.release(element),
        }
    }

    /// Handle every event in `batch`, leaving ignored events in it.
    pub fn process_batch<H>(
        &mut self,
        batch: &mut DragEventBatch,
        hierarchy: &H,
    ) -> Vec<DragOutcome>
    where
        H: ContainerHierarchy + ?Sized,
    {
        profiling::new_frame();
        let mut outcomes = Vec::with_capacity(batch.len());
        batch.dispatch(|event| {
            let outcome = self.handle(event, hierarchy);
            let status = if outcome.is_ignored() {
                HandleStatus::Ignored
            } else {
                HandleStatus::Consumed
            };
            outcomes.push(outcome);
            status
        });
        outcomes
    }

    fn grab<H>(&mut self, element: NodeId, pointer: Point, hierarchy: &H) -> DragOutcome
    where
        H: ContainerHierarchy + ?Sized,
    {
        let Some(rect) = hierarchy.bounds(element) else {
            return DragOutcome::Ignored {
                element,
                reason: IgnoreReason::UnknownElement,
            };
        };
        if !hierarchy
            .capabilities(element)
            .contains(Capabilities::DRAGGABLE)
        {
            return DragOutcome::Ignored {
                element,
                reason: IgnoreReason::NotDraggable,
            };
        }

        let session = DragSession::begin(element, rect, pointer);
        let grab_offset = session.grab_offset();
        if self.sessions.insert(element, session).is_some() {
            tracing::warn!("Element {:?} grabbed again before release; session replaced", element);
        }
        tracing::debug!("Grab {:?} at {:?}, offset {:?}", element, pointer, grab_offset.vector());

        DragOutcome::Armed {
            element,
            grab_offset,
        }
    }

    fn pointer_move<H>(&mut self, element: NodeId, pointer: Point, hierarchy: &H) -> DragOutcome
    where
        H: ContainerHierarchy + ?Sized,
    {
        let Some(session) = self.sessions.get_mut(&element) else {
            return DragOutcome::Ignored {
                element,
                reason: IgnoreReason::NoSession,
            };
        };
        session.record_pointer(pointer);

        let Some(target) = is_valid_target(pointer, hierarchy) else {
            tracing::trace!("No drop target under {:?}; {:?} frozen", pointer, element);
            return DragOutcome::Frozen {
                element,
                last_position: session.last_position(),
            };
        };

        let grid = self.resolver.grid_for(target.cell_size);
        let position = self.resolver.resolve_on_grid(
            pointer,
            session.grab_offset(),
            target.bounds,
            session.element_size(),
            &grid,
        );
        session.record_position(position);

        let absolute = match self.resolver.config().output_space {
            OutputSpace::ContainerLocal => position + target.bounds.position(),
            OutputSpace::Absolute => position,
        };
        tracing::trace!("{:?} -> {:?} in {:?}", element, position, target.container);

        DragOutcome::Moved {
            element,
            container: target.container,
            position,
            absolute,
        }
    }

    fn release(&mut self, element: NodeId) -> DragOutcome {
        match self.sessions.remove(&element) {
            Some(session) => {
                tracing::debug!("Release {:?} at {:?}", element, session.last_position());
                DragOutcome::Released {
                    element,
                    final_position: session.last_position(),
                }
            }
            None => DragOutcome::Ignored {
                element,
                reason: IgnoreReason::NoSession,
            },
        }
    }
}
