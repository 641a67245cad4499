//! Grid-snapped, container-clamped drag positioning.
//!
//! The heart of this crate is [`PositionResolver`], a pure function from a
//! pointer location, a grab offset and a container's geometry to the dragged
//! element's new top-left corner. Around it sit:
//!
//! - **Grid**: cell quantization with a consistent rounding rule
//! - **Hierarchy**: capability-based drop-container lookup over parent links
//! - **Session / Controller**: per-element drag state driven by [`DragEvent`]s
//! - **Event queue**: batching with pointer-move coalescing
//!
//! # Quick Start
//!
//! ```
//! use gridsnap_core::geometry::{Rect, Size};
//! use gridsnap_core::math::Vec2;
//! use gridsnap_drag::{GrabOffset, resolve};
//!
//! let board = Rect::new(0.0, 0.0, 300.0, 300.0);
//! let tile = Size::new(50.0, 50.0);
//!
//! // Snaps to the nearest 50px cell...
//! let pos = resolve(Vec2::new(83.0, 91.0), GrabOffset::ZERO, board, tile, 50.0);
//! assert_eq!(pos, Vec2::new(100.0, 100.0));
//!
//! // ...and never leaves the board.
//! let pos = resolve(Vec2::new(290.0, 290.0), GrabOffset::ZERO, board, tile, 50.0);
//! assert_eq!(pos, Vec2::new(250.0, 250.0));
//! ```

pub mod controller;
pub mod event;
pub mod grid;
pub mod hierarchy;
pub mod resolver;
pub mod session;

pub use controller::{DragController, DragOutcome, IgnoreReason};
pub use event::{DragEvent, DragEventBatch, DragEventQueue, EventStats, HandleStatus};
pub use grid::{Grid, SnapRounding};
pub use hierarchy::{
    Capabilities, ContainerHierarchy, DropTarget, ElementNode, ElementTree, HierarchyError,
    HierarchyResult, NodeId, find_drop_container, is_valid_target,
};
pub use resolver::{
    GrabOffset, OutputSpace, PositionResolver, ResolverConfig, begin_grab, resolve,
};
pub use session::{DragPhase, DragSession};
