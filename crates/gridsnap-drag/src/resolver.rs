//! Position resolution: pointer motion to a clamped, grid-aligned position.
//!
//! Resolution runs in five steps:
//!
//! 1. `raw = pointer + grab_offset - container.position()` (container-local).
//! 2. Snap `raw` to the nearest cell when the cell size is positive.
//! 3. Clamp each axis below at `0`.
//! 4. If the element overflows the far edge, place it at
//!    `container.size - element_size` and floor that to a cell boundary so
//!    the element never straddles a cell at the edge. An axis on which the
//!    element is larger than the container pins to `0`.
//! 5. Convert to the configured [`OutputSpace`].
//!
//! The resolver is total: it never fails and never panics. Negative sizes
//! are treated as zero and NaN inputs come out as NaN components.

use gridsnap_core::geometry::{Point, Rect, Size};
use gridsnap_core::math::Vec2;
use gridsnap_core::profiling::profile_function;

use crate::grid::{Grid, SnapRounding};

/// Vector from the pointer to the element's top-left corner, captured once
/// when a drag gesture begins.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GrabOffset(pub Vec2);

impl GrabOffset {
    pub const ZERO: Self = GrabOffset(Vec2::ZERO);

    pub fn new(x: f32, y: f32) -> Self {
        GrabOffset(Vec2::new(x, y))
    }

    pub fn vector(self) -> Vec2 {
        self.0
    }

    /// Where the element's top-left corner goes for the given pointer.
    #[inline]
    pub fn apply(self, pointer: Point) -> Point {
        pointer + self.0
    }
}

/// Capture the grab offset for a new gesture.
///
/// `element_rect` and `pointer` must be in the same coordinate space.
pub fn begin_grab(element_rect: Rect, pointer: Point) -> GrabOffset {
    GrabOffset(element_rect.position() - pointer)
}

/// Coordinate space of a resolved position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputSpace {
    /// Relative to the container's top-left corner.
    #[default]
    ContainerLocal,
    /// Same space as the pointer and container rect.
    Absolute,
}

/// Resolver settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolverConfig {
    /// Cell size used when a container does not provide its own.
    /// `0.0` disables snapping.
    pub default_cell_size: f32,
    pub rounding: SnapRounding,
    pub output_space: OutputSpace,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_cell_size: 0.0,
            rounding: SnapRounding::HalfUp,
            output_space: OutputSpace::ContainerLocal,
        }
    }
}

impl ResolverConfig {
    pub fn with_default_cell_size(mut self, cell_size: f32) -> Self {
        self.default_cell_size = cell_size;
        self
    }

    pub fn with_rounding(mut self, rounding: SnapRounding) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_output_space(mut self, output_space: OutputSpace) -> Self {
        self.output_space = output_space;
        self
    }
}

/// Stateless position resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionResolver {
    config: ResolverConfig,
}

impl PositionResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Grid for a container, falling back to the configured default cell size.
    pub fn grid_for(&self, cell_size: Option<f32>) -> Grid {
        Grid::new(cell_size.unwrap_or(self.config.default_cell_size))
            .with_rounding(self.config.rounding)
    }

    /// Resolve the element's new top-left corner.
    ///
    /// `pointer` and `container` share a coordinate space. The result is in
    /// the configured [`OutputSpace`].
    pub fn resolve(
        &self,
        pointer: Point,
        grab_offset: GrabOffset,
        container: Rect,
        element_size: Size<f32>,
        cell_size: f32,
    ) -> Point {
        let grid = self.grid_for(Some(cell_size));
        self.resolve_on_grid(pointer, grab_offset, container, element_size, &grid)
    }

    /// Same as [`resolve`](Self::resolve) with a prepared grid, usually one
    /// from [`grid_for`](Self::grid_for).
    pub fn resolve_on_grid(
        &self,
        pointer: Point,
        grab_offset: GrabOffset,
        container: Rect,
        element_size: Size<f32>,
        grid: &Grid,
    ) -> Point {
        profile_function!();
        let container = container.normalized();
        let element = element_size.normalized();

        let raw = grab_offset.apply(pointer) - container.position();
        let snapped = grid.snap_point(raw);
        let local = Vec2::new(
            clamp_axis(snapped.x, element.width, container.width, grid),
            clamp_axis(snapped.y, element.height, container.height, grid),
        );

        match self.config.output_space {
            OutputSpace::ContainerLocal => local,
            OutputSpace::Absolute => local + container.position(),
        }
    }
}

/// Clamp one axis into `[0, bound - extent]`, flooring the far edge to the grid.
fn clamp_axis(v: f32, extent: f32, bound: f32, grid: &Grid) -> f32 {
    // Ordered comparisons keep NaN flowing through untouched.
    let v = if v < 0.0 { 0.0 } else { v };
    let max = far_limit(extent, bound);
    if v > max {
        if extent > bound {
            return 0.0;
        }
        return grid.floor(max);
    }
    v
}

/// Largest start coordinate that keeps `start + extent <= bound` in f32.
fn far_limit(extent: f32, bound: f32) -> f32 {
    let mut max = bound - extent;
    while max > 0.0 && max + extent > bound {
        max = max.next_down();
    }
    max
}

/// Resolve with the default configuration (half-up rounding, container-local output).
pub fn resolve(
    pointer: Point,
    grab_offset: GrabOffset,
    container: Rect,
    element_size: Size<f32>,
    cell_size: f32,
) -> Point {
    PositionResolver::default().resolve(pointer, grab_offset, container, element_size, cell_size)
}
