//! Cell grid quantization.

use gridsnap_core::math::Vec2;

/// Tie-breaking rule used when snapping to the nearest cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapRounding {
    /// Ties go towards positive infinity (`floor(v + 0.5)`).
    #[default]
    HalfUp,
    /// Ties go to the even cell index (banker's rounding).
    HalfEven,
}

impl SnapRounding {
    /// Round a cell-space value to a whole cell index.
    #[inline]
    pub fn round(self, v: f32) -> f32 {
        match self {
            SnapRounding::HalfUp => (v + 0.5).floor(),
            SnapRounding::HalfEven => v.round_ties_even(),
        }
    }
}

/// A uniform square grid anchored at the container origin.
///
/// A cell size that is zero, negative or NaN disables the grid, in which
/// case every operation is the identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    cell_size: f32,
    rounding: SnapRounding,
}

impl Default for Grid {
    fn default() -> Self {
        Self::disabled()
    }
}

impl Grid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            rounding: SnapRounding::default(),
        }
    }

    /// A grid that never snaps.
    pub fn disabled() -> Self {
        Self::new(0.0)
    }

    pub fn with_rounding(mut self, rounding: SnapRounding) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn rounding(&self) -> SnapRounding {
        self.rounding
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.cell_size > 0.0
    }

    /// Snap to the nearest multiple of the cell size.
    #[inline]
    pub fn snap(&self, v: f32) -> f32 {
        if !self.is_enabled() {
            return v;
        }
        self.rounding.round(v / self.cell_size) * self.cell_size
    }

    pub fn snap_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(self.snap(p.x), self.snap(p.y))
    }

    /// Snap down to the nearest lower multiple of the cell size.
    #[inline]
    pub fn floor(&self, v: f32) -> f32 {
        if !self.is_enabled() {
            return v;
        }
        let floored = (v / self.cell_size).floor() * self.cell_size;
        // The quotient can round up onto the next whole cell.
        if floored > v {
            floored - self.cell_size
        } else {
            floored
        }
    }

    /// Whether `v` sits exactly on a cell boundary. Always true when disabled.
    pub fn is_aligned(&self, v: f32) -> bool {
        !self.is_enabled() || v % self.cell_size == 0.0
    }
}
