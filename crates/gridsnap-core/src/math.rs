/// Vector math backed by the SIMD-accelerated [`glam`] crate.
///
/// Positions, pointer coordinates and offsets are all [`Vec2`]s in pixel
/// space.
///
/// # Examples
///
/// ```
/// use gridsnap_core::math::Vec2;
///
/// let pointer = Vec2::new(83.0, 91.0);
/// let grab_offset = Vec2::new(-3.0, -1.0);
/// assert_eq!(pointer + grab_offset, Vec2::new(80.0, 90.0));
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::*;
}

pub use fast::*;
