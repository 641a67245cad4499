//! Resolver invariants checked over sweeps of pointer positions.
//!
//! These tests cover the clamping and grid-alignment guarantees, purity,
//! and the no-jump behavior right after a grab.

use gridsnap_core::geometry::{Rect, Size};
use gridsnap_core::math::Vec2;
use gridsnap_drag::{
    ElementTree, GrabOffset, Grid, PositionResolver, ResolverConfig, SnapRounding, begin_grab,
    is_valid_target, resolve,
};

/// Pointer positions from well outside to well past the container.
fn pointer_sweep() -> impl Iterator<Item = Vec2> {
    (-8..=40).flat_map(|i| (-8..=40).map(move |j| Vec2::new(i as f32 * 9.5, j as f32 * 8.25)))
}

#[test]
fn test_scenario_snap_inside_bounds() {
    let pos = resolve(
        Vec2::new(83.0, 91.0),
        GrabOffset::ZERO,
        Rect::new(0.0, 0.0, 300.0, 300.0),
        Size::new(50.0, 50.0),
        50.0,
    );
    assert_eq!(pos, Vec2::new(100.0, 100.0));
}

#[test]
fn test_scenario_overflow_both_axes() {
    let pos = resolve(
        Vec2::new(290.0, 290.0),
        GrabOffset::ZERO,
        Rect::new(0.0, 0.0, 300.0, 300.0),
        Size::new(50.0, 50.0),
        50.0,
    );
    assert_eq!(pos, Vec2::new(250.0, 250.0));
}

#[test]
fn test_scenario_snapping_disabled() {
    let pos = resolve(
        Vec2::new(-10.0, 5.0),
        GrabOffset::ZERO,
        Rect::new(0.0, 0.0, 300.0, 300.0),
        Size::new(50.0, 50.0),
        0.0,
    );
    assert_eq!(pos, Vec2::new(0.0, 5.0));
}

#[test]
fn test_scenario_no_container_under_pointer() {
    let mut tree = ElementTree::new();
    tree.insert_draggable(Rect::new(0.0, 0.0, 50.0, 50.0));
    assert!(is_valid_target(Vec2::new(10.0, 10.0), &tree).is_none());
}

#[test]
fn test_clamping_invariant() {
    let container = Rect::new(0.0, 0.0, 300.0, 220.0);
    let element = Size::new(50.0, 40.0);

    for cell in [0.0, 10.0, 25.0, 50.0, 70.0] {
        for pointer in pointer_sweep() {
            let pos = resolve(pointer, GrabOffset::new(-5.0, -7.0), container, element, cell);
            assert!(
                pos.x >= 0.0 && pos.x <= container.width - element.width,
                "x out of range: {pos:?} for {pointer:?}, cell {cell}"
            );
            assert!(
                pos.y >= 0.0 && pos.y <= container.height - element.height,
                "y out of range: {pos:?} for {pointer:?}, cell {cell}"
            );
        }
    }
}

#[test]
fn test_grid_alignment_invariant() {
    // Bounds chosen so the far edge is not a cell multiple.
    let container = Rect::new(0.0, 0.0, 310.0, 275.0);
    let element = Size::new(50.0, 30.0);

    for rounding in [SnapRounding::HalfUp, SnapRounding::HalfEven] {
        let resolver = PositionResolver::new(ResolverConfig::default().with_rounding(rounding));
        for cell in [10.0, 25.0, 50.0, 70.0] {
            let grid = Grid::new(cell);
            for pointer in pointer_sweep() {
                let pos = resolver.resolve(pointer, GrabOffset::ZERO, container, element, cell);
                assert!(
                    grid.is_aligned(pos.x) && grid.is_aligned(pos.y),
                    "{pos:?} not aligned to {cell} for {pointer:?}"
                );
            }
        }
    }
}

const FRACTIONAL_WIDTHS: [f32; 4] = [300.3, 299.7, 1000.1, 777.77];
const FRACTIONAL_ELEMENTS: [f32; 3] = [50.1, 33.3, 12.34];

/// Pointer x positions from just inside the far edge to well past it.
fn far_edge_sweep(width: f32) -> impl Iterator<Item = f32> {
    (0..600).map(move |i| width - 80.0 + i as f32 * 0.73)
}

#[test]
fn test_clamping_invariant_fractional_sizes() {
    for width in FRACTIONAL_WIDTHS {
        for element_width in FRACTIONAL_ELEMENTS {
            let container = Rect::new(0.0, 0.0, width, 100.0);
            let element = Size::new(element_width, 10.0);
            let limit = container.width - element.width;

            for cell in [0.0, 12.5, 7.5, 0.1] {
                for x in far_edge_sweep(width) {
                    let pointer = Vec2::new(x, 20.0);
                    let pos = resolve(pointer, GrabOffset::ZERO, container, element, cell);
                    assert!(
                        pos.x >= 0.0 && pos.x <= limit,
                        "x {} outside [0, {limit}] for pointer {x}, cell {cell}",
                        pos.x
                    );
                    assert!(
                        pos.x + element.width <= container.width,
                        "element sticks out: {} + {element_width} > {width}, cell {cell}",
                        pos.x
                    );
                }
            }
        }
    }
}

#[test]
fn test_position_is_constant_past_far_edge() {
    for width in FRACTIONAL_WIDTHS {
        for element_width in FRACTIONAL_ELEMENTS {
            let container = Rect::new(0.0, 0.0, width, 100.0);
            let element = Size::new(element_width, 10.0);
            let limit = container.width - element.width;

            for cell in [0.0, 12.5, 7.5] {
                // Past this point even the snapped value lies beyond the edge.
                let edge = limit + cell + 1.0;
                let mut resolved = far_edge_sweep(width).filter(|&x| x > edge).map(|x| {
                    let pointer = Vec2::new(x, 0.0);
                    resolve(pointer, GrabOffset::ZERO, container, element, cell).x
                });

                let Some(first) = resolved.next() else {
                    continue;
                };
                for x in resolved {
                    assert_eq!(
                        x, first,
                        "jitter at far edge: {width}/{element_width}, cell {cell}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_far_edge_keeps_every_whole_cell() {
    for width in FRACTIONAL_WIDTHS {
        for element_width in FRACTIONAL_ELEMENTS {
            let container = Rect::new(0.0, 0.0, width, 100.0);
            let element = Size::new(element_width, 10.0);
            let pos = resolve(
                Vec2::new(width + 500.0, 0.0),
                GrabOffset::ZERO,
                container,
                element,
                12.5,
            );
            // No room left for one more cell.
            assert!(pos.x + 12.5 + element.width > container.width);
            assert!(Grid::new(12.5).is_aligned(pos.x));
        }
    }
}

#[test]
fn test_grid_alignment_with_fractional_cells() {
    let container = Rect::new(0.0, 0.0, 537.3, 299.7);
    let element = Size::new(37.3, 33.3);

    for rounding in [SnapRounding::HalfUp, SnapRounding::HalfEven] {
        let resolver = PositionResolver::new(ResolverConfig::default().with_rounding(rounding));
        for cell in [12.5, 7.5] {
            let grid = Grid::new(cell);
            for pointer in pointer_sweep().map(|p| p * 1.7) {
                let pos = resolver.resolve(pointer, GrabOffset::ZERO, container, element, cell);
                assert!(
                    grid.is_aligned(pos.x) && grid.is_aligned(pos.y),
                    "{pos:?} not aligned to {cell} for {pointer:?}"
                );
                assert!(pos.x + element.width <= container.width);
                assert!(pos.y + element.height <= container.height);
            }
        }
    }
}

#[test]
fn test_resolve_is_pure() {
    let container = Rect::new(20.0, 30.0, 300.0, 300.0);
    let element = Size::new(50.0, 50.0);
    for pointer in pointer_sweep() {
        let a = resolve(pointer, GrabOffset::new(-3.0, -4.0), container, element, 25.0);
        let b = resolve(pointer, GrabOffset::new(-3.0, -4.0), container, element, 25.0);
        assert_eq!(a, b);
    }
}

#[test]
fn test_offset_preservation_after_grab() {
    let container = Rect::new(0.0, 0.0, 400.0, 400.0);
    for (ex, ey) in [(0.0, 0.0), (37.0, 12.5), (150.0, 349.0), (350.0, 350.0)] {
        let element = Rect::new(ex, ey, 50.0, 50.0);
        for pointer in [Vec2::new(ex + 1.0, ey + 1.0), Vec2::new(ex + 25.0, ey + 49.0)] {
            let offset = begin_grab(element, pointer);
            let pos = resolve(pointer, offset, container, element.size(), 0.0);
            assert_eq!(pos, element.position());
        }
    }
}

#[test]
fn test_offset_preservation_on_aligned_grid() {
    let container = Rect::new(0.0, 0.0, 400.0, 400.0);
    let element = Rect::new(100.0, 150.0, 50.0, 50.0);
    let pointer = Vec2::new(117.0, 181.0);
    let offset = begin_grab(element, pointer);
    let pos = resolve(pointer, offset, container, element.size(), 50.0);
    assert_eq!(pos, element.position());
}

#[test]
fn test_oversized_element_pins_to_origin() {
    let container = Rect::new(0.0, 0.0, 100.0, 100.0);
    let element = Size::new(150.0, 150.0);
    for pointer in pointer_sweep() {
        assert_eq!(resolve(pointer, GrabOffset::ZERO, container, element, 10.0), Vec2::ZERO);
    }
}
