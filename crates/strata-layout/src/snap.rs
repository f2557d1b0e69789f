//! Grid snapping and geometry comparison.

use strata_core::Geometry;

/// Round `value` to the nearest multiple of `grid_size`, never below one unit.
///
/// A remainder of exactly half a unit rounds up. A non-positive (or NaN)
/// grid size disables snapping.
pub fn snap(value: f64, grid_size: f64) -> f64 {
    if !(grid_size > 0.0) {
        return value;
    }

    let value = value.max(grid_size);
    if value / grid_size > 1.0 {
        let rem = value % grid_size;
        if rem >= grid_size / 2.0 {
            value + (grid_size - rem)
        } else {
            value - rem
        }
    } else {
        value
    }
}

/// Whether two geometries differ in any field.
pub fn geometry_changed(current: Option<&Geometry>, next: &Geometry) -> bool {
    match current {
        None => true,
        Some(current) => {
            current.x != next.x
                || current.y != next.y
                || current.width != next.width
                || current.height != next.height
        }
    }
}
