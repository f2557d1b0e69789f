//! Rectangle geometry and stacking orientation.

use glam::DVec2;

/// Axis-aligned rectangle in model units.
///
/// Geometries are plain values: layout code clones the stored geometry,
/// edits the copy, and hands the copy back to the model.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    /// Position relative to the parent container
    pub x: f64,
    pub y: f64,
    /// Size of the cell
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    /// Create a geometry with position and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Get position as a vector.
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Get the right edge (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Get the center X coordinate.
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Get the center Y coordinate.
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Direction in which a stack arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Children run left to right
    #[default]
    Horizontal,
    /// Children run top to bottom
    Vertical,
}

impl Orientation {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Orientation::Horizontal)
    }

    /// Leading coordinate along the stack axis.
    pub fn main(self, geo: &Geometry) -> f64 {
        match self {
            Orientation::Horizontal => geo.x,
            Orientation::Vertical => geo.y,
        }
    }

    /// Extent along the stack axis.
    pub fn main_size(self, geo: &Geometry) -> f64 {
        match self {
            Orientation::Horizontal => geo.width,
            Orientation::Vertical => geo.height,
        }
    }

    /// Extent along the cross axis.
    pub fn cross_size(self, geo: &Geometry) -> f64 {
        match self {
            Orientation::Horizontal => geo.height,
            Orientation::Vertical => geo.width,
        }
    }

    /// Trailing edge along the stack axis.
    pub fn main_end(self, geo: &Geometry) -> f64 {
        self.main(geo) + self.main_size(geo)
    }

    /// Center along the stack axis.
    pub fn main_center(self, geo: &Geometry) -> f64 {
        match self {
            Orientation::Horizontal => geo.center_x(),
            Orientation::Vertical => geo.center_y(),
        }
    }

    /// Pick the component of a point that lies on the stack axis.
    pub fn pick(self, point: DVec2) -> f64 {
        match self {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        }
    }

    pub fn set_main(self, geo: &mut Geometry, value: f64) {
        match self {
            Orientation::Horizontal => geo.x = value,
            Orientation::Vertical => geo.y = value,
        }
    }

    pub fn set_cross(self, geo: &mut Geometry, value: f64) {
        match self {
            Orientation::Horizontal => geo.y = value,
            Orientation::Vertical => geo.x = value,
        }
    }

    pub fn set_main_size(self, geo: &mut Geometry, value: f64) {
        match self {
            Orientation::Horizontal => geo.width = value,
            Orientation::Vertical => geo.height = value,
        }
    }

    pub fn set_cross_size(self, geo: &mut Geometry, value: f64) {
        match self {
            Orientation::Horizontal => geo.height = value,
            Orientation::Vertical => geo.width = value,
        }
    }
}
