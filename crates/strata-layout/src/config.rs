//! Stack layout configuration.

use strata_core::Orientation;

/// Margins on all sides of the container's content area.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    /// Create symmetric margins.
    pub fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Total horizontal margin.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Total vertical margin.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Margin before the first child along the stack axis.
    pub fn leading(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.left,
            Orientation::Vertical => self.top,
        }
    }
}

/// Tunables of a stack layout.
///
/// The configuration is read-only while a pass runs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct LayoutConfig {
    /// Stack direction
    pub orientation: Orientation,
    /// Gap between neighbouring children
    pub spacing: f64,
    /// Origin of the first child, before border and margins
    pub x0: f64,
    pub y0: f64,
    /// Border inset applied on every side
    pub border: f64,
    pub margins: Margins,
    /// Leave the first child's stack-axis coordinate untouched
    pub keep_first_location: bool,
    /// Stretch children across the cross axis
    pub fill: bool,
    /// Resize the container to fit the stack
    pub resize_parent: bool,
    /// When resizing the container, only grow it
    pub resize_parent_max: bool,
    /// Stretch the last child up to the container's far edge
    pub resize_last: bool,
    /// Line length after which children wrap into a new line
    pub wrap: Option<f64>,
    /// Ignore child stroke widths when spacing children
    pub border_collapse: bool,
    /// Keep gaps the user left between children
    pub allow_gaps: bool,
    /// Grid unit for snapping, disabled when not positive
    pub grid_size: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Horizontal,
            spacing: 0.0,
            x0: 0.0,
            y0: 0.0,
            border: 0.0,
            margins: Margins::default(),
            keep_first_location: false,
            fill: false,
            resize_parent: false,
            resize_parent_max: false,
            resize_last: false,
            wrap: None,
            border_collapse: false,
            allow_gaps: false,
            grid_size: 0.0,
        }
    }
}

impl LayoutConfig {
    /// Create a horizontal stack configuration.
    pub fn horizontal() -> Self {
        Self::default()
    }

    /// Create a vertical stack configuration.
    pub fn vertical() -> Self {
        Self {
            orientation: Orientation::Vertical,
            ..Default::default()
        }
    }

    pub fn is_horizontal(&self) -> bool {
        self.orientation.is_horizontal()
    }

    /// Wrap threshold, if wrapping is active.
    pub fn wrap_threshold(&self) -> Option<f64> {
        self.wrap.filter(|w| *w > 0.0)
    }

    /// Set the spacing between children.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the origin.
    pub fn with_origin(mut self, x0: f64, y0: f64) -> Self {
        self.x0 = x0;
        self.y0 = y0;
        self
    }

    pub fn with_border(mut self, border: f64) -> Self {
        self.border = border;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_keep_first_location(mut self, keep: bool) -> Self {
        self.keep_first_location = keep;
        self
    }

    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_resize_parent(mut self, resize: bool) -> Self {
        self.resize_parent = resize;
        self
    }

    pub fn with_resize_parent_max(mut self, grow_only: bool) -> Self {
        self.resize_parent_max = grow_only;
        self
    }

    pub fn with_resize_last(mut self, resize: bool) -> Self {
        self.resize_last = resize;
        self
    }

    /// Enable wrapping at the given line length.
    pub fn with_wrap(mut self, wrap: f64) -> Self {
        self.wrap = Some(wrap);
        self
    }

    pub fn with_border_collapse(mut self, collapse: bool) -> Self {
        self.border_collapse = collapse;
        self
    }

    pub fn with_allow_gaps(mut self, allow: bool) -> Self {
        self.allow_gaps = allow;
        self
    }

    pub fn with_grid_size(mut self, grid_size: f64) -> Self {
        self.grid_size = grid_size;
        self
    }
}

#[cfg(feature = "serde")]
mod json {
    use super::LayoutConfig;
    use thiserror::Error;

    /// Errors while loading a layout configuration.
    #[derive(Debug, Error)]
    pub enum ConfigError {
        #[error("Invalid layout configuration: {0}")]
        Json(#[from] serde_json::Error),
    }

    impl LayoutConfig {
        /// Load a configuration from JSON. Missing fields take their defaults.
        pub fn from_json(input: &str) -> Result<Self, ConfigError> {
            Ok(serde_json::from_str(input)?)
        }
    }
}

#[cfg(feature = "serde")]
pub use json::ConfigError;
