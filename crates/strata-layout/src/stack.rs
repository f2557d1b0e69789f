//! Stack layout: arranges a container's children in a row or column.
//!
//! [`StackLayout::execute`] places every layout child of a container one
//! after another along the stack axis, wrapping into new lines, filling the
//! cross axis and resizing the container or its last child as configured.
//! [`StackLayout::move_cell`] reorders a dragged child among its siblings.

use glam::DVec2;
use strata_core::{Geometry, LayoutError, Orientation};
use tracing::{debug, debug_span, trace};

use crate::batch::EditBatch;
use crate::commit::{set_child_geometry, update_parent_geometry};
use crate::config::LayoutConfig;
use crate::host::GraphHost;
use crate::selection::layout_cells;
use crate::snap::snap;

/// Stack layout over a configurable axis.
#[derive(Debug, Clone, Default)]
pub struct StackLayout {
    pub config: LayoutConfig,
}

/// Content frame of a container: where the first line starts and how far
/// children may stretch across the stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    origin: DVec2,
    fill: Option<f64>,
}

/// Running state while children are placed.
#[derive(Debug, Clone)]
struct LineState<C> {
    /// Origin of the current line
    origin: DVec2,
    /// Largest cross-axis size in the current line
    extent: f64,
    /// Geometry of the previous child in the current line
    last: Option<Geometry>,
    /// Trailing edge of the previous child plus half its stroke
    last_value: f64,
    /// New geometry of every placed child, in stack order
    placed: Vec<(C, Geometry)>,
}

impl<C> LineState<C> {
    fn new(origin: DVec2) -> Self {
        Self {
            origin,
            extent: 0.0,
            last: None,
            last_value: 0.0,
            placed: Vec::new(),
        }
    }
}

impl StackLayout {
    /// Create a stack layout with the given configuration.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Create a horizontal stack layout.
    pub fn horizontal() -> Self {
        Self::new(LayoutConfig::horizontal())
    }

    /// Create a vertical stack layout.
    pub fn vertical() -> Self {
        Self::new(LayoutConfig::vertical())
    }

    /// Snap a coordinate or length to the configured grid.
    pub fn snap(&self, value: f64) -> f64 {
        snap(value, self.config.grid_size)
    }

    /// Lay out the children of `parent`.
    ///
    /// Unknown containers are ignored. All writes of the pass are grouped in
    /// one model update; a model error aborts the update and is returned.
    pub fn execute<H: GraphHost + ?Sized>(
        &self,
        host: &mut H,
        parent: H::Cell,
    ) -> Result<(), LayoutError> {
        if !host.contains(parent) {
            return Ok(());
        }

        let span = debug_span!("stack_layout", ?parent, orientation = ?self.config.orientation);
        let _enter = span.enter();

        let parent_geo = parent_size(&*host, parent);
        let frame = self.frame(&*host, parent, parent_geo.as_ref());

        let mut batch = EditBatch::begin(host);
        let cells = layout_cells(&*batch, parent, &self.config);

        let mut state = cells
            .into_iter()
            .fold(LineState::new(frame.origin), |state, child| {
                self.place_child(&*batch, child, state, frame.fill)
            });

        let resize_parent = match (parent_geo, state.last) {
            (Some(parent_geo), Some(last))
                if self.config.resize_parent && !batch.is_collapsed(parent) =>
            {
                Some((parent_geo, last))
            }
            _ => None,
        };

        if resize_parent.is_none() && self.config.resize_last {
            if let (Some(parent_geo), Some((last_child, last))) =
                (parent_geo, state.placed.last_mut())
            {
                debug!(?last_child, "stretching last child");
                *last = self.stretch_last(&parent_geo, *last);
            }
        }

        for (child, geometry) in state.placed {
            set_child_geometry(&mut *batch, child, geometry)?;
        }

        if let Some((parent_geo, last)) = resize_parent {
            debug!(?parent, "resizing container to fit stack");
            update_parent_geometry(&mut *batch, parent, &parent_geo, &last, &self.config)?;
        }

        batch.commit()?;
        Ok(())
    }

    /// Move a dragged child to the sibling slot under `(x, y)`.
    ///
    /// The point is in screen coordinates. Only the sibling order changes.
    /// Unknown cells and cells without a parent are ignored.
    pub fn move_cell<H: GraphHost + ?Sized>(
        &self,
        host: &mut H,
        cell: H::Cell,
        x: f64,
        y: f64,
    ) -> Result<(), LayoutError> {
        if !host.contains(cell) {
            return Ok(());
        }
        let Some(parent) = host.parent(cell) else {
            return Ok(());
        };

        let orientation = self.config.orientation;
        let mut value = orientation.pick(DVec2::new(x, y));
        if let Some(origin) = host.screen_origin(parent) {
            value -= orientation.pick(origin);
        }
        let scale = host.scale();
        if scale > 0.0 {
            value /= scale;
        }

        let siblings = host.children(parent);
        let Some(current) = siblings.iter().position(|&c| c == cell) else {
            return Ok(());
        };

        let slot = insertion_slot(&*host, &siblings, cell, orientation, value);
        let index = if slot > current { slot - 1 } else { slot };
        if index == current {
            trace!(?cell, index, "drag target is the current slot");
            return Ok(());
        }

        debug!(?cell, from = current, to = index, "reordering child");
        let mut batch = EditBatch::begin(host);
        batch.move_child(parent, cell, index)?;
        batch.commit()?;
        Ok(())
    }

    /// Content origin and cross-axis fill of `parent`.
    ///
    /// A swimlane header shifts the origin along the header's own axis,
    /// whatever the stack orientation: down for a horizontal header, right
    /// for a vertical one.
    fn frame<H: GraphHost + ?Sized>(
        &self,
        host: &H,
        parent: H::Cell,
        parent_geo: Option<&Geometry>,
    ) -> Frame {
        let config = &self.config;
        let horizontal = config.is_horizontal();

        let mut fill = parent_geo.map(|p| {
            let available = if horizontal {
                p.height - config.margins.vertical()
            } else {
                p.width - config.margins.horizontal()
            };
            available - 2.0 * config.border
        });

        let mut origin = DVec2::new(
            config.x0 + config.border + config.margins.left,
            config.y0 + config.border + config.margins.top,
        );

        if host.is_swimlane(parent) {
            let style = host.style(parent);
            let header_horizontal = style.is_horizontal();
            let mut start = style.start_size();

            if let Some(p) = parent_geo {
                start = start.min(if header_horizontal { p.height } else { p.width });
            }

            if horizontal == header_horizontal {
                fill = fill.map(|f| f - start);
            }

            if header_horizontal {
                origin.y += start;
            } else {
                origin.x += start;
            }
        }

        Frame { origin, fill }
    }

    /// Compute the new geometry of one child and advance the line state.
    fn place_child<H: GraphHost + ?Sized>(
        &self,
        host: &H,
        child: H::Cell,
        mut state: LineState<H::Cell>,
        fill: Option<f64>,
    ) -> LineState<H::Cell> {
        let Some(mut geo) = host.geometry(child) else {
            trace!(?child, "skipping child without geometry");
            return state;
        };

        let config = &self.config;
        let orientation = config.orientation;
        let horizontal = orientation.is_horizontal();

        if let (Some(wrap), Some(last)) = (config.wrap_threshold(), state.last) {
            let line_end =
                orientation.main_end(&last) + orientation.main_size(&geo) + 2.0 * config.spacing;
            if line_end > wrap {
                debug!(?child, line_end, wrap, "wrapping to a new line");
                let advance = state.extent + config.spacing;
                if horizontal {
                    state.origin.y += advance;
                } else {
                    state.origin.x += advance;
                }
                state.extent = 0.0;
                state.last = None;
            }
        }

        state.extent = state.extent.max(orientation.cross_size(&geo));

        let stroke = if config.border_collapse {
            0.0
        } else {
            host.style(child).stroke_width()
        };
        let half_stroke = (stroke / 2.0).floor();
        let line_start = orientation.pick(state.origin);

        if state.last.is_some() {
            let next = state.last_value + config.spacing + half_stroke;
            let position = if config.allow_gaps {
                next.max(orientation.main(&geo))
            } else {
                next
            };
            orientation.set_main(&mut geo, position);
        } else if !config.keep_first_location {
            let existing = orientation.main(&geo);
            let position = if config.allow_gaps && existing > line_start {
                let margin = config.margins.leading(orientation);
                (self.snap(existing - margin) + margin).max(line_start)
            } else {
                line_start
            };
            orientation.set_main(&mut geo, position);
        }

        let cross_start = match orientation {
            Orientation::Horizontal => state.origin.y,
            Orientation::Vertical => state.origin.x,
        };
        orientation.set_cross(&mut geo, cross_start);

        if config.fill {
            if let Some(fill) = fill {
                orientation.set_cross_size(&mut geo, fill);
            }
        }

        let size = self.snap(orientation.main_size(&geo));
        orientation.set_main_size(&mut geo, size);

        trace!(?child, ?geo, "placed child");
        state.last = Some(geo);
        state.last_value = orientation.main_end(&geo) + half_stroke;
        state.placed.push((child, geo));
        state
    }

    fn stretch_last(&self, parent_geo: &Geometry, mut last: Geometry) -> Geometry {
        let config = &self.config;
        match config.orientation {
            Orientation::Horizontal => {
                last.width = parent_geo.width
                    - last.x
                    - config.spacing
                    - config.margins.right
                    - config.margins.left;
            }
            Orientation::Vertical => {
                last.height =
                    parent_geo.height - last.y - config.spacing - config.margins.bottom;
            }
        }
        last
    }
}

/// Size of the container the children are laid out in.
///
/// Layers without geometry and the view's current root use the viewport,
/// less one pixel on each axis.
pub fn parent_size<H: GraphHost + ?Sized>(host: &H, parent: H::Cell) -> Option<Geometry> {
    let geo = host.geometry(parent);
    let use_viewport =
        (geo.is_none() && host.is_layer(parent)) || host.current_root() == Some(parent);

    if use_viewport {
        if let Some(size) = host.viewport_size() {
            return Some(Geometry::new(0.0, 0.0, size.x - 1.0, size.y - 1.0));
        }
    }

    geo
}

/// Index, in the current sibling list, before which `value` falls.
fn insertion_slot<H: GraphHost + ?Sized>(
    host: &H,
    siblings: &[H::Cell],
    cell: H::Cell,
    orientation: Orientation,
    value: f64,
) -> usize {
    let mut last = 0.0;

    for (i, &sibling) in siblings.iter().enumerate() {
        if sibling == cell {
            continue;
        }
        let Some(geo) = host.geometry(sibling) else {
            continue;
        };

        let center = orientation.main_center(&geo);
        if last <= value && center > value {
            return i;
        }
        last = center;
    }

    siblings.len()
}
