//! Capabilities the layout engine needs from the editor that hosts it.
//!
//! The engine never owns the cell tree. It reads through [`GraphModel`]
//! and [`GraphHost`] and asks the model to perform every change, so any
//! document implementation (or the in-memory [`MemoryGraph`](crate::MemoryGraph))
//! can be laid out.

use std::fmt::Debug;
use std::hash::Hash;

use glam::DVec2;
use strata_core::{CellStyle, Geometry, ModelError};

/// Tree navigation, geometry storage and batched mutation.
pub trait GraphModel {
    /// Handle to a cell in the document.
    type Cell: Copy + Eq + Hash + Debug;

    /// Whether the handle refers to a live cell.
    fn contains(&self, cell: Self::Cell) -> bool;

    /// Parent of a cell, `None` for roots.
    fn parent(&self, cell: Self::Cell) -> Option<Self::Cell>;

    /// Children of a cell in sibling order.
    fn children(&self, cell: Self::Cell) -> Vec<Self::Cell>;

    fn child_count(&self, cell: Self::Cell) -> usize {
        self.children(cell).len()
    }

    fn index_of(&self, parent: Self::Cell, child: Self::Cell) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    /// Stored geometry of a cell.
    fn geometry(&self, cell: Self::Cell) -> Option<Geometry>;

    /// Whether the cell is a layer (a direct child of the root with no geometry).
    fn is_layer(&self, cell: Self::Cell) -> bool;

    /// Whether the cell is a vertex. Edges are never stacked.
    fn is_vertex(&self, _cell: Self::Cell) -> bool {
        true
    }

    /// Open an update. Updates nest; only the outermost end publishes.
    fn begin_update(&mut self);

    /// Close an update, publishing the changes when it is the outermost one.
    fn end_update(&mut self) -> Result<(), ModelError>;

    /// Close an update whose changes should be discarded.
    ///
    /// Models without rollback support publish whatever was written.
    fn abort_update(&mut self) {
        if let Err(err) = self.end_update() {
            tracing::warn!(%err, "model failed to close aborted update");
        }
    }

    /// Replace the geometry of a cell.
    fn set_geometry(&mut self, cell: Self::Cell, geometry: Geometry) -> Result<(), ModelError>;

    /// Move `child` to `index` among the children of `parent`.
    ///
    /// The index counts siblings after `child` was taken out of the list.
    /// An index past the end of that list is an `InvalidIndex` error.
    fn move_child(
        &mut self,
        parent: Self::Cell,
        child: Self::Cell,
        index: usize,
    ) -> Result<(), ModelError>;
}

/// Style lookup, cell predicates and view metrics.
pub trait GraphHost: GraphModel {
    /// Resolved style of a cell.
    fn style(&self, cell: Self::Cell) -> CellStyle;

    fn is_swimlane(&self, cell: Self::Cell) -> bool {
        self.style(cell).is_swimlane()
    }

    fn is_collapsed(&self, cell: Self::Cell) -> bool;

    fn is_movable(&self, _cell: Self::Cell) -> bool {
        true
    }

    fn is_visible(&self, _cell: Self::Cell) -> bool {
        true
    }

    /// Cells the host explicitly excludes from automatic layout.
    fn is_layout_ignored(&self, _cell: Self::Cell) -> bool {
        false
    }

    /// Current view scale.
    fn scale(&self) -> f64;

    /// On-screen position of a rendered cell, `None` if it has no view state.
    fn screen_origin(&self, cell: Self::Cell) -> Option<DVec2>;

    /// Pixel size of the view's container, `None` when detached.
    fn viewport_size(&self) -> Option<DVec2>;

    /// Cell the view is currently drilled into, if any.
    fn current_root(&self) -> Option<Self::Cell> {
        None
    }
}
