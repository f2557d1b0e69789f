//! In-memory document model.
//!
//! [`MemoryGraph`] implements both host traits over a plain cell arena.
//! Hosts without their own document tree can lay out cells with it, and it
//! records every published edit so callers can see exactly what a pass
//! changed.

use std::collections::HashMap;

use glam::DVec2;
use smallvec::SmallVec;
use strata_core::{CellStyle, Geometry, ModelError};

use crate::host::{GraphHost, GraphModel};

/// Unique identifier for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u64);

/// A cell stored in a [`MemoryGraph`].
#[derive(Debug, Clone)]
pub struct MemoryCell {
    /// Geometry relative to the parent, `None` for layers and edges
    pub geometry: Option<Geometry>,
    pub style: CellStyle,
    /// Parent cell ID (None for roots)
    pub parent: Option<CellId>,
    /// Child cell IDs in sibling order
    pub children: SmallVec<[CellId; 8]>,
    pub layer: bool,
    pub edge: bool,
    pub collapsed: bool,
    pub movable: bool,
    pub visible: bool,
    /// Excluded from automatic layout
    pub layout_ignored: bool,
}

impl Default for MemoryCell {
    fn default() -> Self {
        Self {
            geometry: None,
            style: CellStyle::default(),
            parent: None,
            children: SmallVec::new(),
            layer: false,
            edge: false,
            collapsed: false,
            movable: true,
            visible: true,
            layout_ignored: false,
        }
    }
}

impl MemoryCell {
    /// Create a vertex with the given geometry.
    pub fn vertex(geometry: Geometry) -> Self {
        Self {
            geometry: Some(geometry),
            ..Default::default()
        }
    }

    /// Create a layer cell without geometry.
    pub fn layer() -> Self {
        Self {
            layer: true,
            ..Default::default()
        }
    }

    /// Create an edge cell.
    pub fn edge() -> Self {
        Self {
            edge: true,
            ..Default::default()
        }
    }

    /// Set the style.
    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn with_movable(mut self, movable: bool) -> Self {
        self.movable = movable;
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_layout_ignored(mut self, ignored: bool) -> Self {
        self.layout_ignored = ignored;
        self
    }
}

/// A published change.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Geometry {
        cell: CellId,
        previous: Option<Geometry>,
        geometry: Geometry,
    },
    Order {
        parent: CellId,
        child: CellId,
        index: usize,
    },
}

#[derive(Debug, Clone)]
struct Snapshot {
    cells: HashMap<CellId, MemoryCell>,
    roots: Vec<CellId>,
}

/// Cell tree with view metrics and transactional edits.
#[derive(Debug, Clone)]
pub struct MemoryGraph {
    cells: HashMap<CellId, MemoryCell>,
    roots: Vec<CellId>,
    next_id: u64,
    scale: f64,
    translate: DVec2,
    viewport: Option<DVec2>,
    current_root: Option<CellId>,
    depth: usize,
    snapshot: Option<Snapshot>,
    pending: Vec<Edit>,
    edits: Vec<Edit>,
    committed_batches: usize,
    reject_next_commit: Option<String>,
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGraph {
    /// Create an empty graph at scale 1 with no viewport.
    pub fn new() -> Self {
        Self {
            cells: HashMap::new(),
            roots: Vec::new(),
            next_id: 0,
            scale: 1.0,
            translate: DVec2::ZERO,
            viewport: None,
            current_root: None,
            depth: 0,
            snapshot: None,
            pending: Vec::new(),
            edits: Vec::new(),
            committed_batches: 0,
            reject_next_commit: None,
        }
    }

    fn next_id(&mut self) -> CellId {
        let id = CellId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert a cell under `parent`, or as a root when `parent` is `None`.
    ///
    /// Setup calls are not journaled.
    pub fn add_cell(&mut self, parent: Option<CellId>, mut cell: MemoryCell) -> CellId {
        let id = self.next_id();
        cell.parent = parent;
        cell.children.clear();

        match parent {
            Some(parent_id) => {
                if let Some(parent) = self.cells.get_mut(&parent_id) {
                    parent.children.push(id);
                }
            }
            None => self.roots.push(id),
        }

        self.cells.insert(id, cell);
        id
    }

    /// Add a root vertex.
    pub fn add_root(&mut self, geometry: Geometry) -> CellId {
        self.add_cell(None, MemoryCell::vertex(geometry))
    }

    /// Add a layer under a root.
    pub fn add_layer(&mut self, root: CellId) -> CellId {
        self.add_cell(Some(root), MemoryCell::layer())
    }

    /// Add a child vertex.
    pub fn add_child(&mut self, parent: CellId, geometry: Geometry) -> CellId {
        self.add_cell(Some(parent), MemoryCell::vertex(geometry))
    }

    /// Get a cell by ID.
    pub fn cell(&self, id: CellId) -> Option<&MemoryCell> {
        self.cells.get(&id)
    }

    /// Get a mutable cell by ID. Changes made here are not journaled.
    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut MemoryCell> {
        self.cells.get_mut(&id)
    }

    /// Get the root cells.
    pub fn roots(&self) -> &[CellId] {
        &self.roots
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// View translation in model units, applied before scaling.
    pub fn set_translate(&mut self, translate: DVec2) {
        self.translate = translate;
    }

    pub fn set_viewport(&mut self, size: Option<DVec2>) {
        self.viewport = size;
    }

    pub fn set_current_root(&mut self, root: Option<CellId>) {
        self.current_root = root;
    }

    /// Make the next outermost commit fail and roll back.
    pub fn reject_next_commit(&mut self, reason: impl Into<String>) {
        self.reject_next_commit = Some(reason.into());
    }

    /// Edits published so far, oldest first.
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Number of outermost updates that published successfully.
    pub fn committed_batches(&self) -> usize {
        self.committed_batches
    }

    /// Nesting depth of open updates.
    pub fn update_depth(&self) -> usize {
        self.depth
    }

    /// Position of a cell in document coordinates.
    pub fn absolute_origin(&self, id: CellId) -> Option<DVec2> {
        let mut cell = self.cells.get(&id)?;
        let mut origin = DVec2::ZERO;

        loop {
            if let Some(geo) = &cell.geometry {
                origin += geo.position();
            }
            match cell.parent.and_then(|p| self.cells.get(&p)) {
                Some(parent) => cell = parent,
                None => break,
            }
        }

        Some(origin)
    }

    fn record(&mut self, edit: Edit) {
        if self.depth > 0 {
            self.pending.push(edit);
        } else {
            self.edits.push(edit);
        }
    }

    fn restore(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.cells = snapshot.cells;
            self.roots = snapshot.roots;
        }
        self.pending.clear();
    }

    fn cell_or_err(&self, id: CellId) -> Result<&MemoryCell, ModelError> {
        self.cells.get(&id).ok_or_else(|| ModelError::UnknownCell {
            cell: format!("{:?}", id),
        })
    }
}

impl GraphModel for MemoryGraph {
    type Cell = CellId;

    fn contains(&self, cell: CellId) -> bool {
        self.cells.contains_key(&cell)
    }

    fn parent(&self, cell: CellId) -> Option<CellId> {
        self.cells.get(&cell).and_then(|c| c.parent)
    }

    fn children(&self, cell: CellId) -> Vec<CellId> {
        self.cells
            .get(&cell)
            .map(|c| c.children.to_vec())
            .unwrap_or_default()
    }

    fn child_count(&self, cell: CellId) -> usize {
        self.cells.get(&cell).map_or(0, |c| c.children.len())
    }

    fn geometry(&self, cell: CellId) -> Option<Geometry> {
        self.cells.get(&cell).and_then(|c| c.geometry)
    }

    fn is_layer(&self, cell: CellId) -> bool {
        self.cells.get(&cell).is_some_and(|c| c.layer)
    }

    fn is_vertex(&self, cell: CellId) -> bool {
        self.cells.get(&cell).is_some_and(|c| !c.edge && !c.layer)
    }

    fn begin_update(&mut self) {
        if self.depth == 0 {
            self.snapshot = Some(Snapshot {
                cells: self.cells.clone(),
                roots: self.roots.clone(),
            });
        }
        self.depth += 1;
    }

    fn end_update(&mut self) -> Result<(), ModelError> {
        if self.depth == 0 {
            return Ok(());
        }
        self.depth -= 1;
        if self.depth > 0 {
            return Ok(());
        }

        if let Some(reason) = self.reject_next_commit.take() {
            self.restore();
            return Err(ModelError::CommitRejected { reason });
        }

        self.snapshot = None;
        if !self.pending.is_empty() {
            self.edits.append(&mut self.pending);
            self.committed_batches += 1;
        }
        Ok(())
    }

    fn abort_update(&mut self) {
        if self.depth == 0 {
            return;
        }
        self.depth -= 1;
        if self.depth == 0 {
            self.restore();
        }
    }

    fn set_geometry(&mut self, cell: CellId, geometry: Geometry) -> Result<(), ModelError> {
        let previous = self.cell_or_err(cell)?.geometry;
        if let Some(target) = self.cells.get_mut(&cell) {
            target.geometry = Some(geometry);
        }
        self.record(Edit::Geometry {
            cell,
            previous,
            geometry,
        });
        Ok(())
    }

    fn move_child(
        &mut self,
        parent: CellId,
        child: CellId,
        index: usize,
    ) -> Result<(), ModelError> {
        self.cell_or_err(child)?;
        let siblings = &mut self
            .cells
            .get_mut(&parent)
            .ok_or_else(|| ModelError::UnknownCell {
                cell: format!("{:?}", parent),
            })?
            .children;

        let from = siblings
            .iter()
            .position(|&c| c == child)
            .ok_or_else(|| ModelError::NotAChild {
                parent: format!("{:?}", parent),
                child: format!("{:?}", child),
            })?;

        let len = siblings.len() - 1;
        if index > len {
            return Err(ModelError::InvalidIndex { index, len });
        }

        siblings.remove(from);
        siblings.insert(index, child);

        self.record(Edit::Order {
            parent,
            child,
            index,
        });
        Ok(())
    }
}

impl GraphHost for MemoryGraph {
    fn style(&self, cell: CellId) -> CellStyle {
        self.cells
            .get(&cell)
            .map(|c| c.style.clone())
            .unwrap_or_default()
    }

    fn is_collapsed(&self, cell: CellId) -> bool {
        self.cells.get(&cell).is_some_and(|c| c.collapsed)
    }

    fn is_movable(&self, cell: CellId) -> bool {
        self.cells.get(&cell).is_some_and(|c| c.movable)
    }

    fn is_visible(&self, cell: CellId) -> bool {
        self.cells.get(&cell).is_some_and(|c| c.visible)
    }

    fn is_layout_ignored(&self, cell: CellId) -> bool {
        self.cells.get(&cell).is_some_and(|c| c.layout_ignored)
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn screen_origin(&self, cell: CellId) -> Option<DVec2> {
        if !self.is_visible(cell) {
            return None;
        }
        self.absolute_origin(cell)
            .map(|origin| (origin + self.translate) * self.scale)
    }

    fn viewport_size(&self) -> Option<DVec2> {
        self.viewport
    }

    fn current_root(&self) -> Option<CellId> {
        self.current_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_tree() {
        let mut graph = MemoryGraph::new();
        let root = graph.add_root(Geometry::new(0.0, 0.0, 800.0, 600.0));
        let a = graph.add_child(root, Geometry::new(10.0, 10.0, 100.0, 50.0));
        let b = graph.add_child(root, Geometry::new(10.0, 70.0, 100.0, 50.0));

        assert_eq!(graph.roots(), &[root]);
        assert_eq!(graph.children(root), vec![a, b]);
        assert_eq!(graph.parent(b), Some(root));
        assert_eq!(graph.index_of(root, b), Some(1));
        assert_eq!(graph.child_count(a), 0);
    }

    #[test]
    fn test_screen_origin() {
        let mut graph = MemoryGraph::new();
        let root = graph.add_root(Geometry::new(100.0, 50.0, 800.0, 600.0));
        let child = graph.add_child(root, Geometry::new(10.0, 10.0, 100.0, 50.0));
        graph.set_translate(DVec2::new(5.0, 5.0));
        graph.set_scale(2.0);

        assert_eq!(graph.absolute_origin(child), Some(DVec2::new(110.0, 60.0)));
        assert_eq!(graph.screen_origin(child), Some(DVec2::new(230.0, 130.0)));

        graph.cell_mut(child).unwrap().visible = false;
        assert_eq!(graph.screen_origin(child), None);
    }

    #[test]
    fn test_move_child_reorders() {
        let mut graph = MemoryGraph::new();
        let root = graph.add_root(Geometry::default());
        let a = graph.add_child(root, Geometry::default());
        let b = graph.add_child(root, Geometry::default());
        let c = graph.add_child(root, Geometry::default());

        graph.move_child(root, a, 2).unwrap();
        assert_eq!(graph.children(root), vec![b, c, a]);

        graph.move_child(root, a, 0).unwrap();
        assert_eq!(graph.children(root), vec![a, b, c]);
        assert_eq!(graph.edits().len(), 2);
    }

    #[test]
    fn test_move_child_rejects_out_of_range_index() {
        let mut graph = MemoryGraph::new();
        let root = graph.add_root(Geometry::default());
        let a = graph.add_child(root, Geometry::default());
        let b = graph.add_child(root, Geometry::default());

        let err = graph.move_child(root, a, 2).unwrap_err();
        assert_eq!(err, ModelError::InvalidIndex { index: 2, len: 1 });
        assert_eq!(graph.children(root), vec![a, b]);
        assert!(graph.edits().is_empty());
    }

    #[test]
    fn test_move_child_rejects_foreign_cell() {
        let mut graph = MemoryGraph::new();
        let root = graph.add_root(Geometry::default());
        let other = graph.add_root(Geometry::default());
        let child = graph.add_child(other, Geometry::default());

        let err = graph.move_child(root, child, 0).unwrap_err();
        assert!(matches!(err, ModelError::NotAChild { .. }));
    }

    #[test]
    fn test_nested_updates_publish_once() {
        let mut graph = MemoryGraph::new();
        let cell = graph.add_root(Geometry::default());

        graph.begin_update();
        graph.begin_update();
        graph.set_geometry(cell, Geometry::new(1.0, 1.0, 1.0, 1.0)).unwrap();
        graph.end_update().unwrap();
        assert!(graph.edits().is_empty());
        graph.end_update().unwrap();

        assert_eq!(graph.edits().len(), 1);
        assert_eq!(graph.committed_batches(), 1);
    }

    #[test]
    fn test_rejected_commit_rolls_back() {
        let mut graph = MemoryGraph::new();
        let cell = graph.add_root(Geometry::new(0.0, 0.0, 10.0, 10.0));
        graph.reject_next_commit("read-only document");

        graph.begin_update();
        graph.set_geometry(cell, Geometry::new(1.0, 1.0, 1.0, 1.0)).unwrap();
        let err = graph.end_update().unwrap_err();

        assert_eq!(
            err,
            ModelError::CommitRejected {
                reason: "read-only document".to_string(),
            }
        );
        assert_eq!(graph.geometry(cell), Some(Geometry::new(0.0, 0.0, 10.0, 10.0)));
        assert!(graph.edits().is_empty());
    }
}
