//! Scoped model updates.

use std::ops::{Deref, DerefMut};

use strata_core::ModelError;

use crate::host::GraphModel;

/// An open update on a [`GraphModel`].
///
/// All writes of one layout pass go through the batch. [`EditBatch::commit`]
/// closes the update and reports the model's verdict; a batch dropped
/// without committing (an early return or `?`) is aborted instead.
pub struct EditBatch<'a, M: GraphModel + ?Sized> {
    model: &'a mut M,
    open: bool,
}

impl<'a, M: GraphModel + ?Sized> EditBatch<'a, M> {
    /// Open an update on the model.
    pub fn begin(model: &'a mut M) -> Self {
        model.begin_update();
        Self { model, open: true }
    }

    /// Close the update and publish its changes.
    pub fn commit(mut self) -> Result<(), ModelError> {
        self.open = false;
        self.model.end_update()
    }
}

impl<M: GraphModel + ?Sized> Deref for EditBatch<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        self.model
    }
}

impl<M: GraphModel + ?Sized> DerefMut for EditBatch<'_, M> {
    fn deref_mut(&mut self) -> &mut M {
        self.model
    }
}

impl<M: GraphModel + ?Sized> Drop for EditBatch<'_, M> {
    fn drop(&mut self) {
        if self.open {
            tracing::warn!("aborting unfinished layout update");
            self.model.abort_update();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraph;
    use strata_core::Geometry;

    #[test]
    fn test_commit_closes_update() {
        let mut graph = MemoryGraph::new();
        let cell = graph.add_root(Geometry::new(0.0, 0.0, 10.0, 10.0));

        let mut batch = EditBatch::begin(&mut graph);
        assert_eq!(batch.update_depth(), 1);
        batch.set_geometry(cell, Geometry::new(5.0, 0.0, 10.0, 10.0)).unwrap();
        batch.commit().unwrap();

        assert_eq!(graph.update_depth(), 0);
        assert_eq!(graph.geometry(cell), Some(Geometry::new(5.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_drop_aborts_update() {
        let mut graph = MemoryGraph::new();
        let cell = graph.add_root(Geometry::new(0.0, 0.0, 10.0, 10.0));

        {
            let mut batch = EditBatch::begin(&mut graph);
            batch.set_geometry(cell, Geometry::new(5.0, 0.0, 10.0, 10.0)).unwrap();
        }

        assert_eq!(graph.update_depth(), 0);
        assert_eq!(graph.geometry(cell), Some(Geometry::new(0.0, 0.0, 10.0, 10.0)));
        assert!(graph.edits().is_empty());
    }
}
