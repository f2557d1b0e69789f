//! Change-detecting geometry writes.
//!
//! The layout only asks the model to write a geometry that actually
//! differs from the stored one, so a pass over an already laid-out
//! container publishes nothing.

use strata_core::{Geometry, ModelError, Orientation};
use tracing::trace;

use crate::config::LayoutConfig;
use crate::host::GraphModel;
use crate::snap::geometry_changed;

/// Write `geometry` to `child` unless it is already stored.
///
/// Returns whether a write was requested.
pub fn set_child_geometry<M: GraphModel + ?Sized>(
    model: &mut M,
    child: M::Cell,
    geometry: Geometry,
) -> Result<bool, ModelError> {
    let current = model.geometry(child);
    if !geometry_changed(current.as_ref(), &geometry) {
        return Ok(false);
    }

    trace!(?child, ?current, ?geometry, "placing child");
    model.set_geometry(child, geometry)?;
    Ok(true)
}

/// Resize the container so the stack ends at its far edge.
///
/// The stack-axis size becomes the last child's trailing edge plus the
/// trailing margin and border; with `resize_parent_max` the container only
/// grows. Returns whether a write was requested.
pub fn update_parent_geometry<M: GraphModel + ?Sized>(
    model: &mut M,
    parent: M::Cell,
    current: &Geometry,
    last: &Geometry,
    config: &LayoutConfig,
) -> Result<bool, ModelError> {
    let orientation = config.orientation;
    let trailing = match orientation {
        Orientation::Horizontal => last.right() + config.margins.right + config.border,
        Orientation::Vertical => last.bottom() + config.margins.bottom + config.border,
    };

    let size = if config.resize_parent_max {
        orientation.main_size(current).max(trailing)
    } else {
        trailing
    };

    let mut next = *current;
    orientation.set_main_size(&mut next, size);

    if !geometry_changed(Some(current), &next) {
        return Ok(false);
    }

    trace!(?parent, ?current, ?next, "resizing container");
    model.set_geometry(parent, next)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Margins;
    use crate::memory::{Edit, MemoryGraph};

    #[test]
    fn test_unchanged_geometry_is_not_written() {
        let mut graph = MemoryGraph::new();
        let cell = graph.add_root(Geometry::new(1.0, 2.0, 3.0, 4.0));

        let written =
            set_child_geometry(&mut graph, cell, Geometry::new(1.0, 2.0, 3.0, 4.0)).unwrap();
        assert!(!written);
        assert!(graph.edits().is_empty());

        let written =
            set_child_geometry(&mut graph, cell, Geometry::new(1.0, 2.0, 3.0, 5.0)).unwrap();
        assert!(written);
        assert_eq!(graph.edits().len(), 1);
    }

    #[test]
    fn test_missing_geometry_is_written() {
        let mut graph = MemoryGraph::new();
        let root = graph.add_root(Geometry::default());
        let layer = graph.add_layer(root);

        let written = set_child_geometry(&mut graph, layer, Geometry::default()).unwrap();
        assert!(written);
        assert_eq!(
            graph.edits(),
            &[Edit::Geometry {
                cell: layer,
                previous: None,
                geometry: Geometry::default(),
            }]
        );
    }

    #[test]
    fn test_parent_shrinks_to_fit() {
        let mut graph = MemoryGraph::new();
        let current = Geometry::new(0.0, 0.0, 300.0, 100.0);
        let parent = graph.add_root(current);
        let config = LayoutConfig::horizontal()
            .with_border(2.0)
            .with_margins(Margins {
                right: 8.0,
                ..Default::default()
            });

        let last = Geometry::new(100.0, 0.0, 50.0, 20.0);
        assert!(update_parent_geometry(&mut graph, parent, &current, &last, &config).unwrap());
        assert_eq!(graph.geometry(parent), Some(Geometry::new(0.0, 0.0, 160.0, 100.0)));
    }

    #[test]
    fn test_parent_max_only_grows() {
        let mut graph = MemoryGraph::new();
        let current = Geometry::new(0.0, 0.0, 100.0, 300.0);
        let parent = graph.add_root(current);
        let config = LayoutConfig::vertical().with_resize_parent_max(true);

        let short = Geometry::new(0.0, 100.0, 50.0, 20.0);
        assert!(!update_parent_geometry(&mut graph, parent, &current, &short, &config).unwrap());
        assert!(graph.edits().is_empty());

        let tall = Geometry::new(0.0, 300.0, 50.0, 20.0);
        assert!(update_parent_geometry(&mut graph, parent, &current, &tall, &config).unwrap());
        assert_eq!(graph.geometry(parent), Some(Geometry::new(0.0, 0.0, 100.0, 320.0)));
    }
}
