//! Stack layout for Strata diagram containers.
//!
//! This crate arranges the children of a container along one axis and keeps
//! their sibling order in sync with interactive drags.
//!
//! # Architecture
//!
//! 1. **Host capabilities**: the editor exposes its document through
//!    [`GraphModel`] and [`GraphHost`]; [`MemoryGraph`] is a ready-made host
//! 2. **Cell selection**: picks the children that take part in the stack
//! 3. **Layout pass**: positions, fills, snaps and commits each child inside
//!    one [`EditBatch`], then resizes the container or its last child
//! 4. **Reordering**: maps a drag position to a new sibling index
//!
//! # Example
//!
//! ```
//! use strata_core::Geometry;
//! use strata_layout::{GraphModel, LayoutConfig, MemoryGraph, StackLayout};
//!
//! let mut graph = MemoryGraph::new();
//! let lane = graph.add_root(Geometry::new(0.0, 0.0, 400.0, 60.0));
//! let a = graph.add_child(lane, Geometry::new(0.0, 0.0, 80.0, 40.0));
//! let b = graph.add_child(lane, Geometry::new(0.0, 0.0, 80.0, 40.0));
//!
//! let layout = StackLayout::new(LayoutConfig::horizontal().with_spacing(10.0));
//! layout.execute(&mut graph, lane)?;
//!
//! assert_eq!(graph.geometry(b).map(|g| g.x), Some(90.0));
//! # let _ = a;
//! # Ok::<(), strata_core::LayoutError>(())
//! ```

mod batch;
mod commit;
mod config;
mod host;
mod memory;
mod selection;
mod snap;
mod stack;

pub use batch::EditBatch;
pub use commit::{set_child_geometry, update_parent_geometry};
#[cfg(feature = "serde")]
pub use config::ConfigError;
pub use config::{LayoutConfig, Margins};
pub use host::{GraphHost, GraphModel};
pub use memory::{CellId, Edit, MemoryCell, MemoryGraph};
pub use selection::{is_ignored, layout_cells};
pub use snap::{geometry_changed, snap};
pub use stack::{parent_size, StackLayout};
