//! Selection of the children a stack arranges.

use std::cmp::Ordering;

use crate::config::LayoutConfig;
use crate::host::GraphHost;

/// Whether a cell is excluded from layout: edges, hidden cells and cells
/// the host marks as ignored.
pub fn is_ignored<H: GraphHost + ?Sized>(host: &H, cell: H::Cell) -> bool {
    !host.is_vertex(cell) || !host.is_visible(cell) || host.is_layout_ignored(cell)
}

/// Children of `parent` that take part in the stack, in stack order.
///
/// With `allow_gaps` the children are ordered by their stack-axis
/// coordinate instead of sibling order, so gaps the user left stay put.
/// Children with equal coordinates keep their sibling order.
pub fn layout_cells<H: GraphHost + ?Sized>(
    host: &H,
    parent: H::Cell,
    config: &LayoutConfig,
) -> Vec<H::Cell> {
    let mut cells: Vec<H::Cell> = host
        .children(parent)
        .into_iter()
        .filter(|&child| !is_ignored(host, child) && host.is_movable(child))
        .collect();

    if config.allow_gaps {
        let orientation = config.orientation;
        // Cells without a usable coordinate sort last.
        let mut keyed: Vec<(Option<f64>, H::Cell)> = cells
            .into_iter()
            .map(|cell| {
                let key = host
                    .geometry(cell)
                    .map(|g| orientation.main(&g))
                    .filter(|v| !v.is_nan());
                (key, cell)
            })
            .collect();

        keyed.sort_by(|(a, _), (b, _)| match (a, b) {
            (Some(a), Some(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        cells = keyed.into_iter().map(|(_, cell)| cell).collect();
    }

    cells
}
