//! Flood fill over grid cells
//!
//! 4-connected region growing with an explicit worklist, so very large grids
//! cannot exhaust the call stack.

use super::{Color, GridStore};
use crate::error::{AnnotateError, Result};
use crate::geometry::CellAddr;

/// Recolour the 4-connected region of cells sharing the start cell's colour.
///
/// The target colour (which may be `None`, meaning empty) is captured once
/// before any mutation. Returns the number of cells recoloured; filling with
/// the target colour is a no-op returning 0.
pub fn flood_fill(store: &mut GridStore, start: CellAddr, new_color: Color) -> Result<usize> {
    let grid = store.grid();
    let (rows, cols) = (grid.rows(), grid.cols());
    if grid.get(start).is_none() {
        return Err(AnnotateError::CellOutOfRange {
            row: start.row,
            col: start.col,
        });
    }

    let target = store.color_at(start);
    if target == Some(new_color) {
        return Ok(0);
    }

    let mut stack = vec![start];
    let mut filled = 0;

    while let Some(addr) = stack.pop() {
        // Already recoloured via another path
        if store.color_at(addr) != target {
            continue;
        }
        store.paint(addr, new_color)?;
        filled += 1;

        if addr.row > 0 {
            stack.push(CellAddr::new(addr.row - 1, addr.col));
        }
        if addr.row + 1 < rows {
            stack.push(CellAddr::new(addr.row + 1, addr.col));
        }
        if addr.col > 0 {
            stack.push(CellAddr::new(addr.row, addr.col - 1));
        }
        if addr.col + 1 < cols {
            stack.push(CellAddr::new(addr.row, addr.col + 1));
        }
    }

    tracing::debug!(filled, row = start.row, col = start.col, "flood fill");
    Ok(filled)
}
