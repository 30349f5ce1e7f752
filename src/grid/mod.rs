//! Grid state store
//!
//! Owns the current matrix geometry, its lattice and the `rows x cols` cell
//! array. All cell mutation goes through `GridStore`; history snapshots are
//! independent clones of [`Grid`].

pub mod cell;
pub mod export;
pub mod fill;

pub use cell::{Cell, Color};
pub use export::{CellExport, GridExport, ProjectFile};
pub use fill::flood_fill;

use crate::error::{AnnotateError, Result};
use crate::geometry::{compute_grid_points, locate_cell, CellAddr, GridGeometry, Lattice, Point};

/// Row-major cell storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, addr: CellAddr) -> Option<usize> {
        (addr.row < self.rows && addr.col < self.cols).then(|| addr.row * self.cols + addr.col)
    }

    pub fn get(&self, addr: CellAddr) -> Option<&Cell> {
        self.index(addr).map(|i| &self.cells[i])
    }

    fn set(&mut self, addr: CellAddr, cell: Cell) -> Result<()> {
        let i = self.index(addr).ok_or(AnnotateError::CellOutOfRange {
            row: addr.row,
            col: addr.col,
        })?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Iterate all cells with their addresses, row-major
    pub fn iter(&self) -> impl Iterator<Item = (CellAddr, &Cell)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (CellAddr::new(i / cols, i % cols), cell))
    }

    /// Number of non-empty cells
    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Number of submatrix anchor cells
    pub fn anchor_count(&self) -> usize {
        self.cells.iter().filter(|c| c.span().is_some()).count()
    }
}

/// The grid state store
#[derive(Debug, Clone, Default)]
pub struct GridStore {
    geometry: Option<GridGeometry>,
    lattice: Lattice,
    grid: Grid,
}

impl GridStore {
    /// A store with no matrix defined yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Establish a new geometry. Discards all previous cell state.
    pub fn define_grid(&mut self, geometry: GridGeometry) -> Result<()> {
        let lattice = compute_grid_points(
            geometry.top_left(),
            geometry.bottom_right(),
            geometry.rows(),
            geometry.cols(),
        )?;
        self.geometry = Some(geometry);
        self.lattice = lattice;
        self.grid = Grid::new(geometry.rows(), geometry.cols());
        tracing::info!(
            rows = geometry.rows(),
            cols = geometry.cols(),
            "matrix defined"
        );
        Ok(())
    }

    pub fn geometry(&self) -> Option<&GridGeometry> {
        self.geometry.as_ref()
    }

    pub fn is_defined(&self) -> bool {
        self.geometry.is_some()
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Deep copy of the current cells (for history)
    pub fn snapshot(&self) -> Grid {
        self.grid.clone()
    }

    /// Replace the cells wholesale with a snapshot of the same shape
    pub fn restore(&mut self, grid: Grid) {
        debug_assert_eq!((grid.rows, grid.cols), (self.grid.rows, self.grid.cols));
        self.grid = grid;
    }

    /// Cell under a world-space point
    pub fn cell_at_point(&self, world: Point) -> Option<CellAddr> {
        locate_cell(world, &self.lattice)
    }

    pub fn cell(&self, addr: CellAddr) -> Option<Cell> {
        self.grid.get(addr).copied()
    }

    pub fn color_at(&self, addr: CellAddr) -> Option<Color> {
        self.grid.get(addr).and_then(Cell::color)
    }

    /// Paint one cell. An anchor keeps its span and only changes colour.
    pub fn paint(&mut self, addr: CellAddr, color: Color) -> Result<()> {
        let current = self.cell(addr).ok_or(AnnotateError::CellOutOfRange {
            row: addr.row,
            col: addr.col,
        })?;
        self.grid.set(addr, current.recolored(color))
    }

    /// Clear one cell, dropping any span metadata
    pub fn erase(&mut self, addr: CellAddr) -> Result<()> {
        self.grid.set(addr, Cell::Empty)
    }

    /// Fill the rectangle spanned by two corners as one merged submatrix.
    ///
    /// The top-left cell becomes the anchor carrying the span; every other cell
    /// in the rectangle is painted plainly.
    pub fn paint_region(&mut self, a: CellAddr, b: CellAddr, color: Color) -> Result<()> {
        let (start, end) = CellAddr::normalize(a, b);
        for corner in [start, end] {
            if self.grid.get(corner).is_none() {
                return Err(AnnotateError::CellOutOfRange {
                    row: corner.row,
                    col: corner.col,
                });
            }
        }

        for row in start.row..=end.row {
            for col in start.col..=end.col {
                self.grid.set(CellAddr::new(row, col), Cell::Painted { color })?;
            }
        }
        self.grid.set(start, Cell::SpanAnchor { color, start, end })
    }

    /// Export the current geometry and non-empty cells
    pub fn serialize(&self) -> Option<GridExport> {
        let geometry = self.geometry?;
        Some(GridExport::from_grid(&geometry, &self.grid))
    }

    /// Replace geometry and cells from an export. Leaves `self` untouched on error.
    pub fn deserialize(&mut self, export: &GridExport) -> Result<()> {
        let geometry = export.geometry()?;
        let mut rebuilt = GridStore::new();
        rebuilt.define_grid(geometry)?;
        for (addr, cell) in export.cells_for(&geometry) {
            rebuilt.grid.set(addr, cell)?;
        }
        *self = rebuilt;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(rows: usize, cols: usize) -> GridStore {
        let mut store = GridStore::new();
        let geometry = GridGeometry::new(
            Point::ORIGIN,
            Point::new(cols as f64 * 10.0, rows as f64 * 10.0),
            rows,
            cols,
        )
        .unwrap();
        store.define_grid(geometry).unwrap();
        store
    }

    #[test]
    fn test_define_grid_allocates_empty_cells() {
        let store = store(3, 4);
        assert_eq!(store.grid().rows(), 3);
        assert_eq!(store.grid().cols(), 4);
        assert_eq!(store.grid().painted_count(), 0);
        assert_eq!(store.lattice().len(), 4);
    }

    #[test]
    fn test_paint_out_of_range() {
        let mut store = store(2, 2);
        let result = store.paint(CellAddr::new(2, 0), Color::RED);
        assert_eq!(result, Err(AnnotateError::CellOutOfRange { row: 2, col: 0 }));
    }

    #[test]
    fn test_erase_drops_span() {
        let mut store = store(2, 2);
        store
            .paint_region(CellAddr::new(0, 0), CellAddr::new(1, 1), Color::RED)
            .unwrap();
        store.erase(CellAddr::new(0, 0)).unwrap();
        assert_eq!(store.cell(CellAddr::new(0, 0)), Some(Cell::Empty));
        assert_eq!(store.color_at(CellAddr::new(1, 1)), Some(Color::RED));
    }

    #[test]
    fn test_region_corners_normalized() {
        let mut store = store(3, 3);
        store
            .paint_region(CellAddr::new(2, 2), CellAddr::new(1, 0), Color::RED)
            .unwrap();
        assert_eq!(
            store.cell(CellAddr::new(1, 0)).and_then(|c| c.span()),
            Some((CellAddr::new(1, 0), CellAddr::new(2, 2)))
        );
        assert_eq!(store.grid().anchor_count(), 1);
        assert_eq!(store.grid().painted_count(), 6);
    }

    #[test]
    fn test_region_out_of_range_leaves_grid_unchanged() {
        let mut store = store(2, 2);
        let before = store.snapshot();
        assert!(store
            .paint_region(CellAddr::new(0, 0), CellAddr::new(5, 5), Color::RED)
            .is_err());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_single_cell_region_is_anchor() {
        let mut store = store(2, 2);
        store
            .paint_region(CellAddr::new(1, 1), CellAddr::new(1, 1), Color::RED)
            .unwrap();
        assert_eq!(
            store.cell(CellAddr::new(1, 1)),
            Some(Cell::SpanAnchor {
                color: Color::RED,
                start: CellAddr::new(1, 1),
                end: CellAddr::new(1, 1),
            })
        );
    }
}
