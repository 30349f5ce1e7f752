//! Geometry engine
//!
//! Pure functions for the matrix lattice and the screen/world transform.
//!
//! World space is the image's own pixel space. Screen space is the logical
//! (device-independent) position on the drawing surface. The renderer maps
//! world to screen as `screen = world * zoom + pan`; `screen_to_world` is its
//! exact inverse, so hit-testing never drifts from what is drawn.

use serde::{Deserialize, Serialize};

use crate::error::{AnnotateError, Result};

/// Largest matrix accepted, counted in cells (`rows * cols`)
pub const MAX_CELLS: usize = 4_000_000;

/// A point in world or screen space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Component-wise scale
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Serialize as the `[x, y]` pair used by the project file
    pub fn to_pair(self) -> [f64; 2] {
        [self.x, self.y]
    }

    pub fn from_pair(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

/// Address of a single cell in the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddr {
    pub row: usize,
    pub col: usize,
}

impl CellAddr {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The `"row-col"` key used by the project file
    pub fn key(&self) -> String {
        format!("{}-{}", self.row, self.col)
    }

    /// Parse a `"row-col"` key. Returns None for anything else.
    pub fn parse_key(key: &str) -> Option<Self> {
        let (row, col) = key.split_once('-')?;
        Some(Self::new(row.trim().parse().ok()?, col.trim().parse().ok()?))
    }

    /// Normalize two corners into (top-left, bottom-right) of their rectangle
    pub fn normalize(a: CellAddr, b: CellAddr) -> (CellAddr, CellAddr) {
        (
            CellAddr::new(a.row.min(b.row), a.col.min(b.col)),
            CellAddr::new(a.row.max(b.row), a.col.max(b.col)),
        )
    }
}

/// Validated matrix definition: two corners plus a row/column count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    rows: usize,
    cols: usize,
    top_left: Point,
    bottom_right: Point,
}

impl GridGeometry {
    /// Build a geometry, rejecting empty counts, non-finite or inverted corners
    pub fn new(top_left: Point, bottom_right: Point, rows: usize, cols: usize) -> Result<Self> {
        validate(top_left, bottom_right, rows, cols)?;
        if bottom_right.x <= top_left.x || bottom_right.y <= top_left.y {
            return Err(AnnotateError::InvalidGeometry(
                "bottom-right corner must lie below and right of top-left".to_string(),
            ));
        }
        Ok(Self {
            rows,
            cols,
            top_left,
            bottom_right,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn top_left(&self) -> Point {
        self.top_left
    }

    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    pub fn contains(&self, addr: CellAddr) -> bool {
        addr.row < self.rows && addr.col < self.cols
    }

    /// Compute the `(rows+1) x (cols+1)` lattice for this geometry
    pub fn lattice(&self) -> Lattice {
        interpolate(self.top_left, self.bottom_right, self.rows, self.cols)
    }
}

/// Row-major `(rows+1) x (cols+1)` grid of lattice points
pub type Lattice = Vec<Vec<Point>>;

fn validate(top_left: Point, bottom_right: Point, rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(AnnotateError::InvalidGeometry(
            "rows and columns must be positive".to_string(),
        ));
    }
    let lattice_points = rows
        .checked_add(1)
        .zip(cols.checked_add(1))
        .and_then(|(r, c)| r.checked_mul(c));
    match (rows.checked_mul(cols), lattice_points) {
        (Some(cells), Some(_)) if cells <= MAX_CELLS => {}
        _ => {
            return Err(AnnotateError::InvalidGeometry(format!(
                "{} x {} exceeds the {} cell limit",
                rows, cols, MAX_CELLS
            )));
        }
    }
    if !top_left.is_finite() || !bottom_right.is_finite() {
        return Err(AnnotateError::InvalidGeometry(
            "corner coordinates must be numbers".to_string(),
        ));
    }
    Ok(())
}

fn interpolate(top_left: Point, bottom_right: Point, rows: usize, cols: usize) -> Lattice {
    let dx = (bottom_right.x - top_left.x) / cols as f64;
    let dy = (bottom_right.y - top_left.y) / rows as f64;

    (0..=rows)
        .map(|row| {
            (0..=cols)
                .map(|col| {
                    // Pin the far edge to the exact corner instead of accumulating dx/dy
                    let x = if col == cols {
                        bottom_right.x
                    } else {
                        top_left.x + col as f64 * dx
                    };
                    let y = if row == rows {
                        bottom_right.y
                    } else {
                        top_left.y + row as f64 * dy
                    };
                    Point::new(x, y)
                })
                .collect()
        })
        .collect()
}

/// Compute matrix lattice points by linear interpolation between two corners.
///
/// Point `(0, 0)` is `top_left` and point `(rows, cols)` is `bottom_right` exactly.
pub fn compute_grid_points(
    top_left: Point,
    bottom_right: Point,
    rows: usize,
    cols: usize,
) -> Result<Lattice> {
    validate(top_left, bottom_right, rows, cols)?;
    Ok(interpolate(top_left, bottom_right, rows, cols))
}

/// Map a world point to screen space: `screen = world * zoom + pan`
#[inline]
pub fn world_to_screen(world: Point, pan: Point, zoom: f64) -> Point {
    Point::new(world.x * zoom + pan.x, world.y * zoom + pan.y)
}

/// Inverse of [`world_to_screen`]: `world = (screen - pan) / zoom`
#[inline]
pub fn screen_to_world(screen: Point, pan: Point, zoom: f64) -> Point {
    Point::new((screen.x - pan.x) / zoom, (screen.y - pan.y) / zoom)
}

/// Find the cell whose bounding box contains `world`.
///
/// Bounds are inclusive on both sides and cells are scanned row-major, so a
/// point on a shared edge resolves to the lower-indexed cell.
pub fn locate_cell(world: Point, lattice: &Lattice) -> Option<CellAddr> {
    if lattice.len() < 2 {
        return None;
    }
    for row in 0..lattice.len() - 1 {
        let cols = lattice[row].len().saturating_sub(1);
        for col in 0..cols {
            let min = lattice[row][col];
            let max = lattice[row + 1][col + 1];
            if world.x >= min.x && world.x <= max.x && world.y >= min.y && world.y <= max.y {
                return Some(CellAddr::new(row, col));
            }
        }
    }
    None
}

/// Axis-aligned bounds of one cell as `(min, max)` corners
pub fn cell_bounds(lattice: &Lattice, addr: CellAddr) -> Option<(Point, Point)> {
    let min = *lattice.get(addr.row)?.get(addr.col)?;
    let max = *lattice.get(addr.row + 1)?.get(addr.col + 1)?;
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_dimensions() {
        let lattice = compute_grid_points(Point::new(0.0, 0.0), Point::new(30.0, 20.0), 2, 3)
            .unwrap();
        assert_eq!(lattice.len(), 3);
        assert!(lattice.iter().all(|row| row.len() == 4));
        assert_eq!(lattice[1][1], Point::new(10.0, 10.0));
    }

    #[test]
    fn test_zero_rows_rejected() {
        let result = compute_grid_points(Point::ORIGIN, Point::new(10.0, 10.0), 0, 2);
        assert!(matches!(result, Err(AnnotateError::InvalidGeometry(_))));
    }

    #[test]
    fn test_oversized_counts_rejected() {
        let br = Point::new(10.0, 10.0);
        assert!(GridGeometry::new(Point::ORIGIN, br, 2000, 2000).is_ok());
        assert!(matches!(
            GridGeometry::new(Point::ORIGIN, br, 2001, 2000),
            Err(AnnotateError::InvalidGeometry(_))
        ));
        assert!(compute_grid_points(Point::ORIGIN, br, usize::MAX, 1).is_err());
        assert!(compute_grid_points(Point::ORIGIN, br, 1usize << 62, 4).is_err());
    }

    #[test]
    fn test_nan_corner_rejected() {
        let result = compute_grid_points(Point::new(f64::NAN, 0.0), Point::new(10.0, 10.0), 1, 1);
        assert!(matches!(result, Err(AnnotateError::InvalidGeometry(_))));
    }

    #[test]
    fn test_inverted_corners_rejected() {
        let result = GridGeometry::new(Point::new(10.0, 10.0), Point::new(0.0, 20.0), 1, 1);
        assert!(matches!(result, Err(AnnotateError::InvalidGeometry(_))));
        let result = GridGeometry::new(Point::new(0.0, 10.0), Point::new(10.0, 10.0), 1, 1);
        assert!(matches!(result, Err(AnnotateError::InvalidGeometry(_))));
    }

    #[test]
    fn test_cell_key_roundtrip() {
        assert_eq!(CellAddr::parse_key("3-12"), Some(CellAddr::new(3, 12)));
        assert_eq!(CellAddr::new(3, 12).key(), "3-12");
        assert_eq!(CellAddr::parse_key("3"), None);
        assert_eq!(CellAddr::parse_key("a-1"), None);
        assert_eq!(CellAddr::parse_key("-1-2"), None);
    }

    #[test]
    fn test_normalize_corners() {
        let (a, b) = CellAddr::normalize(CellAddr::new(4, 1), CellAddr::new(2, 3));
        assert_eq!(a, CellAddr::new(2, 1));
        assert_eq!(b, CellAddr::new(4, 3));
    }

    #[test]
    fn test_locate_shared_edge_prefers_lower_index() {
        let lattice = compute_grid_points(Point::ORIGIN, Point::new(100.0, 100.0), 2, 2).unwrap();
        assert_eq!(locate_cell(Point::new(50.0, 50.0), &lattice), Some(CellAddr::new(0, 0)));
        assert_eq!(locate_cell(Point::new(75.0, 50.0), &lattice), Some(CellAddr::new(0, 1)));
        assert_eq!(locate_cell(Point::new(100.0, 100.0), &lattice), Some(CellAddr::new(1, 1)));
        assert_eq!(locate_cell(Point::new(100.1, 10.0), &lattice), None);
        assert_eq!(locate_cell(Point::new(-0.1, 10.0), &lattice), None);
    }
}
