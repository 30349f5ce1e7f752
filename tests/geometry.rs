//! Tests for lattice generation, coordinate transforms and hit testing

mod common;

use common::addr;
use gridpaint::error::AnnotateError;
use gridpaint::geometry::{
    cell_bounds, compute_grid_points, locate_cell, screen_to_world, world_to_screen, GridGeometry,
    Point,
};

// ============================================================================
// Lattice
// ============================================================================

#[test]
fn test_lattice_corners_are_exact() {
    let cases = [
        (Point::new(0.0, 0.0), Point::new(100.0, 100.0), 2, 2),
        (Point::new(12.3, 45.6), Point::new(789.1, 234.5), 7, 13),
        (Point::new(-50.0, -20.0), Point::new(0.1, 0.3), 3, 1),
        (Point::new(0.1, 0.2), Point::new(1000.7, 999.9), 97, 61),
    ];

    for (top_left, bottom_right, rows, cols) in cases {
        let lattice = compute_grid_points(top_left, bottom_right, rows, cols).unwrap();
        assert_eq!(lattice.len(), rows + 1);
        assert!(lattice.iter().all(|row| row.len() == cols + 1));
        assert_eq!(lattice[0][0], top_left);
        assert_eq!(lattice[rows][cols], bottom_right);
    }
}

#[test]
fn test_lattice_is_evenly_spaced() {
    let lattice = compute_grid_points(Point::ORIGIN, Point::new(90.0, 60.0), 3, 3).unwrap();
    assert_eq!(lattice[1][1], Point::new(30.0, 20.0));
    assert_eq!(lattice[2][3], Point::new(90.0, 40.0));
}

#[test]
fn test_invalid_geometry_rejected() {
    let bad = [
        GridGeometry::new(Point::ORIGIN, Point::new(10.0, 10.0), 0, 2),
        GridGeometry::new(Point::ORIGIN, Point::new(10.0, 10.0), 2, 0),
        GridGeometry::new(Point::new(10.0, 0.0), Point::new(5.0, 10.0), 1, 1),
        GridGeometry::new(Point::ORIGIN, Point::new(10.0, 0.0), 1, 1),
        GridGeometry::new(Point::ORIGIN, Point::new(f64::INFINITY, 10.0), 1, 1),
    ];
    for result in bad {
        assert!(
            matches!(result, Err(AnnotateError::InvalidGeometry(_))),
            "expected InvalidGeometry, got {:?}",
            result
        );
    }
}

// ============================================================================
// Transforms
// ============================================================================

#[test]
fn test_screen_world_roundtrip() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(123.456, -78.9),
        Point::new(-1000.0, 2500.25),
    ];
    let pans = [Point::ORIGIN, Point::new(33.3, -12.0), Point::new(-400.0, 250.0)];
    let zooms = [0.1, 0.37, 1.0, 2.5, 10.0];

    for p in points {
        for pan in pans {
            for zoom in zooms {
                let back = screen_to_world(world_to_screen(p, pan, zoom), pan, zoom);
                assert!(
                    (back.x - p.x).abs() < 1e-9 && (back.y - p.y).abs() < 1e-9,
                    "{:?} -> {:?} (pan {:?}, zoom {})",
                    p,
                    back,
                    pan,
                    zoom
                );
            }
        }
    }
}

// ============================================================================
// Hit testing
// ============================================================================

#[test]
fn test_locate_cell_interior_points() {
    let lattice = compute_grid_points(Point::ORIGIN, Point::new(100.0, 100.0), 2, 2).unwrap();
    assert_eq!(locate_cell(Point::new(25.0, 25.0), &lattice), Some(addr(0, 0)));
    assert_eq!(locate_cell(Point::new(75.0, 25.0), &lattice), Some(addr(0, 1)));
    assert_eq!(locate_cell(Point::new(25.0, 75.0), &lattice), Some(addr(1, 0)));
    assert_eq!(locate_cell(Point::new(75.0, 75.0), &lattice), Some(addr(1, 1)));
}

#[test]
fn test_locate_cell_shared_edge_picks_lower_index() {
    let lattice = compute_grid_points(Point::ORIGIN, Point::new(100.0, 100.0), 2, 2).unwrap();
    assert_eq!(locate_cell(Point::new(50.0, 50.0), &lattice), Some(addr(0, 0)));
    assert_eq!(locate_cell(Point::new(50.0, 75.0), &lattice), Some(addr(1, 0)));
}

#[test]
fn test_locate_cell_outside_misses() {
    let lattice = compute_grid_points(Point::new(10.0, 10.0), Point::new(20.0, 20.0), 1, 1).unwrap();
    assert_eq!(locate_cell(Point::new(9.9, 15.0), &lattice), None);
    assert_eq!(locate_cell(Point::new(15.0, 20.1), &lattice), None);
    assert_eq!(locate_cell(Point::new(20.0, 20.0), &lattice), Some(addr(0, 0)));
}

#[test]
fn test_cell_bounds_match_lattice() {
    let lattice = compute_grid_points(Point::ORIGIN, Point::new(60.0, 30.0), 3, 2).unwrap();
    assert_eq!(
        cell_bounds(&lattice, addr(2, 1)),
        Some((Point::new(30.0, 20.0), Point::new(60.0, 30.0)))
    );
    assert_eq!(cell_bounds(&lattice, addr(3, 0)), None);
}
