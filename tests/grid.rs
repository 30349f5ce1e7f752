//! Tests for the grid state store: definition, painting, regions and export

mod common;

use common::{addr, geometry, test_store, GREEN};
use gridpaint::error::AnnotateError;
use gridpaint::geometry::Point;
use gridpaint::grid::{Cell, Color, GridStore};

#[test]
fn test_paint_single_cell_in_2x2() {
    let mut store = test_store(100.0, 100.0, 2, 2);
    store.paint(addr(0, 0), Color::RED).unwrap();

    assert_eq!(store.color_at(addr(0, 0)), Some(Color::RED));
    for cell in [addr(0, 1), addr(1, 0), addr(1, 1)] {
        assert_eq!(store.color_at(cell), None, "cell {} should be empty", cell.key());
    }
}

#[test]
fn test_paint_region_in_3x3() {
    let mut store = test_store(90.0, 90.0, 3, 3);
    store.paint_region(addr(0, 0), addr(1, 1), GREEN).unwrap();

    for cell in [addr(0, 0), addr(0, 1), addr(1, 0), addr(1, 1)] {
        assert_eq!(store.color_at(cell), Some(GREEN));
    }
    assert_eq!(
        store.cell(addr(0, 0)).and_then(|c| c.span()),
        Some((addr(0, 0), addr(1, 1)))
    );
    assert_eq!(store.cell(addr(1, 1)).and_then(|c| c.span()), None);
    assert_eq!(store.color_at(addr(2, 2)), None);
}

#[test]
fn test_paint_region_normalises_corners() {
    let mut store = test_store(90.0, 90.0, 3, 3);
    store.paint_region(addr(2, 2), addr(1, 0), Color::RED).unwrap();

    assert_eq!(
        store.cell(addr(1, 0)),
        Some(Cell::SpanAnchor {
            color: Color::RED,
            start: addr(1, 0),
            end: addr(2, 2),
        })
    );
    assert_eq!(store.grid().painted_count(), 6);
    assert_eq!(store.color_at(addr(0, 0)), None);
}

#[test]
fn test_out_of_range_is_rejected_without_change() {
    let mut store = test_store(100.0, 100.0, 2, 2);
    let before = store.snapshot();

    assert_eq!(
        store.paint(addr(2, 0), Color::RED),
        Err(AnnotateError::CellOutOfRange { row: 2, col: 0 })
    );
    assert!(store.paint_region(addr(0, 0), addr(5, 5), Color::RED).is_err());
    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_redefine_discards_cells() {
    let mut store = test_store(100.0, 100.0, 2, 2);
    store.paint(addr(1, 1), Color::RED).unwrap();
    store.define_grid(geometry(100.0, 100.0, 4, 4)).unwrap();

    assert_eq!(store.grid().rows(), 4);
    assert_eq!(store.grid().painted_count(), 0);
}

#[test]
fn test_invalid_redefine_keeps_previous_matrix() {
    let mut store = test_store(100.0, 100.0, 2, 2);
    store.paint(addr(0, 0), Color::RED).unwrap();

    let bad = gridpaint::geometry::GridGeometry::new(Point::ORIGIN, Point::new(100.0, 100.0), 0, 3);
    assert!(bad.is_err());
    assert_eq!(store.color_at(addr(0, 0)), Some(Color::RED));
}

#[test]
fn test_cell_at_point_uses_lattice() {
    let store = test_store(100.0, 50.0, 1, 4);
    assert_eq!(store.cell_at_point(Point::new(80.0, 10.0)), Some(addr(0, 3)));
    assert_eq!(store.cell_at_point(Point::new(101.0, 10.0)), None);
    assert_eq!(GridStore::new().cell_at_point(Point::new(1.0, 1.0)), None);
}

#[test]
fn test_serialize_roundtrip() {
    let mut store = test_store(200.0, 120.0, 4, 5);
    store.paint(addr(0, 4), Color::RED).unwrap();
    store.paint(addr(3, 0), Color::rgb(0x12, 0x34, 0x56)).unwrap();
    store.paint_region(addr(1, 1), addr(2, 3), GREEN).unwrap();

    let export = store.serialize().unwrap();
    let mut restored = GridStore::new();
    restored.deserialize(&export).unwrap();

    assert_eq!(restored.geometry(), store.geometry());
    assert_eq!(restored.grid(), store.grid());
}

#[test]
fn test_serialize_writes_only_non_empty_cells() {
    let mut store = test_store(100.0, 100.0, 2, 2);
    store.paint_region(addr(0, 0), addr(0, 1), Color::RED).unwrap();

    let export = store.serialize().unwrap();
    assert_eq!(export.cells.len(), 2);
    let anchor = &export.cells["0-0"];
    assert_eq!(anchor.m1.as_deref(), Some("0-0"));
    assert_eq!(anchor.m2.as_deref(), Some("0-1"));
    assert_eq!(export.cells["0-1"].m1, None);
}

#[test]
fn test_serialize_without_matrix_is_none() {
    assert!(GridStore::new().serialize().is_none());
}
