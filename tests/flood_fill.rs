//! Tests for flood fill region semantics

mod common;

use common::{addr, test_store, BLUE, GREEN};
use gridpaint::grid::{flood_fill, Color, GridStore};

/// 4x4 store with a red wall down column 1
fn walled_store() -> GridStore {
    let mut store = test_store(40.0, 40.0, 4, 4);
    for row in 0..4 {
        store.paint(addr(row, 1), Color::RED).unwrap();
    }
    store
}

#[test]
fn test_fill_empty_region_stops_at_wall() {
    let mut store = walled_store();
    let filled = flood_fill(&mut store, addr(0, 0), BLUE).unwrap();

    assert_eq!(filled, 4);
    for row in 0..4 {
        assert_eq!(store.color_at(addr(row, 0)), Some(BLUE));
        assert_eq!(store.color_at(addr(row, 1)), Some(Color::RED));
        assert_eq!(store.color_at(addr(row, 3)), None);
    }
}

#[test]
fn test_fill_is_idempotent() {
    let mut store = walled_store();
    assert_eq!(flood_fill(&mut store, addr(2, 3), GREEN).unwrap(), 8);
    let after_first = store.snapshot();

    assert_eq!(flood_fill(&mut store, addr(2, 3), GREEN).unwrap(), 0);
    assert_eq!(store.snapshot(), after_first);
}

#[test]
fn test_fill_never_touches_other_colours() {
    let mut store = test_store(50.0, 50.0, 5, 5);
    // Checkerboard of red and blue, plus an empty diagonal gap
    for row in 0..5 {
        for col in 0..5 {
            if row == col {
                continue;
            }
            let color = if (row + col) % 2 == 0 { Color::RED } else { BLUE };
            store.paint(addr(row, col), color).unwrap();
        }
    }
    let before = store.snapshot();

    flood_fill(&mut store, addr(0, 1), GREEN).unwrap();

    for row in 0..5 {
        for col in 0..5 {
            let cell = addr(row, col);
            let was = before.get(cell).and_then(|c| c.color());
            let now = store.color_at(cell);
            if was != Some(BLUE) {
                assert_eq!(now, was, "cell {} changed", cell.key());
            }
        }
    }
    // Blue cells are never 4-adjacent to each other on a checkerboard
    assert_eq!(store.color_at(addr(0, 1)), Some(GREEN));
    assert_eq!(store.color_at(addr(0, 3)), Some(BLUE));
}

#[test]
fn test_fill_recolours_anchor_but_keeps_span() {
    let mut store = test_store(30.0, 30.0, 3, 3);
    store.paint_region(addr(0, 0), addr(1, 1), Color::RED).unwrap();

    assert_eq!(flood_fill(&mut store, addr(1, 1), BLUE).unwrap(), 4);
    assert_eq!(store.color_at(addr(0, 0)), Some(BLUE));
    assert_eq!(
        store.cell(addr(0, 0)).and_then(|c| c.span()),
        Some((addr(0, 0), addr(1, 1)))
    );
}

#[test]
fn test_fill_large_grid_does_not_overflow() {
    let mut store = test_store(1000.0, 1000.0, 500, 500);
    let filled = flood_fill(&mut store, addr(250, 250), Color::RED).unwrap();
    assert_eq!(filled, 250_000);
}

#[test]
fn test_fill_out_of_range() {
    let mut store = test_store(10.0, 10.0, 1, 1);
    assert!(flood_fill(&mut store, addr(1, 0), Color::RED).is_err());
}
