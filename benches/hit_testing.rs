//! Benchmarks for pointer hit testing and lattice generation
//!
//! Run with: cargo bench hit_testing

use gridpaint::geometry::{compute_grid_points, locate_cell, Point};
use gridpaint::viewport::ViewState;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

// ============================================================================
// Lattice generation
// ============================================================================

#[divan::bench(args = [16, 64, 256])]
fn compute_lattice(size: usize) {
    let lattice = compute_grid_points(
        divan::black_box(Point::new(12.0, 34.0)),
        divan::black_box(Point::new(1890.0, 1070.0)),
        size,
        size,
    );
    divan::black_box(lattice);
}

// ============================================================================
// locate_cell: near corner (early exit) vs far corner (full scan)
// ============================================================================

#[divan::bench(args = [16, 64, 256])]
fn locate_first_cell(bencher: divan::Bencher, size: usize) {
    let lattice = compute_grid_points(Point::ORIGIN, Point::new(1000.0, 1000.0), size, size).unwrap();
    bencher.bench_local(|| locate_cell(divan::black_box(Point::new(0.5, 0.5)), &lattice));
}

#[divan::bench(args = [16, 64, 256])]
fn locate_last_cell(bencher: divan::Bencher, size: usize) {
    let lattice = compute_grid_points(Point::ORIGIN, Point::new(1000.0, 1000.0), size, size).unwrap();
    bencher.bench_local(|| locate_cell(divan::black_box(Point::new(999.5, 999.5)), &lattice));
}

#[divan::bench(args = [16, 64, 256])]
fn locate_miss(bencher: divan::Bencher, size: usize) {
    let lattice = compute_grid_points(Point::ORIGIN, Point::new(1000.0, 1000.0), size, size).unwrap();
    bencher.bench_local(|| locate_cell(divan::black_box(Point::new(-5.0, 2000.0)), &lattice));
}

// ============================================================================
// Full pointer path: physical → world → cell
// ============================================================================

#[divan::bench]
fn pointer_to_cell() {
    let mut view = ViewState::new(2560, 1440, 2.0);
    view.fit(1000.0, 1000.0);
    let lattice = compute_grid_points(Point::ORIGIN, Point::new(1000.0, 1000.0), 64, 64).unwrap();

    for x in (0..2560).step_by(97) {
        let world = view.screen_to_world(Point::new(x as f64, 720.0));
        divan::black_box(locate_cell(world, &lattice));
    }
}
