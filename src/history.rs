//! Snapshot-based undo/redo over the grid store
//!
//! The undo stack always holds at least one entry, the floor that undo stops
//! at. Unbounded, the floor is the grid right after the most recent definition
//! or import. With a step cap, trimming drops the floor and the oldest
//! surviving snapshot takes its place.

use crate::grid::{Grid, GridStore};

/// Undo/redo stacks of independent grid copies
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<Grid>,
    redo_stack: Vec<Grid>,
    /// Undo steps kept above the floor; `None` keeps every step
    max_steps: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_max_steps(None)
    }

    pub fn with_max_steps(max_steps: Option<usize>) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_steps: max_steps.map(|n| n.max(1)),
        }
    }

    /// Drop everything and start over with `baseline` as the floor
    pub fn reset(&mut self, baseline: Grid) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.undo_stack.push(baseline);
    }

    /// Record the pre-mutation state. Call before every mutation.
    pub fn snapshot(&mut self, store: &GridStore) {
        self.redo_stack.clear();
        self.undo_stack.push(store.snapshot());

        if let Some(max_steps) = self.max_steps {
            let excess = self.undo_stack.len().saturating_sub(max_steps + 1);
            self.undo_stack.drain(..excess);
        }
    }

    /// Step back one snapshot. Returns false at the baseline floor.
    pub fn undo(&mut self, store: &mut GridStore) -> bool {
        if self.undo_stack.len() <= 1 {
            return false;
        }
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(store.snapshot());
        store.restore(previous);
        true
    }

    /// Re-apply the last undone step
    pub fn redo(&mut self, store: &mut GridStore) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(store.snapshot());
        store.restore(next);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Undo steps available above the floor
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len().saturating_sub(1)
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// The floor entry undo stops at, if any grid has been established
    pub fn floor(&self) -> Option<&Grid> {
        self.undo_stack.first()
    }
}
