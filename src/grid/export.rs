//! Project file format
//!
//! ```json
//! {
//!   "image": "data:image/png;base64,...",
//!   "matrix": {
//!     "rows": 2, "cols": 2,
//!     "topLeft": [0, 0], "bottomRight": [100, 100],
//!     "cells": { "0-0": { "m1": "0-0", "m2": "1-1", "color": "#ff0000" } }
//!   }
//! }
//! ```
//!
//! Only non-empty cells are written; `m1`/`m2` appear on anchor cells only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Cell, Color, Grid};
use crate::error::{AnnotateError, Result};
use crate::geometry::{CellAddr, GridGeometry, Point};

/// One exported cell entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellExport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl CellExport {
    fn from_cell(cell: &Cell) -> Option<Self> {
        match cell {
            Cell::Empty => None,
            Cell::Painted { color } => Some(Self {
                color: Some(*color),
                ..Default::default()
            }),
            Cell::SpanAnchor { color, start, end } => Some(Self {
                m1: Some(start.key()),
                m2: Some(end.key()),
                color: Some(*color),
            }),
        }
    }

    /// Rebuild the cell. Spans are trusted as given; an entry without a colour
    /// is an empty cell.
    fn to_cell(&self) -> Cell {
        let Some(color) = self.color else {
            return Cell::Empty;
        };
        let start = self.m1.as_deref().and_then(CellAddr::parse_key);
        let end = self.m2.as_deref().and_then(CellAddr::parse_key);
        match (start, end) {
            (Some(start), Some(end)) => Cell::SpanAnchor { color, start, end },
            _ => Cell::Painted { color },
        }
    }
}

/// The `matrix` object of a project file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridExport {
    pub rows: usize,
    pub cols: usize,
    pub top_left: [f64; 2],
    pub bottom_right: [f64; 2],
    #[serde(default)]
    pub cells: BTreeMap<String, CellExport>,
}

impl GridExport {
    pub fn from_grid(geometry: &GridGeometry, grid: &Grid) -> Self {
        let cells = grid
            .iter()
            .filter_map(|(addr, cell)| CellExport::from_cell(cell).map(|entry| (addr.key(), entry)))
            .collect();
        Self {
            rows: geometry.rows(),
            cols: geometry.cols(),
            top_left: geometry.top_left().to_pair(),
            bottom_right: geometry.bottom_right().to_pair(),
            cells,
        }
    }

    /// Validated geometry described by this export
    pub fn geometry(&self) -> Result<GridGeometry> {
        GridGeometry::new(
            Point::from_pair(self.top_left),
            Point::from_pair(self.bottom_right),
            self.rows,
            self.cols,
        )
    }

    /// Decoded non-empty cells that fall inside `geometry`.
    ///
    /// Malformed or out-of-range keys are skipped with a warning.
    pub fn cells_for(&self, geometry: &GridGeometry) -> Vec<(CellAddr, Cell)> {
        self.cells
            .iter()
            .filter_map(|(key, entry)| {
                let Some(addr) = CellAddr::parse_key(key) else {
                    tracing::warn!(key = %key, "skipping malformed cell key");
                    return None;
                };
                if !geometry.contains(addr) {
                    tracing::warn!(key = %key, "skipping cell outside the matrix");
                    return None;
                }
                let cell = entry.to_cell();
                (!cell.is_empty()).then_some((addr, cell))
            })
            .collect()
    }
}

/// A complete exported project: source image plus annotated matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Data URL of the source image, or empty when none was loaded
    #[serde(default)]
    pub image: String,
    pub matrix: GridExport,
}

impl ProjectFile {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AnnotateError::ImportParseFailure(format!("could not encode project: {}", e)))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| AnnotateError::ImportParseFailure(e.to_string()))
    }
}
