//! Document - the annotated matrix, its undo history and the source image
//!
//! Every mutating operation here takes its history snapshot before touching
//! the grid, so one call is one undo step.

use std::path::PathBuf;

use crate::error::{AnnotateError, Result};
use crate::geometry::{CellAddr, GridGeometry};
use crate::grid::{flood_fill, Color, GridStore, ProjectFile};
use crate::history::History;
use crate::image::ImageState;

/// The annotation document
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Matrix geometry and cells
    pub store: GridStore,
    /// Undo/redo snapshots of `store`
    pub history: History,
    /// Source image, if one is loaded
    pub image: Option<ImageState>,
    /// File the image was loaded from
    pub image_path: Option<PathBuf>,
    /// Last project file imported or exported
    pub project_path: Option<PathBuf>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_undo_steps(max_steps: Option<usize>) -> Self {
        Self {
            history: History::with_max_steps(max_steps),
            ..Self::default()
        }
    }

    /// Establish a fresh matrix. Discards all cells and restarts history.
    pub fn define_grid(&mut self, geometry: GridGeometry) -> Result<()> {
        self.store.define_grid(geometry)?;
        self.history.reset(self.store.snapshot());
        Ok(())
    }

    pub fn is_defined(&self) -> bool {
        self.store.is_defined()
    }

    /// Replace the image. Image replacement is not an undoable step.
    pub fn set_image(&mut self, image: ImageState, path: Option<PathBuf>) {
        tracing::info!(width = image.width, height = image.height, "image loaded");
        self.image = Some(image);
        self.image_path = path;
    }

    /// Record the current cells as an undo step
    pub fn record(&mut self) {
        self.history.snapshot(&self.store);
    }

    fn check(&self, addr: CellAddr) -> Result<()> {
        match self.store.cell(addr) {
            Some(_) => Ok(()),
            None => Err(AnnotateError::CellOutOfRange {
                row: addr.row,
                col: addr.col,
            }),
        }
    }

    /// Snapshot, then paint one cell
    pub fn paint(&mut self, addr: CellAddr, color: Color) -> Result<()> {
        self.check(addr)?;
        self.record();
        self.store.paint(addr, color)
    }

    /// Snapshot, then erase one cell
    pub fn erase(&mut self, addr: CellAddr) -> Result<()> {
        self.check(addr)?;
        self.record();
        self.store.erase(addr)
    }

    /// Snapshot, then flood fill. Returns the number of cells recoloured;
    /// filling a region with its own colour records nothing.
    pub fn fill(&mut self, addr: CellAddr, color: Color) -> Result<usize> {
        self.check(addr)?;
        if self.store.color_at(addr) == Some(color) {
            return Ok(0);
        }
        self.record();
        flood_fill(&mut self.store, addr, color)
    }

    /// Snapshot, then paint a merged submatrix
    pub fn paint_region(&mut self, a: CellAddr, b: CellAddr, color: Color) -> Result<()> {
        self.check(a)?;
        self.check(b)?;
        self.record();
        self.store.paint_region(a, b, color)
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.store)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.store)
    }

    /// Build the project file, or `None` when no matrix is defined
    pub fn export(&self) -> Option<ProjectFile> {
        let matrix = self.store.serialize()?;
        let image = self
            .image
            .as_ref()
            .map(ImageState::to_data_url)
            .unwrap_or_default();
        Some(ProjectFile { image, matrix })
    }

    /// Replace image, geometry and cells from a project file.
    ///
    /// All-or-nothing: on any error the document is left untouched.
    pub fn import(&mut self, project: &ProjectFile) -> Result<()> {
        let image = ImageState::from_data_url(&project.image)
            .map_err(|e| AnnotateError::ImportParseFailure(e.to_string()))?;
        let mut store = GridStore::new();
        store.deserialize(&project.matrix).map_err(|e| match e {
            AnnotateError::ImportParseFailure(_) => e,
            other => AnnotateError::ImportParseFailure(other.to_string()),
        })?;

        self.store = store;
        self.history.reset(self.store.snapshot());
        self.image = image;
        self.image_path = None;
        tracing::info!(
            painted = self.store.grid().painted_count(),
            has_image = self.image.is_some(),
            "project imported"
        );
        Ok(())
    }

    /// Parse and import project JSON
    pub fn import_json(&mut self, content: &str) -> Result<()> {
        let project = ProjectFile::from_json(content)?;
        self.import(&project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn defined(rows: usize, cols: usize) -> Document {
        let mut doc = Document::new();
        doc.define_grid(
            GridGeometry::new(Point::ORIGIN, Point::new(cols as f64 * 10.0, rows as f64 * 10.0), rows, cols)
                .unwrap(),
        )
        .unwrap();
        doc
    }

    #[test]
    fn test_paint_is_one_undo_step() {
        let mut doc = defined(2, 2);
        doc.paint(CellAddr::new(0, 0), Color::RED).unwrap();
        assert_eq!(doc.history.undo_depth(), 1);
        assert!(doc.undo());
        assert_eq!(doc.store.color_at(CellAddr::new(0, 0)), None);
    }

    #[test]
    fn test_out_of_range_records_nothing() {
        let mut doc = defined(2, 2);
        let result = doc.paint(CellAddr::new(5, 5), Color::RED);
        assert!(matches!(result, Err(AnnotateError::CellOutOfRange { .. })));
        assert_eq!(doc.history.undo_depth(), 0);
    }

    #[test]
    fn test_same_color_fill_records_nothing() {
        let mut doc = defined(2, 2);
        doc.fill(CellAddr::new(0, 0), Color::RED).unwrap();
        assert_eq!(doc.history.undo_depth(), 1);
        assert_eq!(doc.fill(CellAddr::new(1, 1), Color::RED).unwrap(), 0);
        assert_eq!(doc.history.undo_depth(), 1);
    }

    #[test]
    fn test_define_grid_resets_history() {
        let mut doc = defined(2, 2);
        doc.paint(CellAddr::new(0, 0), Color::RED).unwrap();
        doc.define_grid(GridGeometry::new(Point::ORIGIN, Point::new(5.0, 5.0), 3, 3).unwrap())
            .unwrap();
        assert!(!doc.undo());
        assert_eq!(doc.store.grid().painted_count(), 0);
    }

    #[test]
    fn test_export_requires_grid() {
        assert!(Document::new().export().is_none());
        let project = defined(1, 1).export().unwrap();
        assert_eq!(project.image, "");
    }

    #[test]
    fn test_failed_import_leaves_document_untouched() {
        let mut doc = defined(2, 2);
        doc.paint(CellAddr::new(1, 1), Color::RED).unwrap();
        let before = doc.store.snapshot();

        let bad_geometry = r#"{"image":"","matrix":{"rows":0,"cols":2,"topLeft":[0,0],"bottomRight":[1,1]}}"#;
        assert!(matches!(
            doc.import_json(bad_geometry),
            Err(AnnotateError::ImportParseFailure(_))
        ));
        let bad_image = r#"{"image":"data:image/png;base64,AAAA","matrix":{"rows":1,"cols":1,"topLeft":[0,0],"bottomRight":[1,1]}}"#;
        assert!(doc.import_json(bad_image).is_err());

        assert_eq!(doc.store.snapshot(), before);
        assert_eq!(doc.history.undo_depth(), 1);
    }
}
