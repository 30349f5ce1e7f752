//! View module - rendering the annotation surface
//!
//! Every frame is redrawn from scratch from the model: background, image,
//! painted cells, grid lines, span outlines, then pending-selection marks.
//! Geometry is mapped world → physical through the view so stroke widths
//! scale with the device pixel ratio.

pub mod frame;

use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::Result;
use softbuffer::Surface;
use winit::window::Window;

use crate::geometry::{cell_bounds, CellAddr, Point};
use crate::grid::Cell;
use crate::image::render::render_image;
use crate::mode::PendingSelection;
use crate::model::AppModel;

pub use frame::{Frame, Rect};

const BACKGROUND: u32 = 0xFF1E1E1E;
const SELECTION_OUTLINE: u32 = 0xFFFFD700;
const CORNER_MARKER: u32 = 0xFF00E5FF;
const SPAN_OUTLINE_WIDTH: f64 = 2.0;
const SELECTION_OUTLINE_WIDTH: f64 = 3.0;
const CORNER_MARKER_SIZE: f64 = 6.0;

/// Owns the softbuffer surface and a back buffer the scene is drawn into
pub struct Renderer {
    surface: Surface<Rc<Window>, Rc<Window>>,
    back_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(window: Rc<Window>, context: &softbuffer::Context<Rc<Window>>) -> Result<Self> {
        let size = window.inner_size();
        let mut surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create surface: {}", e))?;

        let (width, height) = (size.width.max(1), size.height.max(1));
        surface
            .resize(non_zero(width), non_zero(height))
            .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;

        Ok(Self {
            surface,
            back_buffer: vec![0u32; (width as usize) * (height as usize)],
            width,
            height,
        })
    }

    pub fn render(&mut self, model: &AppModel) -> Result<()> {
        let (width, height) = (model.window_size.0.max(1), model.window_size.1.max(1));
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.back_buffer
                .resize((width as usize) * (height as usize), 0);
            self.surface
                .resize(non_zero(width), non_zero(height))
                .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;
        }

        {
            let mut frame = Frame::new(&mut self.back_buffer, width as usize, height as usize);
            render_scene(&mut frame, model);
        }

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("Failed to get surface buffer: {}", e))?;
        buffer.copy_from_slice(&self.back_buffer);
        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("Failed to present buffer: {}", e))?;

        Ok(())
    }
}

fn non_zero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}

/// Draw the whole scene for `model` into `frame`
pub fn render_scene(frame: &mut Frame, model: &AppModel) {
    frame.clear(BACKGROUND);

    if let Some(image) = &model.document.image {
        render_image(frame, image, &model.view);
    }

    if model.document.is_defined() {
        render_cells(frame, model);
        render_grid_lines(frame, model);
        render_span_outlines(frame, model);
    }

    render_pending(frame, model);
}

/// Physical-pixel rectangle covering cells `start..=end`
fn span_rect(model: &AppModel, start: CellAddr, end: CellAddr) -> Option<Rect> {
    let lattice = model.document.store.lattice();
    let (tl, _) = cell_bounds(lattice, start)?;
    let (_, br) = cell_bounds(lattice, end)?;
    Some(Rect::from_corners(
        model.view.world_to_screen(tl),
        model.view.world_to_screen(br),
    ))
}

fn render_cells(frame: &mut Frame, model: &AppModel) {
    let alpha = model.config.cell_alpha as f32;
    for (addr, cell) in model.document.store.grid().iter() {
        let Some(color) = cell.color() else {
            continue;
        };
        if let Some(rect) = span_rect(model, addr, addr) {
            frame.blend_rect(rect, color.to_argb_u32(), alpha);
        }
    }
}

fn render_grid_lines(frame: &mut Frame, model: &AppModel) {
    let lattice = model.document.store.lattice();
    let (Some(first_row), Some(last_row)) = (lattice.first(), lattice.last()) else {
        return;
    };
    let thickness = model.view.device_scale.max(1.0);
    let color = model.config.grid_line_color.to_argb_u32();
    let alpha = model.config.grid_line_alpha as f32;
    let view = &model.view;

    for row in lattice {
        if let (Some(left), Some(right)) = (row.first(), row.last()) {
            let a = view.world_to_screen(*left);
            let b = view.world_to_screen(*right);
            frame.hline(a.x, b.x, a.y, thickness, color, alpha);
        }
    }
    for (top, bottom) in first_row.iter().zip(last_row) {
        let a = view.world_to_screen(*top);
        let b = view.world_to_screen(*bottom);
        frame.vline(a.x, a.y, b.y, thickness, color, alpha);
    }
}

fn render_span_outlines(frame: &mut Frame, model: &AppModel) {
    let thickness = SPAN_OUTLINE_WIDTH * model.view.device_scale;
    for (_, cell) in model.document.store.grid().iter() {
        if let Cell::SpanAnchor { color, start, end } = cell {
            if let Some(rect) = span_rect(model, *start, *end) {
                frame.stroke_rect(rect, thickness, color.to_argb_u32());
            }
        }
    }
}

fn render_pending(frame: &mut Frame, model: &AppModel) {
    let scale = model.view.device_scale;
    let selection = match model.mode.pending() {
        PendingSelection::SubmatrixStart(start) => Some((start, start)),
        PendingSelection::AwaitingColor { start, end } => Some(CellAddr::normalize(start, end)),
        PendingSelection::AutoCornerAwaitingBottomRight => {
            if let (Ok(x), Ok(y)) = (
                model.form.top_left_x.parse::<f64>(),
                model.form.top_left_y.parse::<f64>(),
            ) {
                let p = model.view.world_to_screen(Point::new(x, y));
                let size = CORNER_MARKER_SIZE * scale;
                frame.hline(p.x - size, p.x + size, p.y, scale, CORNER_MARKER, 1.0);
                frame.vline(p.x, p.y - size, p.y + size, scale, CORNER_MARKER, 1.0);
            }
            None
        }
        PendingSelection::None => None,
    };

    if let Some((start, end)) = selection {
        if let Some(rect) = span_rect(model, start, end) {
            frame.stroke_rect(rect, SELECTION_OUTLINE_WIDTH * scale, SELECTION_OUTLINE);
        }
    }
}
