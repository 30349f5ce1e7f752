//! View/transform controller
//!
//! Owns zoom, pan and the device pixel ratio. Stored geometry is always in
//! logical units; the device scale is applied only when mapping to physical
//! framebuffer pixels, and divided back out when hit-testing pointer input.

use crate::geometry::{screen_to_world, world_to_screen, Point};

/// Minimum zoom level (10%)
pub const MIN_ZOOM: f64 = 0.1;
/// Maximum zoom level (1000%)
pub const MAX_ZOOM: f64 = 10.0;
/// Zoom change per zoom-in/zoom-out step
pub const ZOOM_STEP: f64 = 0.1;

/// Zoom bounds and step size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: MIN_ZOOM,
            max: MAX_ZOOM,
            step: ZOOM_STEP,
        }
    }
}

impl ZoomLimits {
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }
}

/// Drag state for click-and-drag panning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Pointer position when the drag started (logical screen coords)
    pub start_pointer: Point,
    /// Pan offset when the drag started
    pub start_pan: Point,
}

/// Zoom, pan and output scale for the drawing surface
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Current zoom level (1.0 = one world unit per logical pixel)
    pub zoom: f64,
    /// Pan offset in logical screen pixels
    pub pan: Point,
    /// Viewport size in logical pixels
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Physical pixels per logical pixel
    pub device_scale: f64,
    pub limits: ZoomLimits,
    /// Active pan gesture
    pub drag: Option<DragState>,
}

impl ViewState {
    /// Create a view for a physical surface size and device scale
    pub fn new(physical_width: u32, physical_height: u32, device_scale: f64) -> Self {
        let device_scale = sanitize_scale(device_scale);
        Self {
            zoom: 1.0,
            pan: Point::ORIGIN,
            viewport_width: physical_width as f64 / device_scale,
            viewport_height: physical_height as f64 / device_scale,
            device_scale,
            limits: ZoomLimits::default(),
            drag: None,
        }
    }

    pub fn with_limits(mut self, limits: ZoomLimits) -> Self {
        self.limits = limits;
        self.zoom = limits.clamp(self.zoom);
        self
    }

    /// Visual centre of the viewport in logical screen coords
    pub fn center(&self) -> Point {
        Point::new(self.viewport_width / 2.0, self.viewport_height / 2.0)
    }

    /// Set zoom, keeping the logical screen point `anchor` fixed over the same
    /// world point. Returns false if the clamped zoom did not change.
    pub fn zoom_at(&mut self, anchor: Point, new_zoom: f64) -> bool {
        let new_zoom = self.limits.clamp(new_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return false;
        }
        let old_zoom = self.zoom;
        self.pan = Point::new(
            anchor.x - (anchor.x - self.pan.x) / old_zoom * new_zoom,
            anchor.y - (anchor.y - self.pan.y) / old_zoom * new_zoom,
        );
        self.zoom = new_zoom;
        true
    }

    /// Set zoom anchored at the viewport centre
    pub fn set_zoom(&mut self, new_zoom: f64) -> bool {
        self.zoom_at(self.center(), new_zoom)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom + self.limits.step)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom - self.limits.step)
    }

    /// Shift the pan offset by a logical delta
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan = self.pan.offset(dx, dy);
    }

    /// Begin a pan gesture at a physical pointer position
    pub fn start_pan(&mut self, physical: Point) {
        self.drag = Some(DragState {
            start_pointer: self.to_logical(physical),
            start_pan: self.pan,
        });
    }

    /// Continue a pan gesture; no-op when no gesture is active
    pub fn update_pan(&mut self, physical: Point) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let pointer = self.to_logical(physical);
        self.pan = drag.start_pan.offset(
            pointer.x - drag.start_pointer.x,
            pointer.y - drag.start_pointer.y,
        );
        true
    }

    pub fn end_pan(&mut self) {
        self.drag = None;
    }

    pub fn is_panning(&self) -> bool {
        self.drag.is_some()
    }

    /// Track a new physical surface size
    pub fn resize(&mut self, physical_width: u32, physical_height: u32) {
        self.viewport_width = physical_width as f64 / self.device_scale;
        self.viewport_height = physical_height as f64 / self.device_scale;
    }

    /// Change the device pixel ratio, keeping the logical layout intact
    pub fn set_device_scale(&mut self, scale: f64, physical_width: u32, physical_height: u32) {
        self.device_scale = sanitize_scale(scale);
        self.resize(physical_width, physical_height);
    }

    /// Fit an image of the given world size into the viewport, centred.
    /// Never upscales beyond 100%.
    pub fn fit(&mut self, world_width: f64, world_height: f64) {
        let zoom = self
            .limits
            .clamp(compute_fit_scale(world_width, world_height, self.viewport_width, self.viewport_height));
        self.zoom = zoom;
        self.pan = Point::new(
            (self.viewport_width - world_width * zoom) / 2.0,
            (self.viewport_height - world_height * zoom) / 2.0,
        );
        self.drag = None;
    }

    /// Physical framebuffer point to logical screen point
    pub fn to_logical(&self, physical: Point) -> Point {
        physical.scale(1.0 / self.device_scale)
    }

    /// Physical pointer position to world coordinates
    pub fn screen_to_world(&self, physical: Point) -> Point {
        screen_to_world(self.to_logical(physical), self.pan, self.zoom)
    }

    /// World coordinates to physical framebuffer position
    pub fn world_to_screen(&self, world: Point) -> Point {
        world_to_screen(world, self.pan, self.zoom).scale(self.device_scale)
    }

    /// Zoom as a percentage integer (e.g. 150 for 1.5)
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }
}

fn sanitize_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Scale that fits `width x height` inside the viewport; 1.0 if it already fits
pub fn compute_fit_scale(width: f64, height: f64, viewport_width: f64, viewport_height: f64) -> f64 {
    if width <= 0.0 || height <= 0.0 || viewport_width <= 0.0 || viewport_height <= 0.0 {
        return 1.0;
    }
    let scale_x = viewport_width / width;
    let scale_y = viewport_height / height;
    scale_x.min(scale_y).min(1.0)
}
