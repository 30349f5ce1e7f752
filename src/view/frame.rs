//! Frame abstraction for drawing primitives
//!
//! Provides a simple, safe API for pixel buffer operations instead of
//! direct buffer indexing scattered throughout rendering code.

use crate::geometry::Point;

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are in ARGB format (0xAARRGGBB). `alpha` is the foreground
/// coverage in 0.0..=1.0; the result is fully opaque.
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let bg_r = ((bg >> 16) & 0xFF) as f32;
    let bg_g = ((bg >> 8) & 0xFF) as f32;
    let bg_b = (bg & 0xFF) as f32;

    let fg_r = ((fg >> 16) & 0xFF) as f32;
    let fg_g = ((fg >> 8) & 0xFF) as f32;
    let fg_b = (fg & 0xFF) as f32;

    let final_r = (bg_r * (1.0 - alpha) + fg_r * alpha) as u32;
    let final_g = (bg_g * (1.0 - alpha) + fg_g * alpha) as u32;
    let final_b = (bg_b * (1.0 - alpha) + fg_b * alpha) as u32;

    0xFF000000 | (final_r << 16) | (final_g << 8) | final_b
}

/// Axis-aligned rectangle in physical pixels (exclusive right/bottom edge)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    /// Rectangle spanned by two points in any order
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x0: a.x.min(b.x),
            y0: a.y.min(b.y),
            x1: a.x.max(b.x),
            y1: a.y.max(b.y),
        }
    }
}

/// A frame buffer wrapper providing safe drawing primitives.
///
/// All coordinates are in pixels. Out-of-bounds operations are safely clipped.
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
}

impl<'a> Frame<'a> {
    /// Create a new frame from a mutable pixel buffer
    ///
    /// If the buffer is smaller than width*height, dimensions are adjusted
    /// to match the actual buffer size to prevent out-of-bounds access.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let expected_size = width * height;
        let actual_size = buffer.len();

        let (width, height) = if actual_size < expected_size && width > 0 {
            (width, actual_size / width)
        } else {
            (width, height)
        };

        Self {
            buffer,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get mutable access to the underlying pixel buffer
    #[inline]
    pub fn buffer_mut(&mut self) -> &mut [u32] {
        self.buffer
    }

    /// Clear the entire buffer with a solid color
    #[inline]
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Get a single pixel (bounds-checked, returns 0 if out of bounds)
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x]
        } else {
            0
        }
    }

    /// Clip a float rectangle to integer pixel bounds
    fn clip(&self, rect: Rect) -> (usize, usize, usize, usize) {
        let clamp = |v: f64, max: usize| -> usize {
            if v.is_nan() || v <= 0.0 {
                0
            } else {
                (v.round() as usize).min(max)
            }
        };
        (
            clamp(rect.x0, self.width),
            clamp(rect.y0, self.height),
            clamp(rect.x1, self.width),
            clamp(rect.y1, self.height),
        )
    }

    /// Fill a rectangle with a solid color (no alpha blending)
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let (x0, y0, x1, y1) = self.clip(rect);
        for y in y0..y1 {
            let row_start = y * self.width;
            self.buffer[row_start + x0..row_start + x1.max(x0)].fill(color);
        }
    }

    /// Fill a rectangle with `color` at `alpha` coverage
    pub fn blend_rect(&mut self, rect: Rect, color: u32, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        if alpha >= 1.0 {
            return self.fill_rect(rect, color | 0xFF000000);
        }

        let (x0, y0, x1, y1) = self.clip(rect);
        for y in y0..y1 {
            let row_start = y * self.width;
            for x in x0..x1 {
                let idx = row_start + x;
                self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha);
            }
        }
    }

    /// Horizontal line of the given thickness centred on `y`
    pub fn hline(&mut self, x0: f64, x1: f64, y: f64, thickness: f64, color: u32, alpha: f32) {
        let half = thickness / 2.0;
        self.blend_rect(
            Rect {
                x0: x0.min(x1) - half,
                y0: y - half,
                x1: x0.max(x1) + half,
                y1: y + half,
            },
            color,
            alpha,
        );
    }

    /// Vertical line of the given thickness centred on `x`
    pub fn vline(&mut self, x: f64, y0: f64, y1: f64, thickness: f64, color: u32, alpha: f32) {
        let half = thickness / 2.0;
        self.blend_rect(
            Rect {
                x0: x - half,
                y0: y0.min(y1),
                x1: x + half,
                y1: y0.max(y1),
            },
            color,
            alpha,
        );
    }

    /// Outline a rectangle with lines of the given thickness
    pub fn stroke_rect(&mut self, rect: Rect, thickness: f64, color: u32) {
        self.hline(rect.x0, rect.x1, rect.y0, thickness, color, 1.0);
        self.hline(rect.x0, rect.x1, rect.y1, thickness, color, 1.0);
        self.vline(rect.x0, rect.y0, rect.y1, thickness, color, 1.0);
        self.vline(rect.x1, rect.y0, rect.y1, thickness, color, 1.0);
    }
}
