//! Image rendering for the view layer
//!
//! Maps every framebuffer pixel back through the view transform and samples
//! the image with nearest-neighbour lookup. Transparent pixels show a
//! checkerboard.

use crate::image::ImageState;
use crate::viewport::ViewState;
use crate::view::frame::{blend_colors, Frame};

const CHECKER_CELL: usize = 8;
const CHECKER_LIGHT: u32 = 0xFF3C3C3C;
const CHECKER_DARK: u32 = 0xFF2A2A2A;

/// Draw `image` with its top-left at world origin under the current view
pub fn render_image(frame: &mut Frame, image: &ImageState, view: &ViewState) {
    if image.width == 0 || image.height == 0 {
        return;
    }

    // Visible physical extent of the image, clipped to the frame
    let top_left = view.world_to_screen(crate::geometry::Point::ORIGIN);
    let bottom_right = view.world_to_screen(crate::geometry::Point::new(
        image.width as f64,
        image.height as f64,
    ));
    let x_start = top_left.x.max(0.0).floor() as usize;
    let y_start = top_left.y.max(0.0).floor() as usize;
    let x_end = (bottom_right.x.max(0.0).ceil() as usize).min(frame.width());
    let y_end = (bottom_right.y.max(0.0).ceil() as usize).min(frame.height());
    if x_start >= x_end || y_start >= y_end {
        return;
    }

    let cell = (CHECKER_CELL as f64 * view.device_scale).round().max(1.0) as usize;
    let buf_width = frame.width();
    let img_w = image.width;
    let img_h = image.height;

    // Source column for each destination column, computed once per frame
    let src_cols: Vec<Option<u32>> = (x_start..x_end)
        .map(|sx| {
            let world_x = (sx as f64 + 0.5) / view.device_scale;
            let img_x = ((world_x - view.pan.x) / view.zoom).floor();
            (img_x >= 0.0 && img_x < img_w as f64).then_some(img_x as u32)
        })
        .collect();

    let buffer = frame.buffer_mut();
    for sy in y_start..y_end {
        let world_y = (sy as f64 + 0.5) / view.device_scale;
        let img_y = ((world_y - view.pan.y) / view.zoom).floor();
        if img_y < 0.0 || img_y >= img_h as f64 {
            continue;
        }
        let img_y = img_y as u32;
        let row_start = sy * buf_width;

        for (offset, src_x) in src_cols.iter().enumerate() {
            let Some(img_x) = *src_x else {
                continue;
            };
            let sx = x_start + offset;
            let Some([r, g, b, a]) = image.pixel(img_x, img_y) else {
                continue;
            };

            let argb = 0xFF000000 | ((r as u32) << 16) | ((g as u32) << 8) | b as u32;
            let idx = row_start + sx;
            buffer[idx] = match a {
                255 => argb,
                _ => {
                    let bg = if ((sx / cell) ^ (sy / cell)) & 1 == 0 {
                        CHECKER_LIGHT
                    } else {
                        CHECKER_DARK
                    };
                    blend_colors(bg, argb, a as f32 / 255.0)
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> ImageState {
        ImageState {
            pixels: rgba.repeat((width * height) as usize),
            width,
            height,
            encoded: Vec::new(),
            mime: "image/png".to_string(),
        }
    }

    #[test]
    fn test_image_drawn_at_pan_offset() {
        let image = solid(4, 4, [255, 0, 0, 255]);
        let mut view = ViewState::new(20, 20, 1.0);
        view.pan = Point::new(5.0, 5.0);
        let mut buffer = vec![0u32; 20 * 20];
        let mut frame = Frame::new(&mut buffer, 20, 20);

        render_image(&mut frame, &image, &view);

        assert_eq!(frame.get_pixel(5, 5), 0xFFFF0000);
        assert_eq!(frame.get_pixel(8, 8), 0xFFFF0000);
        assert_eq!(frame.get_pixel(4, 4), 0);
        assert_eq!(frame.get_pixel(9, 9), 0);
    }

    #[test]
    fn test_device_scale_doubles_footprint() {
        let image = solid(2, 2, [0, 0, 255, 255]);
        let view = ViewState::new(20, 20, 2.0);
        let mut buffer = vec![0u32; 20 * 20];
        let mut frame = Frame::new(&mut buffer, 20, 20);

        render_image(&mut frame, &image, &view);

        assert_eq!(frame.get_pixel(3, 3), 0xFF0000FF);
        assert_eq!(frame.get_pixel(4, 4), 0);
    }
}
