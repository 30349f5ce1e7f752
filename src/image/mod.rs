//! Source image handling
//!
//! Images are decoded into RGBA pixel buffers for nearest-neighbour drawing.
//! The original encoded bytes are kept so the project file can embed the
//! image unchanged as a data URL.

pub mod render;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{AnnotateError, Result};

/// A decoded image plus its original encoding
#[derive(Debug, Clone)]
pub struct ImageState {
    /// Decoded RGBA pixel data (4 bytes per pixel)
    pub pixels: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Original encoded bytes
    pub encoded: Vec<u8>,
    /// MIME type of the encoded bytes (e.g. "image/png")
    pub mime: String,
}

impl ImageState {
    /// Decode image bytes of any supported format
    pub fn decode(encoded: Vec<u8>) -> Result<Self> {
        let format = image::guess_format(&encoded)
            .map_err(|e| AnnotateError::ImageDecodeFailure(e.to_string()))?;
        let img = image::load_from_memory_with_format(&encoded, format)
            .map_err(|e| AnnotateError::ImageDecodeFailure(e.to_string()))?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Self {
            pixels: rgba.into_raw(),
            width,
            height,
            encoded,
            mime: format.to_mime_type().to_string(),
        })
    }

    /// `data:<mime>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.encoded))
    }

    /// Decode a data URL. An empty string means "no image".
    pub fn from_data_url(url: &str) -> Result<Option<Self>> {
        let url = url.trim();
        if url.is_empty() {
            return Ok(None);
        }
        let payload = url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .map(|(_, payload)| payload)
            .ok_or_else(|| AnnotateError::ImageDecodeFailure("not a base64 data URL".to_string()))?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| AnnotateError::ImageDecodeFailure(e.to_string()))?;
        Self::decode(bytes).map(Some)
    }

    /// RGBA of the pixel at `(x, y)`, if inside the image
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        self.pixels.get(idx..idx + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// Load and decode an image file.
pub fn load_image(path: &std::path::Path) -> Result<ImageState> {
    let bytes = std::fs::read(path)
        .map_err(|e| AnnotateError::ImageDecodeFailure(format!("{}: {}", path.display(), e)))?;
    ImageState::decode(bytes)
}

/// Whether a path looks like an image we can open
pub fn is_image_file(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            matches!(
                e.to_lowercase().as_str(),
                "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "ico"
            )
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encode a small solid-colour PNG in memory
    pub(crate) fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let state = ImageState::decode(png_bytes(3, 2, [10, 20, 30, 255])).unwrap();
        assert_eq!((state.width, state.height), (3, 2));
        assert_eq!(state.mime, "image/png");
        assert_eq!(state.pixel(2, 1), Some([10, 20, 30, 255]));
        assert_eq!(state.pixel(3, 0), None);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = ImageState::decode(b"definitely not an image".to_vec());
        assert!(matches!(result, Err(AnnotateError::ImageDecodeFailure(_))));
    }

    #[test]
    fn test_data_url_roundtrip() {
        let state = ImageState::decode(png_bytes(2, 2, [1, 2, 3, 255])).unwrap();
        let url = state.to_data_url();
        assert!(url.starts_with("data:image/png;base64,"));
        let back = ImageState::from_data_url(&url).unwrap().unwrap();
        assert_eq!(back.pixels, state.pixels);
    }

    #[test]
    fn test_empty_data_url_is_no_image() {
        assert!(ImageState::from_data_url("").unwrap().is_none());
        assert!(ImageState::from_data_url("http://example.com/a.png").is_err());
    }

    #[test]
    fn test_image_file_detection() {
        use std::path::Path;
        assert!(is_image_file(Path::new("scan.PNG")));
        assert!(is_image_file(Path::new("photo.jpeg")));
        assert!(!is_image_file(Path::new("project.json")));
    }
}
