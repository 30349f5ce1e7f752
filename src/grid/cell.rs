//! Cell and colour types

use serde::{Deserialize, Serialize};

use crate::geometry::CellAddr;

/// An opaque RGB paint colour, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (alpha is dropped)
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("{}: {}", s, e))
        };
        match hex.len() {
            3 => {
                let short = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|e| format!("{}: {}", s, e))
                };
                Ok(Color::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 | 8 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to opaque ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        0xFF00_0000 | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Paint state of one grid cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Painted {
        color: Color,
    },
    /// Top-left cell of a merged submatrix; records the span for export
    SpanAnchor {
        color: Color,
        start: CellAddr,
        end: CellAddr,
    },
}

impl Cell {
    pub fn color(&self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Painted { color } | Cell::SpanAnchor { color, .. } => Some(*color),
        }
    }

    /// The `(start, end)` span if this is an anchor cell
    pub fn span(&self) -> Option<(CellAddr, CellAddr)> {
        match self {
            Cell::SpanAnchor { start, end, .. } => Some((*start, *end)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Replace the colour, keeping span metadata on anchors
    pub fn recolored(self, color: Color) -> Cell {
        match self {
            Cell::SpanAnchor { start, end, .. } => Cell::SpanAnchor { color, start, end },
            _ => Cell::Painted { color },
        }
    }
}
