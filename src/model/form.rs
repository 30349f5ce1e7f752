//! Matrix definition form
//!
//! The six text fields the user fills in before drawing a matrix. Values are
//! kept as typed text and only validated when the matrix is drawn.

use crate::error::{AnnotateError, Result};
use crate::geometry::{GridGeometry, Point};

/// One editable field of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    TopLeftX,
    TopLeftY,
    BottomRightX,
    BottomRightY,
    Rows,
    Cols,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::TopLeftX,
        FormField::TopLeftY,
        FormField::BottomRightX,
        FormField::BottomRightY,
        FormField::Rows,
        FormField::Cols,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::TopLeftX => "Top-left X",
            FormField::TopLeftY => "Top-left Y",
            FormField::BottomRightX => "Bottom-right X",
            FormField::BottomRightY => "Bottom-right Y",
            FormField::Rows => "Rows",
            FormField::Cols => "Cols",
        }
    }

    /// Field after this one, wrapping around
    pub fn next(&self) -> FormField {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn is_count(&self) -> bool {
        matches!(self, FormField::Rows | FormField::Cols)
    }
}

/// Text of the corner and row/column inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridForm {
    pub top_left_x: String,
    pub top_left_y: String,
    pub bottom_right_x: String,
    pub bottom_right_y: String,
    pub rows: String,
    pub cols: String,
    /// Field receiving typed characters, if any
    pub focused: Option<FormField>,
}

impl GridForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::TopLeftX => &self.top_left_x,
            FormField::TopLeftY => &self.top_left_y,
            FormField::BottomRightX => &self.bottom_right_x,
            FormField::BottomRightY => &self.bottom_right_y,
            FormField::Rows => &self.rows,
            FormField::Cols => &self.cols,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::TopLeftX => &mut self.top_left_x,
            FormField::TopLeftY => &mut self.top_left_y,
            FormField::BottomRightX => &mut self.bottom_right_x,
            FormField::BottomRightY => &mut self.bottom_right_y,
            FormField::Rows => &mut self.rows,
            FormField::Cols => &mut self.cols,
        }
    }

    /// Write a picked corner as whole world units
    pub fn set_top_left(&mut self, point: Point) {
        self.top_left_x = format_coord(point.x);
        self.top_left_y = format_coord(point.y);
    }

    pub fn set_bottom_right(&mut self, point: Point) {
        self.bottom_right_x = format_coord(point.x);
        self.bottom_right_y = format_coord(point.y);
    }

    /// Mirror an established geometry back into the fields (after import)
    pub fn fill_from(&mut self, geometry: &GridGeometry) {
        self.top_left_x = format_value(geometry.top_left().x);
        self.top_left_y = format_value(geometry.top_left().y);
        self.bottom_right_x = format_value(geometry.bottom_right().x);
        self.bottom_right_y = format_value(geometry.bottom_right().y);
        self.rows = geometry.rows().to_string();
        self.cols = geometry.cols().to_string();
    }

    /// Whether every field has some text
    pub fn is_complete(&self) -> bool {
        FormField::ALL.iter().all(|f| !self.field(*f).trim().is_empty())
    }

    /// Validate the fields into a geometry
    pub fn parse(&self) -> Result<GridGeometry> {
        let top_left = Point::new(
            parse_coord(FormField::TopLeftX, &self.top_left_x)?,
            parse_coord(FormField::TopLeftY, &self.top_left_y)?,
        );
        let bottom_right = Point::new(
            parse_coord(FormField::BottomRightX, &self.bottom_right_x)?,
            parse_coord(FormField::BottomRightY, &self.bottom_right_y)?,
        );
        let rows = parse_count(FormField::Rows, &self.rows)?;
        let cols = parse_count(FormField::Cols, &self.cols)?;
        GridGeometry::new(top_left, bottom_right, rows, cols)
    }

    /// Nudge the row count, never below 1. Returns false if nothing changed.
    pub fn adjust_rows(&mut self, delta: i64) -> bool {
        adjust_count(&mut self.rows, delta)
    }

    pub fn adjust_cols(&mut self, delta: i64) -> bool {
        adjust_count(&mut self.cols, delta)
    }

    /// Move focus to the next field (or the first one)
    pub fn focus_next(&mut self) {
        self.focused = Some(match self.focused {
            Some(field) => field.next(),
            None => FormField::TopLeftX,
        });
    }

    /// Type a character into the focused field. Only characters that can
    /// appear in the field's value are accepted.
    pub fn insert_char(&mut self, ch: char) -> bool {
        let Some(field) = self.focused else {
            return false;
        };
        let accepted = if field.is_count() {
            ch.is_ascii_digit()
        } else {
            ch.is_ascii_digit() || ch == '.' || ch == '-'
        };
        if accepted {
            self.field_mut(field).push(ch);
        }
        accepted
    }

    pub fn backspace(&mut self) -> bool {
        match self.focused {
            Some(field) => self.field_mut(field).pop().is_some(),
            None => false,
        }
    }

    /// `Rows: 12` style description of the focused field
    pub fn focused_summary(&self) -> Option<String> {
        self.focused
            .map(|field| format!("{}: {}_", field.label(), self.field(field)))
    }
}

fn parse_coord(field: FormField, text: &str) -> Result<f64> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| AnnotateError::InvalidGeometry(format!("{} is not a number", field.label())))?;
    if !value.is_finite() {
        return Err(AnnotateError::InvalidGeometry(format!(
            "{} is not a finite number",
            field.label()
        )));
    }
    Ok(value)
}

fn parse_count(field: FormField, text: &str) -> Result<usize> {
    let value: i64 = text.trim().parse().map_err(|_| {
        AnnotateError::InvalidGeometry(format!("{} must be a whole number", field.label()))
    })?;
    if value <= 0 {
        return Err(AnnotateError::InvalidGeometry(format!(
            "{} must be positive",
            field.label()
        )));
    }
    Ok(value as usize)
}

fn adjust_count(text: &mut String, delta: i64) -> bool {
    let current: i64 = text.trim().parse().unwrap_or(0);
    let next = current.saturating_add(delta).max(1);
    if next == current {
        return false;
    }
    *text = next.to_string();
    true
}

fn format_coord(value: f64) -> String {
    format!("{}", value.round() as i64)
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
