use crate::fonts::FontStyle;
use crate::model::{Alignment, Run};

pub const DEFAULT_FONT_SIZE: f32 = 12.0;
pub const DEFAULT_TEXT_COLOR: [u8; 3] = [0, 0, 0];
/// Largest size Word accepts for a run, in points.
pub const MAX_FONT_SIZE: f32 = 1638.0;

/// Horizontal alignment of text inside a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl CellAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            CellAlign::Left => "L",
            CellAlign::Center => "C",
            CellAlign::Right => "R",
        }
    }
}

impl From<Alignment> for CellAlign {
    fn from(alignment: Alignment) -> Self {
        match alignment {
            Alignment::Left => CellAlign::Left,
            Alignment::Center => CellAlign::Center,
            Alignment::Right => CellAlign::Right,
        }
    }
}

/// Half-points to points. Absent, unparseable, zero or negative sizes give the default;
/// larger sizes are capped at [`MAX_FONT_SIZE`].
pub fn resolve_font_size(half_points: Option<&str>) -> f32 {
    half_points
        .and_then(|v| v.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| (v / 2.0).min(MAX_FONT_SIZE))
        .unwrap_or(DEFAULT_FONT_SIZE)
}

/// Exactly six hex digits, read as red, green, blue.
pub fn parse_hex_color(val: &str) -> Option<[u8; 3]> {
    if val.len() != 6 || !val.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&val[0..2], 16).ok()?;
    let g = u8::from_str_radix(&val[2..4], 16).ok()?;
    let b = u8::from_str_radix(&val[4..6], 16).ok()?;
    Some([r, g, b])
}

pub fn resolve_color(hex: Option<&str>) -> [u8; 3] {
    hex.and_then(parse_hex_color).unwrap_or(DEFAULT_TEXT_COLOR)
}

/// Fully resolved formatting for one run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunStyle {
    pub font: FontStyle,
    pub size: f32,
    pub color: [u8; 3],
}

impl RunStyle {
    pub fn resolve(run: &Run) -> Self {
        Self {
            font: FontStyle::from_flags(run.bold, run.italic),
            size: resolve_font_size(run.font_size_half_points.as_deref()),
            color: resolve_color(run.color_hex.as_deref()),
        }
    }
}

impl Default for RunStyle {
    fn default() -> Self {
        Self {
            font: FontStyle::Regular,
            size: DEFAULT_FONT_SIZE,
            color: DEFAULT_TEXT_COLOR,
        }
    }
}
