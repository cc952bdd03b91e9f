use anyhow::{Result, anyhow, bail};
use egui::Color32;
use egui::ecolor::HexColor;

use crate::chart::ChartKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub background: Color32,
    pub line_color: Color32,
    pub bar_color: Color32,
    pub axis_color: Color32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background: Color32::WHITE,
            line_color: Color32::from_rgb(0x00, 0x7A, 0xCC),
            bar_color: Color32::from_rgb(0xFF, 0x57, 0x33),
            axis_color: Color32::BLACK,
        }
    }
}

impl ChartStyle {
    pub fn series_color(&self, kind: ChartKind) -> Color32 {
        match kind {
            ChartKind::Line => self.line_color,
            ChartKind::Bar => self.bar_color,
        }
    }

    /// Only the color of `kind` changes; the other series keeps its own.
    pub fn series_color_mut(&mut self, kind: ChartKind) -> &mut Color32 {
        match kind {
            ChartKind::Line => &mut self.line_color,
            ChartKind::Bar => &mut self.bar_color,
        }
    }

    /// Apply background and axis colors to the visuals a plot reads from.
    pub fn apply_to(&self, visuals: &mut egui::Visuals) {
        visuals.extreme_bg_color = self.background;
        visuals.override_text_color = Some(self.axis_color);
        visuals.widgets.noninteractive.fg_stroke.color = self.axis_color;
        visuals.widgets.noninteractive.bg_stroke.color = self.axis_color;
    }
}

/// `#RRGGBB` or `RRGGBB`, any case.
pub fn parse_hex_color(s: &str) -> Result<Color32> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    // ecolor also takes the short and alpha forms and a leading '+'
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("invalid color {s:?}, expected #RRGGBB");
    }
    HexColor::from_str_without_hash(hex)
        .map(|h| h.color())
        .map_err(|e| anyhow!("invalid color {s:?}: {e:?}"))
}

pub fn to_hex(c: Color32) -> String {
    HexColor::Hex6(c).to_string()
}
