use clap::Parser;
use egui::Color32;

use crate::chart::ChartKind;
use crate::style::{ChartStyle, parse_hex_color};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Animated sine chart", long_about = None)]
pub struct Args {
    /// Chart shown at startup
    #[arg(long, value_enum, default_value_t = ChartKind::Line)]
    pub chart_type: ChartKind,

    /// Initial animation duration in seconds
    #[arg(long, default_value = "10")]
    pub duration: String,

    #[arg(long, value_parser = parse_hex_color, default_value = "#ffffff")]
    pub background: Color32,

    #[arg(long, value_parser = parse_hex_color, default_value = "#007ACC")]
    pub line_color: Color32,

    #[arg(long, value_parser = parse_hex_color, default_value = "#FF5733")]
    pub bar_color: Color32,

    #[arg(long, value_parser = parse_hex_color, default_value = "#000000")]
    pub axis_color: Color32,

    /// Loop the animation instead of stopping on the last frame
    #[arg(long)]
    pub repeat: bool,

    #[arg(long, default_value_t = 640.0)]
    pub width: f32,

    #[arg(long, default_value_t = 480.0)]
    pub height: f32,
}

impl Args {
    pub fn style(&self) -> ChartStyle {
        ChartStyle {
            background: self.background,
            line_color: self.line_color,
            bar_color: self.bar_color,
            axis_color: self.axis_color,
        }
    }
}
