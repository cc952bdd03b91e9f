#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

mod animation;
mod app;
mod chart;
mod config;
mod style;

use app::ChartAnimationApp;
use clap::Parser;
use config::Args;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([args.width, args.height]),
        ..Default::default()
    };
    eframe::run_native(
        "Animated Chart Tool (MVP)",
        options,
        Box::new(move |cc| Ok(Box::new(ChartAnimationApp::new(cc, &args)))),
    )
}
